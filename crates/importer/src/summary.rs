use tracing::info;

/// Tally of one seed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows_deleted: u64,
    pub reference_rows_created: usize,

    pub donors_created: usize,
    pub donor_errors: usize,
    pub places_created: usize,
    pub addresses_skipped: usize,
    pub addresses_untyped: usize,
    pub countries_matched: usize,
    pub contacts_created: usize,
    pub contacts_skipped: usize,
    pub contacts_untyped: usize,
    pub companies_created: usize,

    pub donations_created: usize,
    pub donations_missing_donor: usize,
    pub donations_missing_method: usize,
    pub donations_without_amount: usize,
    pub donation_errors: usize,
    pub banks_matched: usize,
    pub organizations_matched: usize,
}

impl ImportSummary {
    pub fn donations_skipped(&self) -> usize {
        self.donations_missing_donor + self.donations_missing_method + self.donations_without_amount
    }

    pub fn log(&self) {
        info!("Summary:");
        info!("  rows deleted by reset: {}", self.rows_deleted);
        info!("  reference rows created: {}", self.reference_rows_created);
        info!(
            "  donors: {} created, {} failed",
            self.donors_created, self.donor_errors
        );
        info!(
            "  places: {} created ({} with country, {} without type), {} addresses skipped",
            self.places_created,
            self.countries_matched,
            self.addresses_untyped,
            self.addresses_skipped
        );
        info!(
            "  contacts: {} created ({} neither phone nor email), {} skipped",
            self.contacts_created, self.contacts_untyped, self.contacts_skipped
        );
        info!("  companies: {} created", self.companies_created);
        info!(
            "  donations: {} created, {} skipped ({} unknown donor, {} unknown method, {} no amount), {} failed",
            self.donations_created,
            self.donations_skipped(),
            self.donations_missing_donor,
            self.donations_missing_method,
            self.donations_without_amount,
            self.donation_errors
        );
        info!(
            "  matched: {} banks, {} organizations",
            self.banks_matched, self.organizations_matched
        );
    }
}
