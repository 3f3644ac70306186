use storage::dto::donation::NewDonation;
use storage::dto::donor::{NewDonor, NewDonorContact, NewDonorPlace, NewPlace};
use storage::repository::SeedTable;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::currency::currency_code;
use crate::matching::{match_bank, match_country, match_organization};
use crate::names::{ResolvedName, UNKNOWN_NAME};
use crate::reference::{ADDRESS_TYPE_NAMES, AddressKind, DONATION_METHOD_NAMES};
use crate::session::{ImportSession, ReferenceLists, ReferenceRows};
use crate::source::{
    AddressRecord, CompanyRecord, ContactRecord, DonationRecord, DonorRecord, RecordKind,
    SourceData, is_blank, parse_date, parse_timestamp, text,
};
use crate::{ImportSummary, ImporterError, Result, SeedStore};

const PROGRESS_INTERVAL: usize = 100;

/// Identifier stored on each place: the donor's legacy id followed by the
/// address type name. Two addresses of the same type for one donor share it.
pub fn place_key(legacy_id: &str, address_type: &str) -> String {
    format!("{}{}", legacy_id, address_type)
}

/// How a donation record ended. Only `Created` writes a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationOutcome {
    Created {
        bank_matched: bool,
        organization_matched: bool,
    },
    MissingDonor,
    MissingMethod,
    NoAmount,
}

/// Runs the seed phases against a [`SeedStore`]. There is no surrounding
/// transaction: rows written before a failure stay written.
pub struct Seeder<'a, S: SeedStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SeedStore + ?Sized> Seeder<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Reset, reference data, donors, donations, summary. Only the first two
    /// phases can fail the run; record-level failures are logged and counted.
    pub async fn run(&self, data: &SourceData) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        info!("Resetting donor tables...");
        summary.rows_deleted = self.reset().await?;

        info!("Ensuring reference data...");
        let reference_rows = self.ensure_reference_data(&mut summary).await?;
        let reference_lists = self.load_reference_lists().await?;
        let mut session = ImportSession::new(reference_rows, reference_lists);

        for rejected in &data.rejected {
            match rejected.kind {
                RecordKind::Donor => summary.donor_errors += 1,
                RecordKind::Donation => summary.donation_errors += 1,
            }
            error!(
                "Failed to read {} #{} (legacy id '{}'): {}",
                rejected.kind, rejected.position, rejected.legacy_id, rejected.reason
            );
        }

        self.import_donors(&data.donors, &mut session, &mut summary)
            .await;
        self.import_donations(&data.donations, &mut session, &mut summary)
            .await;

        summary.log();
        Ok(summary)
    }

    /// Deletes all donor-owned rows and companies, dependents first.
    pub async fn reset(&self) -> Result<u64> {
        let mut total = 0;

        for table in SeedTable::RESET_ORDER {
            let deleted = self.store.clear(table).await?;
            info!("  cleared {}: {} row(s)", table, deleted);
            total += deleted;
        }

        Ok(total)
    }

    /// Fetch-or-create every address type and donation method by exact name.
    pub async fn ensure_reference_data(&self, summary: &mut ImportSummary) -> Result<ReferenceRows> {
        let mut rows = ReferenceRows::default();

        for name in ADDRESS_TYPE_NAMES {
            let row = match self.store.find_address_type(name).await? {
                Some(row) => row,
                None => {
                    info!("  creating address type '{}'", name);
                    summary.reference_rows_created += 1;
                    self.store.create_address_type(name).await?
                }
            };
            rows.address_types.insert(name.to_string(), row);
        }

        for name in DONATION_METHOD_NAMES {
            let row = match self.store.find_donation_method(name).await? {
                Some(row) => row,
                None => {
                    info!("  creating donation method '{}'", name);
                    summary.reference_rows_created += 1;
                    self.store.create_donation_method(name).await?
                }
            };
            rows.donation_methods.insert(name.to_string(), row);
        }

        Ok(rows)
    }

    pub async fn load_reference_lists(&self) -> Result<ReferenceLists> {
        let lists = ReferenceLists {
            countries: self.store.countries().await?,
            banks: self.store.banks().await?,
            organizations: self.store.organizations().await?,
        };

        info!(
            "  preloaded {} countries, {} banks, {} organizations",
            lists.countries.len(),
            lists.banks.len(),
            lists.organizations.len()
        );

        Ok(lists)
    }

    pub async fn import_donors(
        &self,
        records: &[DonorRecord],
        session: &mut ImportSession,
        summary: &mut ImportSummary,
    ) {
        info!("Importing {} donor record(s)...", records.len());

        for (idx, record) in records.iter().enumerate() {
            if let Err(e) = self.import_donor(record, session, summary).await {
                summary.donor_errors += 1;
                error!("Failed to import donor {}: {}", record.legacy_id, e);
            }

            if (idx + 1) % PROGRESS_INTERVAL == 0 {
                info!("  {}/{} donors processed", idx + 1, records.len());
            }
        }
    }

    async fn import_donor(
        &self,
        record: &DonorRecord,
        session: &mut ImportSession,
        summary: &mut ImportSummary,
    ) -> Result<()> {
        if record.legacy_id.is_empty() {
            return Err(ImporterError::RecordError(
                "donor record has no legacy id".to_string(),
            ));
        }

        let name = ResolvedName::resolve(record.first_name.as_deref(), record.last_name.as_deref());
        let english = ResolvedName::resolve_optional(
            record.first_name_english.as_deref(),
            record.last_name_english.as_deref(),
        );
        if name.is_placeholder() {
            warn!(
                "Donor {} has no name, stored as '{}'",
                record.legacy_id, UNKNOWN_NAME
            );
        }

        let created_at = match record.created_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let parsed = parse_timestamp(raw);
                if parsed.is_none() {
                    warn!(
                        "Donor {}: unreadable creation date '{}', using now",
                        record.legacy_id, raw
                    );
                }
                parsed
            }
            _ => None,
        };

        let donor = self
            .store
            .create_donor(&NewDonor {
                legacy_id: record.legacy_id.clone(),
                title: text(&record.title).to_string(),
                first_name: name.first,
                last_name: name.last,
                suffix: text(&record.suffix).to_string(),
                title_english: text(&record.title_english).to_string(),
                first_name_english: english.first,
                last_name_english: english.last,
                suffix_english: text(&record.suffix_english).to_string(),
                is_anash: record.is_anash,
                wants_updates: record.wants_updates,
                notes: text(&record.notes).to_string(),
                company_ids: Vec::new(),
                created_at,
            })
            .await?;
        summary.donors_created += 1;
        debug!(
            "Created donor {} ({} {})",
            donor.legacy_id, donor.first_name, donor.last_name
        );

        let donor_id = donor.donor_id;
        session
            .donors_by_legacy_id
            .insert(record.legacy_id.clone(), donor);

        for address in &record.addresses {
            if !address.is_worth_importing() {
                summary.addresses_skipped += 1;
                continue;
            }
            self.import_address(donor_id, &record.legacy_id, address, session, summary)
                .await?;
        }

        for contact in &record.contacts {
            self.import_contact(donor_id, &record.legacy_id, contact, summary)
                .await?;
        }

        if let Some(company) = record.company.as_ref().filter(|c| c.is_present()) {
            let company_id = self.resolve_company(company, session, summary).await?;

            // donor records carry one company, so the list is replaced
            let company_ids = vec![company_id];
            self.store
                .update_donor_companies(donor_id, &company_ids)
                .await?;
            if let Some(donor) = session.donors_by_legacy_id.get_mut(&record.legacy_id) {
                donor.company_ids = company_ids;
            }
        }

        Ok(())
    }

    async fn import_address(
        &self,
        donor_id: Uuid,
        legacy_id: &str,
        address: &AddressRecord,
        session: &ImportSession,
        summary: &mut ImportSummary,
    ) -> Result<()> {
        let kind = AddressKind::from_label(&address.address_type);
        let (type_name, address_type_id) = match kind {
            Some(kind) => {
                let row = session
                    .reference_rows_by_name
                    .address_type(kind.reference_name())
                    .ok_or_else(|| {
                        ImporterError::RecordError(format!(
                            "address type '{}' is not loaded",
                            kind.reference_name()
                        ))
                    })?;
                (kind.reference_name(), Some(row.address_type_id))
            }
            None => {
                warn!(
                    "Donor {}: unknown address type '{}', place linked without a type",
                    legacy_id, address.address_type
                );
                summary.addresses_untyped += 1;
                (address.address_type.trim(), None)
            }
        };

        let country_id = if is_blank(&address.country) {
            None
        } else {
            let raw = text(&address.country);
            match match_country(&session.reference_lists.countries, raw) {
                Some(country) => {
                    summary.countries_matched += 1;
                    Some(country.country_id)
                }
                None => {
                    debug!("Donor {}: no country matches '{}'", legacy_id, raw);
                    None
                }
            }
        };

        let place = self
            .store
            .create_place(&NewPlace {
                place_key: place_key(legacy_id, type_name),
                street: text(&address.street).to_string(),
                house_number: text(&address.house_number).to_string(),
                apartment: text(&address.apartment).to_string(),
                neighborhood: text(&address.neighborhood).to_string(),
                city: text(&address.city).to_string(),
                state: text(&address.state).to_string(),
                postcode: text(&address.postcode).to_string(),
                full_address: address.full_address(),
                country_id,
            })
            .await?;
        summary.places_created += 1;

        self.store
            .link_place(&NewDonorPlace {
                donor_id,
                place_id: place.place_id,
                address_type_id,
                is_primary: kind.is_some_and(|kind| kind.is_primary()),
            })
            .await?;

        Ok(())
    }

    async fn import_contact(
        &self,
        donor_id: Uuid,
        legacy_id: &str,
        contact: &ContactRecord,
        summary: &mut ImportSummary,
    ) -> Result<()> {
        let value = contact.value();
        if value.is_empty() {
            summary.contacts_skipped += 1;
            return Ok(());
        }

        let row = self
            .store
            .create_contact(&NewDonorContact::new(
                donor_id,
                &contact.contact_type,
                value,
                text(&contact.label),
                contact.is_primary,
            ))
            .await?;
        summary.contacts_created += 1;

        if row.phone_number.is_none() && row.email.is_none() {
            summary.contacts_untyped += 1;
            warn!(
                "Donor {}: contact type '{}' is neither phone nor email, value not stored",
                legacy_id, contact.contact_type
            );
        }

        Ok(())
    }

    /// Reuses the run's company row for this name/address/city, creating it
    /// on first sight.
    async fn resolve_company(
        &self,
        company: &CompanyRecord,
        session: &mut ImportSession,
        summary: &mut ImportSummary,
    ) -> Result<Uuid> {
        let key = company.dedup_key();
        if let Some(company_id) = session.company_id(&key) {
            return Ok(company_id);
        }

        let row = self.store.create_company(&company.to_new_company()).await?;
        summary.companies_created += 1;
        debug!("Created company '{}'", row.name);

        let company_id = row.company_id;
        session.companies_by_key.insert(key, row);
        Ok(company_id)
    }

    pub async fn import_donations(
        &self,
        records: &[DonationRecord],
        session: &mut ImportSession,
        summary: &mut ImportSummary,
    ) {
        info!("Importing {} donation record(s)...", records.len());

        for (idx, record) in records.iter().enumerate() {
            let position = idx + 1;

            match self.import_donation(record, session, summary).await {
                Ok(DonationOutcome::Created {
                    bank_matched,
                    organization_matched,
                }) => {
                    summary.donations_created += 1;
                    summary.banks_matched += usize::from(bank_matched);
                    summary.organizations_matched += usize::from(organization_matched);
                }
                Ok(DonationOutcome::MissingDonor) => {
                    summary.donations_missing_donor += 1;
                    warn!(
                        "Donation #{}: donor {} not found, skipping",
                        position, record.donor_legacy_id
                    );
                }
                Ok(DonationOutcome::MissingMethod) => {
                    summary.donations_missing_method += 1;
                    warn!(
                        "Donation #{}: payment method '{}' not found, skipping",
                        position,
                        record.payment_method()
                    );
                }
                Ok(DonationOutcome::NoAmount) => {
                    summary.donations_without_amount += 1;
                    info!(
                        "Donation #{} for donor {} has no amount, skipping",
                        position, record.donor_legacy_id
                    );
                }
                Err(e) => {
                    summary.donation_errors += 1;
                    error!(
                        "Failed to import donation #{} for donor {}: {}",
                        position, record.donor_legacy_id, e
                    );
                }
            }

            if position % PROGRESS_INTERVAL == 0 {
                info!("  {}/{} donations processed", position, records.len());
            }
        }
    }

    pub async fn import_donation(
        &self,
        record: &DonationRecord,
        session: &mut ImportSession,
        summary: &mut ImportSummary,
    ) -> Result<DonationOutcome> {
        let Some(donor_id) = session
            .donor(&record.donor_legacy_id)
            .map(|donor| donor.donor_id)
        else {
            return Ok(DonationOutcome::MissingDonor);
        };

        let Some(donation_method_id) = session
            .reference_rows_by_name
            .donation_method(record.payment_method())
            .map(|method| method.donation_method_id)
        else {
            return Ok(DonationOutcome::MissingMethod);
        };

        // linked before the amount check, so a skipped donation still
        // associates its company with the donor
        let company_id = match record.company.as_ref().filter(|c| c.is_present()) {
            Some(company) => Some(
                self.link_donation_company(&record.donor_legacy_id, company, session, summary)
                    .await?,
            ),
            None => None,
        };

        let Some(amount) = record.importable_amount() else {
            return Ok(DonationOutcome::NoAmount);
        };

        let bank_id = record
            .bank_name
            .as_deref()
            .and_then(|raw| match_bank(&session.reference_lists.banks, raw))
            .map(|bank| bank.bank_id);
        let organization_id = record
            .organization
            .as_deref()
            .and_then(|raw| match_organization(&session.reference_lists.organizations, raw))
            .map(|organization| organization.organization_id);

        let donation_date = match record.date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let parsed = parse_date(raw);
                if parsed.is_none() {
                    warn!(
                        "Donation for donor {}: unreadable date '{}'",
                        record.donor_legacy_id, raw
                    );
                }
                parsed
            }
            _ => None,
        };

        self.store
            .create_donation(&NewDonation {
                donor_id,
                donation_method_id,
                company_id,
                bank_id,
                organization_id,
                amount,
                currency: currency_code(record.currency.as_deref()),
                donation_date,
                notes: text(&record.notes).to_string(),
                account_number: text(&record.account_number).to_string(),
                voucher_number: text(&record.voucher_number).to_string(),
                is_exceptional: record.is_exceptional,
            })
            .await?;

        Ok(DonationOutcome::Created {
            bank_matched: bank_id.is_some(),
            organization_matched: organization_id.is_some(),
        })
    }

    /// Appends the company to the donor's list when it is not there yet.
    async fn link_donation_company(
        &self,
        legacy_id: &str,
        company: &CompanyRecord,
        session: &mut ImportSession,
        summary: &mut ImportSummary,
    ) -> Result<Uuid> {
        let company_id = self.resolve_company(company, session, summary).await?;

        let donor = session
            .donors_by_legacy_id
            .get_mut(legacy_id)
            .ok_or_else(|| ImporterError::RecordError(format!("donor {} not loaded", legacy_id)))?;

        let mut updated = donor.clone();
        if updated.link_company(company_id) {
            self.store
                .update_donor_companies(updated.donor_id, &updated.company_ids)
                .await?;
            *donor = updated;
        }

        Ok(company_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_key_concatenates_legacy_id_and_type() {
        let home = AddressKind::Home.reference_name();
        let work = AddressKind::Work.reference_name();
        assert_eq!(place_key("52", home), "52בית");
        assert_eq!(place_key("52", work), place_key("52", work));
        assert_ne!(place_key("52", home), place_key("52", work));
        assert_eq!(place_key("52", "קיץ"), "52קיץ");
    }
}
