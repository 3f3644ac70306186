use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use storage::models::ContactType;
use tracing::{error, warn};

use super::{DonorRecord, SourceData, is_blank};
use crate::reference::{AddressKind, DONATION_METHOD_NAMES};
use crate::{ImporterError, Result};

/// Pre-flight checks over the source arrays. Nothing here touches the
/// database.
pub struct SourceValidator;

impl SourceValidator {
    /// Fails when the report carries errors.
    pub fn validate(data: &SourceData) -> Result<ValidationReport> {
        let report = Self::inspect(data);

        if !report.errors.is_empty() {
            Err(ImporterError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }

    pub fn inspect(data: &SourceData) -> ValidationReport {
        let mut report = ValidationReport::default();

        if data.donors.is_empty() {
            report.warnings.push("Donor array is empty".to_string());
        }

        for rejected in &data.rejected {
            report.errors.push(format!(
                "Unreadable {} record #{} (legacy id '{}'): {}",
                rejected.kind, rejected.position, rejected.legacy_id, rejected.reason
            ));
        }

        let mut legacy_ids = HashSet::new();
        for (idx, donor) in data.donors.iter().enumerate() {
            if donor.legacy_id.is_empty() {
                report
                    .errors
                    .push(format!("Donor #{} has no legacy id", idx + 1));
                continue;
            }
            if !legacy_ids.insert(donor.legacy_id.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate donor legacy id: '{}'", donor.legacy_id));
            }

            Self::inspect_donor(donor, &mut report);
        }

        for (idx, donation) in data.donations.iter().enumerate() {
            let label = format!("Donation #{} (donor {})", idx + 1, donation.donor_legacy_id);

            if !legacy_ids.contains(donation.donor_legacy_id.as_str()) {
                report
                    .warnings
                    .push(format!("{} references an unknown donor", label));
            }

            let method = donation.payment_method();
            if !DONATION_METHOD_NAMES.contains(&method) {
                report
                    .warnings
                    .push(format!("{} has unknown payment method '{}'", label, method));
            }

            if donation.importable_amount().is_none() {
                report
                    .warnings
                    .push(format!("{} has no amount and will be skipped", label));
            }
        }

        report
    }

    fn inspect_donor(donor: &DonorRecord, report: &mut ValidationReport) {
        let label = format!("Donor {}", donor.legacy_id);

        if is_blank(&donor.first_name) && is_blank(&donor.last_name) {
            report
                .warnings
                .push(format!("{} has no name and will be stored as unknown", label));
        }

        let mut kinds: HashMap<AddressKind, usize> = HashMap::new();
        for address in donor.addresses.iter().filter(|a| a.is_worth_importing()) {
            match AddressKind::from_label(&address.address_type) {
                Some(kind) => *kinds.entry(kind).or_default() += 1,
                None => report.warnings.push(format!(
                    "{} has address with unknown type '{}'",
                    label, address.address_type
                )),
            }
        }
        for (kind, count) in kinds {
            if count > 1 {
                report.warnings.push(format!(
                    "{} has {} '{}' addresses sharing one place key",
                    label,
                    count,
                    kind.reference_name()
                ));
            }
        }

        for contact in &donor.contacts {
            if !contact.value().is_empty() && ContactType::from_str(&contact.contact_type).is_err()
            {
                report.warnings.push(format!(
                    "{} has contact with unknown type '{}'",
                    label, contact.contact_type
                ));
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }

    /// Logs errors too; used when the import proceeds regardless.
    pub fn log(&self) {
        for problem in &self.errors {
            error!("{}", problem);
        }
        self.log_warnings();
    }
}
