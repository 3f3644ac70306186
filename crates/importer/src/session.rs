use std::collections::HashMap;

use storage::models::{Bank, Company, Country, DonationMethod, Donor, DonorAddressType, Organization};

/// Lookup rows keyed by display name, filled once by the reference-data
/// phase and read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct ReferenceRows {
    pub address_types: HashMap<String, DonorAddressType>,
    pub donation_methods: HashMap<String, DonationMethod>,
}

impl ReferenceRows {
    pub fn address_type(&self, name: &str) -> Option<&DonorAddressType> {
        self.address_types.get(name)
    }

    pub fn donation_method(&self, name: &str) -> Option<&DonationMethod> {
        self.donation_methods.get(name)
    }
}

/// Preloaded match targets for free-text country, bank and organization
/// fields.
#[derive(Debug, Default, Clone)]
pub struct ReferenceLists {
    pub countries: Vec<Country>,
    pub banks: Vec<Bank>,
    pub organizations: Vec<Organization>,
}

/// State accumulated over one seed run. Nothing here outlives the run.
#[derive(Debug, Default)]
pub struct ImportSession {
    pub donors_by_legacy_id: HashMap<String, Donor>,
    pub companies_by_key: HashMap<String, Company>,
    pub reference_rows_by_name: ReferenceRows,
    pub reference_lists: ReferenceLists,
}

impl ImportSession {
    pub fn new(reference_rows_by_name: ReferenceRows, reference_lists: ReferenceLists) -> Self {
        Self {
            reference_rows_by_name,
            reference_lists,
            ..Default::default()
        }
    }

    pub fn donor(&self, legacy_id: &str) -> Option<&Donor> {
        self.donors_by_legacy_id.get(legacy_id)
    }

    pub fn company_id(&self, key: &str) -> Option<uuid::Uuid> {
        self.companies_by_key.get(key).map(|company| company.company_id)
    }
}
