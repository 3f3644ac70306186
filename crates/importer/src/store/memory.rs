use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use storage::StorageError;
use storage::dto::company::NewCompany;
use storage::dto::donation::NewDonation;
use storage::dto::donor::{NewDonor, NewDonorContact, NewDonorPlace, NewPlace};
use storage::models::{
    Bank, Company, Country, Donation, DonationMethod, Donor, DonorAddressType, DonorContact,
    DonorPlace, Organization, Place,
};
use storage::repository::SeedTable;
use uuid::Uuid;

use crate::{Result, SeedStore};

#[derive(Debug, Default)]
struct Tables {
    countries: Vec<Country>,
    banks: Vec<Bank>,
    organizations: Vec<Organization>,
    address_types: Vec<DonorAddressType>,
    donation_methods: Vec<DonationMethod>,
    donors: Vec<Donor>,
    places: Vec<Place>,
    donor_places: Vec<DonorPlace>,
    contacts: Vec<DonorContact>,
    companies: Vec<Company>,
    donations: Vec<Donation>,
}

impl Tables {
    fn len(&self, table: SeedTable) -> usize {
        match table {
            SeedTable::Donations => self.donations.len(),
            SeedTable::DonorContacts => self.contacts.len(),
            SeedTable::DonorPlaces => self.donor_places.len(),
            SeedTable::Places => self.places.len(),
            SeedTable::Donors => self.donors.len(),
            SeedTable::Companies => self.companies.len(),
        }
    }

    /// Tables holding foreign keys into `table`, as Postgres would see them
    fn blocking_dependents(&self, table: SeedTable) -> Vec<SeedTable> {
        let candidates: &[SeedTable] = match table {
            SeedTable::Donors => &[
                SeedTable::Donations,
                SeedTable::DonorContacts,
                SeedTable::DonorPlaces,
            ],
            SeedTable::Places => &[SeedTable::DonorPlaces],
            SeedTable::Companies if self.donations.iter().any(|d| d.company_id.is_some()) => {
                &[SeedTable::Donations]
            }
            _ => &[],
        };

        candidates
            .iter()
            .copied()
            .filter(|dependent| self.len(*dependent) > 0)
            .collect()
    }
}

/// In-process [`SeedStore`] with Postgres-like foreign-key checks. Backs
/// dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing_legacy_ids: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(self, name: &str, code: Option<&str>) -> Self {
        self.lock().countries.push(Country {
            country_id: Uuid::new_v4(),
            name: name.to_string(),
            code: code.map(str::to_string),
        });
        self
    }

    pub fn with_bank(self, name: &str) -> Self {
        self.lock().banks.push(Bank {
            bank_id: Uuid::new_v4(),
            name: name.to_string(),
            code: None,
        });
        self
    }

    pub fn with_organization(self, name: &str) -> Self {
        self.lock().organizations.push(Organization {
            organization_id: Uuid::new_v4(),
            name: name.to_string(),
        });
        self
    }

    /// Makes `create_donor` reject the donor with this legacy id, the way a
    /// database constraint would.
    pub fn with_failing_donor(mut self, legacy_id: &str) -> Self {
        self.failing_legacy_ids.insert(legacy_id.to_string());
        self
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn donors(&self) -> Vec<Donor> {
        self.lock().donors.clone()
    }

    pub fn places(&self) -> Vec<Place> {
        self.lock().places.clone()
    }

    pub fn donor_places(&self) -> Vec<DonorPlace> {
        self.lock().donor_places.clone()
    }

    pub fn contacts(&self) -> Vec<DonorContact> {
        self.lock().contacts.clone()
    }

    pub fn companies(&self) -> Vec<Company> {
        self.lock().companies.clone()
    }

    pub fn donations(&self) -> Vec<Donation> {
        self.lock().donations.clone()
    }

    pub fn address_types(&self) -> Vec<DonorAddressType> {
        self.lock().address_types.clone()
    }

    pub fn donation_methods(&self) -> Vec<DonationMethod> {
        self.lock().donation_methods.clone()
    }
}

fn violation(message: String) -> crate::ImporterError {
    StorageError::ConstraintViolation(message).into()
}

#[async_trait::async_trait]
impl SeedStore for MemoryStore {
    async fn clear(&self, table: SeedTable) -> Result<u64> {
        let mut tables = self.lock();

        let dependents = tables.blocking_dependents(table);
        if !dependents.is_empty() {
            return Err(violation(format!(
                "cannot delete from {}: still referenced by {:?}",
                table, dependents
            )));
        }

        let removed = tables.len(table) as u64;
        match table {
            SeedTable::Donations => tables.donations.clear(),
            SeedTable::DonorContacts => tables.contacts.clear(),
            SeedTable::DonorPlaces => tables.donor_places.clear(),
            SeedTable::Places => tables.places.clear(),
            SeedTable::Donors => tables.donors.clear(),
            SeedTable::Companies => tables.companies.clear(),
        }

        Ok(removed)
    }

    async fn count(&self, table: SeedTable) -> Result<i64> {
        Ok(self.lock().len(table) as i64)
    }

    async fn find_address_type(&self, name: &str) -> Result<Option<DonorAddressType>> {
        Ok(self
            .lock()
            .address_types
            .iter()
            .find(|row| row.name == name)
            .cloned())
    }

    async fn create_address_type(&self, name: &str) -> Result<DonorAddressType> {
        let mut tables = self.lock();
        if tables.address_types.iter().any(|row| row.name == name) {
            return Err(violation(format!("duplicate address type '{}'", name)));
        }

        let row = DonorAddressType {
            address_type_id: Uuid::new_v4(),
            name: name.to_string(),
            is_active: true,
        };
        tables.address_types.push(row.clone());
        Ok(row)
    }

    async fn find_donation_method(&self, name: &str) -> Result<Option<DonationMethod>> {
        Ok(self
            .lock()
            .donation_methods
            .iter()
            .find(|row| row.name == name)
            .cloned())
    }

    async fn create_donation_method(&self, name: &str) -> Result<DonationMethod> {
        let mut tables = self.lock();
        if tables.donation_methods.iter().any(|row| row.name == name) {
            return Err(violation(format!("duplicate donation method '{}'", name)));
        }

        let row = DonationMethod {
            donation_method_id: Uuid::new_v4(),
            name: name.to_string(),
            is_active: true,
        };
        tables.donation_methods.push(row.clone());
        Ok(row)
    }

    async fn countries(&self) -> Result<Vec<Country>> {
        Ok(self.lock().countries.clone())
    }

    async fn banks(&self) -> Result<Vec<Bank>> {
        Ok(self.lock().banks.clone())
    }

    async fn organizations(&self) -> Result<Vec<Organization>> {
        Ok(self.lock().organizations.clone())
    }

    async fn create_donor(&self, donor: &NewDonor) -> Result<Donor> {
        if self.failing_legacy_ids.contains(&donor.legacy_id) {
            return Err(violation(format!("donor {} rejected", donor.legacy_id)));
        }

        let row = Donor {
            donor_id: Uuid::new_v4(),
            legacy_id: donor.legacy_id.clone(),
            title: donor.title.clone(),
            first_name: donor.first_name.clone(),
            last_name: donor.last_name.clone(),
            suffix: donor.suffix.clone(),
            title_english: donor.title_english.clone(),
            first_name_english: donor.first_name_english.clone(),
            last_name_english: donor.last_name_english.clone(),
            suffix_english: donor.suffix_english.clone(),
            is_anash: donor.is_anash,
            wants_updates: donor.wants_updates,
            notes: donor.notes.clone(),
            company_ids: donor.company_ids.clone(),
            created_at: donor.created_at.unwrap_or_else(|| Utc::now().naive_utc()),
        };
        self.lock().donors.push(row.clone());
        Ok(row)
    }

    async fn update_donor_companies(&self, donor_id: Uuid, company_ids: &[Uuid]) -> Result<()> {
        let mut tables = self.lock();
        let donor = tables
            .donors
            .iter_mut()
            .find(|donor| donor.donor_id == donor_id)
            .ok_or(StorageError::NotFound {
                entity: "donor",
                id: donor_id,
            })?;
        donor.company_ids = company_ids.to_vec();
        Ok(())
    }

    async fn create_place(&self, place: &NewPlace) -> Result<Place> {
        let row = Place {
            place_id: Uuid::new_v4(),
            place_key: place.place_key.clone(),
            street: place.street.clone(),
            house_number: place.house_number.clone(),
            apartment: place.apartment.clone(),
            neighborhood: place.neighborhood.clone(),
            city: place.city.clone(),
            state: place.state.clone(),
            postcode: place.postcode.clone(),
            full_address: place.full_address.clone(),
            country_id: place.country_id,
        };
        self.lock().places.push(row.clone());
        Ok(row)
    }

    async fn link_place(&self, link: &NewDonorPlace) -> Result<DonorPlace> {
        let mut tables = self.lock();
        if !tables.donors.iter().any(|d| d.donor_id == link.donor_id) {
            return Err(violation(format!("unknown donor {}", link.donor_id)));
        }
        if !tables.places.iter().any(|p| p.place_id == link.place_id) {
            return Err(violation(format!("unknown place {}", link.place_id)));
        }

        let row = DonorPlace {
            donor_place_id: Uuid::new_v4(),
            donor_id: link.donor_id,
            place_id: link.place_id,
            address_type_id: link.address_type_id,
            is_primary: link.is_primary,
        };
        tables.donor_places.push(row.clone());
        Ok(row)
    }

    async fn create_contact(&self, contact: &NewDonorContact) -> Result<DonorContact> {
        let mut tables = self.lock();
        if !tables.donors.iter().any(|d| d.donor_id == contact.donor_id) {
            return Err(violation(format!("unknown donor {}", contact.donor_id)));
        }

        let row = DonorContact {
            donor_contact_id: Uuid::new_v4(),
            donor_id: contact.donor_id,
            contact_type: contact.contact_type.clone(),
            label: contact.label.clone(),
            phone_number: contact.phone_number.clone(),
            email: contact.email.clone(),
            is_primary: contact.is_primary,
        };
        tables.contacts.push(row.clone());
        Ok(row)
    }

    async fn create_company(&self, company: &NewCompany) -> Result<Company> {
        let row = Company {
            company_id: Uuid::new_v4(),
            name: company.name.clone(),
            address: company.address.clone(),
            city: company.city.clone(),
            created_at: Utc::now().naive_utc(),
        };
        self.lock().companies.push(row.clone());
        Ok(row)
    }

    async fn create_donation(&self, donation: &NewDonation) -> Result<Donation> {
        let mut tables = self.lock();
        if !tables.donors.iter().any(|d| d.donor_id == donation.donor_id) {
            return Err(violation(format!("unknown donor {}", donation.donor_id)));
        }
        if !tables
            .donation_methods
            .iter()
            .any(|m| m.donation_method_id == donation.donation_method_id)
        {
            return Err(violation(format!(
                "unknown donation method {}",
                donation.donation_method_id
            )));
        }

        let row = Donation {
            donation_id: Uuid::new_v4(),
            donor_id: donation.donor_id,
            donation_method_id: donation.donation_method_id,
            company_id: donation.company_id,
            bank_id: donation.bank_id,
            organization_id: donation.organization_id,
            amount: donation.amount,
            currency: donation.currency.clone(),
            donation_date: donation.donation_date,
            notes: donation.notes.clone(),
            account_number: donation.account_number.clone(),
            voucher_number: donation.voucher_number.clone(),
            is_exceptional: donation.is_exceptional,
            created_at: Utc::now().naive_utc(),
        };
        tables.donations.push(row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clear_respects_foreign_keys() {
        let store = MemoryStore::new();
        let donor = store
            .create_donor(&NewDonor {
                legacy_id: "1".to_string(),
                first_name: "a".to_string(),
                last_name: "b".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let place = store.create_place(&NewPlace::default()).await.unwrap();
        store
            .link_place(&NewDonorPlace {
                donor_id: donor.donor_id,
                place_id: place.place_id,
                address_type_id: Some(Uuid::new_v4()),
                is_primary: true,
            })
            .await
            .unwrap();

        assert!(store.clear(SeedTable::Donors).await.is_err());
        assert!(store.clear(SeedTable::Places).await.is_err());

        assert_eq!(store.clear(SeedTable::DonorPlaces).await.unwrap(), 1);
        assert_eq!(store.clear(SeedTable::Places).await.unwrap(), 1);
        assert_eq!(store.clear(SeedTable::Donors).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failing_donor_is_rejected() {
        let store = MemoryStore::new().with_failing_donor("13");
        let result = store
            .create_donor(&NewDonor {
                legacy_id: "13".to_string(),
                ..Default::default()
            })
            .await;
        assert!(result.is_err());
        assert!(store.donors().is_empty());
    }
}
