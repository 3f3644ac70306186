use sqlx::PgPool;
use storage::dto::company::NewCompany;
use storage::dto::donation::NewDonation;
use storage::dto::donor::{NewDonor, NewDonorContact, NewDonorPlace, NewPlace};
use storage::models::{
    Bank, Company, Country, Donation, DonationMethod, Donor, DonorAddressType, DonorContact,
    DonorPlace, Organization, Place,
};
use storage::repository::{
    CompanyRepository, ContactRepository, DonationRepository, DonorRepository, PlaceRepository,
    ReferenceRepository, ResetRepository, SeedTable,
};
use uuid::Uuid;

use crate::{Result, SeedStore};

/// [`SeedStore`] over the storage crate's Postgres repositories.
pub struct PgSeedStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgSeedStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SeedStore for PgSeedStore<'_> {
    async fn clear(&self, table: SeedTable) -> Result<u64> {
        Ok(ResetRepository::new(self.pool).delete_all(table).await?)
    }

    async fn count(&self, table: SeedTable) -> Result<i64> {
        Ok(ResetRepository::new(self.pool).count(table).await?)
    }

    async fn find_address_type(&self, name: &str) -> Result<Option<DonorAddressType>> {
        Ok(ReferenceRepository::new(self.pool)
            .find_address_type(name)
            .await?)
    }

    async fn create_address_type(&self, name: &str) -> Result<DonorAddressType> {
        Ok(ReferenceRepository::new(self.pool)
            .create_address_type(name)
            .await?)
    }

    async fn find_donation_method(&self, name: &str) -> Result<Option<DonationMethod>> {
        Ok(ReferenceRepository::new(self.pool)
            .find_donation_method(name)
            .await?)
    }

    async fn create_donation_method(&self, name: &str) -> Result<DonationMethod> {
        Ok(ReferenceRepository::new(self.pool)
            .create_donation_method(name)
            .await?)
    }

    async fn countries(&self) -> Result<Vec<Country>> {
        Ok(ReferenceRepository::new(self.pool).list_countries().await?)
    }

    async fn banks(&self) -> Result<Vec<Bank>> {
        Ok(ReferenceRepository::new(self.pool).list_banks().await?)
    }

    async fn organizations(&self) -> Result<Vec<Organization>> {
        Ok(ReferenceRepository::new(self.pool)
            .list_organizations()
            .await?)
    }

    async fn create_donor(&self, donor: &NewDonor) -> Result<Donor> {
        Ok(DonorRepository::new(self.pool).create(donor).await?)
    }

    async fn update_donor_companies(&self, donor_id: Uuid, company_ids: &[Uuid]) -> Result<()> {
        Ok(DonorRepository::new(self.pool)
            .update_company_ids(donor_id, company_ids)
            .await?)
    }

    async fn create_place(&self, place: &NewPlace) -> Result<Place> {
        Ok(PlaceRepository::new(self.pool).create(place).await?)
    }

    async fn link_place(&self, link: &NewDonorPlace) -> Result<DonorPlace> {
        Ok(PlaceRepository::new(self.pool).link_donor(link).await?)
    }

    async fn create_contact(&self, contact: &NewDonorContact) -> Result<DonorContact> {
        Ok(ContactRepository::new(self.pool).create(contact).await?)
    }

    async fn create_company(&self, company: &NewCompany) -> Result<Company> {
        Ok(CompanyRepository::new(self.pool).create(company).await?)
    }

    async fn create_donation(&self, donation: &NewDonation) -> Result<Donation> {
        Ok(DonationRepository::new(self.pool).create(donation).await?)
    }
}
