use storage::dto::company::NewCompany;
use storage::dto::donation::NewDonation;
use storage::dto::donor::{NewDonor, NewDonorContact, NewDonorPlace, NewPlace};
use storage::models::{
    Bank, Company, Country, Donation, DonationMethod, Donor, DonorAddressType, DonorContact,
    DonorPlace, Organization, Place,
};
use storage::repository::SeedTable;
use uuid::Uuid;

use crate::Result;

/// Row-level persistence the seeder needs. One call per row, no batching.
#[async_trait::async_trait]
pub trait SeedStore: Send + Sync {
    /// Deletes every row of `table`, returning how many were removed.
    async fn clear(&self, table: SeedTable) -> Result<u64>;

    async fn count(&self, table: SeedTable) -> Result<i64>;

    async fn find_address_type(&self, name: &str) -> Result<Option<DonorAddressType>>;

    async fn create_address_type(&self, name: &str) -> Result<DonorAddressType>;

    async fn find_donation_method(&self, name: &str) -> Result<Option<DonationMethod>>;

    async fn create_donation_method(&self, name: &str) -> Result<DonationMethod>;

    async fn countries(&self) -> Result<Vec<Country>>;

    async fn banks(&self) -> Result<Vec<Bank>>;

    async fn organizations(&self) -> Result<Vec<Organization>>;

    async fn create_donor(&self, donor: &NewDonor) -> Result<Donor>;

    async fn update_donor_companies(&self, donor_id: Uuid, company_ids: &[Uuid]) -> Result<()>;

    async fn create_place(&self, place: &NewPlace) -> Result<Place>;

    async fn link_place(&self, link: &NewDonorPlace) -> Result<DonorPlace>;

    async fn create_contact(&self, contact: &NewDonorContact) -> Result<DonorContact>;

    async fn create_company(&self, company: &NewCompany) -> Result<Company>;

    async fn create_donation(&self, donation: &NewDonation) -> Result<Donation>;
}
