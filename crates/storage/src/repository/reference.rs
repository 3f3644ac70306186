use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::{Bank, Country, DonationMethod, DonorAddressType, Organization};

/// Lookup-table access: address types, donation methods, countries, banks
/// and organizations.
pub struct ReferenceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReferenceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_address_type(&self, name: &str) -> Result<Option<DonorAddressType>> {
        let address_type = sqlx::query_as::<_, DonorAddressType>(
            "SELECT address_type_id, name, is_active FROM donor_address_types WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(address_type)
    }

    /// Insert an active address type. A concurrent insert of the same name
    /// resolves to the row that won.
    pub async fn create_address_type(&self, name: &str) -> Result<DonorAddressType> {
        let created = sqlx::query_as::<_, DonorAddressType>(
            r#"
            INSERT INTO donor_address_types (name, is_active)
            VALUES ($1, TRUE)
            RETURNING address_type_id, name, is_active
            "#,
        )
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from);

        match created {
            Err(e) if e.is_unique_violation() => self.find_address_type(name).await?.ok_or(e),
            other => other,
        }
    }

    pub async fn find_donation_method(&self, name: &str) -> Result<Option<DonationMethod>> {
        let method = sqlx::query_as::<_, DonationMethod>(
            "SELECT donation_method_id, name, is_active FROM donation_methods WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(method)
    }

    pub async fn create_donation_method(&self, name: &str) -> Result<DonationMethod> {
        let created = sqlx::query_as::<_, DonationMethod>(
            r#"
            INSERT INTO donation_methods (name, is_active)
            VALUES ($1, TRUE)
            RETURNING donation_method_id, name, is_active
            "#,
        )
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from);

        match created {
            Err(e) if e.is_unique_violation() => self.find_donation_method(name).await?.ok_or(e),
            other => other,
        }
    }

    /// Countries in a stable order, so first-match lookups are repeatable
    pub async fn list_countries(&self) -> Result<Vec<Country>> {
        let countries = sqlx::query_as::<_, Country>(
            "SELECT country_id, name, code FROM countries ORDER BY name, country_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(countries)
    }

    pub async fn list_banks(&self) -> Result<Vec<Bank>> {
        let banks = sqlx::query_as::<_, Bank>(
            "SELECT bank_id, name, code FROM banks ORDER BY name, bank_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(banks)
    }

    pub async fn list_organizations(&self) -> Result<Vec<Organization>> {
        let organizations = sqlx::query_as::<_, Organization>(
            "SELECT organization_id, name FROM organizations ORDER BY name, organization_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(organizations)
    }
}
