use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::donor::NewDonor;
use crate::error::{Result, StorageError};
use crate::models::Donor;

const DONOR_COLUMNS: &str = r#"
    donor_id, legacy_id, title, first_name, last_name, suffix,
    title_english, first_name_english, last_name_english, suffix_english,
    is_anash, wants_updates, notes, company_ids, created_at
"#;

pub struct DonorRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DonorRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a donor row
    pub async fn create(&self, donor: &NewDonor) -> Result<Donor> {
        let query = format!(
            r#"
            INSERT INTO donors (legacy_id, title, first_name, last_name, suffix,
                                title_english, first_name_english, last_name_english, suffix_english,
                                is_anash, wants_updates, notes, company_ids, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    COALESCE($14::timestamp, CURRENT_TIMESTAMP))
            RETURNING {DONOR_COLUMNS}
            "#
        );

        let donor = sqlx::query_as::<_, Donor>(&query)
            .bind(&donor.legacy_id)
            .bind(&donor.title)
            .bind(&donor.first_name)
            .bind(&donor.last_name)
            .bind(&donor.suffix)
            .bind(&donor.title_english)
            .bind(&donor.first_name_english)
            .bind(&donor.last_name_english)
            .bind(&donor.suffix_english)
            .bind(donor.is_anash)
            .bind(donor.wants_updates)
            .bind(&donor.notes)
            .bind(&donor.company_ids)
            .bind(donor.created_at)
            .fetch_one(self.pool)
            .await?;

        Ok(donor)
    }

    /// Replace the donor's company id list
    pub async fn update_company_ids(&self, donor_id: Uuid, company_ids: &[Uuid]) -> Result<()> {
        let result = sqlx::query("UPDATE donors SET company_ids = $2 WHERE donor_id = $1")
            .bind(donor_id)
            .bind(company_ids)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity: "donor",
                id: donor_id,
            });
        }

        Ok(())
    }
}
