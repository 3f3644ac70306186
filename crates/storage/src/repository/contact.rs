use sqlx::PgPool;

use crate::dto::donor::NewDonorContact;
use crate::error::Result;
use crate::models::DonorContact;

pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, contact: &NewDonorContact) -> Result<DonorContact> {
        let contact = sqlx::query_as::<_, DonorContact>(
            r#"
            INSERT INTO donor_contacts (donor_id, contact_type, label, phone_number, email, is_primary)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING donor_contact_id, donor_id, contact_type, label, phone_number, email, is_primary
            "#,
        )
        .bind(contact.donor_id)
        .bind(&contact.contact_type)
        .bind(&contact.label)
        .bind(&contact.phone_number)
        .bind(&contact.email)
        .bind(contact.is_primary)
        .fetch_one(self.pool)
        .await?;

        Ok(contact)
    }
}
