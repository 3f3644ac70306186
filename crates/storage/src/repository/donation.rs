use sqlx::PgPool;

use crate::dto::donation::NewDonation;
use crate::error::Result;
use crate::models::Donation;

const DONATION_COLUMNS: &str = r#"
    donation_id, donor_id, donation_method_id, company_id, bank_id, organization_id,
    amount, currency, donation_date, notes, account_number, voucher_number,
    is_exceptional, created_at
"#;

pub struct DonationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DonationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, donation: &NewDonation) -> Result<Donation> {
        let query = format!(
            r#"
            INSERT INTO donations (donor_id, donation_method_id, company_id, bank_id, organization_id,
                                   amount, currency, donation_date, notes, account_number,
                                   voucher_number, is_exceptional)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {DONATION_COLUMNS}
            "#
        );

        let donation = sqlx::query_as::<_, Donation>(&query)
            .bind(donation.donor_id)
            .bind(donation.donation_method_id)
            .bind(donation.company_id)
            .bind(donation.bank_id)
            .bind(donation.organization_id)
            .bind(donation.amount)
            .bind(&donation.currency)
            .bind(donation.donation_date)
            .bind(&donation.notes)
            .bind(&donation.account_number)
            .bind(&donation.voucher_number)
            .bind(donation.is_exceptional)
            .fetch_one(self.pool)
            .await?;

        Ok(donation)
    }
}
