use sqlx::PgPool;

use crate::dto::company::NewCompany;
use crate::error::Result;
use crate::models::Company;

pub struct CompanyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompanyRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, company: &NewCompany) -> Result<Company> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, address, city)
            VALUES ($1, $2, $3)
            RETURNING company_id, name, address, city, created_at
            "#,
        )
        .bind(&company.name)
        .bind(&company.address)
        .bind(&company.city)
        .fetch_one(self.pool)
        .await?;

        Ok(company)
    }
}
