use std::fmt;

use sqlx::PgPool;

use crate::error::Result;

/// Tables wiped by the seed reset. Reference tables are never in this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedTable {
    Donations,
    DonorContacts,
    DonorPlaces,
    Places,
    Donors,
    Companies,
}

impl SeedTable {
    /// Dependents before the rows they reference.
    pub const RESET_ORDER: [SeedTable; 6] = [
        SeedTable::Donations,
        SeedTable::DonorContacts,
        SeedTable::DonorPlaces,
        SeedTable::Places,
        SeedTable::Donors,
        SeedTable::Companies,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Donations => "donations",
            Self::DonorContacts => "donor_contacts",
            Self::DonorPlaces => "donor_places",
            Self::Places => "places",
            Self::Donors => "donors",
            Self::Companies => "companies",
        }
    }
}

impl fmt::Display for SeedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

pub struct ResetRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResetRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Delete every row of `table`, returning the number removed
    pub async fn delete_all(&self, table: SeedTable) -> Result<u64> {
        // table names come from a closed enum, never from input
        let query = format!("DELETE FROM {}", table.table_name());
        let result = sqlx::query(&query).execute(self.pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn count(&self, table: SeedTable) -> Result<i64> {
        let query = format!("SELECT COUNT(*) FROM {}", table.table_name());
        let count: i64 = sqlx::query_scalar(&query).fetch_one(self.pool).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_order_deletes_dependents_first() {
        let names: Vec<&str> = SeedTable::RESET_ORDER
            .iter()
            .map(SeedTable::table_name)
            .collect();
        assert_eq!(
            names,
            vec![
                "donations",
                "donor_contacts",
                "donor_places",
                "places",
                "donors",
                "companies"
            ]
        );
    }
}
