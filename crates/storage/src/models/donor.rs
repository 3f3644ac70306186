use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donor {
    pub donor_id: Uuid,
    pub legacy_id: String,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub suffix: String,
    pub title_english: String,
    pub first_name_english: String,
    pub last_name_english: String,
    pub suffix_english: String,
    pub is_anash: bool,
    pub wants_updates: bool,
    pub notes: String,
    pub company_ids: Vec<Uuid>,
    pub created_at: chrono::NaiveDateTime,
}

impl Donor {
    /// Appends a company id unless the donor already references it.
    /// Returns whether the list changed.
    pub fn link_company(&mut self, company_id: Uuid) -> bool {
        if self.company_ids.contains(&company_id) {
            return false;
        }
        self.company_ids.push(company_id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donor() -> Donor {
        Donor {
            donor_id: Uuid::new_v4(),
            legacy_id: "7".to_string(),
            title: String::new(),
            first_name: "a".to_string(),
            last_name: "b".to_string(),
            suffix: String::new(),
            title_english: String::new(),
            first_name_english: String::new(),
            last_name_english: String::new(),
            suffix_english: String::new(),
            is_anash: false,
            wants_updates: false,
            notes: String::new(),
            company_ids: Vec::new(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_link_company_skips_duplicates() {
        let mut donor = donor();
        let company_id = Uuid::new_v4();

        assert!(donor.link_company(company_id));
        assert!(!donor.link_company(company_id));
        assert_eq!(donor.company_ids, vec![company_id]);
    }
}
