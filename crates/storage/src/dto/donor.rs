use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ContactType;

/// Fields for inserting a donor. Names are expected to be already resolved
/// (no blank first/last pair).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDonor {
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
    /// Falls back to the insertion time when absent
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPlace {
    pub place_key: String,
    pub street: String,
    pub house_number: String,
    pub apartment: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub full_address: String,
    pub country_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonorPlace {
    pub donor_id: Uuid,
    pub place_id: Uuid,
    pub address_type_id: Option<Uuid>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonorContact {
    pub donor_id: Uuid,
    pub contact_type: String,
    pub label: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub is_primary: bool,
}

impl NewDonorContact {
    /// Builds a contact whose phone/email column is chosen by `contact_type`.
    /// Phone and email types fill exactly one of the two; any other type is
    /// kept as given with both columns empty.
    pub fn new(
        donor_id: Uuid,
        contact_type: &str,
        value: impl Into<String>,
        label: impl Into<String>,
        is_primary: bool,
    ) -> Self {
        let value = value.into();
        let (contact_type, phone_number, email) = match contact_type.parse::<ContactType>() {
            Ok(ContactType::Phone) => (ContactType::Phone.to_string(), Some(value), None),
            Ok(ContactType::Email) => (ContactType::Email.to_string(), None, Some(value)),
            Err(_) => (contact_type.trim().to_string(), None, None),
        };

        Self {
            donor_id,
            contact_type,
            label: label.into(),
            phone_number,
            email,
            is_primary,
        }
    }
}
