use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DonorContact {
    pub donor_contact_id: Uuid,
    pub donor_id: Uuid,
    pub contact_type: String,
    pub label: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    Phone,
    Email,
}

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phone" | "mobile" | "tel" => Ok(Self::Phone),
            "email" | "e-mail" | "mail" => Ok(Self::Email),
            other => Err(format!("Unknown contact type: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_type_parsing() {
        assert_eq!("phone".parse::<ContactType>(), Ok(ContactType::Phone));
        assert_eq!(" Email ".parse::<ContactType>(), Ok(ContactType::Email));
        assert_eq!("e-mail".parse::<ContactType>(), Ok(ContactType::Email));
        assert!("fax".parse::<ContactType>().is_err());
    }
}
