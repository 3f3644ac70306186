//! Source records as they arrive from the spreadsheet exports. Every text
//! field is optional and blank-tolerant.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use storage::dto::company::NewCompany;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonorRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub legacy_id: String,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub suffix: Option<String>,
    pub title_english: Option<String>,
    pub first_name_english: Option<String>,
    pub last_name_english: Option<String>,
    pub suffix_english: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_anash: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub wants_updates: bool,
    pub notes: Option<String>,
    pub created_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub addresses: Vec<AddressRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub contacts: Vec<ContactRecord>,
    pub company: Option<CompanyRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressRecord {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub address_type: String,
    pub street: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub house_number: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub apartment: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(alias = "zip", alias = "zipCode", deserialize_with = "text_or_number")]
    pub postcode: Option<String>,
    pub full_address: Option<String>,
    pub country: Option<String>,
}

impl AddressRecord {
    /// An address with no street, city or country carries nothing worth a
    /// place row.
    pub fn is_worth_importing(&self) -> bool {
        !(is_blank(&self.street) && is_blank(&self.city) && is_blank(&self.country))
    }

    /// The given full address, or one assembled from the parts.
    pub fn full_address(&self) -> String {
        if !is_blank(&self.full_address) {
            return text(&self.full_address).to_string();
        }

        let street_line = [text(&self.street), text(&self.house_number)]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let region_line = [text(&self.state), text(&self.postcode)]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        [street_line.as_str(), text(&self.city), region_line.as_str(), text(&self.country)]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRecord {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub contact_type: String,
    #[serde(deserialize_with = "text_or_number")]
    pub value: Option<String>,
    pub label: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_primary: bool,
}

impl ContactRecord {
    pub fn value(&self) -> &str {
        text(&self.value)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyRecord {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

impl CompanyRecord {
    /// A company sub-record counts only when it names a company.
    pub fn is_present(&self) -> bool {
        !is_blank(&self.name)
    }

    /// Run-scoped dedup key over name, address and city.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}|{}|{}",
            text(&self.name),
            text(&self.address),
            text(&self.city)
        )
    }

    pub fn to_new_company(&self) -> NewCompany {
        NewCompany {
            name: text(&self.name).to_string(),
            address: text(&self.address).to_string(),
            city: text(&self.city).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub donor_legacy_id: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub date: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub account_number: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub voucher_number: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_exceptional: bool,
    pub bank_name: Option<String>,
    pub organization: Option<String>,
    pub company: Option<CompanyRecord>,
}

impl DonationRecord {
    /// Amount usable for a donation row: present and nonzero. Negative
    /// amounts (refunds) are kept.
    pub fn importable_amount(&self) -> Option<Decimal> {
        self.amount.filter(|amount| !amount.is_zero())
    }

    pub fn payment_method(&self) -> &str {
        text(&self.payment_method)
    }
}

/// Trimmed contents of an optional text field, empty when absent.
pub fn text(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or_default()
}

pub fn is_blank(value: &Option<String>) -> bool {
    text(value).is_empty()
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y", "%m/%d/%Y"];

/// Parses the date shapes found in the exports. ISO timestamps are cut to
/// their date part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let date_part = match raw.find('T') {
        Some(idx) if idx == 10 => &raw[..idx],
        _ => raw,
    };

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| parse_date(raw).and_then(|date| date.and_hms_opt(0, 0, 0)))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a string or number id, got {}",
            other
        ))),
    }
}

/// `null` reads as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Spreadsheet cells holding digits often arrive as JSON numbers.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(de::Error::custom(format!("expected text, got {}", other))),
    }
}

/// Amounts as numbers or numeric text. Blank text counts as missing.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().replace(',', ""),
        other => {
            return Err(de::Error::custom(format!(
                "expected an amount, got {}",
                other
            )));
        }
    };

    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&raw))
        .map(Some)
        .map_err(|_| de::Error::custom(format!("unreadable amount '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donor_record_tolerates_missing_fields() {
        let donor: DonorRecord =
            serde_json::from_str(r#"{"legacyId": 52, "lastName": "ברוינר"}"#).unwrap();
        assert_eq!(donor.legacy_id, "52");
        assert_eq!(donor.first_name, None);
        assert!(donor.addresses.is_empty());
        assert!(donor.company.is_none());
    }

    #[test]
    fn test_address_worth_importing() {
        let empty = AddressRecord {
            address_type: "בית".to_string(),
            house_number: Some("12".to_string()),
            postcode: Some("11219".to_string()),
            ..Default::default()
        };
        assert!(!empty.is_worth_importing());

        let city_only = AddressRecord {
            city: Some("Brooklyn, NY".to_string()),
            ..Default::default()
        };
        assert!(city_only.is_worth_importing());

        let country_only = AddressRecord {
            country: Some("USA".to_string()),
            street: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(country_only.is_worth_importing());
    }

    #[test]
    fn test_full_address_assembled_from_parts() {
        let address = AddressRecord {
            street: Some("Ocean Pkwy".to_string()),
            house_number: Some("1520".to_string()),
            city: Some("Brooklyn".to_string()),
            state: Some("NY".to_string()),
            postcode: Some("11230".to_string()),
            country: Some("USA".to_string()),
            ..Default::default()
        };
        assert_eq!(address.full_address(), "Ocean Pkwy 1520, Brooklyn, NY 11230, USA");

        let given = AddressRecord {
            full_address: Some(" רחוב הרב קוק 5, בני ברק ".to_string()),
            street: Some("ignored".to_string()),
            ..Default::default()
        };
        assert_eq!(given.full_address(), "רחוב הרב קוק 5, בני ברק");
    }

    #[test]
    fn test_company_dedup_key_ignores_padding() {
        let a = CompanyRecord {
            name: Some("Acme".to_string()),
            address: Some("1 Main St".to_string()),
            city: Some("London".to_string()),
        };
        let b = CompanyRecord {
            name: Some(" Acme ".to_string()),
            address: Some("1 Main St".to_string()),
            city: Some("London ".to_string()),
        };
        assert_eq!(a.dedup_key(), b.dedup_key());
        assert!(a.is_present());
        assert!(!CompanyRecord::default().is_present());
    }

    #[test]
    fn test_importable_amount() {
        let mut donation = DonationRecord::default();
        assert_eq!(donation.importable_amount(), None);

        donation.amount = Some(Decimal::ZERO);
        assert_eq!(donation.importable_amount(), None);

        donation.amount = Some(Decimal::from(-40));
        assert_eq!(donation.importable_amount(), Some(Decimal::from(-40)));
    }

    #[test]
    fn test_donation_amount_null_and_number() {
        let donation: DonationRecord =
            serde_json::from_str(r#"{"donorLegacyId": "52", "amount": null}"#).unwrap();
        assert_eq!(donation.amount, None);

        let donation: DonationRecord =
            serde_json::from_str(r#"{"donorLegacyId": "52", "amount": 500}"#).unwrap();
        assert_eq!(donation.amount, Some(Decimal::from(500)));
    }

    #[test]
    fn test_null_flags_and_lists_read_as_defaults() {
        let donor: DonorRecord = serde_json::from_str(
            r#"{"legacyId": "60", "isAnash": null, "wantsUpdates": null,
                "addresses": null, "contacts": null}"#,
        )
        .unwrap();
        assert!(!donor.is_anash);
        assert!(!donor.wants_updates);
        assert!(donor.addresses.is_empty());
        assert!(donor.contacts.is_empty());

        let donation: DonationRecord =
            serde_json::from_str(r#"{"donorLegacyId": "60", "isExceptional": null}"#).unwrap();
        assert!(!donation.is_exceptional);
    }

    #[test]
    fn test_blank_amount_is_missing() {
        for raw in [r#""""#, r#""  ""#] {
            let json = format!(r#"{{"donorLegacyId": "52", "amount": {}}}"#, raw);
            let donation: DonationRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(donation.amount, None);
        }
    }

    #[test]
    fn test_amount_as_text() {
        let donation: DonationRecord =
            serde_json::from_str(r#"{"donorLegacyId": "52", "amount": " 1,800 "}"#).unwrap();
        assert_eq!(donation.amount, Some(Decimal::from(1800)));

        let garbage = serde_json::from_str::<DonationRecord>(
            r#"{"donorLegacyId": "52", "amount": "five hundred"}"#,
        );
        assert!(garbage.is_err());
    }

    #[test]
    fn test_numeric_cells_read_as_text() {
        let contact: ContactRecord =
            serde_json::from_str(r#"{"type": "phone", "value": 7186765859}"#).unwrap();
        assert_eq!(contact.value(), "7186765859");

        let donation: DonationRecord =
            serde_json::from_str(r#"{"donorLegacyId": 52, "voucherNumber": 10452}"#).unwrap();
        assert_eq!(donation.voucher_number.as_deref(), Some("10452"));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 14);
        assert_eq!(parse_date("2023-03-14"), expected);
        assert_eq!(parse_date("14/03/2023"), expected);
        assert_eq!(parse_date("14.03.2023"), expected);
        assert_eq!(parse_date("2023-03-14T00:00:00.000Z"), expected);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2021-06-01T10:30:00").unwrap();
        assert_eq!(ts.to_string(), "2021-06-01 10:30:00");
        let midnight = parse_timestamp("01/06/2021").unwrap();
        assert_eq!(midnight.to_string(), "2021-06-01 00:00:00");
    }
}
