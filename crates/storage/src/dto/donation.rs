use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonation {
    pub donor_id: Uuid,
    pub donation_method_id: Uuid,
    pub company_id: Option<Uuid>,
    pub bank_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
    pub amount: Decimal,
    pub currency: String,
    pub donation_date: Option<NaiveDate>,
    pub notes: String,
    pub account_number: String,
    pub voucher_number: String,
    pub is_exceptional: bool,
}
