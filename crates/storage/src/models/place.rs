use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A physical address. Places are never shared between donors.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Place {
    pub place_id: Uuid,
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
