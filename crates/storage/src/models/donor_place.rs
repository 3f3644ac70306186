use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DonorPlace {
    pub donor_place_id: Uuid,
    pub donor_id: Uuid,
    pub place_id: Uuid,
    /// Empty when the source address type is not a known one
    pub address_type_id: Option<Uuid>,
    pub is_primary: bool,
}
