use sqlx::PgPool;

use crate::dto::donor::{NewDonorPlace, NewPlace};
use crate::error::Result;
use crate::models::{DonorPlace, Place};

pub struct PlaceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlaceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a place. Identical addresses are not deduplicated.
    pub async fn create(&self, place: &NewPlace) -> Result<Place> {
        let place = sqlx::query_as::<_, Place>(
            r#"
            INSERT INTO places (place_key, street, house_number, apartment, neighborhood,
                                city, state, postcode, full_address, country_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING place_id, place_key, street, house_number, apartment, neighborhood,
                      city, state, postcode, full_address, country_id
            "#,
        )
        .bind(&place.place_key)
        .bind(&place.street)
        .bind(&place.house_number)
        .bind(&place.apartment)
        .bind(&place.neighborhood)
        .bind(&place.city)
        .bind(&place.state)
        .bind(&place.postcode)
        .bind(&place.full_address)
        .bind(place.country_id)
        .fetch_one(self.pool)
        .await?;

        Ok(place)
    }

    /// Link a place to a donor, under an address type when one is known
    pub async fn link_donor(&self, link: &NewDonorPlace) -> Result<DonorPlace> {
        let donor_place = sqlx::query_as::<_, DonorPlace>(
            r#"
            INSERT INTO donor_places (donor_id, place_id, address_type_id, is_primary)
            VALUES ($1, $2, $3, $4)
            RETURNING donor_place_id, donor_id, place_id, address_type_id, is_primary
            "#,
        )
        .bind(link.donor_id)
        .bind(link.place_id)
        .bind(link.address_type_id)
        .bind(link.is_primary)
        .fetch_one(self.pool)
        .await?;

        Ok(donor_place)
    }
}
