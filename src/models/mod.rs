use serde::{Deserialize, Serialize};

/// One scraped bus-route record, as extracted from the listing page.
///
/// All ten fields are populated: a container that fails any field
/// extraction never becomes a `Listing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub route_name: String,
    pub route_link: String,
    pub bus_operator_name: String,
    pub bus_type: String,
    pub departure_time: String,
    pub duration: String,
    pub arrival_time: String,
    pub star_rating: f64,
    pub price: f64,
    pub seats_available: i64,
}

/// A `Listing` as it comes back from the store, with its assigned row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredListing {
    pub id: i64,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub listing: Listing,
}
