//! Location hierarchy - Country 1-* State 1-* City
//!
//! Names are unique per parent: a state name is unique within its
//! country, a city name is unique within its state.

use serde::{Deserialize, Serialize};

/// Country row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub country_id: i64,
    pub country_name: String,
    pub country_code: String,
}

/// State (or province/region) row, owned by a country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub state_id: i64,
    pub country_id: i64,
    pub state_name: String,
}

/// City row, owned by a state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub city_id: i64,
    pub state_id: i64,
    pub city_name: String,
}
