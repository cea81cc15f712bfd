//! Listing types - properties and their classification lookups
//!
//! Every property is classified by exactly one:
//! - `PropertyType`: Apartment, House, Villa, ...
//! - `PropertyCategory`: free-form standardized category list
//!
//! Amenities attach to properties through the `property_amenities`
//! junction table and carry one of four fixed `AmenityCategory` values.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Property type lookup row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyType {
    pub property_type_id: i64,
    pub type_name: String,
}

/// Property category lookup row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCategory {
    pub property_category_id: i64,
    pub category_name: String,
}

/// Fixed amenity categories.
///
/// The database enforces the same set with a CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityCategory {
    /// Everyday essentials (WiFi, kitchen)
    Basic,
    /// Upscale extras (pool, hot tub)
    Luxury,
    /// Safety equipment (smoke detector, first aid kit)
    Safety,
    /// Accessibility features (step-free entrance)
    Accessibility,
}

impl AmenityCategory {
    /// Get the string representation stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            AmenityCategory::Basic => "basic",
            AmenityCategory::Luxury => "luxury",
            AmenityCategory::Safety => "safety",
            AmenityCategory::Accessibility => "accessibility",
        }
    }

    /// Get all amenity categories
    pub fn all() -> &'static [AmenityCategory] {
        &[
            AmenityCategory::Basic,
            AmenityCategory::Luxury,
            AmenityCategory::Safety,
            AmenityCategory::Accessibility,
        ]
    }
}

impl FromStr for AmenityCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "basic" => Ok(AmenityCategory::Basic),
            "luxury" => Ok(AmenityCategory::Luxury),
            "safety" => Ok(AmenityCategory::Safety),
            "accessibility" => Ok(AmenityCategory::Accessibility),
            _ => Err(Error::InvalidValue(format!("Unknown amenity category: {}", s))),
        }
    }
}

impl std::fmt::Display for AmenityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Amenity lookup row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenity {
    pub amenity_id: i64,
    pub amenity_name: String,
    pub amenity_category: AmenityCategory,
}

/// Column values for a property that is about to be inserted or updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub host_id: String,
    pub property_type_id: i64,
    pub property_category_id: i64,
    pub city_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_per_night: f64,
    pub max_guests: i64,
    pub bedrooms: i64,
    pub bathrooms: i64,
}

impl NewProperty {
    /// Create a listing with the required references and an address.
    ///
    /// Optional descriptive fields start empty, numeric fields start at zero.
    pub fn new(
        host_id: impl Into<String>,
        property_type_id: i64,
        property_category_id: i64,
        city_id: i64,
        name: impl Into<String>,
        address_line1: impl Into<String>,
    ) -> Self {
        Self {
            host_id: host_id.into(),
            property_type_id,
            property_category_id,
            city_id,
            name: name.into(),
            description: None,
            address_line1: address_line1.into(),
            address_line2: None,
            postal_code: None,
            latitude: None,
            longitude: None,
            price_per_night: 0.0,
            max_guests: 0,
            bedrooms: 0,
            bathrooms: 0,
        }
    }

    /// Set the nightly price
    pub fn with_price(mut self, price_per_night: f64) -> Self {
        self.price_per_night = price_per_night;
        self
    }

    /// Set guest capacity and room counts
    pub fn with_capacity(mut self, max_guests: i64, bedrooms: i64, bathrooms: i64) -> Self {
        self.max_guests = max_guests;
        self.bedrooms = bedrooms;
        self.bathrooms = bathrooms;
        self
    }

    /// Set geocoordinates
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

/// A stored property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub property_id: i64,
    #[serde(flatten)]
    pub details: NewProperty,
    pub created_at: String,
    pub updated_at: String,
}
