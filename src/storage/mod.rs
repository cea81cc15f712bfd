//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - users, countries, states, cities
//! - property_types, property_categories, amenities
//! - properties, property_amenities
//! - bookings, payment_statuses, payments

pub mod schema;
pub mod seed;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats, SeedReport};
