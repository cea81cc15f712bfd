//! # Staybook - Rental Marketplace Schema
//!
//! Normalized relational schema for a short-term rental marketplace,
//! materialized in SQLite.
//!
//! Staybook provides:
//! - DDL for the location hierarchy, listing lookups, properties, bookings and payments
//! - Seed data for the reference tables
//! - Typed row values for every table
//! - A SQLite-backed store that surfaces constraint violations as typed errors

pub mod user;
pub mod location;
pub mod listing;
pub mod booking;
pub mod payment;
pub mod storage;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use user::User;
pub use location::{City, Country, State};
pub use listing::{Amenity, AmenityCategory, NewProperty, Property, PropertyCategory, PropertyType};
pub use booking::Booking;
pub use payment::{NewPayment, Payment, PaymentMethod, PaymentStatus};
pub use storage::SqliteStore;

use rusqlite::ffi;

/// Result type alias for Staybook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Staybook operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Check constraint violated: {0}")]
    CheckViolation(String),

    #[error("Not null constraint violated: {0}")]
    NotNullViolation(String),

    #[error("Storage error: {0}")]
    Storage(rusqlite::Error),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &err {
            if failure.code == ffi::ErrorCode::ConstraintViolation {
                let message = message.clone().unwrap_or_else(|| failure.to_string());
                let extended_code = failure.extended_code;
                return match extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        Error::UniqueViolation(message)
                    }
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Error::ForeignKeyViolation(message),
                    ffi::SQLITE_CONSTRAINT_CHECK => Error::CheckViolation(message),
                    ffi::SQLITE_CONSTRAINT_NOTNULL => Error::NotNullViolation(message),
                    _ => Error::Storage(err),
                };
            }
        }
        Error::Storage(err)
    }
}
