//! Booking - a guest's reservation of a property

use serde::{Deserialize, Serialize};

/// A reservation row.
///
/// Only the references are modelled here; payments hang off the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: i64,
    pub property_id: i64,
    pub guest_id: String,
    pub created_at: String,
}
