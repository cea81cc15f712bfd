//! User - a person acting as host or guest

use serde::{Deserialize, Serialize};

/// A marketplace user.
///
/// The identifier is opaque to the schema; hosts own properties and
/// guests own bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub created_at: String,
}
