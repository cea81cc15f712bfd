//! Database schema definitions
//!
//! Tables are listed in dependency order: every table only references
//! tables created before it.

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id TEXT PRIMARY KEY,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the countries table
pub const CREATE_COUNTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS countries (
    country_id INTEGER PRIMARY KEY AUTOINCREMENT,
    country_name TEXT NOT NULL UNIQUE,
    country_code TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the states table
/// State names are unique within their country
pub const CREATE_STATES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS states (
    state_id INTEGER PRIMARY KEY AUTOINCREMENT,
    country_id INTEGER NOT NULL REFERENCES countries(country_id),
    state_name TEXT NOT NULL,
    UNIQUE(country_id, state_name)
)
"#;

/// SQL to create the cities table
/// City names are unique within their state
pub const CREATE_CITIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cities (
    city_id INTEGER PRIMARY KEY AUTOINCREMENT,
    state_id INTEGER NOT NULL REFERENCES states(state_id),
    city_name TEXT NOT NULL,
    UNIQUE(state_id, city_name)
)
"#;

/// SQL to create the property_types lookup table
pub const CREATE_PROPERTY_TYPES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS property_types (
    property_type_id INTEGER PRIMARY KEY AUTOINCREMENT,
    type_name TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the property_categories lookup table
pub const CREATE_PROPERTY_CATEGORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS property_categories (
    property_category_id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_name TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the amenities lookup table
pub const CREATE_AMENITIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS amenities (
    amenity_id INTEGER PRIMARY KEY AUTOINCREMENT,
    amenity_name TEXT NOT NULL UNIQUE,
    amenity_category TEXT NOT NULL
        CHECK (amenity_category IN ('basic', 'luxury', 'safety', 'accessibility'))
)
"#;

/// SQL to create the properties table
pub const CREATE_PROPERTIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS properties (
    property_id INTEGER PRIMARY KEY AUTOINCREMENT,
    host_id TEXT NOT NULL REFERENCES users(user_id),
    property_type_id INTEGER NOT NULL REFERENCES property_types(property_type_id),
    property_category_id INTEGER NOT NULL REFERENCES property_categories(property_category_id),
    city_id INTEGER NOT NULL REFERENCES cities(city_id),
    name TEXT NOT NULL,
    description TEXT,
    address_line1 TEXT NOT NULL,
    address_line2 TEXT,
    postal_code TEXT,
    latitude REAL,
    longitude REAL,
    price_per_night REAL NOT NULL CHECK (price_per_night >= 0),
    max_guests INTEGER NOT NULL CHECK (max_guests >= 0),
    bedrooms INTEGER NOT NULL DEFAULT 0 CHECK (bedrooms >= 0),
    bathrooms INTEGER NOT NULL DEFAULT 0 CHECK (bathrooms >= 0),
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the property_amenities junction table
/// Rows go away with either parent
pub const CREATE_PROPERTY_AMENITIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS property_amenities (
    property_id INTEGER NOT NULL REFERENCES properties(property_id) ON DELETE CASCADE,
    amenity_id INTEGER NOT NULL REFERENCES amenities(amenity_id) ON DELETE CASCADE,
    PRIMARY KEY (property_id, amenity_id)
)
"#;

/// SQL to create the bookings table
pub const CREATE_BOOKINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS bookings (
    booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
    property_id INTEGER NOT NULL REFERENCES properties(property_id),
    guest_id TEXT NOT NULL REFERENCES users(user_id),
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create the payment_statuses lookup table
pub const CREATE_PAYMENT_STATUSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS payment_statuses (
    payment_status_id INTEGER PRIMARY KEY AUTOINCREMENT,
    status_name TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the payments table
pub const CREATE_PAYMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS payments (
    payment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    booking_id INTEGER NOT NULL REFERENCES bookings(booking_id),
    payment_status_id INTEGER NOT NULL REFERENCES payment_statuses(payment_status_id),
    amount REAL NOT NULL CHECK (amount >= 0),
    payment_date TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    payment_method TEXT NOT NULL
        CHECK (payment_method IN ('credit_card', 'paypal', 'stripe')),
    transaction_id TEXT NOT NULL UNIQUE
)
"#;

/// Refreshes `updated_at` on any property update that did not set it explicitly.
/// The WHEN guard keeps the inner UPDATE from re-firing the trigger.
pub const CREATE_PROPERTIES_UPDATED_AT_TRIGGER: &str = r#"
CREATE TRIGGER IF NOT EXISTS trg_properties_updated_at
AFTER UPDATE ON properties
FOR EACH ROW
WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE properties SET updated_at = CURRENT_TIMESTAMP WHERE property_id = NEW.property_id;
END
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_states_country ON states(country_id)",
    "CREATE INDEX IF NOT EXISTS idx_cities_state ON cities(state_id)",
    "CREATE INDEX IF NOT EXISTS idx_properties_host ON properties(host_id)",
    "CREATE INDEX IF NOT EXISTS idx_properties_city ON properties(city_id)",
    "CREATE INDEX IF NOT EXISTS idx_properties_type ON properties(property_type_id)",
    "CREATE INDEX IF NOT EXISTS idx_properties_category ON properties(property_category_id)",
    "CREATE INDEX IF NOT EXISTS idx_property_amenities_amenity ON property_amenities(amenity_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_property ON bookings(property_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_guest ON bookings(guest_id)",
    "CREATE INDEX IF NOT EXISTS idx_payments_booking ON payments(booking_id)",
    "CREATE INDEX IF NOT EXISTS idx_payments_status ON payments(payment_status_id)",
];

/// Table names in creation order
pub const TABLES: &[&str] = &[
    "users",
    "countries",
    "states",
    "cities",
    "property_types",
    "property_categories",
    "amenities",
    "properties",
    "property_amenities",
    "bookings",
    "payment_statuses",
    "payments",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_USERS_TABLE,
        CREATE_COUNTRIES_TABLE,
        CREATE_STATES_TABLE,
        CREATE_CITIES_TABLE,
        CREATE_PROPERTY_TYPES_TABLE,
        CREATE_PROPERTY_CATEGORIES_TABLE,
        CREATE_AMENITIES_TABLE,
        CREATE_PROPERTIES_TABLE,
        CREATE_PROPERTY_AMENITIES_TABLE,
        CREATE_BOOKINGS_TABLE,
        CREATE_PAYMENT_STATUSES_TABLE,
        CREATE_PAYMENTS_TABLE,
        CREATE_PROPERTIES_UPDATED_AT_TRIGGER,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}

/// Render the schema as a standalone SQL migration script
pub fn ddl_script() -> String {
    render_script(&all_schema_statements())
}

pub(crate) fn render_script(stmts: &[&str]) -> String {
    let mut script = String::new();
    for stmt in stmts {
        script.push_str(stmt.trim());
        script.push_str(";\n\n");
    }
    script
}
