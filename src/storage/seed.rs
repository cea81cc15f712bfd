//! Seed data for the reference tables
//!
//! Every statement is `INSERT OR IGNORE`, so seeding an already seeded
//! database changes nothing.

/// Example countries
pub const SEED_COUNTRIES: &str = r#"
INSERT OR IGNORE INTO countries (country_name, country_code) VALUES
    ('United States', 'US'),
    ('Canada', 'CA'),
    ('United Kingdom', 'UK')
"#;

/// Example property types
pub const SEED_PROPERTY_TYPES: &str = r#"
INSERT OR IGNORE INTO property_types (type_name) VALUES
    ('Apartment'),
    ('House'),
    ('Villa'),
    ('Cabin'),
    ('Cottage')
"#;

/// Example amenities, at least one per category
pub const SEED_AMENITIES: &str = r#"
INSERT OR IGNORE INTO amenities (amenity_name, amenity_category) VALUES
    ('WiFi', 'basic'),
    ('Kitchen', 'basic'),
    ('Air Conditioning', 'basic'),
    ('Swimming Pool', 'luxury'),
    ('Hot Tub', 'luxury'),
    ('Smoke Detector', 'safety'),
    ('First Aid Kit', 'safety'),
    ('Wheelchair Accessible', 'accessibility')
"#;

/// Payment lifecycle states
pub const SEED_PAYMENT_STATUSES: &str = r#"
INSERT OR IGNORE INTO payment_statuses (status_name) VALUES
    ('pending'),
    ('completed'),
    ('failed')
"#;

/// Seed statements paired with the table they populate
pub fn all_seed_statements() -> Vec<(&'static str, &'static str)> {
    vec![
        ("countries", SEED_COUNTRIES),
        ("property_types", SEED_PROPERTY_TYPES),
        ("amenities", SEED_AMENITIES),
        ("payment_statuses", SEED_PAYMENT_STATUSES),
    ]
}

/// Render the seed data as a standalone SQL script
pub fn seed_script() -> String {
    let stmts: Vec<&str> = all_seed_statements().into_iter().map(|(_, s)| s).collect();
    super::schema::render_script(&stmts)
}
