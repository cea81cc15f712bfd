//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use serde::Serialize;
use crate::{Result, Error};
use crate::booking::Booking;
use crate::listing::{Amenity, AmenityCategory, NewProperty, Property, PropertyCategory, PropertyType};
use crate::location::{City, Country, State};
use crate::payment::{NewPayment, Payment, PaymentMethod, PaymentStatus};
use crate::user::User;
use super::{schema, seed};

const PROPERTY_COLUMNS: &str = "property_id, host_id, property_type_id, property_category_id, city_id, \
    name, description, address_line1, address_line2, postal_code, latitude, longitude, \
    price_per_night, max_guests, bedrooms, bathrooms, created_at, updated_at";

const PAYMENT_COLUMNS: &str =
    "payment_id, booking_id, payment_status_id, amount, payment_date, payment_method, transaction_id";

/// SQLite-backed storage for the marketplace schema
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        tracing::debug!("Opened database {}", path.display());
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Enable foreign keys and apply the schema.
    /// The pragma is per connection, so it runs on every open.
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute_batch(stmt)?;
        }
        Ok(())
    }

    fn collect_rows<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: rusqlite::Params,
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map)?.collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(rows)
    }

    // ========== User Operations ==========

    /// Insert a user with an opaque identifier
    pub fn insert_user(&self, user_id: &str) -> Result<()> {
        self.conn.execute("INSERT INTO users (user_id) VALUES (?1)", [user_id])?;
        Ok(())
    }

    /// Get a user by identifier
    pub fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.conn
            .query_row(
                "SELECT user_id, created_at FROM users WHERE user_id = ?1",
                [user_id],
                |row| Ok(User { user_id: row.get(0)?, created_at: row.get(1)? }),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Delete a user. Fails while the user still hosts properties or holds bookings.
    pub fn delete_user(&self, user_id: &str) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM users WHERE user_id = ?1", [user_id])?;
        Ok(deleted > 0)
    }

    // ========== Location Operations ==========

    /// Insert a country, returning its id
    pub fn insert_country(&self, name: &str, code: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO countries (country_name, country_code) VALUES (?1, ?2)",
            params![name, code],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Find a country by its exact name
    pub fn find_country_by_name(&self, name: &str) -> Result<Option<Country>> {
        self.conn
            .query_row(
                "SELECT country_id, country_name, country_code FROM countries WHERE country_name = ?1",
                [name],
                row_to_country,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all countries ordered by name
    pub fn list_countries(&self) -> Result<Vec<Country>> {
        self.collect_rows(
            "SELECT country_id, country_name, country_code FROM countries ORDER BY country_name",
            [],
            row_to_country,
        )
    }

    /// Delete a country. Fails while any state references it.
    pub fn delete_country(&self, country_id: i64) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM countries WHERE country_id = ?1", [country_id])?;
        Ok(deleted > 0)
    }

    /// Insert a state under a country, returning its id
    pub fn insert_state(&self, country_id: i64, name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO states (country_id, state_name) VALUES (?1, ?2)",
            params![country_id, name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List states, optionally restricted to one country
    pub fn list_states(&self, country_id: Option<i64>) -> Result<Vec<State>> {
        match country_id {
            Some(id) => self.collect_rows(
                "SELECT state_id, country_id, state_name FROM states WHERE country_id = ?1 ORDER BY state_name",
                [id],
                row_to_state,
            ),
            None => self.collect_rows(
                "SELECT state_id, country_id, state_name FROM states ORDER BY country_id, state_name",
                [],
                row_to_state,
            ),
        }
    }

    /// Delete a state. Fails while any city references it.
    pub fn delete_state(&self, state_id: i64) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM states WHERE state_id = ?1", [state_id])?;
        Ok(deleted > 0)
    }

    /// Insert a city under a state, returning its id
    pub fn insert_city(&self, state_id: i64, name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO cities (state_id, city_name) VALUES (?1, ?2)",
            params![state_id, name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List cities, optionally restricted to one state
    pub fn list_cities(&self, state_id: Option<i64>) -> Result<Vec<City>> {
        match state_id {
            Some(id) => self.collect_rows(
                "SELECT city_id, state_id, city_name FROM cities WHERE state_id = ?1 ORDER BY city_name",
                [id],
                row_to_city,
            ),
            None => self.collect_rows(
                "SELECT city_id, state_id, city_name FROM cities ORDER BY state_id, city_name",
                [],
                row_to_city,
            ),
        }
    }

    /// Delete a city. Fails while any property references it.
    pub fn delete_city(&self, city_id: i64) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM cities WHERE city_id = ?1", [city_id])?;
        Ok(deleted > 0)
    }

    // ========== Lookup Operations ==========

    /// Insert a property type, returning its id
    pub fn insert_property_type(&self, name: &str) -> Result<i64> {
        self.conn.execute("INSERT INTO property_types (type_name) VALUES (?1)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List all property types ordered by name
    pub fn list_property_types(&self) -> Result<Vec<PropertyType>> {
        self.collect_rows(
            "SELECT property_type_id, type_name FROM property_types ORDER BY type_name",
            [],
            |row| Ok(PropertyType { property_type_id: row.get(0)?, type_name: row.get(1)? }),
        )
    }

    /// Insert a property category, returning its id
    pub fn insert_property_category(&self, name: &str) -> Result<i64> {
        self.conn.execute("INSERT INTO property_categories (category_name) VALUES (?1)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List all property categories ordered by name
    pub fn list_property_categories(&self) -> Result<Vec<PropertyCategory>> {
        self.collect_rows(
            "SELECT property_category_id, category_name FROM property_categories ORDER BY category_name",
            [],
            |row| Ok(PropertyCategory { property_category_id: row.get(0)?, category_name: row.get(1)? }),
        )
    }

    /// Insert an amenity, returning its id
    pub fn insert_amenity(&self, name: &str, category: AmenityCategory) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO amenities (amenity_name, amenity_category) VALUES (?1, ?2)",
            params![name, category.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get an amenity by id
    pub fn get_amenity(&self, amenity_id: i64) -> Result<Option<Amenity>> {
        self.conn
            .query_row(
                "SELECT amenity_id, amenity_name, amenity_category FROM amenities WHERE amenity_id = ?1",
                [amenity_id],
                row_to_amenity,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all amenities ordered by category, then name
    pub fn list_amenities(&self) -> Result<Vec<Amenity>> {
        self.collect_rows(
            "SELECT amenity_id, amenity_name, amenity_category FROM amenities ORDER BY amenity_category, amenity_name",
            [],
            row_to_amenity,
        )
    }

    /// Find amenities in one category
    pub fn find_amenities_by_category(&self, category: AmenityCategory) -> Result<Vec<Amenity>> {
        self.collect_rows(
            "SELECT amenity_id, amenity_name, amenity_category FROM amenities WHERE amenity_category = ?1 ORDER BY amenity_name",
            [category.as_str()],
            row_to_amenity,
        )
    }

    /// Delete an amenity; its property links cascade away
    pub fn delete_amenity(&self, amenity_id: i64) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM amenities WHERE amenity_id = ?1", [amenity_id])?;
        Ok(deleted > 0)
    }

    /// Insert a payment status, returning its id
    pub fn insert_payment_status(&self, name: &str) -> Result<i64> {
        self.conn.execute("INSERT INTO payment_statuses (status_name) VALUES (?1)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Find a payment status by name
    pub fn find_payment_status_by_name(&self, name: &str) -> Result<Option<PaymentStatus>> {
        self.conn
            .query_row(
                "SELECT payment_status_id, status_name FROM payment_statuses WHERE status_name = ?1",
                [name],
                row_to_payment_status,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all payment statuses in insertion order
    pub fn list_payment_statuses(&self) -> Result<Vec<PaymentStatus>> {
        self.collect_rows(
            "SELECT payment_status_id, status_name FROM payment_statuses ORDER BY payment_status_id",
            [],
            row_to_payment_status,
        )
    }

    // ========== Property Operations ==========

    /// Insert a property, returning its id
    pub fn insert_property(&self, property: &NewProperty) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO properties (
                host_id, property_type_id, property_category_id, city_id,
                name, description, address_line1, address_line2, postal_code,
                latitude, longitude, price_per_night, max_guests, bedrooms, bathrooms
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
            params![
                property.host_id,
                property.property_type_id,
                property.property_category_id,
                property.city_id,
                property.name,
                property.description,
                property.address_line1,
                property.address_line2,
                property.postal_code,
                property.latitude,
                property.longitude,
                property.price_per_night,
                property.max_guests,
                property.bedrooms,
                property.bathrooms,
            ],
        )?;
        let property_id = self.conn.last_insert_rowid();
        tracing::debug!(property_id, host = %property.host_id, "Inserted property");
        Ok(property_id)
    }

    /// Get a property by id
    pub fn get_property(&self, property_id: i64) -> Result<Option<Property>> {
        let sql = format!("SELECT {} FROM properties WHERE property_id = ?1", PROPERTY_COLUMNS);
        self.conn
            .query_row(&sql, [property_id], row_to_property)
            .optional()
            .map_err(Into::into)
    }

    /// Overwrite every mutable column of a property.
    /// `updated_at` is refreshed by the schema trigger.
    pub fn update_property(&self, property_id: i64, property: &NewProperty) -> Result<()> {
        let updated = self.conn.execute(
            r#"
            UPDATE properties SET
                host_id = ?2, property_type_id = ?3, property_category_id = ?4, city_id = ?5,
                name = ?6, description = ?7, address_line1 = ?8, address_line2 = ?9, postal_code = ?10,
                latitude = ?11, longitude = ?12, price_per_night = ?13, max_guests = ?14,
                bedrooms = ?15, bathrooms = ?16
            WHERE property_id = ?1
            "#,
            params![
                property_id,
                property.host_id,
                property.property_type_id,
                property.property_category_id,
                property.city_id,
                property.name,
                property.description,
                property.address_line1,
                property.address_line2,
                property.postal_code,
                property.latitude,
                property.longitude,
                property.price_per_night,
                property.max_guests,
                property.bedrooms,
                property.bathrooms,
            ],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("property {}", property_id)));
        }
        Ok(())
    }

    /// Delete a property; its amenity links cascade away.
    /// Fails while bookings reference the property.
    pub fn delete_property(&self, property_id: i64) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM properties WHERE property_id = ?1", [property_id])?;
        if deleted > 0 {
            tracing::debug!(property_id, "Deleted property");
        }
        Ok(deleted > 0)
    }

    /// Find all properties owned by a host
    pub fn find_properties_by_host(&self, host_id: &str) -> Result<Vec<Property>> {
        let sql = format!("SELECT {} FROM properties WHERE host_id = ?1 ORDER BY property_id", PROPERTY_COLUMNS);
        self.collect_rows(&sql, [host_id], row_to_property)
    }

    /// Find all properties located in a city
    pub fn find_properties_in_city(&self, city_id: i64) -> Result<Vec<Property>> {
        let sql = format!("SELECT {} FROM properties WHERE city_id = ?1 ORDER BY property_id", PROPERTY_COLUMNS);
        self.collect_rows(&sql, [city_id], row_to_property)
    }

    // ========== Property Amenity Operations ==========

    /// Link an amenity to a property
    pub fn add_property_amenity(&self, property_id: i64, amenity_id: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO property_amenities (property_id, amenity_id) VALUES (?1, ?2)",
            params![property_id, amenity_id],
        )?;
        Ok(())
    }

    /// Unlink an amenity from a property
    pub fn remove_property_amenity(&self, property_id: i64, amenity_id: i64) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM property_amenities WHERE property_id = ?1 AND amenity_id = ?2",
            params![property_id, amenity_id],
        )?;
        Ok(deleted > 0)
    }

    /// Amenities linked to a property
    pub fn amenities_for_property(&self, property_id: i64) -> Result<Vec<Amenity>> {
        self.collect_rows(
            r#"
            SELECT a.amenity_id, a.amenity_name, a.amenity_category
            FROM amenities a
            JOIN property_amenities pa ON pa.amenity_id = a.amenity_id
            WHERE pa.property_id = ?1
            ORDER BY a.amenity_name
            "#,
            [property_id],
            row_to_amenity,
        )
    }

    /// Count amenity links of a property
    pub fn count_property_amenities(&self, property_id: i64) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM property_amenities WHERE property_id = ?1",
            [property_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    // ========== Booking Operations ==========

    /// Insert a booking for a guest, returning its id
    pub fn insert_booking(&self, property_id: i64, guest_id: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO bookings (property_id, guest_id) VALUES (?1, ?2)",
            params![property_id, guest_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a booking by id
    pub fn get_booking(&self, booking_id: i64) -> Result<Option<Booking>> {
        self.conn
            .query_row(
                "SELECT booking_id, property_id, guest_id, created_at FROM bookings WHERE booking_id = ?1",
                [booking_id],
                row_to_booking,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Bookings made against a property
    pub fn find_bookings_for_property(&self, property_id: i64) -> Result<Vec<Booking>> {
        self.collect_rows(
            "SELECT booking_id, property_id, guest_id, created_at FROM bookings WHERE property_id = ?1 ORDER BY booking_id",
            [property_id],
            row_to_booking,
        )
    }

    // ========== Payment Operations ==========

    /// Record a payment, returning its id
    pub fn insert_payment(&self, payment: &NewPayment) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO payments (booking_id, payment_status_id, amount, payment_method, transaction_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                payment.booking_id,
                payment.payment_status_id,
                payment.amount,
                payment.payment_method.as_str(),
                payment.transaction_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a payment by id
    pub fn get_payment(&self, payment_id: i64) -> Result<Option<Payment>> {
        let sql = format!("SELECT {} FROM payments WHERE payment_id = ?1", PAYMENT_COLUMNS);
        self.conn
            .query_row(&sql, [payment_id], row_to_payment)
            .optional()
            .map_err(Into::into)
    }

    /// Payments recorded against a booking
    pub fn find_payments_for_booking(&self, booking_id: i64) -> Result<Vec<Payment>> {
        let sql = format!("SELECT {} FROM payments WHERE booking_id = ?1 ORDER BY payment_id", PAYMENT_COLUMNS);
        self.collect_rows(&sql, [booking_id], row_to_payment)
    }

    /// Move a payment to another status
    pub fn set_payment_status(&self, payment_id: i64, payment_status_id: i64) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE payments SET payment_status_id = ?2 WHERE payment_id = ?1",
            params![payment_id, payment_status_id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("payment {}", payment_id)));
        }
        Ok(())
    }

    // ========== Bulk Operations ==========

    /// Insert the example reference data in one transaction.
    /// Rows that already exist are left alone.
    pub fn seed_reference_data(&self) -> Result<SeedReport> {
        let tx = self.conn.unchecked_transaction()?;
        let mut report = SeedReport::default();
        for (table, stmt) in seed::all_seed_statements() {
            let inserted = tx.execute(stmt, [])?;
            tracing::debug!(table, inserted, "Seeded reference table");
            report.inserted.push((table, inserted));
        }
        tx.commit()?;
        Ok(report)
    }

    /// Count rows of one table
    fn count_rows(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        let mut tables = Vec::with_capacity(schema::TABLES.len());
        for table in schema::TABLES {
            tables.push((*table, self.count_rows(table)?));
        }
        Ok(DbStats { tables })
    }
}

fn row_to_country(row: &rusqlite::Row) -> rusqlite::Result<Country> {
    Ok(Country {
        country_id: row.get(0)?,
        country_name: row.get(1)?,
        country_code: row.get(2)?,
    })
}

fn row_to_state(row: &rusqlite::Row) -> rusqlite::Result<State> {
    Ok(State {
        state_id: row.get(0)?,
        country_id: row.get(1)?,
        state_name: row.get(2)?,
    })
}

fn row_to_city(row: &rusqlite::Row) -> rusqlite::Result<City> {
    Ok(City {
        city_id: row.get(0)?,
        state_id: row.get(1)?,
        city_name: row.get(2)?,
    })
}

fn row_to_amenity(row: &rusqlite::Row) -> rusqlite::Result<Amenity> {
    let category_str: String = row.get(2)?;
    let amenity_category: AmenityCategory = category_str.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Amenity {
        amenity_id: row.get(0)?,
        amenity_name: row.get(1)?,
        amenity_category,
    })
}

fn row_to_payment_status(row: &rusqlite::Row) -> rusqlite::Result<PaymentStatus> {
    Ok(PaymentStatus {
        payment_status_id: row.get(0)?,
        status_name: row.get(1)?,
    })
}

fn row_to_property(row: &rusqlite::Row) -> rusqlite::Result<Property> {
    Ok(Property {
        property_id: row.get(0)?,
        details: NewProperty {
            host_id: row.get(1)?,
            property_type_id: row.get(2)?,
            property_category_id: row.get(3)?,
            city_id: row.get(4)?,
            name: row.get(5)?,
            description: row.get(6)?,
            address_line1: row.get(7)?,
            address_line2: row.get(8)?,
            postal_code: row.get(9)?,
            latitude: row.get(10)?,
            longitude: row.get(11)?,
            price_per_night: row.get(12)?,
            max_guests: row.get(13)?,
            bedrooms: row.get(14)?,
            bathrooms: row.get(15)?,
        },
        created_at: row.get(16)?,
        updated_at: row.get(17)?,
    })
}

fn row_to_booking(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    Ok(Booking {
        booking_id: row.get(0)?,
        property_id: row.get(1)?,
        guest_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn row_to_payment(row: &rusqlite::Row) -> rusqlite::Result<Payment> {
    let method_str: String = row.get(5)?;
    let payment_method: PaymentMethod = method_str.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Payment {
        payment_id: row.get(0)?,
        booking_id: row.get(1)?,
        payment_status_id: row.get(2)?,
        amount: row.get(3)?,
        payment_date: row.get(4)?,
        payment_method,
        transaction_id: row.get(6)?,
    })
}

/// Rows inserted per table by a seeding run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub inserted: Vec<(&'static str, usize)>,
}

impl SeedReport {
    /// Rows inserted into one table
    pub fn inserted_into(&self, table: &str) -> usize {
        self.inserted
            .iter()
            .find(|(name, _)| *name == table)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Rows inserted across all tables
    pub fn total(&self) -> usize {
        self.inserted.iter().map(|(_, count)| count).sum()
    }
}

impl std::fmt::Display for SeedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Seeded rows:")?;
        for (table, count) in &self.inserted {
            writeln!(f, "  {}: {}", table, count)?;
        }
        Ok(())
    }
}

/// Database statistics: row count per table, in schema order
#[derive(Debug, Clone, Serialize)]
pub struct DbStats {
    pub tables: Vec<(&'static str, usize)>,
}

impl DbStats {
    /// Row count of one table
    pub fn count(&self, table: &str) -> usize {
        self.tables
            .iter()
            .find(|(name, _)| *name == table)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        for (table, count) in &self.tables {
            writeln!(f, "  {}: {}", table, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ids of a minimal, fully referenced listing
    struct Listing {
        country_id: i64,
        state_id: i64,
        city_id: i64,
        property_id: i64,
    }

    fn listing_fixture(store: &SqliteStore) -> Listing {
        store.insert_user("host-1").unwrap();
        let country_id = store.insert_country("United States", "US").unwrap();
        let state_id = store.insert_state(country_id, "California").unwrap();
        let city_id = store.insert_city(state_id, "San Francisco").unwrap();
        let type_id = store.insert_property_type("Apartment").unwrap();
        let category_id = store.insert_property_category("Entire place").unwrap();

        let property = NewProperty::new("host-1", type_id, category_id, city_id, "Bay Loft", "1 Market St")
            .with_price(180.0)
            .with_capacity(3, 1, 1);
        let property_id = store.insert_property(&property).unwrap();

        Listing { country_id, state_id, city_id, property_id }
    }

    fn booking_fixture(store: &SqliteStore, listing: &Listing) -> i64 {
        store.insert_user("guest-1").unwrap();
        store.insert_booking(listing.property_id, "guest-1").unwrap()
    }

    #[test]
    fn test_state_requires_existing_country() {
        let store = SqliteStore::open_in_memory().unwrap();

        let err = store.insert_state(42, "Nowhere").unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);
    }

    #[test]
    fn test_city_name_unique_within_state() {
        let store = SqliteStore::open_in_memory().unwrap();
        let country = store.insert_country("United States", "US").unwrap();
        let oregon = store.insert_state(country, "Oregon").unwrap();
        let maine = store.insert_state(country, "Maine").unwrap();

        store.insert_city(oregon, "Portland").unwrap();
        let err = store.insert_city(oregon, "Portland").unwrap_err();
        assert!(matches!(err, Error::UniqueViolation(_)), "got {:?}", err);

        store.insert_city(maine, "Portland").unwrap();
        assert_eq!(store.list_cities(None).unwrap().len(), 2);
        assert_eq!(store.list_cities(Some(maine)).unwrap().len(), 1);
    }

    #[test]
    fn test_seeded_countries_accept_one_state_each_name() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.seed_reference_data().unwrap();

        let us = store.find_country_by_name("United States").unwrap().unwrap();
        assert_eq!(us.country_code, "US");

        store.insert_state(us.country_id, "Texas").unwrap();
        let err = store.insert_state(us.country_id, "Texas").unwrap_err();
        assert!(matches!(err, Error::UniqueViolation(_)), "got {:?}", err);

        let canada = store.find_country_by_name("Canada").unwrap().unwrap();
        store.insert_state(canada.country_id, "Texas").unwrap();
    }

    #[test]
    fn test_delete_property_cascades_amenity_links() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);
        let wifi = store.insert_amenity("WiFi", AmenityCategory::Basic).unwrap();
        let pool = store.insert_amenity("Pool", AmenityCategory::Luxury).unwrap();

        store.add_property_amenity(listing.property_id, wifi).unwrap();
        store.add_property_amenity(listing.property_id, pool).unwrap();
        assert_eq!(store.count_property_amenities(listing.property_id).unwrap(), 2);

        assert!(store.delete_property(listing.property_id).unwrap());

        assert_eq!(store.count_property_amenities(listing.property_id).unwrap(), 0);
        assert_eq!(store.stats().unwrap().count("property_amenities"), 0);
        assert!(store.get_amenity(wifi).unwrap().is_some());
        assert!(store.get_amenity(pool).unwrap().is_some());
    }

    #[test]
    fn test_delete_amenity_cascades_links_but_keeps_property() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);
        let wifi = store.insert_amenity("WiFi", AmenityCategory::Basic).unwrap();
        store.add_property_amenity(listing.property_id, wifi).unwrap();

        assert!(store.delete_amenity(wifi).unwrap());

        assert!(store.amenities_for_property(listing.property_id).unwrap().is_empty());
        assert!(store.get_property(listing.property_id).unwrap().is_some());
    }

    #[test]
    fn test_duplicate_property_amenity_link_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);
        let wifi = store.insert_amenity("WiFi", AmenityCategory::Basic).unwrap();

        store.add_property_amenity(listing.property_id, wifi).unwrap();
        let err = store.add_property_amenity(listing.property_id, wifi).unwrap_err();
        assert!(matches!(err, Error::UniqueViolation(_)), "got {:?}", err);

        assert!(store.remove_property_amenity(listing.property_id, wifi).unwrap());
        assert!(!store.remove_property_amenity(listing.property_id, wifi).unwrap());
    }

    #[test]
    fn test_amenity_category_outside_set_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();

        let err: Error = store
            .conn
            .execute(
                "INSERT INTO amenities (amenity_name, amenity_category) VALUES ('Sauna', 'spa')",
                [],
            )
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::CheckViolation(_)), "got {:?}", err);
        assert!("spa".parse::<AmenityCategory>().is_err());
    }

    #[test]
    fn test_amenity_name_unique() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_amenity("WiFi", AmenityCategory::Basic).unwrap();

        let err = store.insert_amenity("WiFi", AmenityCategory::Luxury).unwrap_err();
        assert!(matches!(err, Error::UniqueViolation(_)), "got {:?}", err);
    }

    #[test]
    fn test_payment_method_outside_set_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);
        let booking_id = booking_fixture(&store, &listing);
        let pending = store.insert_payment_status("pending").unwrap();

        let err: Error = store
            .conn
            .execute(
                "INSERT INTO payments (booking_id, payment_status_id, amount, payment_method, transaction_id)
                 VALUES (?1, ?2, 10.0, 'bitcoin', 'tx-1')",
                params![booking_id, pending],
            )
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::CheckViolation(_)), "got {:?}", err);
    }

    #[test]
    fn test_payment_crud() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);
        let booking_id = booking_fixture(&store, &listing);
        let pending = store.insert_payment_status("pending").unwrap();
        let completed = store.insert_payment_status("completed").unwrap();

        let payment = NewPayment {
            booking_id,
            payment_status_id: pending,
            amount: 360.0,
            payment_method: PaymentMethod::Stripe,
            transaction_id: "ch_123".to_string(),
        };
        let payment_id = store.insert_payment(&payment).unwrap();

        store.set_payment_status(payment_id, completed).unwrap();

        let stored = store.get_payment(payment_id).unwrap().unwrap();
        assert_eq!(stored.payment_method, PaymentMethod::Stripe);
        assert_eq!(stored.payment_status_id, completed);
        assert_eq!(stored.amount, 360.0);
        assert!(!stored.payment_date.is_empty());
        assert_eq!(store.find_payments_for_booking(booking_id).unwrap().len(), 1);

        let err = store.insert_payment(&payment).unwrap_err();
        assert!(matches!(err, Error::UniqueViolation(_)), "got {:?}", err);
    }

    #[test]
    fn test_payment_requires_existing_booking_and_status() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);
        let booking_id = booking_fixture(&store, &listing);
        let pending = store.insert_payment_status("pending").unwrap();

        let mut payment = NewPayment {
            booking_id: booking_id + 100,
            payment_status_id: pending,
            amount: 50.0,
            payment_method: PaymentMethod::Paypal,
            transaction_id: "pp-1".to_string(),
        };
        let err = store.insert_payment(&payment).unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);

        payment.booking_id = booking_id;
        let payment_id = store.insert_payment(&payment).unwrap();
        let err = store.set_payment_status(payment_id, pending + 100).unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);

        let err = store.set_payment_status(payment_id + 100, pending).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
    }

    #[test]
    fn test_property_requires_existing_references() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);
        let existing = store.get_property(listing.property_id).unwrap().unwrap().details;

        let mut missing_host = existing.clone();
        missing_host.host_id = "ghost".to_string();
        let err = store.insert_property(&missing_host).unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);

        let mut missing_city = existing.clone();
        missing_city.city_id = listing.city_id + 100;
        let err = store.insert_property(&missing_city).unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);
    }

    #[test]
    fn test_property_rejects_negative_price_and_capacity() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);
        let existing = store.get_property(listing.property_id).unwrap().unwrap().details;

        let err = store.insert_property(&existing.clone().with_price(-1.0)).unwrap_err();
        assert!(matches!(err, Error::CheckViolation(_)), "got {:?}", err);

        let err = store.insert_property(&existing.with_capacity(-2, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::CheckViolation(_)), "got {:?}", err);
    }

    #[test]
    fn test_update_property_refreshes_updated_at() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);
        store
            .conn
            .execute(
                "UPDATE properties SET updated_at = '2000-01-01 00:00:00' WHERE property_id = ?1",
                [listing.property_id],
            )
            .unwrap();

        let before = store.get_property(listing.property_id).unwrap().unwrap();
        assert_eq!(before.updated_at, "2000-01-01 00:00:00");

        let mut details = before.details.clone();
        details.name = "Bay Loft (renovated)".to_string();
        details.price_per_night = 210.0;
        store.update_property(listing.property_id, &details).unwrap();

        let after = store.get_property(listing.property_id).unwrap().unwrap();
        assert_eq!(after.details.name, "Bay Loft (renovated)");
        assert_eq!(after.details.price_per_night, 210.0);
        assert_ne!(after.updated_at, "2000-01-01 00:00:00");
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_update_missing_property_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);
        let details = store.get_property(listing.property_id).unwrap().unwrap().details;

        let err = store.update_property(listing.property_id + 1, &details).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
    }

    #[test]
    fn test_referenced_lookup_rows_cannot_be_deleted() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);

        let err = store.delete_country(listing.country_id).unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);
        let err = store.delete_state(listing.state_id).unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);
        let err = store.delete_city(listing.city_id).unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);
        let err = store.delete_user("host-1").unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);
    }

    #[test]
    fn test_booked_property_cannot_be_deleted() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);
        let booking_id = booking_fixture(&store, &listing);

        let err = store.delete_property(listing.property_id).unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);

        let booking = store.get_booking(booking_id).unwrap().unwrap();
        assert_eq!(booking.guest_id, "guest-1");
        assert_eq!(store.find_bookings_for_property(listing.property_id).unwrap().len(), 1);
    }

    #[test]
    fn test_booking_requires_existing_guest() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);

        let err = store.insert_booking(listing.property_id, "nobody").unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);
    }

    #[test]
    fn test_find_properties_by_host_and_city() {
        let store = SqliteStore::open_in_memory().unwrap();
        let listing = listing_fixture(&store);

        let hosted = store.find_properties_by_host("host-1").unwrap();
        assert_eq!(hosted.len(), 1);
        assert_eq!(hosted[0].details.name, "Bay Loft");
        assert_eq!(store.find_properties_in_city(listing.city_id).unwrap().len(), 1);
        assert!(store.find_properties_by_host("guest-1").unwrap().is_empty());
    }

    #[test]
    fn test_seed_is_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();

        let first = store.seed_reference_data().unwrap();
        assert_eq!(first.inserted_into("countries"), 3);
        assert_eq!(first.inserted_into("payment_statuses"), 3);
        assert!(first.total() > 0);

        let second = store.seed_reference_data().unwrap();
        assert_eq!(second.total(), 0);
        assert_eq!(store.list_countries().unwrap().len(), 3);
        assert_eq!(
            store.find_amenities_by_category(AmenityCategory::Accessibility).unwrap().len(),
            1
        );
        assert!(store.find_payment_status_by_name("completed").unwrap().is_some());
    }

    #[test]
    fn test_stats_cover_every_table() {
        let store = SqliteStore::open_in_memory().unwrap();
        listing_fixture(&store);

        let stats = store.stats().unwrap();
        assert_eq!(stats.tables.len(), schema::TABLES.len());
        assert_eq!(stats.count("properties"), 1);
        assert_eq!(stats.count("users"), 1);
        assert_eq!(stats.count("payments"), 0);
    }

    #[test]
    fn test_reopen_keeps_data_and_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staybook.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.seed_reference_data().unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.list_countries().unwrap().len(), 3);
        let err = store.insert_city(999, "Atlantis").unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)), "got {:?}", err);
    }
}
