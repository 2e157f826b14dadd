//! Location table operations.

use super::connection::Store;
use super::records::LocationRecord;
use crate::Error;
use rusqlite::params;

impl Store {
    /// Insert a location row, ignoring the insert if the zipcode already
    /// exists (first write wins).
    ///
    /// Returns true if a row was actually inserted.
    pub fn upsert_location(&self, record: &LocationRecord) -> Result<bool, Error> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO locations (zipcode, latitude, longitude, city, state, timezone)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.zipcode,
                record.latitude,
                record.longitude,
                record.city,
                record.state,
                record.timezone,
            ],
        )?;
        Ok(inserted > 0)
    }

    /// Look up a location row by exact zipcode.
    ///
    /// Returns None if no row exists for the zipcode.
    pub fn query_location(&self, zipcode: &str) -> Result<Option<LocationRecord>, Error> {
        let mut stmt = self.conn.prepare(
            "SELECT zipcode, latitude, longitude, city, state, timezone
             FROM locations WHERE zipcode = ?1",
        )?;

        let result = stmt.query_row(params![zipcode], |row| {
            Ok(LocationRecord {
                zipcode: row.get(0)?,
                latitude: row.get(1)?,
                longitude: row.get(2)?,
                city: row.get(3)?,
                state: row.get(4)?,
                timezone: row.get(5)?,
            })
        });

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann_arbor() -> LocationRecord {
        LocationRecord {
            zipcode: "48109".to_string(),
            latitude: "42.27".to_string(),
            longitude: "-83.75".to_string(),
            city: "Ann Arbor".to_string(),
            state: "MI".to_string(),
            timezone: "EST".to_string(),
        }
    }

    #[test]
    fn test_upsert_and_query() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.upsert_location(&ann_arbor()).unwrap());

        let row = store.query_location("48109").unwrap().unwrap();
        assert_eq!(row, ann_arbor());
    }

    #[test]
    fn test_query_missing() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.query_location("99999").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_zipcode_first_write_wins() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.upsert_location(&ann_arbor()).unwrap());

        let changed = LocationRecord { city: "Somewhere Else".to_string(), ..ann_arbor() };
        assert!(!store.upsert_location(&changed).unwrap());

        let count: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM locations WHERE zipcode = '48109'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);

        let row = store.query_location("48109").unwrap().unwrap();
        assert_eq!(row.city, "Ann Arbor");
    }
}
