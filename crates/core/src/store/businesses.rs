//! Business table operations.

use super::connection::Store;
use super::records::BusinessRecord;
use crate::Error;
use rusqlite::params;

impl Store {
    /// Insert a batch of business rows.
    ///
    /// Each row is inserted independently with INSERT OR IGNORE keyed on the
    /// detail link: a duplicate skips that single row while the rest of the
    /// batch still proceeds. Returns the number of rows actually inserted.
    pub fn upsert_businesses(&self, records: &[BusinessRecord]) -> Result<usize, Error> {
        let mut stmt = self.conn.prepare(
            "INSERT OR IGNORE INTO businesses
                (link, name, zipcode, category, phone, address, review_count, rating, price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;

        let mut inserted = 0;
        for record in records {
            inserted += stmt.execute(params![
                record.link,
                record.name,
                record.zipcode,
                record.category,
                record.phone,
                record.address,
                record.review_count,
                record.rating,
                record.price,
            ])?;
        }
        Ok(inserted)
    }

    /// List business rows for a zipcode, in insertion order.
    pub fn query_businesses(&self, zipcode: &str) -> Result<Vec<BusinessRecord>, Error> {
        let mut stmt = self.conn.prepare(
            "SELECT link, name, zipcode, category, phone, address, review_count, rating, price
             FROM businesses WHERE zipcode = ?1 ORDER BY rowid",
        )?;

        let rows = stmt.query_map(params![zipcode], |row| {
            Ok(BusinessRecord {
                link: row.get(0)?,
                name: row.get(1)?,
                zipcode: row.get(2)?,
                category: row.get(3)?,
                phone: row.get(4)?,
                address: row.get(5)?,
                review_count: row.get(6)?,
                rating: row.get(7)?,
                price: row.get(8)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business(link: &str, name: &str) -> BusinessRecord {
        BusinessRecord {
            name: name.to_string(),
            zipcode: "48109".to_string(),
            category: "Pizza".to_string(),
            phone: "+17345551234".to_string(),
            address: "1234 S University Ave".to_string(),
            review_count: 120,
            rating: 4.5,
            price: "$$".to_string(),
            link: link.to_string(),
        }
    }

    #[test]
    fn test_batch_insert_and_query_order() {
        let store = Store::open_in_memory().unwrap();
        let batch = vec![business("https://example.com/a", "A"), business("https://example.com/b", "B")];
        assert_eq!(store.upsert_businesses(&batch).unwrap(), 2);

        let rows = store.query_businesses("48109").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "A");
        assert_eq!(rows[1].name, "B");
    }

    #[test]
    fn test_duplicate_link_skips_row_not_batch() {
        let store = Store::open_in_memory().unwrap();
        store
            .upsert_businesses(&[business("https://example.com/a", "A")])
            .unwrap();

        // Duplicate in the middle of a batch must not abort the rest.
        let batch = vec![
            business("https://example.com/b", "B"),
            business("https://example.com/a", "A again"),
            business("https://example.com/c", "C"),
        ];
        assert_eq!(store.upsert_businesses(&batch).unwrap(), 2);

        let rows = store.query_businesses("48109").unwrap();
        assert_eq!(rows.len(), 3);
        // First write for the duplicated link wins.
        assert!(rows.iter().any(|r| r.name == "A"));
        assert!(!rows.iter().any(|r| r.name == "A again"));
    }

    #[test]
    fn test_query_other_zipcode_empty() {
        let store = Store::open_in_memory().unwrap();
        store
            .upsert_businesses(&[business("https://example.com/a", "A")])
            .unwrap();
        assert!(store.query_businesses("48104").unwrap().is_empty());
    }
}
