//! Pet provider - the single entry point for reading and writing pets
//!
//! Every call is addressed by a [`ContentUri`] that resolves to either the
//! whole collection or one row. Row URIs force the filter to `_id = ?` and
//! discard whatever filter the caller passed. Writes validate `name`, coerce
//! an empty `breed` to `"Unknown"` and, when they touched at least one row,
//! notify observers of the URI before returning.

use std::sync::Arc;

use rusqlite::params_from_iter;
use rusqlite::types::Value;

use crate::contract::{CONTENT_ITEM_TYPE, CONTENT_LIST_TYPE, DEFAULT_BREED, PetEntry};
use crate::cursor::Cursor;
use crate::notify::{ChangeNotifier, ChangeObserver, ObserverId, Subscription};
use crate::storage::schema::quote_identifier;
use crate::storage::PetDbHelper;
use crate::uri::{resolve, ContentUri, Resource};
use crate::values::ContentValues;
use crate::{Error, Result};

/// Filter a write or query runs with, after routing.
struct Selection<'a> {
    clause: Option<&'a str>,
    args: Vec<Value>,
}

impl<'a> Selection<'a> {
    fn route(resource: Resource, clause: Option<&'a str>, args: &[Value]) -> Self {
        match resource {
            Resource::Collection => Self {
                clause: clause.filter(|c| !c.trim().is_empty()),
                args: args.to_vec(),
            },
            Resource::Item(id) => Self {
                clause: Some(ID_SELECTION),
                args: vec![Value::Integer(id)],
            },
        }
    }

    fn where_sql(&self) -> String {
        match self.clause {
            Some(clause) => format!(" WHERE {}", clause),
            None => String::new(),
        }
    }
}

const ID_SELECTION: &str = "_id = ?";

/// Content provider over the `Pets` table.
pub struct PetProvider {
    db: PetDbHelper,
    notifier: Arc<ChangeNotifier>,
}

impl PetProvider {
    pub fn new(db: PetDbHelper) -> Self {
        Self {
            db,
            notifier: Arc::new(ChangeNotifier::new()),
        }
    }

    pub fn db(&self) -> &PetDbHelper {
        &self.db
    }

    pub fn notifier(&self) -> &Arc<ChangeNotifier> {
        &self.notifier
    }

    /// Watch `uri` for changes made through this provider
    pub fn register_observer(
        &self,
        uri: &ContentUri,
        notify_for_descendants: bool,
        observer: Arc<dyn ChangeObserver>,
    ) -> ObserverId {
        self.notifier.register(uri, notify_for_descendants, observer)
    }

    pub fn unregister_observer(&self, id: ObserverId) -> bool {
        self.notifier.unregister(id)
    }

    /// Channel-backed watch on `uri`
    pub fn subscribe(&self, uri: &ContentUri, notify_for_descendants: bool) -> Subscription {
        self.notifier.subscribe(uri, notify_for_descendants)
    }

    /// MIME type of the data behind `uri`
    pub fn get_type(&self, uri: &ContentUri) -> Result<&'static str> {
        match resolve(uri)? {
            Resource::Collection => Ok(CONTENT_LIST_TYPE),
            Resource::Item(_) => Ok(CONTENT_ITEM_TYPE),
        }
    }

    /// Query the given URI with the given projection, selection, selection
    /// arguments and sort order. `None` projection selects every column.
    ///
    /// The returned cursor watches `uri`, so observers registered through it
    /// hear about later writes to the same data.
    pub fn query(
        &self,
        uri: &ContentUri,
        projection: Option<&[&str]>,
        selection: Option<&str>,
        selection_args: &[Value],
        sort_order: Option<&str>,
    ) -> Result<Cursor> {
        let resource = resolve(uri)?;
        let selection = Selection::route(resource, selection, selection_args);

        let columns = match projection {
            Some(columns) if !columns.is_empty() => columns
                .iter()
                .map(|c| quote_identifier(c))
                .collect::<Vec<_>>()
                .join(", "),
            _ => "*".to_string(),
        };

        let mut sql = format!("SELECT {} FROM {}{}", columns, PetEntry::TABLE_NAME, selection.where_sql());
        if let Some(order) = sort_order.filter(|o| !o.trim().is_empty()) {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        let conn = self.db.readable()?;
        let mut stmt = conn.prepare(&sql)?;
        let mut cursor = Cursor::from_statement(&mut stmt, params_from_iter(selection.args.iter()))?;
        cursor.set_notification_uri(&self.notifier, uri.clone());

        tracing::debug!("query {} -> {} rows", uri, cursor.count());
        Ok(cursor)
    }

    /// Insert a pet and return the URI of the new row. Only the collection
    /// URI accepts inserts.
    pub fn insert(&self, uri: &ContentUri, values: &ContentValues) -> Result<ContentUri> {
        match resolve(uri)? {
            Resource::Collection => self.insert_pet(uri, values),
            Resource::Item(_) => Err(Error::UnsupportedOperation {
                operation: "Insertion",
                uri: uri.to_uri_string(),
            }),
        }
    }

    fn insert_pet(&self, uri: &ContentUri, values: &ContentValues) -> Result<ContentUri> {
        if values.contains_key(PetEntry::_ID) {
            return Err(Error::InvalidArgument(format!("{} is assigned by the store", PetEntry::_ID)));
        }
        require_name(values)?;

        let mut values = values.clone();
        if is_blank(values.get(PetEntry::COLUMN_PET_BREED)) {
            values.put(PetEntry::COLUMN_PET_BREED, DEFAULT_BREED.to_string());
        }

        let columns: Vec<String> = values.iter().map(|(c, _)| quote_identifier(c)).collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            PetEntry::TABLE_NAME,
            columns.join(", "),
            placeholders
        );

        let conn = self.db.writable()?;
        let inserted = conn.execute(&sql, params_from_iter(values.iter().map(|(_, v)| v)))?;
        if inserted != 1 {
            return Err(Error::InsertFailed(uri.to_uri_string()));
        }
        let row_id = conn.last_insert_rowid();

        self.notifier.notify_change(uri);

        let new_uri = uri.with_appended_id(row_id);
        tracing::debug!("insert {} -> {}", uri, new_uri);
        Ok(new_uri)
    }

    /// Update the rows matched by `uri` (and, for the collection, by the
    /// selection). Returns the number of rows changed.
    pub fn update(
        &self,
        uri: &ContentUri,
        values: &ContentValues,
        selection: Option<&str>,
        selection_args: &[Value],
    ) -> Result<usize> {
        let resource = resolve(uri)?;
        let selection = Selection::route(resource, selection, selection_args);
        self.update_pet(uri, values, selection)
    }

    fn update_pet(&self, uri: &ContentUri, values: &ContentValues, selection: Selection<'_>) -> Result<usize> {
        if values.is_empty() {
            return Ok(0);
        }
        if values.contains_key(PetEntry::_ID) {
            return Err(Error::InvalidArgument(format!("{} cannot be changed", PetEntry::_ID)));
        }
        if values.contains_key(PetEntry::COLUMN_PET_NAME) {
            require_name(values)?;
        }

        let mut values = values.clone();
        if values.contains_key(PetEntry::COLUMN_PET_BREED) && is_blank(values.get(PetEntry::COLUMN_PET_BREED)) {
            values.put(PetEntry::COLUMN_PET_BREED, DEFAULT_BREED.to_string());
        }

        let assignments: Vec<String> = values
            .iter()
            .map(|(c, _)| format!("{} = ?", quote_identifier(c)))
            .collect();
        let sql = format!(
            "UPDATE {} SET {}{}",
            PetEntry::TABLE_NAME,
            assignments.join(", "),
            selection.where_sql()
        );

        let params = values.iter().map(|(_, v)| v).chain(selection.args.iter());
        let updated = self.db.writable()?.execute(&sql, params_from_iter(params))?;

        if updated > 0 {
            self.notifier.notify_change(uri);
        }

        tracing::debug!("update {} -> {} rows", uri, updated);
        Ok(updated)
    }

    /// Delete the rows matched by `uri` (and, for the collection, by the
    /// selection). Returns the number of rows removed.
    pub fn delete(&self, uri: &ContentUri, selection: Option<&str>, selection_args: &[Value]) -> Result<usize> {
        let resource = resolve(uri)?;
        let selection = Selection::route(resource, selection, selection_args);
        self.delete_pet(uri, selection)
    }

    fn delete_pet(&self, uri: &ContentUri, selection: Selection<'_>) -> Result<usize> {
        let sql = format!("DELETE FROM {}{}", PetEntry::TABLE_NAME, selection.where_sql());
        let deleted = self
            .db
            .writable()?
            .execute(&sql, params_from_iter(selection.args.iter()))?;

        if deleted > 0 {
            self.notifier.notify_change(uri);
        }

        tracing::debug!("delete {} -> {} rows", uri, deleted);
        Ok(deleted)
    }
}

/// `name` must be present and non-empty. Numbers are accepted since the
/// TEXT column stores them as their decimal text.
fn require_name(values: &ContentValues) -> Result<()> {
    match values.get(PetEntry::COLUMN_PET_NAME) {
        Some(Value::Text(name)) if !name.is_empty() => Ok(()),
        Some(Value::Integer(_)) | Some(Value::Real(_)) => Ok(()),
        _ => Err(Error::InvalidArgument("invalid or empty name".to_string())),
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Text(s)) => s.is_empty(),
        Some(Value::Blob(b)) => b.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{content_uri, DATABASE_VERSION};
    use crate::record::Pet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn provider() -> PetProvider {
        PetProvider::new(PetDbHelper::in_memory(DATABASE_VERSION))
    }

    fn pet_values(name: &str, breed: &str, gender: i64, weight: i64) -> ContentValues {
        let mut values = ContentValues::new();
        values
            .put(PetEntry::COLUMN_PET_NAME, name.to_string())
            .put(PetEntry::COLUMN_PET_BREED, breed.to_string())
            .put(PetEntry::COLUMN_PET_GENDER, gender)
            .put(PetEntry::COLUMN_PET_WEIGHT, weight);
        values
    }

    fn all_pets(provider: &PetProvider) -> Vec<Pet> {
        let cursor = provider
            .query(&content_uri(), None, None, &[], Some("_id ASC"))
            .unwrap();
        cursor.rows().map(|row| Pet::from_row(&row).unwrap()).collect()
    }

    #[test]
    fn test_insert_then_query_item() {
        let provider = provider();
        let new_uri = provider.insert(&content_uri(), &pet_values("Totto", "Terrier", 1, 7)).unwrap();
        assert_eq!(new_uri.to_string(), "content://com.example.android.pets/pets/1");
        assert_eq!(resolve(&new_uri).unwrap(), Resource::Item(1));

        let cursor = provider.query(&new_uri, None, None, &[], None).unwrap();
        assert_eq!(cursor.count(), 1);
        let pet = Pet::from_row(&cursor.rows().next().unwrap()).unwrap();
        assert_eq!(pet.id, 1);
        assert_eq!(pet.name, "Totto");
        assert_eq!(pet.breed, "Terrier");
        assert_eq!(pet.gender, 1);
        assert_eq!(pet.weight, Some(7));
    }

    #[test]
    fn test_collection_query_with_projection() {
        let provider = provider();
        provider.insert(&content_uri(), &pet_values("Totto", "Terrier", 1, 7)).unwrap();

        let projection = [PetEntry::_ID, PetEntry::COLUMN_PET_NAME, PetEntry::COLUMN_PET_BREED];
        let mut cursor = provider.query(&content_uri(), Some(&projection[..]), None, &[], None).unwrap();
        assert_eq!(cursor.column_names(), &["_id", "name", "breed"]);
        assert!(cursor.move_to_first());
        assert_eq!(cursor.get_i64(0), Some(1));
        assert_eq!(cursor.get_string(1).as_deref(), Some("Totto"));
        assert_eq!(cursor.get_string(2).as_deref(), Some("Terrier"));
        assert!(!cursor.move_to_next());
    }

    #[test]
    fn test_empty_breed_becomes_unknown() {
        let provider = provider();
        let uri = provider.insert(&content_uri(), &pet_values("Rex", "", 0, 5)).unwrap();

        let cursor = provider.query(&uri, None, None, &[], None).unwrap();
        let row = cursor.rows().next().unwrap();
        assert_eq!(row.get_string("breed").as_deref(), Some(DEFAULT_BREED));
    }

    #[test]
    fn test_empty_blob_breed_becomes_unknown() {
        let provider = provider();
        let mut values = ContentValues::new();
        values
            .put(PetEntry::COLUMN_PET_NAME, "Rex".to_string())
            .put(PetEntry::COLUMN_PET_BREED, Vec::<u8>::new());
        let uri = provider.insert(&content_uri(), &values).unwrap();

        let cursor = provider.query(&uri, None, None, &[], None).unwrap();
        let row = cursor.rows().next().unwrap();
        assert_eq!(row.get(PetEntry::COLUMN_PET_BREED), Some(&Value::Text(DEFAULT_BREED.to_string())));
    }

    #[test]
    fn test_absent_breed_becomes_unknown_on_insert() {
        let provider = provider();
        let mut values = ContentValues::new();
        values.put(PetEntry::COLUMN_PET_NAME, "Rex".to_string());
        provider.insert(&content_uri(), &values).unwrap();

        let pets = all_pets(&provider);
        assert_eq!(pets[0].breed, DEFAULT_BREED);
        // weight is not defaulted by the provider
        assert_eq!(pets[0].weight, None);
    }

    #[test]
    fn test_insert_rejects_missing_or_empty_name() {
        let provider = provider();
        let sub = provider.subscribe(&content_uri(), true);

        let err = provider.insert(&content_uri(), &pet_values("", "Terrier", 1, 7)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let mut nameless = pet_values("x", "Terrier", 1, 7);
        nameless.remove(PetEntry::COLUMN_PET_NAME);
        let err = provider.insert(&content_uri(), &nameless).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let mut null_name = pet_values("x", "Terrier", 1, 7);
        null_name.put_null(PetEntry::COLUMN_PET_NAME);
        assert!(matches!(
            provider.insert(&content_uri(), &null_name).unwrap_err(),
            Error::InvalidArgument(_)
        ));

        assert_eq!(provider.db().count_pets().unwrap(), 0);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_insert_on_item_is_unsupported() {
        let provider = provider();
        let err = provider
            .insert(&content_uri().with_appended_id(1), &pet_values("Totto", "Terrier", 1, 7))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_insert_rejects_explicit_id() {
        let provider = provider();
        let mut values = pet_values("Totto", "Terrier", 1, 7);
        values.put(PetEntry::_ID, 40i64);
        assert!(matches!(
            provider.insert(&content_uri(), &values).unwrap_err(),
            Error::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_insert_notifies_collection() {
        let provider = provider();
        let sub = provider.subscribe(&content_uri(), false);

        provider.insert(&content_uri(), &pet_values("Totto", "Terrier", 1, 7)).unwrap();
        assert_eq!(sub.drain(), vec![content_uri()]);
    }

    #[test]
    fn test_update_with_empty_values_is_noop() {
        let provider = provider();
        provider.insert(&content_uri(), &pet_values("Totto", "Terrier", 1, 7)).unwrap();
        let sub = provider.subscribe(&content_uri(), true);

        let empty = ContentValues::new();
        assert_eq!(provider.update(&content_uri(), &empty, None, &[]).unwrap(), 0);
        assert_eq!(provider.update(&content_uri().with_appended_id(1), &empty, None, &[]).unwrap(), 0);
        assert!(sub.drain().is_empty());
        assert_eq!(all_pets(&provider)[0].name, "Totto");
    }

    #[test]
    fn test_update_empty_name_leaves_row_unchanged() {
        let provider = provider();
        let uri = provider.insert(&content_uri(), &pet_values("Totto", "Terrier", 1, 7)).unwrap();

        let mut values = ContentValues::new();
        values.put(PetEntry::COLUMN_PET_NAME, String::new());
        let err = provider.update(&uri, &values, None, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        assert_eq!(all_pets(&provider)[0].name, "Totto");
    }

    #[test]
    fn test_partial_update_of_item() {
        let provider = provider();
        provider.insert(&content_uri(), &pet_values("Totto", "Terrier", 1, 7)).unwrap();
        let uri = provider.insert(&content_uri(), &pet_values("Rex", "Boxer", 1, 20)).unwrap();
        let sub = provider.subscribe(&uri, false);

        let mut values = ContentValues::new();
        values.put(PetEntry::COLUMN_PET_WEIGHT, 22i64).put(PetEntry::COLUMN_PET_BREED, String::new());
        // Caller filter is discarded for row URIs
        let updated = provider
            .update(&uri, &values, Some("name = ?"), &[Value::Text("Totto".to_string())])
            .unwrap();
        assert_eq!(updated, 1);
        assert_eq!(sub.drain(), vec![uri.clone()]);

        let pets = all_pets(&provider);
        assert_eq!(pets[0].weight, Some(7));
        assert_eq!(pets[0].breed, "Terrier");
        assert_eq!(pets[1].name, "Rex");
        assert_eq!(pets[1].weight, Some(22));
        assert_eq!(pets[1].breed, DEFAULT_BREED);
    }

    #[test]
    fn test_update_collection_with_selection() {
        let provider = provider();
        provider.insert(&content_uri(), &pet_values("Totto", "Terrier", 1, 7)).unwrap();
        provider.insert(&content_uri(), &pet_values("Rex", "Boxer", 1, 20)).unwrap();
        provider.insert(&content_uri(), &pet_values("Mia", "Tabby", 2, 4)).unwrap();
        let sub = provider.subscribe(&content_uri(), false);

        let mut values = ContentValues::new();
        values.put(PetEntry::COLUMN_PET_GENDER, 0i64);
        let updated = provider
            .update(&content_uri(), &values, Some("gender = ?"), &[Value::Integer(1)])
            .unwrap();
        assert_eq!(updated, 2);
        assert_eq!(sub.drain(), vec![content_uri()]);

        let genders: Vec<i64> = all_pets(&provider).iter().map(|p| p.gender).collect();
        assert_eq!(genders, vec![0, 0, 2]);
    }

    #[test]
    fn test_update_missing_row_does_not_notify() {
        let provider = provider();
        let sub = provider.subscribe(&content_uri(), true);

        let mut values = ContentValues::new();
        values.put(PetEntry::COLUMN_PET_WEIGHT, 1i64);
        let missing = content_uri().with_appended_id(99);
        assert_eq!(provider.update(&missing, &values, None, &[]).unwrap(), 0);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_update_rejects_id_change() {
        let provider = provider();
        let uri = provider.insert(&content_uri(), &pet_values("Totto", "Terrier", 1, 7)).unwrap();

        let mut values = ContentValues::new();
        values.put(PetEntry::_ID, 5i64);
        assert!(matches!(
            provider.update(&uri, &values, None, &[]).unwrap_err(),
            Error::InvalidArgument(_)
        ));
        assert_eq!(all_pets(&provider)[0].id, 1);
    }

    #[test]
    fn test_delete_missing_row_returns_zero_without_notifying() {
        let provider = provider();
        let sub = provider.subscribe(&content_uri(), true);

        assert_eq!(provider.delete(&content_uri().with_appended_id(4), None, &[]).unwrap(), 0);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_delete_all() {
        let provider = provider();
        for name in ["Totto", "Rex", "Mia"] {
            provider.insert(&content_uri(), &pet_values(name, "Mutt", 0, 3)).unwrap();
        }
        let sub = provider.subscribe(&content_uri(), false);

        assert_eq!(provider.delete(&content_uri(), None, &[]).unwrap(), 3);
        assert_eq!(sub.drain(), vec![content_uri()]);

        let cursor = provider.query(&content_uri(), None, None, &[], None).unwrap();
        assert_eq!(cursor.count(), 0);
    }

    #[test]
    fn test_delete_item_ignores_caller_filter() {
        let provider = provider();
        provider.insert(&content_uri(), &pet_values("Totto", "Terrier", 1, 7)).unwrap();
        let rex = provider.insert(&content_uri(), &pet_values("Rex", "Boxer", 1, 20)).unwrap();
        let sub = provider.subscribe(&rex, false);

        let deleted = provider.delete(&rex, Some("1 = 1"), &[]).unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(sub.drain(), vec![rex.clone()]);

        let pets = all_pets(&provider);
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].name, "Totto");
    }

    #[test]
    fn test_query_item_ignores_caller_filter() {
        let provider = provider();
        provider.insert(&content_uri(), &pet_values("Totto", "Terrier", 1, 7)).unwrap();
        let rex = provider.insert(&content_uri(), &pet_values("Rex", "Boxer", 1, 20)).unwrap();

        let cursor = provider
            .query(&rex, None, Some("name = ?"), &[Value::Text("Totto".to_string())], None)
            .unwrap();
        assert_eq!(cursor.count(), 1);
        assert_eq!(cursor.rows().next().unwrap().get_string("name").as_deref(), Some("Rex"));
    }

    #[test]
    fn test_unsupported_resource_for_every_operation() {
        let provider = provider();
        let bad = ContentUri::parse("content://com.example.android.pets/dogs").unwrap();
        let values = pet_values("Totto", "Terrier", 1, 7);

        assert!(matches!(provider.query(&bad, None, None, &[], None).unwrap_err(), Error::UnsupportedResource(_)));
        assert!(matches!(provider.insert(&bad, &values).unwrap_err(), Error::UnsupportedResource(_)));
        assert!(matches!(provider.update(&bad, &values, None, &[]).unwrap_err(), Error::UnsupportedResource(_)));
        assert!(matches!(provider.delete(&bad, None, &[]).unwrap_err(), Error::UnsupportedResource(_)));
        assert!(matches!(provider.get_type(&bad).unwrap_err(), Error::UnsupportedResource(_)));
    }

    #[test]
    fn test_get_type() {
        let provider = provider();
        assert_eq!(provider.get_type(&content_uri()).unwrap(), CONTENT_LIST_TYPE);
        assert_eq!(provider.get_type(&content_uri().with_appended_id(2)).unwrap(), CONTENT_ITEM_TYPE);
    }

    #[test]
    fn test_cursor_watch_sees_later_writes() {
        let provider = provider();
        let cursor = provider.query(&content_uri(), None, None, &[], None).unwrap();
        assert_eq!(cursor.notification_uri(), Some(&content_uri()));

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        cursor.register_observer(Arc::new(move |_: &ContentUri| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let sub = cursor.subscribe().unwrap();

        let uri = provider.insert(&content_uri(), &pet_values("Totto", "Terrier", 1, 7)).unwrap();
        let mut values = ContentValues::new();
        values.put(PetEntry::COLUMN_PET_WEIGHT, 8i64);
        provider.update(&uri, &values, None, &[]).unwrap();

        // Observed before each call returned: one insert, one row update
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(sub.drain(), vec![content_uri(), uri]);
    }

    #[test]
    fn test_gender_and_weight_are_not_validated() {
        // Out-of-range gender and negative weight are stored as given
        let provider = provider();
        provider.insert(&content_uri(), &pet_values("Odd", "Mutt", 9, -3)).unwrap();

        let pet = &all_pets(&provider)[0];
        assert_eq!(pet.gender, 9);
        assert_eq!(pet.weight, Some(-3));
        assert_eq!(pet.gender(), None);
    }

    #[test]
    fn test_unknown_column_is_a_storage_error() {
        let provider = provider();
        let mut values = pet_values("Totto", "Terrier", 1, 7);
        values.put("color", "brown".to_string());
        assert!(matches!(
            provider.insert(&content_uri(), &values).unwrap_err(),
            Error::Storage(_)
        ));
    }
}
