//! Cursor - positioned, restartable view over a query result

use std::sync::Arc;

use rusqlite::types::Value;
use rusqlite::{Params, Statement};

use crate::notify::{ChangeNotifier, ChangeObserver, ObserverId, Subscription};
use crate::uri::ContentUri;
use crate::Result;

/// Result of a provider query.
///
/// The whole result window is fetched when the query runs; walking it is
/// lazy and can restart any number of times with `move_to_first` or
/// `rows()`. A cursor returned by the provider also remembers the URI it
/// was queried from, so callers can watch it for changes and re-query.
pub struct Cursor {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    /// `None` before the first row, `Some(count)` after the last
    position: Option<usize>,
    notification: Option<(ContentUri, Arc<ChangeNotifier>)>,
}

/// One row of a cursor, borrowed.
#[derive(Debug, Clone, Copy)]
pub struct CursorRow<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl Cursor {
    /// Run a prepared statement and collect its rows
    pub fn from_statement<P: Params>(stmt: &mut Statement<'_>, params: P) -> Result<Self> {
        let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut result = stmt.query(params)?;
        while let Some(row) = result.next()? {
            let values = (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows.push(values);
        }

        Ok(Self {
            columns,
            rows,
            position: None,
            notification: None,
        })
    }

    /// Attach the URI this cursor's data came from
    pub fn set_notification_uri(&mut self, notifier: &Arc<ChangeNotifier>, uri: ContentUri) {
        self.notification = Some((uri, Arc::clone(notifier)));
    }

    pub fn notification_uri(&self) -> Option<&ContentUri> {
        self.notification.as_ref().map(|(uri, _)| uri)
    }

    /// Watch the notification URI and everything below it
    pub fn register_observer(&self, observer: Arc<dyn ChangeObserver>) -> Option<ObserverId> {
        self.notification
            .as_ref()
            .map(|(uri, notifier)| notifier.register(uri, true, observer))
    }

    /// Channel-backed watch on the notification URI and everything below it
    pub fn subscribe(&self) -> Option<Subscription> {
        self.notification
            .as_ref()
            .map(|(uri, notifier)| notifier.subscribe(uri, true))
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Current row index, `None` before the first row
    pub fn position(&self) -> Option<usize> {
        self.position.filter(|&p| p < self.rows.len())
    }

    pub fn is_after_last(&self) -> bool {
        matches!(self.position, Some(p) if p >= self.rows.len())
    }

    pub fn move_to_first(&mut self) -> bool {
        self.move_to_position(0)
    }

    pub fn move_to_next(&mut self) -> bool {
        let next = self.position.map_or(0, |p| p.saturating_add(1));
        self.move_to_position(next)
    }

    /// Move to `index`; past the end leaves the cursor after the last row
    pub fn move_to_position(&mut self, index: usize) -> bool {
        if index < self.rows.len() {
            self.position = Some(index);
            true
        } else {
            self.position = Some(self.rows.len());
            false
        }
    }

    /// The row under the cursor
    pub fn current(&self) -> Option<CursorRow<'_>> {
        self.position().map(|p| self.row(p))
    }

    pub fn get_value(&self, column: usize) -> Option<&Value> {
        self.position().and_then(|p| self.rows[p].get(column))
    }

    pub fn get_i64(&self, column: usize) -> Option<i64> {
        self.current().and_then(|row| row.get_i64_at(column))
    }

    pub fn get_string(&self, column: usize) -> Option<String> {
        self.current().and_then(|row| row.get_string_at(column))
    }

    /// Iterate every row from the start, independent of the cursor position
    pub fn rows(&self) -> impl Iterator<Item = CursorRow<'_>> {
        (0..self.rows.len()).map(move |i| self.row(i))
    }

    fn row(&self, index: usize) -> CursorRow<'_> {
        CursorRow {
            columns: &self.columns,
            values: &self.rows[index],
        }
    }
}

impl std::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("columns", &self.columns)
            .field("count", &self.rows.len())
            .field("position", &self.position)
            .field("notification_uri", &self.notification_uri())
            .finish()
    }
}

impl<'a> CursorRow<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.values.get(self.index_of(column)?)
    }

    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get_i64_at(self.index_of(column)?)
    }

    pub fn get_string(&self, column: &str) -> Option<String> {
        self.get_string_at(self.index_of(column)?)
    }

    fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    fn get_i64_at(&self, index: usize) -> Option<i64> {
        match self.values.get(index)? {
            Value::Integer(i) => Some(*i),
            Value::Real(r) => Some(*r as i64),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn get_string_at(&self, index: usize) -> Option<String> {
        value_to_string(self.values.get(index)?)
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(r) => Some(r.to_string()),
        Value::Text(s) => Some(s.clone()),
        Value::Blob(b) => Some(String::from_utf8_lossy(b).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn sample_cursor() -> Cursor {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (_id INTEGER PRIMARY KEY, name TEXT);
             INSERT INTO t (name) VALUES ('a'), ('b'), (NULL);",
        )
        .unwrap();
        let mut stmt = conn.prepare("SELECT _id, name FROM t ORDER BY _id").unwrap();
        Cursor::from_statement(&mut stmt, []).unwrap()
    }

    #[test]
    fn test_walk_and_restart() {
        let mut cursor = sample_cursor();
        assert_eq!(cursor.count(), 3);
        assert_eq!(cursor.position(), None);

        let mut seen = Vec::new();
        while cursor.move_to_next() {
            seen.push(cursor.get_i64(0).unwrap());
        }
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(cursor.is_after_last());
        assert_eq!(cursor.get_i64(0), None);

        assert!(cursor.move_to_first());
        assert_eq!(cursor.get_string(1).as_deref(), Some("a"));
    }

    #[test]
    fn test_rows_by_column_name() {
        let cursor = sample_cursor();
        let names: Vec<Option<String>> = cursor.rows().map(|r| r.get_string("name")).collect();
        assert_eq!(names, vec![Some("a".to_string()), Some("b".to_string()), None]);

        // rows() restarts every time
        assert_eq!(cursor.rows().count(), 3);
        assert_eq!(cursor.column_index("name"), Some(1));
        assert_eq!(cursor.column_index("missing"), None);
    }

    #[test]
    fn test_named_and_indexed_getters_agree() {
        let mut cursor = sample_cursor();
        assert!(cursor.move_to_first());
        let row = cursor.current().unwrap();

        assert_eq!(row.get_i64("_id"), cursor.get_i64(0));
        assert_eq!(row.get_i64("_id"), Some(1));
        assert_eq!(row.get_string("name"), cursor.get_string(1));
        assert_eq!(row.get_i64("missing"), None);
        assert_eq!(row.get_string("missing"), None);
    }

    #[test]
    fn test_move_past_end() {
        let mut cursor = sample_cursor();
        assert!(!cursor.move_to_position(10));
        assert!(cursor.is_after_last());
        assert!(cursor.current().is_none());
    }

    #[test]
    fn test_without_notification_uri() {
        let cursor = sample_cursor();
        assert!(cursor.notification_uri().is_none());
        assert!(cursor.subscribe().is_none());
    }
}
