use crate::error::{JoblyError, JoblyResult};
use crate::value::Value;

/// Maps external (camelCase) field names to storage column names.
///
/// Fields without an entry use their external name verbatim.
pub type ColumnMap<'a> = &'a [(&'a str, &'a str)];

/// An ordered set of field changes for a partial update.
///
/// Iteration order is insertion order, and that order decides placeholder
/// numbering in [`sql_for_partial_update`]. Setting a field twice replaces the
/// value and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changes {
    fields: Vec<(String, Value)>,
}

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (consuming version, for chaining).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field, value)),
        }
        self
    }

    /// Set a field only when `value` is `Some`.
    pub fn insert_opt<T: Into<Value>>(
        &mut self,
        field: impl Into<String>,
        value: Option<T>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.insert(field, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(f, _)| f == field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(f, v)| (f == field).then_some(v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(f, v)| (f.as_str(), v))
    }

    /// Build changes from a JSON object, keeping the object's iteration order.
    ///
    /// Non-scalar values are rejected with [`JoblyError::InvalidInput`].
    pub fn from_json_object(
        object: serde_json::Map<String, serde_json::Value>,
    ) -> JoblyResult<Self> {
        let mut changes = Self::new();
        for (field, json) in object {
            let value = Value::from_json(json)
                .map_err(|e| JoblyError::invalid_input(format!("field '{field}': {e}")))?;
            changes.insert(field, value);
        }
        Ok(changes)
    }
}

impl<K, V> FromIterator<(K, V)> for Changes
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut changes = Self::new();
        for (field, value) in iter {
            changes.insert(field, value);
        }
        changes
    }
}

/// Output of [`sql_for_partial_update`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    /// `"col_a"=$1, "col_b"=$2, ...`
    pub set_cols: String,
    /// Values bound to `$1..$n`, in placeholder order.
    pub values: Vec<Value>,
}

impl PartialUpdate {
    /// The placeholder for the first parameter after the `SET` values,
    /// typically the row identifier in the `WHERE` clause.
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.values.len() + 1)
    }

    /// Hand over the values bound to `$1..$n`, in placeholder order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Build the `SET` portion of an `UPDATE` from an ordered list of changes.
///
/// Each field becomes `"<column>"=$<n>` where `<column>` comes from
/// `js_to_sql` (or the field name itself) and `n` is the field's 1-based
/// position. Column names are written as quoted identifiers and must come from
/// trusted code; values are only ever bound.
///
/// Returns [`JoblyError::InvalidInput`] when `changes` is empty.
///
/// ```ignore
/// let changes = Changes::new().set("firstName", "Aliya").set("age", 32);
/// let update = sql_for_partial_update(&changes, &[("firstName", "first_name")])?;
/// assert_eq!(update.set_cols, r#""first_name"=$1, "age"=$2"#);
/// ```
pub fn sql_for_partial_update(
    changes: &Changes,
    js_to_sql: ColumnMap<'_>,
) -> JoblyResult<PartialUpdate> {
    if changes.is_empty() {
        return Err(JoblyError::invalid_input("No data"));
    }

    let mut set_cols = String::new();
    let mut values = Vec::with_capacity(changes.len());
    for (idx, (field, value)) in changes.iter().enumerate() {
        if idx > 0 {
            set_cols.push_str(", ");
        }
        push_quoted(&mut set_cols, column_name(field, js_to_sql));
        set_cols.push_str("=$");
        set_cols.push_str(&(idx + 1).to_string());
        values.push(value.clone());
    }

    Ok(PartialUpdate { set_cols, values })
}

fn column_name<'a>(field: &'a str, js_to_sql: ColumnMap<'a>) -> &'a str {
    js_to_sql
        .iter()
        .find_map(|(js, col)| (*js == field).then_some(*col))
        .unwrap_or(field)
}

// Embedded quotes are doubled, as Postgres expects inside a quoted identifier.
fn push_quoted(out: &mut String, ident: &str) {
    out.push('"');
    for ch in ident.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}
