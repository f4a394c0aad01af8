//! # Domain Types
//!
//! Record and column model used throughout Gridline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Row        │   │     Column      │   │   CellValue     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  id (key)       │   │  Text(String)   │       │
//! │  │  name, email    │   │  label          │   │  Number(f64)    │       │
//! │  │  age, role      │   │  visible        │   │  Null           │       │
//! │  │  extra {..}     │   │  kind           │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    RowPatch     │   │    RowDraft     │   │ Theme/SortOrder │       │
//! │  │  key → value    │   │  key → value    │   │  light | dark   │       │
//! │  │  (shallow merge)│   │  (no id yet)    │   │  asc | desc     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Typed Core + Side Map
//! The four base columns (`name`, `email`, `age`, `role`) are real struct
//! fields. Columns added at runtime live in `Row::extra`, keyed by column id.
//! Every lookup goes through [`Row::value`] so the view pipeline never needs
//! to know which is which.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

/// Row identifier. Unique across the store for the life of the process.
pub type RowId = u64;

// =============================================================================
// Cell Value
// =============================================================================

/// A single field value.
///
/// Serialized untagged, so the presentation sees plain JSON
/// (`"Developer"`, `28`, `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// String form used for searching, exporting and editing.
    ///
    /// Integral numbers print without a fractional part (`28`, not `28.0`).
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Numeric coercion with a zero fallback.
    ///
    /// ## Rules
    /// - Numbers pass through (non-finite becomes 0)
    /// - Text is trimmed and parsed; empty text is 0
    /// - Anything unparsable is 0
    pub fn coerce_number(&self) -> f64 {
        match self {
            CellValue::Null => 0.0,
            CellValue::Number(n) if n.is_finite() => *n,
            CellValue::Number(_) => 0.0,
            CellValue::Text(s) => parse_number(s).unwrap_or(0.0),
        }
    }

    /// Returns true for [`CellValue::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Natural ordering between two values.
    ///
    /// Numbers compare numerically and text lexicographically. When a column
    /// mixes the two, every number sorts before every text value and nulls
    /// come last. This is a total order, which `sort_by` requires.
    pub fn natural_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Number(_) => 0,
            CellValue::Text(_) => 1,
            CellValue::Null => 2,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

/// Parses a trimmed numeric string. Empty input is 0.
///
/// Returns `None` for anything that is not a finite number.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Formats a number the way the grid displays it.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// =============================================================================
// Column
// =============================================================================

/// How values in a column are coerced on import and edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    #[default]
    Text,
    Number,
}

/// A column descriptor.
///
/// `id` is the key rows are read with; `label` is what the header shows and
/// what export writes as the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Column {
    pub id: String,
    pub label: String,
    pub visible: bool,
    #[serde(default)]
    pub kind: ColumnKind,
}

impl Column {
    /// Creates a visible text column whose id is derived from `label`.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Column {
            id: derive_column_id(&label),
            label,
            visible: true,
            kind: ColumnKind::Text,
        }
    }

    /// Sets the column kind.
    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    /// Checks whether a CSV header refers to this column.
    ///
    /// Matches the id exactly, the label case-insensitively, or the id the
    /// header would derive to.
    pub fn matches_header(&self, header: &str) -> bool {
        let header = header.trim();
        header == self.id
            || header.eq_ignore_ascii_case(&self.label)
            || derive_column_id(header) == self.id
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Number
    }
}

/// Derives a column id from a label.
///
/// Lower-cases the label and replaces every run of whitespace with a single
/// `_`.
///
/// ## Example
/// ```rust
/// use gridline_core::types::derive_column_id;
///
/// assert_eq!(derive_column_id("Start  Date"), "start_date");
/// assert_eq!(derive_column_id("Department"), "department");
/// ```
pub fn derive_column_id(label: &str) -> String {
    let mut id = String::with_capacity(label.len());
    let mut in_whitespace = false;
    for ch in label.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                id.push('_');
            }
            in_whitespace = true;
        } else {
            id.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }
    id
}

// =============================================================================
// Row
// =============================================================================

/// One record in the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Row {
    pub id: RowId,
    pub name: String,
    pub email: String,
    pub age: f64,
    pub role: String,
    /// Values for columns added at runtime, keyed by column id.
    #[serde(default)]
    pub extra: BTreeMap<String, CellValue>,
}

impl Row {
    /// Creates a row with empty core fields.
    pub fn empty(id: RowId) -> Self {
        Row {
            id,
            name: String::new(),
            email: String::new(),
            age: 0.0,
            role: String::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Looks up a field by column id.
    ///
    /// Core fields are always present. Extra fields return `None` when the
    /// row has never been given a value for that column.
    pub fn value(&self, key: &str) -> Option<CellValue> {
        match key {
            "id" => Some(CellValue::Number(self.id as f64)),
            "name" => Some(CellValue::Text(self.name.clone())),
            "email" => Some(CellValue::Text(self.email.clone())),
            "age" => Some(CellValue::Number(self.age)),
            "role" => Some(CellValue::Text(self.role.clone())),
            other => self.extra.get(other).cloned(),
        }
    }

    /// Display string for a field; missing and null fields are empty.
    pub fn display_value(&self, key: &str) -> String {
        self.value(key).map(|v| v.display()).unwrap_or_default()
    }

    /// Overwrites a single field.
    ///
    /// Core text fields take the display string of `value` and `age` takes
    /// its numeric coercion. The `id` key is ignored: ids never change after
    /// a row is created.
    pub fn set_field(&mut self, key: &str, value: CellValue) {
        match key {
            "id" => {}
            "name" => self.name = value.display(),
            "email" => self.email = value.display(),
            "age" => self.age = value.coerce_number(),
            "role" => self.role = value.display(),
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }

    /// Shallow-merges a patch into this row. Omitted fields are untouched.
    pub fn apply_patch(&mut self, patch: &RowPatch) {
        for (key, value) in patch.iter() {
            self.set_field(key, value.clone());
        }
    }
}

// =============================================================================
// Row Patch / Row Draft
// =============================================================================

/// A partial row: field-by-field overwrite used by `update_row`.
///
/// ## Example
/// ```rust
/// use gridline_core::types::{Row, RowPatch};
///
/// let mut row = Row::empty(1);
/// row.apply_patch(&RowPatch::new().set("age", 99).set("team", "Core"));
/// assert_eq!(row.age, 99.0);
/// assert_eq!(row.display_value("team"), "Core");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RowPatch(BTreeMap<String, CellValue>);

impl RowPatch {
    pub fn new() -> Self {
        RowPatch::default()
    }

    /// Adds a field to the patch (builder style).
    pub fn set(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// An imported row that has not been given an id yet.
///
/// The store assigns ids when a batch of drafts is imported, so the
/// adapter never invents them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowDraft(RowPatch);

impl RowDraft {
    pub fn new() -> Self {
        RowDraft::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.0.get(key)
    }

    /// Builds the row with the given id.
    pub fn into_row(self, id: RowId) -> Row {
        let mut row = Row::empty(id);
        row.apply_patch(&self.0);
        row
    }
}

impl From<RowPatch> for RowDraft {
    fn from(patch: RowPatch) -> Self {
        RowDraft(patch)
    }
}

// =============================================================================
// Theme / Sort Order
// =============================================================================

/// Colour theme of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ValidationError::NotAllowed {
                field: "theme".to_string(),
                allowed: vec!["light".to_string(), "dark".to_string()],
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_column_id() {
        assert_eq!(derive_column_id("Name"), "name");
        assert_eq!(derive_column_id("Start Date"), "start_date");
        assert_eq!(derive_column_id("Start \t\n Date"), "start_date");
        assert_eq!(derive_column_id("Ünïcode Label"), "ünïcode_label");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(28.0), "28");
        assert_eq!(format_number(28.5), "28.5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(CellValue::from("42").coerce_number(), 42.0);
        assert_eq!(CellValue::from(" 7.5 ").coerce_number(), 7.5);
        assert_eq!(CellValue::from("").coerce_number(), 0.0);
        assert_eq!(CellValue::from("abc").coerce_number(), 0.0);
        assert_eq!(CellValue::from("NaN").coerce_number(), 0.0);
        assert_eq!(CellValue::from("inf").coerce_number(), 0.0);
        assert_eq!(CellValue::Null.coerce_number(), 0.0);
    }

    #[test]
    fn test_natural_cmp() {
        assert_eq!(
            CellValue::from(2).natural_cmp(&CellValue::from(10)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::from("b").natural_cmp(&CellValue::from("a")),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::from("10").natural_cmp(&CellValue::from("9")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::from(300).natural_cmp(&CellValue::from("abc")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Null.natural_cmp(&CellValue::from("abc")),
            Ordering::Greater
        );
    }

    #[test]
    fn test_cell_value_json_shape() {
        let values = vec![
            CellValue::from("Developer"),
            CellValue::from(28),
            CellValue::Null,
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"["Developer",28.0,null]"#);

        let back: Vec<CellValue> = serde_json::from_str(r#"["x", 3, null]"#).unwrap();
        assert_eq!(
            back,
            vec![CellValue::from("x"), CellValue::from(3), CellValue::Null]
        );
    }

    #[test]
    fn test_row_value_lookup() {
        let mut row = Row::empty(7);
        row.name = "Ada".to_string();
        row.age = 36.0;

        assert_eq!(row.value("name"), Some(CellValue::from("Ada")));
        assert_eq!(row.value("age"), Some(CellValue::from(36)));
        assert_eq!(row.value("department"), None);
        assert_eq!(row.display_value("department"), "");
    }

    #[test]
    fn test_set_field_coerces_core_fields() {
        let mut row = Row::empty(1);
        row.set_field("age", CellValue::from("41"));
        row.set_field("name", CellValue::from(5));
        row.set_field("id", CellValue::from(99));

        assert_eq!(row.age, 41.0);
        assert_eq!(row.name, "5");
        assert_eq!(row.id, 1);
    }

    #[test]
    fn test_column_matches_header() {
        let column = Column::new("Start Date");
        assert!(column.matches_header("start_date"));
        assert!(column.matches_header("START DATE"));
        assert!(column.matches_header(" Start Date "));
        assert!(!column.matches_header("End Date"));
    }

    #[test]
    fn test_theme_and_sort_order() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(SortOrder::Ascending.flipped(), SortOrder::Descending);
        assert_eq!(
            serde_json::to_string(&SortOrder::Descending).unwrap(),
            r#""desc""#
        );
    }
}
