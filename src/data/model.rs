use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sex – the two selectable values of the `Sex` column
// ---------------------------------------------------------------------------

/// Sex as offered by the sidebar selector.
///
/// Source rows keep their raw code (see [`Record::sex`]), so values outside
/// `M`/`F` survive loading and simply never match a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Single-letter code as written in the source files.
    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    pub fn from_code(code: &str) -> Option<Sex> {
        match code {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell in an additional (non Name/Sex/Births) column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the usual CSV dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl CellValue {
    /// Infer the narrowest type for a raw CSV field.
    pub fn guess(s: &str) -> CellValue {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(s.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps the decimal point so 2.0 reads back as a float.
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// One (Name, Sex, Births) observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    /// Raw sex code from the source.
    pub sex: String,
    pub births: u64,
    /// Additional columns (CSV mode only): column_name → value.
    pub extra: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new(name: impl Into<String>, sex: impl Into<String>, births: u64) -> Self {
        Record {
            name: name.into(),
            sex: sex.into(),
            births,
            extra: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Ordered collection of records plus the names of any additional columns.
///
/// Never mutated after load; filtering builds new tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Additional column names in header order (excludes Name, Sex, Births).
    pub columns: Vec<String>,
    pub records: Vec<Record>,
    /// Subset of `columns` typed as numeric, fixed when the table is built.
    numeric: Vec<String>,
}

impl Table {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        let numeric = infer_numeric(&columns, &records);
        Table {
            columns,
            records,
            numeric,
        }
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Table::new(Vec::new(), records)
    }

    /// A table with the same columns and column types holding `records`.
    pub fn derive(&self, records: Vec<Record>) -> Table {
        Table {
            columns: self.columns.clone(),
            records,
            numeric: self.numeric.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Upper bound for the birth-count range selector.
    pub fn max_births(&self) -> u64 {
        self.records.iter().map(|r| r.births).max().unwrap_or(0)
    }

    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    /// Additional columns whose non-null values were all numeric when the
    /// table was built. Derived tables inherit this list unchanged.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.numeric.iter().map(String::as_str).collect()
    }
}

fn infer_numeric(columns: &[String], records: &[Record]) -> Vec<String> {
    if records.is_empty() {
        return Vec::new();
    }
    columns
        .iter()
        .filter(|col| {
            records
                .iter()
                .all(|r| !matches!(r.extra.get(col.as_str()), Some(CellValue::Text(_))))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_picks_narrowest_type() {
        assert_eq!(CellValue::guess("1999"), CellValue::Integer(1999));
        assert_eq!(CellValue::guess("2.5"), CellValue::Float(2.5));
        assert_eq!(CellValue::guess("abc"), CellValue::Text("abc".into()));
        assert_eq!(CellValue::guess(""), CellValue::Null);
    }

    #[test]
    fn sex_codes() {
        assert_eq!(Sex::from_code("F"), Some(Sex::Female));
        assert_eq!(Sex::from_code("X"), None);
        assert_eq!(Sex::Male.to_string(), "M");
        assert_eq!(Sex::default(), Sex::Male);
    }

    #[test]
    fn max_births_of_empty_table_is_zero() {
        assert_eq!(Table::default().max_births(), 0);
        let t = Table::from_records(vec![Record::new("A", "F", 3), Record::new("B", "M", 9)]);
        assert_eq!(t.max_births(), 9);
        assert_eq!(t.head(10).len(), 2);
    }

    #[test]
    fn numeric_columns_skip_text() {
        let mut a = Record::new("A", "F", 1);
        a.extra.insert("Year".into(), CellValue::Integer(1990));
        a.extra.insert("State".into(), CellValue::Text("CA".into()));
        let mut b = Record::new("B", "F", 2);
        b.extra.insert("Year".into(), CellValue::Null);
        b.extra.insert("State".into(), CellValue::Text("NY".into()));
        let t = Table::new(vec!["Year".into(), "State".into()], vec![a, b]);
        assert_eq!(t.numeric_columns(), vec!["Year"]);
    }

    #[test]
    fn derived_tables_keep_column_types() {
        let mut a = Record::new("A", "F", 1);
        a.extra.insert("Rank".into(), CellValue::Integer(1));
        let mut b = Record::new("B", "M", 2);
        b.extra.insert("Rank".into(), CellValue::Text("n/a".into()));
        let t = Table::new(vec!["Rank".into()], vec![a.clone(), b]);
        assert!(t.numeric_columns().is_empty());

        let subset = t.derive(vec![a]);
        assert!(subset.numeric_columns().is_empty());
    }

    #[test]
    fn whole_floats_keep_decimal_point() {
        let shown = CellValue::Float(2.0).to_string();
        assert_eq!(shown, "2.0");
        assert_eq!(CellValue::guess(&shown), CellValue::Float(2.0));
    }
}
