//! Descriptive statistics over the numeric columns of a [`Table`].

use super::model::Table;

pub const BIRTHS_COLUMN: &str = "Births";

/// count / mean / std / min / quartiles / max for one column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn empty(column: &str) -> Self {
        Self {
            column: column.to_string(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            max: f64::NAN,
        }
    }

    /// Row labels and values in display order.
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q1),
            ("50%", self.median),
            ("75%", self.q3),
            ("max", self.max),
        ]
    }
}

/// One summary per numeric column, `Births` first.
#[derive(Debug, Clone)]
pub struct Summary {
    pub columns: Vec<ColumnSummary>,
}

impl Summary {
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.column == name)
    }
}

/// Summarise `Births` and every numeric extra column of `table`.
///
/// Null cells are excluded from their column's count.  An empty table
/// still yields a `Births` entry with count 0 and NaN statistics.
pub fn describe(table: &Table) -> Summary {
    let births: Vec<f64> = table.records.iter().map(|r| r.births as f64).collect();
    let mut columns = vec![describe_values(BIRTHS_COLUMN, &births)];

    for col in table.numeric_columns() {
        let values: Vec<f64> = table
            .records
            .iter()
            .filter_map(|r| r.extra.get(col).and_then(|v| v.as_f64()))
            .collect();
        columns.push(describe_values(col, &values));
    }

    Summary { columns }
}

fn describe_values(column: &str, values: &[f64]) -> ColumnSummary {
    let n = values.len();
    if n == 0 {
        return ColumnSummary::empty(column);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mean = values.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    } else {
        f64::NAN
    };

    ColumnSummary {
        column: column.to_string(),
        count: n,
        mean,
        std,
        min: sorted[0],
        q1: percentile(&sorted, 25.0),
        median: percentile(&sorted, 50.0),
        q3: percentile(&sorted, 75.0),
        max: sorted[n - 1],
    }
}

/// Linear interpolation between closest ranks.
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}
