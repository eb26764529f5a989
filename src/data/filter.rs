use std::collections::HashMap;

use super::model::{Record, Sex, Table};

// ---------------------------------------------------------------------------
// Filter parameters: what the sidebar currently selects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParams {
    pub sex: Sex,
    /// Inclusive lower bound on births.
    pub min_births: u64,
    /// Inclusive upper bound on births.
    pub max_births: u64,
    pub name: String,
}

/// Name with its births summed over every matching row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTotal {
    pub name: String,
    pub total_births: u64,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Rows with `Sex == sex` and `min_births <= Births <= max_births`.
///
/// Rows whose sex code is neither `M` nor `F` never match.  An inverted
/// range yields an empty table.
pub fn filter(table: &Table, sex: Sex, min_births: u64, max_births: u64) -> Table {
    let records = table
        .records
        .iter()
        .filter(|r| {
            Sex::from_code(&r.sex) == Some(sex) && (min_births..=max_births).contains(&r.births)
        })
        .cloned()
        .collect();
    table.derive(records)
}

/// Rows whose name equals `name`, ignoring case.
pub fn find_by_name(table: &Table, name: &str) -> Table {
    let wanted = name.to_lowercase();
    let records = table
        .records
        .iter()
        .filter(|r| r.name.to_lowercase() == wanted)
        .cloned()
        .collect();
    table.derive(records)
}

/// Group by name, sum births, and keep the `n` largest totals.
///
/// Equal totals are ordered by name so the result is deterministic.
/// Totals saturate at `u64::MAX`.
pub fn top_by_births(table: &Table, n: usize) -> Vec<NameTotal> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for Record { name, births, .. } in &table.records {
        let total = totals.entry(name.as_str()).or_default();
        *total = total.saturating_add(*births);
    }

    let mut ranked: Vec<NameTotal> = totals
        .into_iter()
        .map(|(name, total_births)| NameTotal {
            name: name.to_string(),
            total_births,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.total_births
            .cmp(&a.total_births)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_records(vec![
            Record::new("Emma", "F", 100),
            Record::new("Emma", "F", 50),
            Record::new("Liam", "M", 80),
        ])
    }

    #[test]
    fn filter_by_sex_and_range() {
        let filtered = filter(&sample(), Sex::Female, 0, 1000);
        assert_eq!(
            filtered.records,
            vec![Record::new("Emma", "F", 100), Record::new("Emma", "F", 50)]
        );
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let filtered = filter(&sample(), Sex::Female, 50, 100);
        assert_eq!(filtered.len(), 2);
        let filtered = filter(&sample(), Sex::Female, 51, 99);
        assert!(filtered.is_empty());
    }

    #[test]
    fn filter_is_idempotent_and_does_not_touch_input() {
        let table = sample();
        let once = filter(&table, Sex::Male, 10, 90);
        let twice = filter(&once, Sex::Male, 10, 90);
        assert_eq!(once, twice);
        assert_eq!(table, sample());
    }

    #[test]
    fn filter_ignores_unknown_sex_and_inverted_range() {
        let table = Table::from_records(vec![Record::new("Sam", "X", 10)]);
        assert!(filter(&table, Sex::Male, 0, 100).is_empty());
        assert!(filter(&table, Sex::Female, 0, 100).is_empty());
        assert!(filter(&sample(), Sex::Female, 200, 10).is_empty());
    }

    #[test]
    fn find_by_name_ignores_case() {
        let filtered = filter(&sample(), Sex::Female, 0, 1000);
        let lower = find_by_name(&filtered, "emma");
        let upper = find_by_name(&filtered, "EMMA");
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 2);
        assert!(find_by_name(&filtered, "emm").is_empty());
        assert!(find_by_name(&Table::default(), "emma").is_empty());
    }

    #[test]
    fn top_sums_repeated_names() {
        let filtered = filter(&sample(), Sex::Female, 0, 1000);
        assert_eq!(
            top_by_births(&filtered, 5),
            vec![NameTotal {
                name: "Emma".into(),
                total_births: 150
            }]
        );
    }

    #[test]
    fn top_saturates_instead_of_overflowing() {
        let table = Table::from_records(vec![
            Record::new("Big", "M", u64::MAX),
            Record::new("Big", "M", 1),
            Record::new("Small", "M", 3),
        ]);
        let top = top_by_births(&table, 5);
        assert_eq!(top[0].name, "Big");
        assert_eq!(top[0].total_births, u64::MAX);
        assert_eq!(top[1].total_births, 3);
    }

    #[test]
    fn top_orders_descending_with_name_tie_break() {
        let table = Table::from_records(vec![
            Record::new("Noah", "M", 30),
            Record::new("Liam", "M", 10),
            Record::new("Adam", "M", 30),
            Record::new("Liam", "M", 40),
            Record::new("Owen", "M", 5),
        ]);
        let top = top_by_births(&table, 3);
        let names: Vec<(&str, u64)> = top
            .iter()
            .map(|t| (t.name.as_str(), t.total_births))
            .collect();
        assert_eq!(names, vec![("Liam", 50), ("Adam", 30), ("Noah", 30)]);
    }

    #[test]
    fn top_returns_all_groups_when_fewer_than_n() {
        assert_eq!(top_by_births(&sample(), 10).len(), 2);
        assert!(top_by_births(&Table::default(), 5).is_empty());
    }
}
