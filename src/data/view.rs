use super::filter::{filter, find_by_name, top_by_births, FilterParams, NameTotal};
use super::model::Table;
use super::stats::{describe, Summary};

/// Everything the dashboard displays for one set of parameters.
///
/// A pure function of `(table, params)`; the UI rebuilds it whenever the
/// sidebar changes.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub filtered: Table,
    pub name_matches: Table,
    pub top_five: Vec<NameTotal>,
    pub top_ten: Vec<NameTotal>,
    pub name_summary: Summary,
    pub filtered_summary: Summary,
}

impl DashboardView {
    pub fn compute(table: &Table, params: &FilterParams) -> Self {
        let filtered = filter(table, params.sex, params.min_births, params.max_births);
        let name_matches = find_by_name(&filtered, &params.name);
        let top_ten = top_by_births(&filtered, 10);
        let top_five = top_ten.iter().take(5).cloned().collect();

        DashboardView {
            name_summary: describe(&name_matches),
            filtered_summary: describe(&filtered),
            filtered,
            name_matches,
            top_five,
            top_ten,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Record, Sex};

    #[test]
    fn view_for_worked_example() {
        let table = Table::from_records(vec![
            Record::new("Emma", "F", 100),
            Record::new("Emma", "F", 50),
            Record::new("Liam", "M", 80),
        ]);
        let params = FilterParams {
            sex: Sex::Female,
            min_births: 0,
            max_births: 1000,
            name: "emma".into(),
        };

        let view = DashboardView::compute(&table, &params);
        assert_eq!(view.filtered.len(), 2);
        assert_eq!(view.name_matches.len(), 2);
        assert_eq!(view.top_five.len(), 1);
        assert_eq!(view.top_five[0].total_births, 150);
        assert_eq!(view.top_five, view.top_ten);
        assert_eq!(view.name_summary.columns[0].count, 2);
    }

    #[test]
    fn top_five_is_prefix_of_top_ten() {
        let records = (0..12u64)
            .map(|i| Record::new(format!("N{i:02}"), "M", 10 + i))
            .collect();
        let table = Table::from_records(records);
        let params = FilterParams {
            sex: Sex::Male,
            min_births: 0,
            max_births: 100,
            name: String::new(),
        };

        let view = DashboardView::compute(&table, &params);
        assert_eq!(view.top_ten.len(), 10);
        assert_eq!(view.top_five[..], view.top_ten[..5]);
        assert_eq!(view.top_ten[0].name, "N11");
        assert!(view.name_matches.is_empty());
        assert_eq!(view.name_summary.columns[0].count, 0);
    }
}
