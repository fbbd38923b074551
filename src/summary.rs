use crate::models::{Category, CategoryTotal, Entry, SummaryResponse};
use std::collections::BTreeMap;

pub fn build_summary(entries: &[Entry]) -> SummaryResponse {
    SummaryResponse {
        by_day: totals_by_day(entries),
        by_category: totals_by_category(entries),
    }
}

/// Calories per exact date string. Days without entries are absent.
pub fn totals_by_day(entries: &[Entry]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals.entry(entry.date.clone()).or_insert(0.0) += entry.kcal;
    }
    totals
}

/// Calories per category, one slot for every category in declaration order.
pub fn totals_by_category(entries: &[Entry]) -> [CategoryTotal; 4] {
    Category::ALL.map(|category| CategoryTotal {
        category,
        kcal: entries
            .iter()
            .filter(|entry| entry.category == category)
            .map(|entry| entry.kcal)
            .sum(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, kcal: f64, category: Category) -> Entry {
        Entry {
            date: date.into(),
            comment: "item".into(),
            kcal,
            category,
        }
    }

    #[test]
    fn single_day_breakfast_and_lunch() {
        let entries = [
            entry("2024-01-01", 200.0, Category::Breakfast),
            entry("2024-01-01", 300.0, Category::Lunch),
        ];

        let by_day = totals_by_day(&entries);
        assert_eq!(by_day.len(), 1);
        assert_eq!(by_day["2024-01-01"], 500.0);

        let by_category: Vec<_> = totals_by_category(&entries)
            .iter()
            .map(|total| (total.category.as_str(), total.kcal))
            .collect();
        assert_eq!(
            by_category,
            vec![
                ("Breakfast", 200.0),
                ("Lunch", 300.0),
                ("Dinner", 0.0),
                ("Snacks", 0.0)
            ]
        );
    }

    #[test]
    fn empty_input_gives_sparse_days_and_dense_categories() {
        assert!(totals_by_day(&[]).is_empty());

        let by_category = totals_by_category(&[]);
        assert_eq!(by_category.len(), 4);
        assert!(by_category.iter().all(|total| total.kcal == 0.0));
    }

    #[test]
    fn both_views_conserve_the_grand_total() {
        let entries = [
            entry("2024-01-03", 120.0, Category::Snacks),
            entry("2024-01-01", 450.5, Category::Dinner),
            entry("2024-01-02", 80.0, Category::Breakfast),
            entry("2024-01-03", 610.0, Category::Lunch),
            entry("2024-01-01", 35.0, Category::Snacks),
        ];
        let grand: f64 = entries.iter().map(|entry| entry.kcal).sum();

        let by_day = totals_by_day(&entries);
        assert_eq!(by_day.len(), 3);
        assert_eq!(by_day["2024-01-03"], 730.0);
        assert_eq!(by_day.values().sum::<f64>(), grand);

        let by_category = totals_by_category(&entries);
        assert_eq!(by_category.iter().map(|total| total.kcal).sum::<f64>(), grand);
        assert_eq!(by_category[3].kcal, 155.0);
    }

    #[test]
    fn day_keys_are_compared_exactly() {
        let entries = [
            entry("2024-01-01", 1.0, Category::Lunch),
            entry("2024-1-1", 2.0, Category::Lunch),
        ];
        assert_eq!(totals_by_day(&entries).len(), 2);
    }
}
