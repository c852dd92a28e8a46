//! Display ordering of transactions
//!
//! All orderings use `slice::sort_by`, which is documented as stable:
//! transactions with equal keys keep their relative order.

use crate::models::{SortKey, Transaction};

/// Return a reordered copy of `transactions`; the input is left untouched
///
/// - `Date`: most recent first
/// - `Amount`: largest magnitude first, income and expense alike
/// - `Category`: lexicographic by category label
/// - `None`: input order
pub fn sorted_by(transactions: &[Transaction], key: SortKey) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    match key {
        SortKey::None => {}
        SortKey::Date => sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortKey::Amount => sorted.sort_by(|a, b| b.magnitude().cmp(&a.magnitude())),
        SortKey::Category => sorted.sort_by(|a, b| a.category.cmp(&b.category)),
    }
    sorted
}

/// Order oldest first, in place; the order the trend series expects
pub fn sort_chronologically(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, 12, 0, 0).unwrap()
    }

    fn txn(id: &str, d: u32, units: i64, category: &str) -> Transaction {
        Transaction::new(id.into(), id, Money::from_units(units), day(d), category)
    }

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_none_is_identity() {
        let input = vec![
            txn("a", 3, 10, "x"),
            txn("b", 1, -50, "y"),
            txn("c", 2, 20, "x"),
        ];
        assert_eq!(sorted_by(&input, SortKey::None), input);
    }

    #[test]
    fn test_amount_sorts_by_magnitude_descending() {
        let input = vec![
            txn("a", 2, 10, "x"),
            txn("b", 1, 50, "x"),
            txn("c", 1, 20, "x"),
        ];
        let sorted = sorted_by(&input, SortKey::Amount);
        let amounts: Vec<_> = sorted.iter().map(|t| t.amount.units()).collect();
        assert_eq!(amounts, vec![50, 20, 10]);
    }

    #[test]
    fn test_amount_ignores_direction() {
        let input = vec![txn("small", 1, 10, "x"), txn("big-expense", 1, -90, "x")];
        assert_eq!(ids(&sorted_by(&input, SortKey::Amount)), vec!["big-expense", "small"]);
    }

    #[test]
    fn test_date_sorts_most_recent_first() {
        let input = vec![
            txn("old", 1, 10, "x"),
            txn("new", 9, 10, "x"),
            txn("mid", 5, 10, "x"),
        ];
        assert_eq!(ids(&sorted_by(&input, SortKey::Date)), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_category_sorts_lexicographically() {
        let input = vec![
            txn("a", 1, 10, "salary"),
            txn("b", 1, -10, "food"),
            txn("c", 1, -10, "rent"),
        ];
        assert_eq!(ids(&sorted_by(&input, SortKey::Category)), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sorts_are_stable() {
        let input = vec![
            txn("first", 1, 10, "food"),
            txn("other", 2, 99, "zzz"),
            txn("second", 1, -10, "food"),
            txn("third", 1, 10, "food"),
        ];

        let by_amount = sorted_by(&input, SortKey::Amount);
        assert_eq!(ids(&by_amount), vec!["other", "first", "second", "third"]);

        let by_date = sorted_by(&input, SortKey::Date);
        assert_eq!(ids(&by_date), vec!["other", "first", "second", "third"]);

        let by_category = sorted_by(&input, SortKey::Category);
        assert_eq!(ids(&by_category), vec!["first", "second", "third", "other"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = vec![txn("a", 1, 10, "x"), txn("b", 2, 20, "x")];
        let snapshot = input.clone();
        let _ = sorted_by(&input, SortKey::Date);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_sort_chronologically() {
        let mut list = vec![txn("c", 3, 1, "x"), txn("a", 1, 1, "x"), txn("b", 2, 1, "x")];
        sort_chronologically(&mut list);
        assert_eq!(ids(&list), vec!["a", "b", "c"]);
    }
}
