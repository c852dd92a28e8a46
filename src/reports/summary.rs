//! Summary (aggregate) of a transaction set
//!
//! Partitions amounts by sign: positive amounts add to income, the
//! magnitudes of negative amounts add to expense. The result does not depend
//! on input order.

use serde::Serialize;

use crate::models::{Money, Transaction};

/// Income, expense and balance over a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    /// Sum of positive amounts
    pub income_total: Money,
    /// Sum of the magnitudes of negative amounts (non-negative)
    pub expense_total: Money,
    /// `income_total - expense_total`
    pub balance: Money,
}

impl Summary {
    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{:<18} {:>16}\n",
            "Total Income:",
            self.income_total.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "{:<18} {:>16}\n",
            "Total Expenses:",
            self.expense_total.format_with_symbol(currency_symbol)
        ));
        output.push_str(&"-".repeat(35));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>16}\n",
            "Current Balance:",
            self.balance.format_with_symbol(currency_symbol)
        ));
        output
    }
}

/// Compute the summary of `transactions`; empty input yields all zeros
pub fn aggregate(transactions: &[Transaction]) -> Summary {
    let mut income_total = Money::zero();
    let mut expense_total = Money::zero();

    for txn in transactions {
        if txn.amount.is_positive() {
            income_total += txn.amount;
        } else if txn.amount.is_negative() {
            expense_total += txn.amount.abs();
        }
    }

    Summary {
        income_total,
        expense_total,
        balance: income_total - expense_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn txn(id: &str, units: i64) -> Transaction {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Transaction::new(id.into(), id, Money::from_units(units), ts, "x")
    }

    fn permutations(items: &[Transaction]) -> Vec<Vec<Transaction>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut result = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head.clone());
                result.push(tail);
            }
        }
        result
    }

    #[test]
    fn test_worked_example() {
        let summary = aggregate(&[txn("a", 5000), txn("b", -1200), txn("c", 300)]);
        assert_eq!(summary.income_total, Money::from_units(5300));
        assert_eq!(summary.expense_total, Money::from_units(1200));
        assert_eq!(summary.balance, Money::from_units(4100));
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(aggregate(&[]), Summary::default());
    }

    #[test]
    fn test_zero_amount_counts_nowhere() {
        let summary = aggregate(&[txn("a", 0), txn("b", 10)]);
        assert_eq!(summary.income_total, Money::from_units(10));
        assert_eq!(summary.expense_total, Money::zero());
    }

    #[test]
    fn test_invariant_under_permutation() {
        let items = vec![txn("a", 5000), txn("b", -1200), txn("c", 300), txn("d", -45)];
        let expected = aggregate(&items);
        for perm in permutations(&items) {
            assert_eq!(aggregate(&perm), expected);
        }
    }

    #[test]
    fn test_balance_identity_is_exact() {
        let items: Vec<_> = [1, -1, 333, -7, 10_000, -9_999]
            .iter()
            .enumerate()
            .map(|(i, cents)| {
                let mut t = txn(&i.to_string(), 0);
                t.amount = Money::from_cents(*cents);
                t
            })
            .collect();
        let summary = aggregate(&items);
        assert_eq!(summary.income_total - summary.expense_total, summary.balance);
        assert_eq!(summary.balance, Money::from_cents(327));
    }

    #[test]
    fn test_largest_summable_list_aggregates_exactly() {
        use crate::models::MAX_AMOUNT_CENTS;
        use crate::services::ensure_summable;

        let count = (i64::MAX / MAX_AMOUNT_CENTS) as usize;
        let items: Vec<_> = (0..count)
            .map(|i| {
                let mut t = txn(&i.to_string(), 0);
                let cents = if i % 2 == 0 { MAX_AMOUNT_CENTS } else { -MAX_AMOUNT_CENTS };
                t.amount = Money::from_cents(cents);
                t
            })
            .collect();
        assert!(ensure_summable(&items).is_ok());

        let summary = aggregate(&items);
        let incomes = ((count + 1) / 2) as i64;
        let expenses = (count / 2) as i64;
        assert_eq!(summary.income_total, Money::from_cents(incomes * MAX_AMOUNT_CENTS));
        assert_eq!(summary.expense_total, Money::from_cents(expenses * MAX_AMOUNT_CENTS));
        assert_eq!(summary.income_total - summary.expense_total, summary.balance);
    }

    #[test]
    fn test_format_terminal() {
        let summary = aggregate(&[txn("a", 5000), txn("b", -1200), txn("c", 300)]);
        let output = summary.format_terminal("₦");
        assert!(output.contains("₦5,300"));
        assert!(output.contains("₦1,200"));
        assert!(output.contains("₦4,100"));
    }
}
