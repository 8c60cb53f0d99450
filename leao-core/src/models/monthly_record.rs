use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::Month;

/// One month of the statement's yearly series.
///
/// `effective_rate` is derived from `tax_due` and `income` by the
/// constructor; a rate stated by the source document is never trusted.
/// Records are immutable once built and replaced wholesale when a new
/// statement is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub month: Month,

    /// Gross revenue subject to tax for the month.
    pub income: Decimal,

    /// Deduction already applied by the source report.
    pub deduction: Decimal,

    /// Tax liability as stated by the source report.
    pub tax_due: Decimal,

    /// `tax_due / income × 100`, rounded to two decimal places.
    /// Zero for months without income.
    pub effective_rate: Decimal,
}

impl MonthlyRecord {
    pub fn new(
        month: Month,
        income: Decimal,
        deduction: Decimal,
        tax_due: Decimal,
    ) -> Self {
        let effective_rate = if income > Decimal::ZERO {
            round_half_up(tax_due / income * Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        };

        Self {
            month,
            income,
            deduction,
            tax_due,
            effective_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn effective_rate_is_derived_from_income_and_tax() {
        let record = MonthlyRecord::new(Month::Jan, dec!(8000.00), dec!(500.00), dec!(1200.00));

        assert_eq!(record.effective_rate, dec!(15.00));
    }

    #[test]
    fn effective_rate_rounds_to_two_places() {
        // 123.45 / 7890.12 × 100 = 1.56461...
        let record = MonthlyRecord::new(Month::Mar, dec!(7890.12), dec!(0.00), dec!(123.45));

        assert_eq!(record.effective_rate, dec!(1.56));
    }

    #[test]
    fn effective_rate_is_zero_without_income() {
        let record = MonthlyRecord::new(Month::Fev, dec!(0.00), dec!(0.00), dec!(0.00));

        assert_eq!(record.effective_rate, Decimal::ZERO);
    }

    #[test]
    fn effective_rate_is_never_negative() {
        let record = MonthlyRecord::new(Month::Abr, dec!(1000.00), dec!(0.00), dec!(0.00));

        assert!(record.effective_rate >= Decimal::ZERO);
    }
}
