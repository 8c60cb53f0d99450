//! Headline metrics over the months selected for analysis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::MonthlyRecord;

/// Totals and mean effective rate of a selection, for the report header.
///
/// Unlike [`SelectionAverages`](crate::calculations::SelectionAverages),
/// the mean here runs over every selected month, zero-income months
/// included — it describes the selection as displayed, not a taxable base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub total_income: Decimal,
    pub total_tax: Decimal,
    /// Mean of the per-month effective rates, two decimal places.
    pub average_effective_rate: Decimal,
}

impl SelectionSummary {
    /// An empty selection yields all zeros.
    pub fn over_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a MonthlyRecord>,
    {
        let mut total_income = Decimal::ZERO;
        let mut total_tax = Decimal::ZERO;
        let mut rate_sum = Decimal::ZERO;
        let mut months = 0u32;

        for record in records {
            total_income += record.income;
            total_tax += record.tax_due;
            rate_sum += record.effective_rate;
            months += 1;
        }

        let average_effective_rate = if months == 0 {
            Decimal::ZERO
        } else {
            round_half_up(rate_sum / Decimal::from(months))
        };

        Self {
            total_income,
            total_tax,
            average_effective_rate,
        }
    }
}
