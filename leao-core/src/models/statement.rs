use serde::{Deserialize, Serialize};

use crate::models::{Month, MonthlyRecord};

/// Who the statement belongs to. Display-only; calculations never read it.
///
/// Either field may be absent when the corresponding label was not found in
/// the page text — absence here is not an extraction failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerIdentity {
    pub name: Option<String>,
    /// CPF, as printed (digits, dots and dash).
    pub tax_id: Option<String>,
}

/// A fully extracted statement: taxpayer identity plus the twelve monthly
/// records in calendar order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub taxpayer: TaxpayerIdentity,
    records: Vec<MonthlyRecord>,
}

impl Statement {
    /// `records` must hold one record per month, in calendar order; the
    /// extraction builder is the only producer.
    pub(crate) fn new(
        taxpayer: TaxpayerIdentity,
        records: Vec<MonthlyRecord>,
    ) -> Self {
        debug_assert_eq!(records.len(), Month::ALL.len());
        Self { taxpayer, records }
    }

    /// All twelve records, January first.
    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn record(
        &self,
        month: Month,
    ) -> &MonthlyRecord {
        &self.records[month.index()]
    }

    /// Records for the given months, in calendar order regardless of the
    /// order (or duplication) of `months`.
    pub fn select(
        &self,
        months: &[Month],
    ) -> Vec<&MonthlyRecord> {
        self.records
            .iter()
            .filter(|r| months.contains(&r.month))
            .collect()
    }
}
