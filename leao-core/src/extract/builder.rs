//! Builds the twelve typed monthly records from raw field captures.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::extract::fields::{self, FieldKind};
use crate::format::{self, ParseDecimalError};
use crate::models::{Month, MonthlyRecord, Statement, TaxpayerIdentity};

/// Errors that abort statement extraction.
///
/// All of them are fatal for the whole document: no partial set of monthly
/// records is ever produced, and the same input always fails the same way.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A required labeled pattern found no match in the page text.
    #[error("field '{0}' not found in the statement text")]
    FieldMissing(FieldKind),

    /// A numeric series matched but carries fewer values than months.
    #[error("series '{field}' has {found} values, expected {expected}")]
    InsufficientSeries {
        field: FieldKind,
        found: usize,
        expected: usize,
    },

    /// A series token is not a parseable decimal.
    #[error("series '{field}', month {month}: {source}")]
    NumberParse {
        field: FieldKind,
        month: Month,
        #[source]
        source: ParseDecimalError,
    },
}

/// Extracts a full [`Statement`] from the first-page text of a statement
/// report.
///
/// The taxpayer identity fields are optional — a document without the name
/// or CPF header still yields a statement. The three numeric series are
/// required, must carry at least twelve values each, and every value must
/// parse; values beyond the twelfth are ignored.
///
/// Running this twice on the same text yields the same statement.
///
/// # Errors
///
/// Returns [`ExtractError`] when a required series is missing, short, or
/// malformed.
pub fn extract_statement(text: &str) -> Result<Statement, ExtractError> {
    let raw = fields::scan(text);

    let income = parse_series(raw.income, FieldKind::Income)?;
    let deduction = parse_series(raw.deduction, FieldKind::Deduction)?;
    let tax_due = parse_series(raw.tax_due, FieldKind::TaxDue)?;

    let taxpayer = TaxpayerIdentity {
        name: raw.name,
        tax_id: raw.tax_id,
    };

    let records = Month::ALL
        .iter()
        .enumerate()
        .map(|(i, &month)| MonthlyRecord::new(month, income[i], deduction[i], tax_due[i]))
        .collect();

    debug!(
        name_found = taxpayer.name.is_some(),
        tax_id_found = taxpayer.tax_id.is_some(),
        "statement extracted"
    );

    Ok(Statement::new(taxpayer, records))
}

fn parse_series(
    tokens: Option<Vec<String>>,
    field: FieldKind,
) -> Result<Vec<Decimal>, ExtractError> {
    let tokens = tokens.ok_or(ExtractError::FieldMissing(field))?;

    let expected = Month::ALL.len();
    if tokens.len() < expected {
        return Err(ExtractError::InsufficientSeries {
            field,
            found: tokens.len(),
            expected,
        });
    }

    tokens
        .iter()
        .take(expected)
        .enumerate()
        .map(|(i, token)| {
            format::parse_decimal(token).map_err(|source| ExtractError::NumberParse {
                field,
                month: Month::ALL[i],
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn page(income_series: &str) -> String {
        format!(
            "NOME: MARIA DA SILVA DEMONSTRATIVO ANUAL CPF: 123.456.789-09 \
             Rendimentos Total {income_series} Deduções \
             Dedução Considerada 500,00 500,00 500,00 500,00 500,00 500,00 \
             500,00 500,00 500,00 500,00 500,00 500,00 Cálculo \
             Imposto Devido I 800,00 850,00 790,00 0,00 910,00 800,00 820,00 \
             830,00 840,00 860,00 870,00 880,00 Imposto Pago"
        )
    }

    const TWELVE_INCOMES: &str = "8.000,00 8.500,00 7.900,10 0,00 9.100,00 \
        8.000,00 8.200,00 8.300,00 8.400,00 8.600,00 8.700,00 8.800,00";

    #[test]
    fn extracts_twelve_records_in_calendar_order() {
        let statement = extract_statement(&page(TWELVE_INCOMES)).unwrap();

        assert_eq!(statement.records().len(), 12);
        assert_eq!(statement.taxpayer.name.as_deref(), Some("MARIA DA SILVA"));
        assert_eq!(statement.taxpayer.tax_id.as_deref(), Some("123.456.789-09"));

        let jan = statement.record(Month::Jan);
        assert_eq!(jan.income, dec!(8000.00));
        assert_eq!(jan.deduction, dec!(500.00));
        assert_eq!(jan.tax_due, dec!(800.00));
        assert_eq!(jan.effective_rate, dec!(10.00));
    }

    #[test]
    fn zero_income_month_gets_zero_rate() {
        let statement = extract_statement(&page(TWELVE_INCOMES)).unwrap();

        let abr = statement.record(Month::Abr);
        assert_eq!(abr.income, dec!(0.00));
        assert_eq!(abr.effective_rate, dec!(0.00));
    }

    #[test]
    fn eleven_token_series_is_rejected() {
        let eleven = "8.000,00 8.500,00 7.900,10 0,00 9.100,00 8.000,00 \
            8.200,00 8.300,00 8.400,00 8.600,00 8.700,00";

        let error = extract_statement(&page(eleven)).unwrap_err();

        match error {
            ExtractError::InsufficientSeries {
                field,
                found,
                expected,
            } => {
                assert_eq!(field, FieldKind::Income);
                assert_eq!(found, 11);
                assert_eq!(expected, 12);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_series_is_rejected() {
        let text = "NOME: MARIA DEMONSTRATIVO CPF: 123.456.789-09";

        let error = extract_statement(text).unwrap_err();

        assert!(matches!(
            error,
            ExtractError::FieldMissing(FieldKind::Income)
        ));
    }

    #[test]
    fn unparseable_token_is_rejected_with_context() {
        let bad = "8.000,00 8.500,00 7.900,10 0,00 9.100,00 8.000,00 \
            8.200,00 8.300,00 8.400,00 8.600,00 8.700,00 8,8,8";

        let error = extract_statement(&page(bad)).unwrap_err();

        match error {
            ExtractError::NumberParse { field, month, .. } => {
                assert_eq!(field, FieldKind::Income);
                assert_eq!(month, Month::Dez);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extra_tokens_beyond_december_are_ignored() {
        let thirteen = format!("{TWELVE_INCOMES} 9.999,99");

        let statement = extract_statement(&page(&thirteen)).unwrap();

        assert_eq!(statement.records().len(), 12);
        assert_eq!(statement.record(Month::Dez).income, dec!(8800.00));
    }

    #[test]
    fn missing_identity_is_not_fatal() {
        let text = page(TWELVE_INCOMES).replace("NOME:", "TITULAR:");

        let statement = extract_statement(&text).unwrap();

        assert_eq!(statement.taxpayer.name, None);
        assert_eq!(statement.records().len(), 12);
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = page(TWELVE_INCOMES);

        assert_eq!(
            extract_statement(&text).unwrap(),
            extract_statement(&text).unwrap()
        );
    }
}
