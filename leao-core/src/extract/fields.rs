//! Labeled-field scanning over the statement's first page.
//!
//! The government-issued report template prints five recognizable labels;
//! each field sits between a pair of them. Numeric series are captured as
//! raw "1.234,56"-style tokens — normalization happens when they are parsed
//! into records, so scanning stays a pure text operation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

/// Text between "NOME:" and "DEMONSTRATIVO".
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"NOME:\s+(.*?)\s+DEMONSTRATIVO").expect("hard-coded pattern")
});

/// Digits-and-dots, dash, digits, right after "CPF:".
static TAX_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CPF:\s+([\d\.]+-\d+)").expect("hard-coded pattern"));

/// Numeric tokens between "Total" and "Deduções".
static INCOME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total\s+([\d\.,\s]+)\s+Deduções").expect("hard-coded pattern"));

/// Numeric tokens between "Dedução Considerada" and "Cálculo".
static DEDUCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Dedução Considerada\s+([\d\.,\s]+)\s+Cálculo").expect("hard-coded pattern")
});

/// Numeric tokens between "Imposto Devido I" and "Imposto Pago".
static TAX_DUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Imposto Devido I\s+([\d\.,\s]+)\s+Imposto Pago").expect("hard-coded pattern")
});

/// The five fields the scanner knows about, for logging and error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    TaxId,
    Income,
    Deduction,
    TaxDue,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::TaxId => "tax id (CPF)",
            Self::Income => "gross income",
            Self::Deduction => "considered deduction",
            Self::TaxDue => "tax due",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw captures of one scan; `None` where a pattern found no match.
///
/// Which fields are required is not this type's call — the record builder
/// decides, so a statement missing only its name header still scans cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub income: Option<Vec<String>>,
    pub deduction: Option<Vec<String>>,
    pub tax_due: Option<Vec<String>>,
}

impl RawFields {
    /// Fields the scan did not find, in label order.
    pub fn missing(&self) -> Vec<FieldKind> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push(FieldKind::Name);
        }
        if self.tax_id.is_none() {
            missing.push(FieldKind::TaxId);
        }
        if self.income.is_none() {
            missing.push(FieldKind::Income);
        }
        if self.deduction.is_none() {
            missing.push(FieldKind::Deduction);
        }
        if self.tax_due.is_none() {
            missing.push(FieldKind::TaxDue);
        }
        missing
    }
}

/// Applies the five patterns to the page text. Deterministic and total:
/// empty or alien text yields a [`RawFields`] with every field `None`.
pub fn scan(text: &str) -> RawFields {
    let name = capture(&NAME_RE, text);
    let tax_id = capture(&TAX_ID_RE, text);

    if name.is_none() {
        warn!(field = %FieldKind::Name, "label not found in statement text");
    }
    if tax_id.is_none() {
        warn!(field = %FieldKind::TaxId, "label not found in statement text");
    }

    RawFields {
        name,
        tax_id,
        income: capture(&INCOME_RE, text).map(|s| tokens(&s)),
        deduction: capture(&DEDUCTION_RE, text).map(|s| tokens(&s)),
        tax_due: capture(&TAX_DUE_RE, text).map(|s| tokens(&s)),
    }
}

fn capture(
    re: &Regex,
    text: &str,
) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn tokens(series: &str) -> Vec<String> {
    series.split_whitespace().map(str::to_string).collect()
}
