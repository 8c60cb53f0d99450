//! Plain-text rendering of extraction and simulation results.
//!
//! The core hands over raw decimals; everything user-facing goes through
//! the Brazilian formatter here, including the `R$` prefixes.

use rust_decimal::Decimal;

use leao_core::Statement;
use leao_core::calculations::{RegimeComparison, SelectionSummary};
use leao_core::format::{format_currency, format_percent};
use leao_core::models::MonthlyRecord;

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("—")
}

fn currency(value: Decimal) -> String {
    format!("R$ {}", format_currency(value))
}

pub fn header(statement: &Statement) -> String {
    format!(
        "Titular: {}\nCPF:     {}",
        or_dash(statement.taxpayer.name.as_deref()),
        or_dash(statement.taxpayer.tax_id.as_deref()),
    )
}

pub fn monthly_table(records: &[&MonthlyRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:>15} {:>15} {:>15} {:>10}\n",
        "Mês", "Rendimento", "Dedução", "Imposto", "Alíquota"
    ));
    for record in records {
        out.push_str(&format!(
            "{:<4} {:>15} {:>15} {:>15} {:>10}\n",
            record.month.as_str(),
            currency(record.income),
            currency(record.deduction),
            currency(record.tax_due),
            format_percent(record.effective_rate),
        ));
    }
    out
}

pub fn summary_block(summary: &SelectionSummary) -> String {
    format!(
        "Total recebido:    {}\n\
         Total de impostos: {}\n\
         Alíquota média:    {}",
        currency(summary.total_income),
        currency(summary.total_tax),
        format_percent(summary.average_effective_rate),
    )
}

pub fn comparison_block(comparison: &RegimeComparison) -> String {
    let mut out = String::new();

    out.push_str("── Pessoa Física ──\n");
    out.push_str(&format!(
        "Deduções completas: base {}, imposto {}, custo {}\n",
        currency(comparison.full_deduction_base),
        currency(comparison.full_deduction_tax),
        currency(comparison.full_deduction_cost),
    ));
    out.push_str(&format!(
        "Desconto simplificado: base {}, imposto {}, custo {}\n",
        currency(comparison.simplified_base),
        currency(comparison.simplified_tax),
        currency(comparison.simplified_cost),
    ));
    out.push_str(&format!(
        "Variante escolhida: {} — custo mensal {}, anual {}\n",
        comparison.chosen_variant,
        currency(comparison.pf_monthly_cost),
        currency(comparison.pf_annual_cost),
    ));

    out.push_str("── Pessoa Jurídica ──\n");
    out.push_str(&format!(
        "Simples ({} sobre a receita): {}\n",
        format_percent(comparison.simples_rate * Decimal::ONE_HUNDRED),
        currency(comparison.simples_tax),
    ));
    out.push_str(&format!(
        "Pró-labore {} (INSS {}, IRRF {} sobre base {})\n",
        currency(comparison.pro_labore),
        currency(comparison.pro_labore_inss),
        currency(comparison.withholding_tax),
        currency(comparison.withholding_base),
    ));
    out.push_str(&format!(
        "Restituição estimada (não abatida do custo): {} sobre base {}\n",
        currency(comparison.refund_estimate),
        currency(comparison.refund_base),
    ));
    out.push_str(&format!(
        "Custo mensal {}, anual {}\n",
        currency(comparison.pj_monthly_cost),
        currency(comparison.pj_annual_cost),
    ));

    let cheaper = if comparison.annual_savings > Decimal::ZERO {
        "abrir PJ economiza"
    } else {
        "permanecer PF economiza"
    };
    out.push_str(&format!(
        "── Economia anual: {} ({}) ──",
        currency(comparison.annual_savings.abs()),
        cheaper,
    ));

    out
}
