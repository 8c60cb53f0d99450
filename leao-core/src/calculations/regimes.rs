//! PF × PJ tax-regime comparison.
//!
//! Simulates what a taxpayer currently filing monthly Carnê-Leão as an
//! individual (PF) would pay after incorporating (PJ, Simples Nacional with
//! a pro-labore withdrawal), and compares the two regimes under both PF
//! deduction strategies.
//!
//! # Comparison steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | PF base and tax with full deductions (report deduction + personal expenses + fixed costs) |
//! | 2    | PF base and tax with the simplified discount (20% of income, capped) |
//! | 3    | The cheaper PF variant wins |
//! | 4    | PJ gross-revenue tax (Simples tier selected by average income) |
//! | 5    | Pro-labore, its INSS contribution and IRRF withholding |
//! | 6    | Refund estimate on the annual adjustment (informational only) |
//! | 7    | PJ monthly cost |
//! | 8    | Annualization and savings |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use leao_core::calculations::{
//!     IndividualVariant, PersonalExpenses, RegimeConfig, RegimeSimulation, SelectionAverages,
//! };
//!
//! let simulation = RegimeSimulation::new(RegimeConfig::year_2025()).unwrap();
//! let averages = SelectionAverages {
//!     income: dec!(10000.00),
//!     deduction: dec!(2000.00),
//! };
//!
//! let comparison = simulation.compare(&averages, &PersonalExpenses::default());
//!
//! assert_eq!(comparison.chosen_variant, IndividualVariant::FullDeduction);
//! assert_eq!(comparison.simples_tax, dec!(600.00));
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::progressive::ProgressiveTable;
use crate::models::MonthlyRecord;

/// Errors that can occur when configuring or feeding a simulation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegimeSimulationError {
    /// No selected month has positive income, so the average the whole
    /// simulation hinges on does not exist.
    #[error("no selected month has positive income; the average is undefined")]
    UndefinedAverage,

    #[error("{name} must not be negative, got {value}")]
    NegativeAmount { name: &'static str, value: Decimal },

    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidFraction { name: &'static str, value: Decimal },
}

/// Monthly personal health expenses entered by the user.
///
/// Only deductible in the full-deduction PF variant; the simplified discount
/// replaces them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalExpenses {
    pub therapy: Decimal,
    pub health_plan: Decimal,
    pub other_health: Decimal,
}

impl PersonalExpenses {
    pub fn total(&self) -> Decimal {
        self.therapy + self.health_plan + self.other_health
    }
}

/// Fixed domain constants the comparison runs on.
///
/// These are regime costs and legal parameters, not user input; they change
/// when the law or the service contracts change, so they live in one struct
/// with a dated constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeConfig {
    /// Monthly accounting fee while filing as an individual.
    pub pf_accounting_fee: Decimal,

    /// Fixed monthly INSS contribution while filing as an individual.
    pub pf_social_security: Decimal,

    /// Monthly accounting fee for the incorporated entity.
    pub pj_accounting_fee: Decimal,

    /// Fixed monthly municipal/registration fee for the entity.
    pub pj_registration_fee: Decimal,

    /// Annual cap on the simplified-filing discount.
    pub simplified_annual_cap: Decimal,

    /// Income fraction used by the simplified discount.
    pub simplified_fraction: Decimal,

    /// Legal minimum pro-labore (one minimum wage).
    pub pro_labore_floor: Decimal,

    /// Income fraction withdrawn as pro-labore when above the floor.
    pub pro_labore_fraction: Decimal,

    /// INSS rate withheld on the pro-labore.
    pub pro_labore_inss_rate: Decimal,
}

impl RegimeConfig {
    /// Constants in force for 2025.
    pub fn year_2025() -> Self {
        Self {
            pf_accounting_fee: Decimal::new(289_00, 2),
            pf_social_security: Decimal::new(166_98, 2),
            pj_accounting_fee: Decimal::new(489_00, 2),
            pj_registration_fee: Decimal::new(50_00, 2),
            simplified_annual_cap: Decimal::new(16754_34, 2),
            simplified_fraction: Decimal::new(20, 2),
            pro_labore_floor: Decimal::new(1518_00, 2),
            pro_labore_fraction: Decimal::new(28, 2),
            pro_labore_inss_rate: Decimal::new(11, 2),
        }
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`RegimeSimulationError`] if any monetary constant is
    /// negative or any fraction falls outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), RegimeSimulationError> {
        let amounts = [
            ("pf_accounting_fee", self.pf_accounting_fee),
            ("pf_social_security", self.pf_social_security),
            ("pj_accounting_fee", self.pj_accounting_fee),
            ("pj_registration_fee", self.pj_registration_fee),
            ("simplified_annual_cap", self.simplified_annual_cap),
            ("pro_labore_floor", self.pro_labore_floor),
        ];
        for (name, value) in amounts {
            if value < Decimal::ZERO {
                return Err(RegimeSimulationError::NegativeAmount { name, value });
            }
        }

        let fractions = [
            ("simplified_fraction", self.simplified_fraction),
            ("pro_labore_fraction", self.pro_labore_fraction),
            ("pro_labore_inss_rate", self.pro_labore_inss_rate),
        ];
        for (name, value) in fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(RegimeSimulationError::InvalidFraction { name, value });
            }
        }

        Ok(())
    }
}

/// Which PF deduction strategy won the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndividualVariant {
    FullDeduction,
    Simplified,
}

impl IndividualVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullDeduction => "full",
            Self::Simplified => "simplified",
        }
    }
}

impl fmt::Display for IndividualVariant {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Average monthly income and deduction over the months selected for
/// analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionAverages {
    pub income: Decimal,
    pub deduction: Decimal,
}

impl SelectionAverages {
    /// Averages each series over the selected months where it is positive.
    ///
    /// A month without income does not drag the income mean down, and
    /// likewise for deductions. No positive deduction anywhere means there
    /// is simply nothing to deduct, so that mean falls back to zero.
    ///
    /// # Errors
    ///
    /// Returns [`RegimeSimulationError::UndefinedAverage`] when no selected
    /// month has positive income — the simulation cannot proceed on an
    /// income mean that does not exist.
    pub fn over_records<'a, I>(records: I) -> Result<Self, RegimeSimulationError>
    where
        I: IntoIterator<Item = &'a MonthlyRecord>,
    {
        let mut income_sum = Decimal::ZERO;
        let mut income_months = 0u32;
        let mut deduction_sum = Decimal::ZERO;
        let mut deduction_months = 0u32;

        for record in records {
            if record.income > Decimal::ZERO {
                income_sum += record.income;
                income_months += 1;
            }
            if record.deduction > Decimal::ZERO {
                deduction_sum += record.deduction;
                deduction_months += 1;
            }
        }

        if income_months == 0 {
            return Err(RegimeSimulationError::UndefinedAverage);
        }

        let deduction = if deduction_months == 0 {
            Decimal::ZERO
        } else {
            round_half_up(deduction_sum / Decimal::from(deduction_months))
        };

        Ok(Self {
            income: round_half_up(income_sum / Decimal::from(income_months)),
            deduction,
        })
    }
}

/// Everything the comparison computed, kept for transparency display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    /// Taxable base of the full-deduction PF variant.
    pub full_deduction_base: Decimal,
    pub full_deduction_tax: Decimal,
    /// Fixed PF costs plus the full-deduction tax.
    pub full_deduction_cost: Decimal,

    /// Taxable base of the simplified PF variant.
    pub simplified_base: Decimal,
    pub simplified_tax: Decimal,
    pub simplified_cost: Decimal,

    /// The cheaper PF variant; ties go to full deduction.
    pub chosen_variant: IndividualVariant,

    pub pf_monthly_cost: Decimal,
    pub pf_annual_cost: Decimal,

    /// Simples Nacional tier rate selected by the average income.
    pub simples_rate: Decimal,
    pub simples_tax: Decimal,

    pub pro_labore: Decimal,
    /// INSS withheld on the pro-labore.
    pub pro_labore_inss: Decimal,
    pub withholding_base: Decimal,
    /// IRRF withheld monthly on the pro-labore.
    pub withholding_tax: Decimal,

    /// Base of the annual-adjustment refund estimate. Depends on the chosen
    /// PF variant.
    pub refund_base: Decimal,
    /// Estimated annual-adjustment refund. Informational only: it is shown
    /// to the user but NOT netted against the PJ cost, matching the system
    /// this replaces. See DESIGN.md.
    pub refund_estimate: Decimal,

    pub pj_monthly_cost: Decimal,
    pub pj_annual_cost: Decimal,

    /// `pf_annual_cost − pj_annual_cost`; positive means incorporating is
    /// cheaper.
    pub annual_savings: Decimal,
}

/// Runs the PF × PJ comparison over a validated configuration and the
/// progressive monthly table.
#[derive(Debug, Clone)]
pub struct RegimeSimulation {
    config: RegimeConfig,
    table: ProgressiveTable,
}

impl RegimeSimulation {
    /// Creates a simulation over [`ProgressiveTable::monthly_2025`].
    ///
    /// # Errors
    ///
    /// Returns [`RegimeSimulationError`] when the configuration fails
    /// validation.
    pub fn new(config: RegimeConfig) -> Result<Self, RegimeSimulationError> {
        config.validate()?;
        Ok(Self {
            config,
            table: ProgressiveTable::monthly_2025(),
        })
    }

    /// Runs the full comparison. Pure: same inputs, same result.
    pub fn compare(
        &self,
        averages: &SelectionAverages,
        expenses: &PersonalExpenses,
    ) -> RegimeComparison {
        let personal_expenses = expenses.total();

        // Steps 1-2: both PF variants.
        let (full_deduction_base, full_deduction_tax, full_deduction_cost) =
            self.full_deduction_variant(averages, personal_expenses);
        let (simplified_base, simplified_tax, simplified_cost) =
            self.simplified_variant(averages.income);

        // Step 3: the cheaper variant wins; ties go to full deduction.
        let chosen_variant = if full_deduction_cost <= simplified_cost {
            IndividualVariant::FullDeduction
        } else {
            IndividualVariant::Simplified
        };
        let pf_monthly_cost = full_deduction_cost.min(simplified_cost);

        // Step 4: Simples tier on gross revenue, single band.
        let simples_rate = simples_tier_rate(averages.income);
        let simples_tax = round_half_up(averages.income * simples_rate);

        // Step 5: pro-labore withdrawal and what it suffers at source.
        let pro_labore = round_half_up(
            self.config
                .pro_labore_floor
                .max(averages.income * self.config.pro_labore_fraction),
        );
        let pro_labore_inss = round_half_up(pro_labore * self.config.pro_labore_inss_rate);
        let withholding_base = non_negative(round_half_up(pro_labore - pro_labore_inss));
        let withholding_tax = self.table.tax_for(withholding_base);

        // Step 6: refund estimate, shown but never netted against the PJ
        // total (see DESIGN.md).
        let refund_base = match chosen_variant {
            IndividualVariant::FullDeduction => {
                round_half_up(withholding_base - personal_expenses)
            }
            IndividualVariant::Simplified => round_half_up(pro_labore * Decimal::new(80, 2)),
        };
        let refund_estimate = self.table.tax_for(refund_base);

        // Step 7: PJ monthly cost.
        let pj_monthly_cost = round_half_up(
            simples_tax
                + pro_labore_inss
                + withholding_tax
                + self.config.pj_accounting_fee
                + self.config.pj_registration_fee,
        );

        // Step 8: annualize and compare.
        let twelve = Decimal::from(12);
        let pf_annual_cost = round_half_up(pf_monthly_cost * twelve);
        let pj_annual_cost = round_half_up(pj_monthly_cost * twelve);
        let annual_savings = round_half_up(pf_annual_cost - pj_annual_cost);

        debug!(
            %pf_monthly_cost,
            %pj_monthly_cost,
            variant = chosen_variant.as_str(),
            "regime comparison complete"
        );

        RegimeComparison {
            full_deduction_base,
            full_deduction_tax,
            full_deduction_cost,
            simplified_base,
            simplified_tax,
            simplified_cost,
            chosen_variant,
            pf_monthly_cost,
            pf_annual_cost,
            simples_rate,
            simples_tax,
            pro_labore,
            pro_labore_inss,
            withholding_base,
            withholding_tax,
            refund_base,
            refund_estimate,
            pj_monthly_cost,
            pj_annual_cost,
            annual_savings,
        }
    }

    /// Step 1: income minus everything deductible, floored at zero.
    fn full_deduction_variant(
        &self,
        averages: &SelectionAverages,
        personal_expenses: Decimal,
    ) -> (Decimal, Decimal, Decimal) {
        let base = non_negative(round_half_up(
            averages.income
                - averages.deduction
                - personal_expenses
                - self.config.pf_accounting_fee
                - self.config.pf_social_security,
        ));
        let tax = self.table.tax_for(base);
        let cost = self.pf_cost(tax);
        (base, tax, cost)
    }

    /// Step 2: income minus the capped 20% discount, floored at zero.
    fn simplified_variant(
        &self,
        income: Decimal,
    ) -> (Decimal, Decimal, Decimal) {
        let monthly_cap = self.config.simplified_annual_cap / Decimal::from(12);
        let discount = round_half_up((income * self.config.simplified_fraction).min(monthly_cap));
        let base = non_negative(round_half_up(income - discount));
        let tax = self.table.tax_for(base);
        let cost = self.pf_cost(tax);
        (base, tax, cost)
    }

    /// Fixed PF costs plus the variant's tax.
    fn pf_cost(
        &self,
        tax: Decimal,
    ) -> Decimal {
        round_half_up(self.config.pf_accounting_fee + self.config.pf_social_security + tax)
    }
}

/// Simples Nacional tier selected by the average gross revenue. A single
/// flat rate applies to the whole amount; the tiers are not marginal.
fn simples_tier_rate(income: Decimal) -> Decimal {
    if income <= Decimal::new(15000_00, 2) {
        Decimal::new(6, 2)
    } else if income <= Decimal::new(20000_00, 2) {
        Decimal::new(7, 2)
    } else {
        Decimal::new(8, 2)
    }
}
