//! Progressive monthly income-tax table ("tabela progressiva mensal").
//!
//! Each band carries an inclusive upper bound, a flat rate, and a rebate
//! ("parcela a deduzir"). The tax for a base is `base × rate − rebate` of
//! the single band the base falls in, floored at zero — the rebate encodes
//! the progressivity, so no marginal slicing is needed.
//!
//! The same table backs the individual-regime income tax, the pro-labore
//! withholding, and the refund estimate; there is exactly one implementation
//! of the lookup, parameterized only by the base.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use leao_core::calculations::ProgressiveTable;
//!
//! let table = ProgressiveTable::monthly_2025();
//!
//! // Inside the exemption band.
//! assert_eq!(table.tax_for(dec!(2000.00)), dec!(0.00));
//!
//! // Top band: 10000 × 27.5% − 896.00.
//! assert_eq!(table.tax_for(dec!(10000.00)), dec!(1854.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{non_negative, round_half_up};

/// Errors detected when building a [`ProgressiveTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressiveTableError {
    #[error("progressive table has no bands")]
    Empty,

    #[error("band {0} has a negative rate or rebate")]
    NegativeBand(usize),

    #[error("band ceilings must be strictly ascending")]
    UnorderedCeilings,

    #[error("exactly the final band must be open-ended")]
    MisplacedOpenBand,
}

/// One band of a progressive table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    /// Inclusive upper bound; `None` marks the open top band.
    pub ceiling: Option<Decimal>,

    /// Flat rate applied to the whole base.
    pub rate: Decimal,

    /// Fixed amount subtracted after applying the rate.
    pub rebate: Decimal,
}

/// An ordered set of bands with a guaranteed open top band, so lookups are
/// total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveTable {
    bands: Vec<TaxBand>,
}

impl ProgressiveTable {
    /// Builds a table after checking the band invariants: at least one band,
    /// non-negative rates and rebates, strictly ascending ceilings, and an
    /// open final band (only there).
    pub fn new(bands: Vec<TaxBand>) -> Result<Self, ProgressiveTableError> {
        if bands.is_empty() {
            return Err(ProgressiveTableError::Empty);
        }
        for (i, band) in bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rebate < Decimal::ZERO {
                return Err(ProgressiveTableError::NegativeBand(i));
            }
            let is_last = i == bands.len() - 1;
            match band.ceiling {
                None if !is_last => return Err(ProgressiveTableError::MisplacedOpenBand),
                Some(_) if is_last => return Err(ProgressiveTableError::MisplacedOpenBand),
                Some(ceiling) => {
                    if let Some(Some(previous)) = i.checked_sub(1).map(|p| bands[p].ceiling) {
                        if ceiling <= previous {
                            return Err(ProgressiveTableError::UnorderedCeilings);
                        }
                    }
                }
                None => {}
            }
        }
        Ok(Self { bands })
    }

    /// The monthly IRPF table in force since May 2025.
    pub fn monthly_2025() -> Self {
        let band = |ceiling: Option<Decimal>, rate: Decimal, rebate: Decimal| TaxBand {
            ceiling,
            rate,
            rebate,
        };
        Self {
            bands: vec![
                band(Some(Decimal::new(2259_20, 2)), Decimal::ZERO, Decimal::ZERO),
                band(
                    Some(Decimal::new(2826_65, 2)),
                    Decimal::new(75, 3),
                    Decimal::new(169_44, 2),
                ),
                band(
                    Some(Decimal::new(3751_05, 2)),
                    Decimal::new(15, 2),
                    Decimal::new(381_44, 2),
                ),
                band(
                    Some(Decimal::new(4664_68, 2)),
                    Decimal::new(225, 3),
                    Decimal::new(662_77, 2),
                ),
                band(None, Decimal::new(275, 3), Decimal::new(896_00, 2)),
            ],
        }
    }

    pub fn bands(&self) -> &[TaxBand] {
        &self.bands
    }

    /// Tax due on `base`: the first band whose ceiling is at or above the
    /// base applies; `max(base × rate − rebate, 0)`, rounded to centavos.
    /// Non-positive bases owe nothing.
    pub fn tax_for(
        &self,
        base: Decimal,
    ) -> Decimal {
        if base <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        for band in &self.bands {
            let applies = match band.ceiling {
                Some(ceiling) => base <= ceiling,
                None => true,
            };
            if applies {
                return non_negative(round_half_up(base * band.rate - band.rebate));
            }
        }
        // Construction guarantees an open final band.
        Decimal::ZERO
    }
}
