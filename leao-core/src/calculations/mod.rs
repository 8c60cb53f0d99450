//! Tax calculations: the progressive monthly table, the PF × PJ regime
//! comparison, and selection summary metrics.

pub mod common;
pub mod progressive;
pub mod regimes;
pub mod summary;

pub use progressive::{ProgressiveTable, ProgressiveTableError, TaxBand};
pub use regimes::{
    IndividualVariant, PersonalExpenses, RegimeComparison, RegimeConfig, RegimeSimulation,
    RegimeSimulationError, SelectionAverages,
};
pub use summary::SelectionSummary;
