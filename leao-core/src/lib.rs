//! Core logic for the Carnê-Leão statement analyzer.
//!
//! Turns the text of a monthly income-tax statement ("demonstrativo") into
//! twelve typed monthly records, derives per-month effective-rate metrics,
//! and simulates the cost of staying an individual taxpayer (PF) versus
//! incorporating (PJ). Presentation — file handling, charts, layout — is a
//! caller concern; this crate only computes.

pub mod calculations;
pub mod extract;
pub mod format;
pub mod models;

pub use extract::{ExtractError, extract_statement};
pub use models::{Month, MonthlyRecord, Statement, TaxpayerIdentity};
