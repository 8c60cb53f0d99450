//! Statement text extraction: labeled-field scanning and record building.
//!
//! [`fields::scan`] finds the five labeled fields and yields raw tokens;
//! [`extract_statement`] parses those tokens into the twelve typed monthly
//! records. Scanning never fails — absence is represented and judged by the
//! builder, which fails the whole document the moment a required piece is
//! missing or malformed.

mod builder;
pub mod fields;

pub use builder::{ExtractError, extract_statement};
pub use fields::{FieldKind, RawFields};
