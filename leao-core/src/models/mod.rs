mod month;
mod monthly_record;
mod statement;

pub use month::Month;
pub use monthly_record::MonthlyRecord;
pub use statement::{Statement, TaxpayerIdentity};
