//! koala-core: value types and normalizers for bank-statement expenses

pub mod date;
pub mod error;
pub mod expense;
pub mod monetary;
pub mod transform;

pub use date::{MonthTable, normalize_date};
pub use error::{ExpenseError, ParseError};
pub use expense::{Expense, ExpenseType};
pub use monetary::{Installment, MonetaryValue};
pub use transform::{RawValue, to_amount, to_date};
