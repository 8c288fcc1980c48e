pub mod error;
pub mod future_value;
pub mod net_present_value;
pub mod present_value;
pub mod rates;
pub mod types;

pub use error::FinanceCalcError;
pub use types::*;

/// Standard result type for all finance-calc operations
pub type FinanceCalcResult<T> = Result<T, FinanceCalcError>;
