pub mod calculations;
pub mod formatting;
pub mod models;
pub mod session;
pub mod utils;
pub mod validation;

pub use calculations::{CostEngine, CostEngineError};
pub use models::*;
pub use session::{CALCULATION_FAILED_NOTICE, CalculateError, CalculatorSession, InputRejected};
pub use validation::{FieldError, FieldErrors};
