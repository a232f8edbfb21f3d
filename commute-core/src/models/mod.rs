mod calculation_result;
mod cost_input;
mod input_field;
mod input_set;
mod view;

pub use calculation_result::CalculationResult;
pub use cost_input::CostInput;
pub use input_field::{InputField, UnknownFieldError};
pub use input_set::InputSet;
pub use view::{ChartStyle, UnknownToggleError, ViewMode};
