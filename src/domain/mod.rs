pub mod category;
pub mod number;
pub mod report;
pub mod window;

pub use category::{Category, UnknownCategory};
pub use number::Number;
pub use report::WindowReport;
pub use window::Window;
