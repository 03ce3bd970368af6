pub mod averaging;

pub use averaging::{AverageError, AverageService, FetchPolicy};
