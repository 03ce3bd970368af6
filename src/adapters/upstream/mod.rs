pub mod http;

pub use http::{HttpNumberSource, SourceUrls};
