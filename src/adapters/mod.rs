pub mod mock;
pub mod store;
pub mod upstream;
