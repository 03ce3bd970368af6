pub mod generator;

pub use generator::MockNumberSource;
