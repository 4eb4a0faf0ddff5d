pub mod admission;
pub mod decoder;
pub mod executor;
pub mod rows;
pub mod sanitizer;
pub mod schema;
pub mod structure;

pub use executor::ImportExecutor;
