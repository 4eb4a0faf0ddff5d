pub mod column_schema;
pub mod import_validation;
