pub mod common;
pub mod u101_import_assets;
