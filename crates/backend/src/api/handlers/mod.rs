pub mod a001_asset_import;
