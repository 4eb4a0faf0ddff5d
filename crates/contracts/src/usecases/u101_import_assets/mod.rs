pub mod request;
pub mod response;

pub use request::FileMeta;
pub use response::ImportReport;

use crate::usecases::common::UseCaseMetadata;

pub struct ImportAssets;

impl UseCaseMetadata for ImportAssets {
    fn usecase_index() -> &'static str {
        "u101"
    }

    fn usecase_name() -> &'static str {
        "import_assets"
    }

    fn display_name() -> &'static str {
        "Asset spreadsheet import"
    }

    fn description() -> &'static str {
        "Validate and sanitize an uploaded asset spreadsheet (xlsx/xls/csv)"
    }
}
