pub mod config_service;
pub mod paths;
pub mod report_writer;

pub use config_service::ConfigService;
pub use paths::VerdictPaths;
pub use report_writer::ReportWriter;
