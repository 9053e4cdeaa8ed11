pub mod csv_import;
pub mod report;
pub mod store;
