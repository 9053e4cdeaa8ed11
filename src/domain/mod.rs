pub mod config;
pub mod device;
pub mod fleet;
pub mod history;
pub mod totals;
pub mod workspace;
