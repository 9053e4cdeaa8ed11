pub mod add;
pub mod close;
pub mod edit;
pub mod import;
pub mod reading;
pub mod remove;
