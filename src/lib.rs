//! Monthly printer/copier meter tracking with quota ("franquia") billing.
//!
//! The crate keeps a fleet of meter-tracked devices, imports counter readings
//! from CSV exports, derives the billing totals for the open period and, on an
//! explicit close, freezes everything into a history ledger and rolls the
//! counters forward. State is persisted wholesale to a JSON store after every
//! mutating command.

pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod worker;
