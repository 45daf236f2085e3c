//! rowsieve: drop rows from a delimited flow log by per-column criteria,
//! one interactive round at a time. Address columns match by CIDR network.

pub mod app;
pub mod cli;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use error::FilterError;
