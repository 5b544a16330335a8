//! Question bank, session state machine, and tier scoring for safequiz.
//!
//! This crate defines the data model, the option shuffler, the quiz session
//! controller and the tier classifier that the `safequiz` binary drives.

pub mod bank;
pub mod config;
pub mod driver;
pub mod error;
pub mod model;
pub mod parser;
pub mod session;
pub mod shuffle;
pub mod tier;
