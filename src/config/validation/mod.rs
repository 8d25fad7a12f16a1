//! Configuration validation
//!
//! - `trait_def`: the `Validate` trait
//! - `config_validators`: server, agent and logging validators
//! - `storage_validators`: storage and database validators
//! - `tests`: test suite for all validators

mod config_validators;
mod storage_validators;
mod trait_def;

pub use trait_def::Validate;
