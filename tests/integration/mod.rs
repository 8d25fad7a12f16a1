//! Integration tests for metrics-relay
//!
//! These exercise real backends and the real HTTP stack without mocking the
//! code under test.

pub mod config_tests;
pub mod database_tests;
pub mod http_tests;
pub mod storage_tests;
