//! Core domain types shared by the agent and the collector

pub mod models;
