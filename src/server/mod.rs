//! HTTP server implementation
//!
//! The ingestion boundary of the collector: routes, the signature and
//! encryption envelope, and server lifecycle.

pub mod envelope;
pub mod routes;
pub mod server;
pub mod state;

pub use server::HttpServer;
pub use state::AppState;
