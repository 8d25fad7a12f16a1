//! Reporting agent
//!
//! Two independent loops share a [`MetricBuffer`]: the poll loop samples
//! runtime metrics into it, the report loop drains it and hands each batch
//! to a bounded pool of transmission workers.

pub mod buffer;
pub mod collector;
pub mod dispatcher;
pub mod runtime;
pub mod transport;

pub use buffer::MetricBuffer;
pub use collector::{Collector, Sampler, SystemSampler};
pub use dispatcher::Dispatcher;
pub use runtime::{Agent, shutdown_signal};
pub use transport::{HttpTransport, Report, Transport};
