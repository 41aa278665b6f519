//! Typed client for the Marquee metrics backend.
//!
//! The backend is a pre-existing HTTP service; this crate owns the wire
//! contract (filter body, metric rows, error envelope) and the transport
//! plumbing, so the UI crates never touch raw JSON.

pub mod client;
pub mod error;
pub mod filters;
pub mod series;

pub use client::MetricsClient;
pub use error::RefreshError;
pub use filters::{FilterCriteria, Granularity};
pub use series::{
    CancellationPoint, MetricsResponse, OccupancyPoint, ResponseKind, RevenuePoint,
    UsedTicketsPoint,
};
