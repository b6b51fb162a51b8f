//! Core engine for the kubecap capacity report
//!
//! This crate provides the pure computation behind the report:
//! - Quantity parsing (Kubernetes resource quantity strings)
//! - Per-pod resource aggregation
//! - Autoscaler scale-target indexing and CPU metric summaries
//! - Report row construction
//!
//! It deliberately has no cluster-client dependency: callers convert
//! API objects into the value types in [`model`] and feed them in.

pub mod aggregate;
pub mod autoscaler;
pub mod model;
pub mod quantity;
pub mod rows;

pub use aggregate::{aggregate_containers, PodTotals};
pub use autoscaler::{build_index, summarize_cpu, ScaleTargetIndex};
pub use model::*;
pub use quantity::{Quantity, QuantityError};
pub use rows::{build_rows, ReportRow};
