//! Source-agnostic value types for the report engine
//!
//! These are plain structs deliberately decoupled from any cluster-client
//! library. The CLI owns the adapter that converts API objects into them,
//! which keeps this crate unit-testable with literal fixtures.

use crate::quantity::Quantity;

/// Declared resources of a single container in a pod template
///
/// Any of the four quantities may be absent; absence contributes zero to
/// the aggregated totals.
#[derive(Debug, Clone, Default)]
pub struct ContainerResources {
    pub cpu_request: Option<Quantity>,
    pub cpu_limit: Option<Quantity>,
    pub memory_request: Option<Quantity>,
    pub memory_limit: Option<Quantity>,
}

/// A Deployment as the report sees it: identity, declared replicas and
/// the pod template's container resources
#[derive(Debug, Clone)]
pub struct Workload {
    pub namespace: String,
    pub name: String,
    /// Declared replica count; `None` means the API default of 1
    pub replicas: Option<i32>,
    pub containers: Vec<ContainerResources>,
}

/// The object an autoscaler scales, identified by kind and name
///
/// Autoscalers cannot target across namespaces, so the namespace is the
/// autoscaler's own and is not part of the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleTargetRef {
    pub kind: String,
    pub name: String,
}

/// The declared target of a CPU metric, in one of the three mutually
/// exclusive representations the autoscaling API allows
///
/// The inner value mirrors the API's optional pointer: a target can name
/// a representation without carrying a value, in which case it resolves
/// to nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricTarget {
    /// Integer percentage of requested CPU
    Utilization(Option<i32>),
    /// Absolute quantity averaged per pod (e.g. "250m")
    AverageValue(Option<Quantity>),
    /// Absolute quantity, metric-source specific
    Value(Option<Quantity>),
    /// A target kind this report does not understand
    Unknown,
}

/// One entry of an autoscaler's spec metric list
///
/// `resource` is `None` for non-Resource metric types (Pods, Object,
/// External), which the CPU summary skips over.
#[derive(Debug, Clone)]
pub struct MetricSpec {
    pub resource: Option<ResourceMetricSpec>,
}

/// A Resource-type spec metric: which resource, and the declared target
#[derive(Debug, Clone)]
pub struct ResourceMetricSpec {
    pub name: String,
    pub target: MetricTarget,
}

/// One entry of an autoscaler's status current-metric list
#[derive(Debug, Clone)]
pub struct MetricStatus {
    pub resource: Option<ResourceMetricStatus>,
}

/// A Resource-type status metric
///
/// Unlike the spec target, the status carries three independent optional
/// fields; which ones the controller populates depends on the configured
/// target kind and on whether metrics have been observed yet.
#[derive(Debug, Clone)]
pub struct ResourceMetricStatus {
    pub name: String,
    pub average_utilization: Option<i32>,
    pub average_value: Option<Quantity>,
    pub value: Option<Quantity>,
}

/// A HorizontalPodAutoscaler as the report sees it
#[derive(Debug, Clone)]
pub struct Autoscaler {
    pub namespace: String,
    pub name: String,
    pub scale_target: ScaleTargetRef,
    pub min_replicas: Option<i32>,
    pub max_replicas: i32,
    pub metrics: Vec<MetricSpec>,
    pub current_metrics: Vec<MetricStatus>,
}
