//! Autoscaler correlation: scale-target index and CPU metric summary

use std::collections::HashMap;

use crate::model::{Autoscaler, MetricTarget};

/// Resource metric name the summary cares about
const CPU: &str = "cpu";

/// Scale-target kind that maps onto a report row
const DEPLOYMENT_KIND: &str = "Deployment";

/// Lookup from (namespace, deployment name) to the autoscaler targeting it
pub type ScaleTargetIndex = HashMap<(String, String), Autoscaler>;

/// Index autoscalers by the Deployment they target
///
/// Only targets whose kind is exactly "Deployment" are indexed; anything
/// else (StatefulSet, custom resources) is skipped without comment. The
/// key namespace is the autoscaler's own, since targets are always
/// namespace-local. If several autoscalers target one Deployment, a
/// misconfiguration the API does not always prevent, the last one in
/// input order wins.
pub fn build_index(autoscalers: Vec<Autoscaler>) -> ScaleTargetIndex {
    let mut index = ScaleTargetIndex::new();
    for hpa in autoscalers {
        if hpa.scale_target.kind == DEPLOYMENT_KIND {
            let key = (hpa.namespace.clone(), hpa.scale_target.name.clone());
            index.insert(key, hpa);
        }
    }
    index
}

/// Render an autoscaler's CPU metric state as "cpu: {current}/{target}"
///
/// Target comes from the first CPU resource entry in the spec metrics,
/// current from the first CPU resource entry in the status. Either side
/// may be unresolved and renders as "?"; if both are, the whole summary
/// collapses to "-". Current is printed first by display convention.
pub fn summarize_cpu(hpa: &Autoscaler) -> String {
    let target = hpa
        .metrics
        .iter()
        .filter_map(|m| m.resource.as_ref())
        .find(|r| r.name == CPU)
        .and_then(|r| match &r.target {
            MetricTarget::Utilization(pct) => pct.map(|p| format!("{p}%")),
            MetricTarget::AverageValue(qty) => qty.as_ref().map(|q| q.to_string()),
            MetricTarget::Value(qty) => qty.as_ref().map(|q| q.to_string()),
            MetricTarget::Unknown => None,
        });

    let current = hpa
        .current_metrics
        .iter()
        .filter_map(|m| m.resource.as_ref())
        .find(|r| r.name == CPU)
        .and_then(|r| {
            if let Some(pct) = r.average_utilization {
                Some(format!("{pct}%"))
            } else if let Some(q) = &r.average_value {
                Some(q.to_string())
            } else {
                r.value.as_ref().map(|q| q.to_string())
            }
        });

    match (current, target) {
        (None, None) => "-".to_string(),
        (current, target) => format!(
            "cpu: {}/{}",
            current.as_deref().unwrap_or("?"),
            target.as_deref().unwrap_or("?")
        ),
    }
}
