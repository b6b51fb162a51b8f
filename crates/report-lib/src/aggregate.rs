//! Per-pod resource aggregation
//!
//! Sums declared CPU and memory requests/limits across the containers of
//! a single pod template. Replica scaling is the caller's job, via
//! [`PodTotals::scaled`], so the aggregation stays testable against one
//! pod template in isolation.

use crate::model::ContainerResources;

/// Aggregated declared resources for one pod
///
/// CPU in millicores, memory in mebibytes. These are declared-capacity
/// numbers from the pod template, not live usage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PodTotals {
    pub cpu_request_milli: f64,
    pub cpu_limit_milli: f64,
    pub mem_request_mib: f64,
    pub mem_limit_mib: f64,
}

impl PodTotals {
    /// Multiply all four totals by the replica count
    pub fn scaled(self, replicas: i32) -> PodTotals {
        let r = f64::from(replicas);
        PodTotals {
            cpu_request_milli: self.cpu_request_milli * r,
            cpu_limit_milli: self.cpu_limit_milli * r,
            mem_request_mib: self.mem_request_mib * r,
            mem_limit_mib: self.mem_limit_mib * r,
        }
    }
}

/// Sum resource requests and limits over all containers of a pod template
///
/// Absent quantities contribute zero; values are taken as declared, with
/// no range validation.
pub fn aggregate_containers(containers: &[ContainerResources]) -> PodTotals {
    let mut totals = PodTotals::default();

    for c in containers {
        if let Some(q) = &c.cpu_request {
            totals.cpu_request_milli += q.milli();
        }
        if let Some(q) = &c.cpu_limit {
            totals.cpu_limit_milli += q.milli();
        }
        if let Some(q) = &c.memory_request {
            totals.mem_request_mib += q.mebibytes();
        }
        if let Some(q) = &c.memory_limit {
            totals.mem_limit_mib += q.mebibytes();
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::Quantity;

    fn qty(s: &str) -> Option<Quantity> {
        Some(s.parse().unwrap())
    }

    fn container(cpu_req: &str, cpu_lim: &str, mem_req: &str, mem_lim: &str) -> ContainerResources {
        ContainerResources {
            cpu_request: qty(cpu_req),
            cpu_limit: qty(cpu_lim),
            memory_request: qty(mem_req),
            memory_limit: qty(mem_lim),
        }
    }

    #[test]
    fn empty_container_list_is_all_zero() {
        assert_eq!(aggregate_containers(&[]), PodTotals::default());
    }

    #[test]
    fn converts_units_exactly() {
        let totals = aggregate_containers(&[ContainerResources {
            cpu_request: qty("500m"),
            memory_request: qty("1Gi"),
            ..Default::default()
        }]);
        assert_eq!(totals.cpu_request_milli, 500.0);
        assert_eq!(totals.mem_request_mib, 1024.0);
        assert_eq!(totals.cpu_limit_milli, 0.0);
        assert_eq!(totals.mem_limit_mib, 0.0);
    }

    #[test]
    fn aggregation_is_additive() {
        let a = vec![container("100m", "200m", "64Mi", "128Mi")];
        let b = vec![
            container("250m", "1", "256Mi", "1Gi"),
            container("50m", "100m", "32Mi", "64Mi"),
        ];

        let combined: Vec<_> = a.iter().chain(b.iter()).cloned().collect();
        let whole = aggregate_containers(&combined);
        let (ta, tb) = (aggregate_containers(&a), aggregate_containers(&b));

        assert_eq!(whole.cpu_request_milli, ta.cpu_request_milli + tb.cpu_request_milli);
        assert_eq!(whole.cpu_limit_milli, ta.cpu_limit_milli + tb.cpu_limit_milli);
        assert_eq!(whole.mem_request_mib, ta.mem_request_mib + tb.mem_request_mib);
        assert_eq!(whole.mem_limit_mib, ta.mem_limit_mib + tb.mem_limit_mib);
    }

    #[test]
    fn absent_quantities_contribute_zero() {
        let totals = aggregate_containers(&[
            ContainerResources::default(),
            container("100m", "200m", "64Mi", "128Mi"),
        ]);
        assert_eq!(totals.cpu_request_milli, 100.0);
        assert_eq!(totals.mem_limit_mib, 128.0);
    }

    #[test]
    fn scaling_multiplies_all_fields() {
        let totals = aggregate_containers(&[container("100m", "200m", "64Mi", "128Mi")]).scaled(3);
        assert_eq!(totals.cpu_request_milli, 300.0);
        assert_eq!(totals.cpu_limit_milli, 600.0);
        assert_eq!(totals.mem_request_mib, 192.0);
        assert_eq!(totals.mem_limit_mib, 384.0);
    }
}
