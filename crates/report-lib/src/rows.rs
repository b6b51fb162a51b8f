//! Report row construction

use serde::Serialize;

use crate::aggregate::aggregate_containers;
use crate::autoscaler::{summarize_cpu, ScaleTargetIndex};
use crate::model::Workload;

/// One line of the capacity report
///
/// Built once per Deployment per run and never mutated afterwards. The
/// HPA columns are strings so the "no autoscaler" dash and the "min
/// unset" blank render uniformly in both output formats.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub namespace: String,
    pub name: String,
    pub replicas: i32,
    pub cpu_request_milli: f64,
    pub cpu_limit_milli: f64,
    pub mem_request_mib: f64,
    pub mem_limit_mib: f64,
    pub hpa_min: String,
    pub hpa_max: String,
    pub hpa_target: String,
}

/// Build report rows for the given workloads, preserving input order
///
/// Replicas default to 1 when the Deployment does not declare them.
/// Workloads without an autoscaler get "-" in all three HPA columns.
pub fn build_rows(workloads: &[Workload], index: &ScaleTargetIndex) -> Vec<ReportRow> {
    workloads
        .iter()
        .map(|w| {
            let replicas = w.replicas.unwrap_or(1);
            let totals = aggregate_containers(&w.containers).scaled(replicas);

            let mut row = ReportRow {
                namespace: w.namespace.clone(),
                name: w.name.clone(),
                replicas,
                cpu_request_milli: totals.cpu_request_milli,
                cpu_limit_milli: totals.cpu_limit_milli,
                mem_request_mib: totals.mem_request_mib,
                mem_limit_mib: totals.mem_limit_mib,
                hpa_min: "-".to_string(),
                hpa_max: "-".to_string(),
                hpa_target: "-".to_string(),
            };

            if let Some(hpa) = index.get(&(w.namespace.clone(), w.name.clone())) {
                row.hpa_min = hpa
                    .min_replicas
                    .map(|m| m.to_string())
                    .unwrap_or_default();
                row.hpa_max = hpa.max_replicas.to_string();
                row.hpa_target = summarize_cpu(hpa);
            }

            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoscaler::build_index;
    use crate::model::{Autoscaler, ContainerResources, ScaleTargetRef};

    fn workload(namespace: &str, name: &str, replicas: Option<i32>) -> Workload {
        Workload {
            namespace: namespace.to_string(),
            name: name.to_string(),
            replicas,
            containers: vec![ContainerResources {
                cpu_request: Some("100m".parse().unwrap()),
                cpu_limit: Some("200m".parse().unwrap()),
                memory_request: Some("64Mi".parse().unwrap()),
                memory_limit: Some("128Mi".parse().unwrap()),
            }],
        }
    }

    #[test]
    fn rows_without_autoscaler_use_dashes() {
        let rows = build_rows(&[workload("ns", "api", Some(2))], &ScaleTargetIndex::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hpa_min, "-");
        assert_eq!(rows[0].hpa_max, "-");
        assert_eq!(rows[0].hpa_target, "-");
        assert_eq!(rows[0].cpu_request_milli, 200.0);
    }

    #[test]
    fn replicas_default_to_one() {
        let rows = build_rows(&[workload("ns", "api", None)], &ScaleTargetIndex::new());
        assert_eq!(rows[0].replicas, 1);
        assert_eq!(rows[0].mem_request_mib, 64.0);
    }

    #[test]
    fn unset_min_replicas_renders_blank() {
        let index = build_index(vec![Autoscaler {
            namespace: "ns".to_string(),
            name: "api-hpa".to_string(),
            scale_target: ScaleTargetRef {
                kind: "Deployment".to_string(),
                name: "api".to_string(),
            },
            min_replicas: None,
            max_replicas: 5,
            metrics: Vec::new(),
            current_metrics: Vec::new(),
        }]);

        let rows = build_rows(&[workload("ns", "api", Some(1))], &index);
        assert_eq!(rows[0].hpa_min, "");
        assert_eq!(rows[0].hpa_max, "5");
        assert_eq!(rows[0].hpa_target, "-");
    }

    #[test]
    fn rows_preserve_input_order() {
        let rows = build_rows(
            &[
                workload("ns", "zeta", Some(1)),
                workload("ns", "alpha", Some(1)),
            ],
            &ScaleTargetIndex::new(),
        );
        assert_eq!(rows[0].name, "zeta");
        assert_eq!(rows[1].name, "alpha");
    }
}
