//! Cluster access: client construction, list calls and the adapter from
//! API objects to the core value types
//!
//! The adapter is the only place that touches `k8s-openapi` types. It
//! parses every quantity string up front and fails with an error naming
//! the object and field, so the core never sees malformed input.

use anyhow::{Context, Result};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::autoscaling::v2 as autoscaling;
use k8s_openapi::api::core::v1::Container;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity as ApiQuantity;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};

use report_lib::{
    Autoscaler, ContainerResources, MetricSpec, MetricStatus, MetricTarget, Quantity,
    ResourceMetricSpec, ResourceMetricStatus, ScaleTargetRef, Workload,
};

/// What part of the cluster a run looks at
#[derive(Debug, Clone)]
pub struct Scope {
    pub all_namespaces: bool,
    /// Resolved namespace; `None` only when `all_namespaces` is set
    pub namespace: Option<String>,
    pub selector: Option<String>,
}

impl Scope {
    /// Human-readable scope description for the table header
    pub fn label(&self) -> String {
        let base = if self.all_namespaces {
            "all namespaces".to_string()
        } else {
            format!("namespace {:?}", self.namespace.as_deref().unwrap_or("default"))
        };
        match &self.selector {
            Some(sel) => format!("{base} (selector: {sel})"),
            None => base,
        }
    }

    fn list_params(&self) -> ListParams {
        let mut params = ListParams::default();
        if let Some(sel) = &self.selector {
            params = params.labels(sel);
        }
        params
    }
}

/// Build a client from an explicit kubeconfig path, or fall back to the
/// standard resolution (in-cluster config, then KUBECONFIG, then
/// ~/.kube/config)
pub async fn make_client(kubeconfig: Option<&str>) -> Result<Client> {
    let config = match kubeconfig {
        Some(path) => {
            let kc = Kubeconfig::read_from(path)
                .with_context(|| format!("cannot read kubeconfig at {path}"))?;
            Config::from_custom_kubeconfig(kc, &KubeConfigOptions::default())
                .await
                .context("cannot build config from kubeconfig")?
        }
        None => Config::infer()
            .await
            .context("cannot infer Kubernetes configuration")?,
    };
    Client::try_from(config).context("cannot build Kubernetes client")
}

/// List Deployments in scope and convert them to core workloads
pub async fn list_workloads(client: Client, scope: &Scope) -> Result<Vec<Workload>> {
    let api: Api<Deployment> = match &scope.namespace {
        Some(ns) if !scope.all_namespaces => Api::namespaced(client, ns),
        _ => Api::all(client),
    };
    let list = api
        .list(&scope.list_params())
        .await
        .context("failed to list deployments")?;
    list.items.into_iter().map(adapt_workload).collect()
}

/// List HorizontalPodAutoscalers in scope and convert them to core
/// autoscalers
pub async fn list_autoscalers(client: Client, scope: &Scope) -> Result<Vec<Autoscaler>> {
    let api: Api<autoscaling::HorizontalPodAutoscaler> = match &scope.namespace {
        Some(ns) if !scope.all_namespaces => Api::namespaced(client, ns),
        _ => Api::all(client),
    };
    let list = api
        .list(&scope.list_params())
        .await
        .context("failed to list horizontal pod autoscalers")?;
    list.items.into_iter().map(adapt_autoscaler).collect()
}

fn adapt_workload(deployment: Deployment) -> Result<Workload> {
    let namespace = deployment.metadata.namespace.unwrap_or_default();
    let name = deployment.metadata.name.unwrap_or_default();
    let spec = deployment.spec.unwrap_or_default();

    let containers = spec
        .template
        .spec
        .map(|pod| pod.containers)
        .unwrap_or_default()
        .into_iter()
        .map(|c| adapt_container(c, &namespace, &name))
        .collect::<Result<Vec<_>>>()?;

    Ok(Workload {
        namespace,
        name,
        replicas: spec.replicas,
        containers,
    })
}

fn adapt_container(container: Container, namespace: &str, name: &str) -> Result<ContainerResources> {
    let resources = container.resources.unwrap_or_default();
    let requests = resources.requests.unwrap_or_default();
    let limits = resources.limits.unwrap_or_default();

    let parse = |qty: Option<&ApiQuantity>, field: &str| -> Result<Option<Quantity>> {
        qty.map(|q| {
            q.0.parse::<Quantity>().with_context(|| {
                format!(
                    "invalid {field} {:?} in container {:?} of deployment {namespace}/{name}",
                    q.0, container.name
                )
            })
        })
        .transpose()
    };

    Ok(ContainerResources {
        cpu_request: parse(requests.get("cpu"), "cpu request")?,
        cpu_limit: parse(limits.get("cpu"), "cpu limit")?,
        memory_request: parse(requests.get("memory"), "memory request")?,
        memory_limit: parse(limits.get("memory"), "memory limit")?,
    })
}

fn adapt_autoscaler(hpa: autoscaling::HorizontalPodAutoscaler) -> Result<Autoscaler> {
    let namespace = hpa.metadata.namespace.unwrap_or_default();
    let name = hpa.metadata.name.unwrap_or_default();
    let spec = hpa.spec.unwrap_or_default();
    let status = hpa.status.unwrap_or_default();

    let metrics = spec
        .metrics
        .unwrap_or_default()
        .into_iter()
        .map(|m| adapt_metric_spec(m, &namespace, &name))
        .collect::<Result<Vec<_>>>()?;

    let current_metrics = status
        .current_metrics
        .unwrap_or_default()
        .into_iter()
        .map(|m| adapt_metric_status(m, &namespace, &name))
        .collect::<Result<Vec<_>>>()?;

    Ok(Autoscaler {
        namespace,
        name,
        scale_target: ScaleTargetRef {
            kind: spec.scale_target_ref.kind,
            name: spec.scale_target_ref.name,
        },
        min_replicas: spec.min_replicas,
        max_replicas: spec.max_replicas,
        metrics,
        current_metrics,
    })
}

fn adapt_metric_spec(
    metric: autoscaling::MetricSpec,
    namespace: &str,
    name: &str,
) -> Result<MetricSpec> {
    let resource = match (metric.type_.as_str(), metric.resource) {
        ("Resource", Some(r)) => {
            let parse = |qty: Option<ApiQuantity>, field: &str| -> Result<Option<Quantity>> {
                parse_metric_quantity(qty, field, namespace, name)
            };
            let target = match r.target.type_.as_str() {
                "Utilization" => MetricTarget::Utilization(r.target.average_utilization),
                "AverageValue" => {
                    MetricTarget::AverageValue(parse(r.target.average_value, "target average value")?)
                }
                "Value" => MetricTarget::Value(parse(r.target.value, "target value")?),
                _ => MetricTarget::Unknown,
            };
            Some(ResourceMetricSpec {
                name: r.name,
                target,
            })
        }
        _ => None,
    };
    Ok(MetricSpec { resource })
}

fn adapt_metric_status(
    metric: autoscaling::MetricStatus,
    namespace: &str,
    name: &str,
) -> Result<MetricStatus> {
    let resource = match (metric.type_.as_str(), metric.resource) {
        ("Resource", Some(r)) => Some(ResourceMetricStatus {
            name: r.name,
            average_utilization: r.current.average_utilization,
            average_value: parse_metric_quantity(
                r.current.average_value,
                "current average value",
                namespace,
                name,
            )?,
            value: parse_metric_quantity(r.current.value, "current value", namespace, name)?,
        }),
        _ => None,
    };
    Ok(MetricStatus { resource })
}

fn parse_metric_quantity(
    qty: Option<ApiQuantity>,
    field: &str,
    namespace: &str,
    name: &str,
) -> Result<Option<Quantity>> {
    qty.map(|q| {
        q.0.parse::<Quantity>().with_context(|| {
            format!("invalid {field} {:?} in autoscaler {namespace}/{name}", q.0)
        })
    })
    .transpose()
}
