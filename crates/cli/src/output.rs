//! Output formatting: table and JSON rendering of report rows

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use report_lib::ReportRow;
use tabled::{settings::Style, Table, Tabled};

use crate::kube::Scope;

/// Output format for the report
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// One rendered table line; numeric totals are rounded to whole units
#[derive(Tabled)]
struct CapacityRow {
    #[tabled(rename = "NAMESPACE")]
    namespace: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "REPLICAS")]
    replicas: i32,
    #[tabled(rename = "CPU_REQ(m)")]
    cpu_request: String,
    #[tabled(rename = "CPU_LIMIT(m)")]
    cpu_limit: String,
    #[tabled(rename = "MEM_REQ(Mi)")]
    mem_request: String,
    #[tabled(rename = "MEM_LIMIT(Mi)")]
    mem_limit: String,
    #[tabled(rename = "HPA_MIN")]
    hpa_min: String,
    #[tabled(rename = "HPA_MAX")]
    hpa_max: String,
    #[tabled(rename = "HPA_TARGET")]
    hpa_target: String,
}

impl From<&ReportRow> for CapacityRow {
    fn from(row: &ReportRow) -> Self {
        CapacityRow {
            namespace: row.namespace.clone(),
            name: row.name.clone(),
            replicas: row.replicas,
            cpu_request: format!("{:.0}", row.cpu_request_milli),
            cpu_limit: format!("{:.0}", row.cpu_limit_milli),
            mem_request: format!("{:.0}", row.mem_request_mib),
            mem_limit: format!("{:.0}", row.mem_limit_mib),
            hpa_min: row.hpa_min.clone(),
            hpa_max: row.hpa_max.clone(),
            hpa_target: row.hpa_target.clone(),
        }
    }
}

/// Print the report in the requested format
pub fn print_report(scope: &Scope, rows: &[ReportRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(rows)?;
            println!("{json}");
        }
        OutputFormat::Table => {
            println!("Scope: {}\n", scope.label());

            if rows.is_empty() {
                println!("{}", "No deployments found".yellow());
                return Ok(());
            }

            let lines: Vec<CapacityRow> = rows.iter().map(CapacityRow::from).collect();
            let table = Table::new(lines).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
    Ok(())
}
