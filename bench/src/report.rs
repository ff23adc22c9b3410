//! CSV report of a benchmark run.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::config::BenchConfig;
use crate::runner::OperationReport;
use crate::stats::PERCENTILES;

const FIXED_COLUMNS: [&str; 11] = [
    "Timestamp",
    "Operation",
    "Total Requests",
    "Concurrency",
    "Total Time (s)",
    "Average Latency (ms)",
    "Fastest (ms)",
    "Slowest (ms)",
    "RPS",
    "Error Count",
    "Error Rate",
];

/// `benchmark_results_<timestamp>[_<tag>].csv`
pub fn file_name(now: &DateTime<Local>, tag: Option<&str>) -> String {
    let mut name = format!("benchmark_results_{}", now.format("%Y-%m-%d_%H-%M-%S"));
    if let Some(tag) = tag.filter(|t| !t.is_empty()) {
        name.push('_');
        name.push_str(tag);
    }
    name.push_str(".csv");
    name
}

/// Writes one row per operation under `config.output_dir`, creating the
/// directory if needed. Returns the path written.
pub fn write_csv(reports: &[OperationReport], config: &BenchConfig) -> std::io::Result<PathBuf> {
    let now = Local::now();
    fs::create_dir_all(&config.output_dir)?;
    let path = config
        .output_dir
        .join(file_name(&now, config.tag.as_deref()));

    write_to(&path, reports, &now)?;
    Ok(path)
}

fn write_to(path: &Path, reports: &[OperationReport], now: &DateTime<Local>) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    writeln!(out, "{}", header().join(","))?;
    let timestamp = now.to_rfc3339();
    for report in reports {
        writeln!(out, "{}", row(&timestamp, report).join(","))?;
    }

    out.flush()
}

pub fn header() -> Vec<String> {
    FIXED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(PERCENTILES.iter().map(|p| format!("P{p} (ms)")))
        .collect()
}

pub fn row(timestamp: &str, report: &OperationReport) -> Vec<String> {
    let s = &report.summary;
    let mut fields = vec![
        timestamp.to_string(),
        report.operation.to_string(),
        s.count.to_string(),
        report.concurrency.to_string(),
        format!("{:.2}", s.total.as_secs_f64()),
        format!("{:.2}", millis(s.average)),
        format!("{:.2}", millis(s.fastest)),
        format!("{:.2}", millis(s.slowest)),
        format!("{:.2}", s.rps),
        s.error_count.to_string(),
        format!("{:.2}", s.error_rate),
    ];
    fields.extend(s.percentiles.iter().map(|(_, d)| format!("{:.2}", millis(*d))));
    fields
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Sample, Summary};
    use chrono::TimeZone;
    use kvstore_client::Operation;

    fn report() -> OperationReport {
        let samples: Vec<Sample> = [2, 4]
            .into_iter()
            .map(|n| Sample {
                latency: Duration::from_millis(n),
                ok: true,
            })
            .collect();
        OperationReport {
            operation: Operation::Get,
            concurrency: 8,
            summary: Summary::from_samples(&samples, Duration::from_secs(1)),
        }
    }

    #[test]
    fn test_file_name() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            file_name(&now, None),
            "benchmark_results_2024-03-09_14-05-07.csv"
        );
        assert_eq!(
            file_name(&now, Some("sharded")),
            "benchmark_results_2024-03-09_14-05-07_sharded.csv"
        );
        assert_eq!(
            file_name(&now, Some("")),
            "benchmark_results_2024-03-09_14-05-07.csv"
        );
    }

    #[test]
    fn test_header_and_row_align() {
        let header = header();
        let row = row("ts", &report());
        assert_eq!(header.len(), row.len());
        assert_eq!(header[2], "Total Requests");
        assert_eq!(header.last().unwrap(), "P99 (ms)");

        assert_eq!(row[1], "get");
        assert_eq!(row[2], "2");
        assert_eq!(row[3], "8");
        assert_eq!(row[5], "3.00");
        assert_eq!(row[8], "2.00");
        assert_eq!(row[10], "0.00");
    }

    #[test]
    fn test_write_csv() {
        let dir = std::env::temp_dir().join(format!("kvstore-bench-{}", std::process::id()));
        let config = BenchConfig {
            tag: Some("unit".to_string()),
            output_dir: dir.clone(),
            ..BenchConfig::default()
        };

        let path = write_csv(&[report()], &config).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Timestamp,Operation,"));
        assert!(path.to_string_lossy().ends_with("_unit.csv"));

        fs::remove_dir_all(dir).unwrap();
    }
}
