use crate::error::ReportError;
use crate::parse::RttSample;
use crate::stats::RttStats;
use indexmap::IndexMap;
use std::io::Write;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

pub const REPORT_HEADER: &str = "RTT Stats per Node ID:";

/// Line counters for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub lines: u64,
    pub matched: u64,
}

/// Per-node RTT statistics, kept in first-seen order
#[derive(Debug, Default)]
pub struct RttReport {
    nodes: IndexMap<u64, RttStats>,
}

impl RttReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sample: RttSample) {
        self.nodes
            .entry(sample.node_id)
            .or_insert_with(RttStats::new)
            .add_sample(sample.rtt_ms);
    }

    /// Returns `true` if the line carried a sample
    pub fn ingest_line(&mut self, line: &str) -> bool {
        match RttSample::from_line(line) {
            Some(sample) => {
                self.record(sample);
                true
            }
            None => false,
        }
    }

    /// Consume every line from `reader`.
    ///
    /// A bare `\r` also ends a line, so carriage-return-only captures from
    /// serial consoles split the same way `\n` does.
    pub async fn scan<R>(&mut self, reader: R) -> std::io::Result<ScanSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut summary = ScanSummary::default();
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.strip_suffix('\r').unwrap_or(line.as_str());
            for segment in line.split('\r') {
                summary.lines += 1;
                if self.ingest_line(segment) {
                    summary.matched += 1;
                }
            }
        }

        Ok(summary)
    }

    #[allow(dead_code)]
    pub fn get(&self, node_id: u64) -> Option<&RttStats> {
        self.nodes.get(&node_id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (u64, &RttStats)> {
        self.nodes.iter().map(|(id, stats)| (*id, stats))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Header followed by one line per node
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", REPORT_HEADER)?;
        for (node_id, stats) in self.nodes() {
            writeln!(out, "{}", format_node_line(node_id, stats))?;
        }
        out.flush()
    }
}

pub fn format_node_line(node_id: u64, stats: &RttStats) -> String {
    format!(
        "Node ID {}: minRTT={} ms / aveRTT={:.2} ms / maxRTT={} ms",
        node_id,
        stats.min_ms(),
        stats.average_ms(),
        stats.max_ms()
    )
}

/// Scan the whole log, then write the report to `out`.
///
/// Nothing is written unless the file was opened and read to the end.
pub async fn process_log_file<W: Write>(path: &Path, out: &mut W) -> Result<RttReport, ReportError> {
    let file = File::open(path)
        .await
        .map_err(|e| ReportError::from_open(path, e))?;
    info!("Reading {}", path.display());

    let mut report = RttReport::new();
    let summary = report.scan(BufReader::new(file)).await?;
    info!(
        "Scanned {} lines, {} samples across {} nodes",
        summary.lines,
        summary.matched,
        report.len()
    );

    report.write_to(out)?;
    Ok(report)
}
