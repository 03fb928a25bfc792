use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::collections::FxIndexMap;
use super::{Aggregate, Algorithm, AlgorithmSummary, RunOutcome};


const NARROW_RULE: usize = 90;
const WIDE_RULE: usize = 130;

/// Console-plus-logfile reporting context.
///
/// Handed explicitly to the benchmark run instead of living in
/// process-global state, so concurrent suites cannot trample each other's
/// output destinations.
pub struct Reporter {
    log: Option<BufWriter<File>>,
}

impl Reporter {
    /// Report to the console only
    pub fn stdout_only() -> Self {
        Self { log: None }
    }

    /// Report to the console and mirror every line into a log file
    pub fn with_log(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            log: Some(BufWriter::new(File::create(path)?)),
        })
    }

    /// Emit one line to every destination. Log writes are best effort.
    pub fn line(&mut self, text: &str) {
        println!("{text}");
        if let Some(log) = &mut self.log {
            let _ = writeln!(log, "{text}");
        }
    }

    pub fn flush(&mut self) {
        if let Some(log) = &mut self.log {
            let _ = log.flush();
        }
    }

    fn rule(&mut self, mark: char, width: usize) {
        self.line(&mark.to_string().repeat(width));
    }

    pub fn map_header(&mut self, map_name: &str) {
        self.line("");
        self.rule('=', NARROW_RULE);
        self.line(&format!("MAP: {map_name}"));
        self.rule('=', NARROW_RULE);
    }

    /// Round | Time | Cost | Status table for one algorithm
    pub fn rounds_table(&mut self, algorithm: Algorithm, summary: &AlgorithmSummary) {
        self.line("");
        self.line(&format!("[{}] Per-Round Results", algorithm.name()));
        self.rule('-', NARROW_RULE);
        self.line(&format!(
            "{:<10} | {:<12} | {:<12} | {:<20}",
            "Round", "Time (s)", "Cost", "Status"
        ));
        self.rule('-', NARROW_RULE);

        for (index, outcome) in summary.rounds.iter().enumerate() {
            let row = match outcome {
                RunOutcome::Finished { elapsed, cost } => format!(
                    "{:<10} | {:<12} | {:<12} | {:<20}",
                    index + 1,
                    fmt_seconds(*elapsed),
                    fmt_cost(*cost),
                    "ok"
                ),
                RunOutcome::TimedOut => format!(
                    "{:<10} | {:<12} | {:<12} | {:<20}",
                    index + 1,
                    "TIME LIMIT",
                    "TIME LIMIT",
                    "abandoned"
                ),
                RunOutcome::Failed(message) => format!(
                    "{:<10} | {:<12} | {:<12} | failed: {}",
                    index + 1,
                    "-",
                    "-",
                    message
                ),
            };
            self.line(&row);
        }

        self.rule('-', NARROW_RULE);
    }

    pub fn mean_line(&mut self, algorithm: Algorithm, summary: &AlgorithmSummary) {
        let aggregate = summary.aggregate();
        self.line(&format!(
            "MEAN {}: time = {} s | cost = {}",
            algorithm.name(),
            fmt_mean_time(&aggregate),
            fmt_mean_cost(&aggregate)
        ));
    }

    /// Per-map table of means across all algorithms
    pub fn map_summary(
        &mut self,
        map_name: &str,
        rounds: usize,
        results: &FxIndexMap<Algorithm, AlgorithmSummary>,
    ) {
        self.line("");
        self.line(&format!("[Map Summary] {map_name} - means over {rounds} rounds"));
        self.rule('-', NARROW_RULE);
        self.line(&format!(
            "{:<20} | {:<18} | {:<15}",
            "Algorithm", "Mean Time (s)", "Mean Cost"
        ));
        self.rule('-', NARROW_RULE);

        for (algorithm, summary) in results {
            let aggregate = summary.aggregate();
            self.line(&format!(
                "{:<20} | {:<18} | {:<15}",
                algorithm.name(),
                fmt_mean_time(&aggregate),
                fmt_mean_cost(&aggregate)
            ));
        }

        self.rule('-', NARROW_RULE);
    }

    /// Final cross-map table, one row per map
    pub fn comparison_table(&mut self, rows: &[String]) {
        self.line("");
        self.rule('=', WIDE_RULE);
        self.line("COMPARISON - Shortest Path Engines (means per map)");
        self.rule('=', WIDE_RULE);

        let mut header = format!("{:<20}", "Map");
        for algorithm in Algorithm::ALL {
            header.push_str(&format!(
                " | {:<22} | {:<24}",
                format!("{} mean t(s)", algorithm.name()),
                format!("{} mean cost", algorithm.name())
            ));
        }
        self.line(&header);
        self.rule('-', WIDE_RULE);

        for row in rows {
            self.line(row);
        }

        self.rule('=', WIDE_RULE);
    }
}


/// One comparison-table row for a map
pub(crate) fn comparison_row(
    map_name: &str,
    results: &FxIndexMap<Algorithm, AlgorithmSummary>,
) -> String {
    let mut row = format!("{map_name:<20}");
    for algorithm in Algorithm::ALL {
        let aggregate = results
            .get(&algorithm)
            .map(AlgorithmSummary::aggregate)
            .unwrap_or(Aggregate::Empty);
        row.push_str(&format!(
            " | {:<22} | {:<24}",
            fmt_mean_time(&aggregate),
            fmt_mean_cost(&aggregate)
        ));
    }
    row
}

pub(crate) fn fmt_seconds(elapsed: Duration) -> String {
    format!("{:.6}", elapsed.as_secs_f64())
}

/// Costs print as INF when there is no path, and without a fractional part
/// when the value is integral
pub fn fmt_cost(cost: f64) -> String {
    if cost.is_infinite() {
        "INF".to_string()
    } else if cost.fract() == 0.0 {
        format!("{}", cost as i64)
    } else {
        format!("{cost}")
    }
}

fn fmt_mean_time(aggregate: &Aggregate) -> String {
    match aggregate {
        Aggregate::Mean { time, .. } => fmt_seconds(*time),
        Aggregate::TimedOut => "TIME LIMIT".to_string(),
        Aggregate::Failed => "FAILED".to_string(),
        Aggregate::Empty => "-".to_string(),
    }
}

fn fmt_mean_cost(aggregate: &Aggregate) -> String {
    match aggregate {
        Aggregate::Mean { cost, .. } => fmt_cost(*cost),
        Aggregate::TimedOut => "TIME LIMIT".to_string(),
        Aggregate::Failed => "FAILED".to_string(),
        Aggregate::Empty => "-".to_string(),
    }
}
