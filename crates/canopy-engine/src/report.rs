//! Aggregate run report.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use canopy_types::VerificationResult;

/// Summary statistics for one run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Scenarios not executed (fail-fast stop).
    pub skipped: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.passed as f64 / self.total as f64) * 100.0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} passed ({:.1}%), {} failed, {} skipped",
            self.passed,
            self.total,
            self.pass_rate(),
            self.failed,
            self.skipped,
        )
    }
}

/// Complete outcome of one scenario batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub results: Vec<VerificationResult>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn from_results(
        results: Vec<VerificationResult>,
        skipped: usize,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        Self {
            results,
            summary: RunSummary {
                total,
                passed,
                failed,
                skipped,
                started_at,
                completed_at,
            },
        }
    }

    pub fn all_passed(&self) -> bool {
        self.summary.all_passed()
    }

    /// Only the failing results.
    pub fn failures(&self) -> Vec<&VerificationResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+-------------------------------------------------+")?;
        writeln!(f, "|   Selection Conformance Report                  |")?;
        writeln!(f, "+-------------------------------------------------+")?;
        writeln!(
            f,
            "| Total: {:3}  Passed: {:3}  Failed: {:3}             |",
            self.summary.total, self.summary.passed, self.summary.failed,
        )?;
        writeln!(f, "+-------------------------------------------------+")?;
        writeln!(f)?;

        for result in &self.results {
            let mark = if result.passed { "+" } else { "x" };
            writeln!(f, "  [{}] {}", mark, result.scenario)?;
            if let Some(error) = &result.error {
                writeln!(f, "      error: {}", error)?;
            }
            for mismatch in &result.node_mismatches {
                writeln!(f, "      {}", mismatch)?;
            }
            if let Some(mismatch) = &result.message_mismatch {
                writeln!(f, "      {}", mismatch)?;
            }
        }

        writeln!(f)?;
        if self.all_passed() {
            writeln!(f, "  ALL {} SCENARIOS CONFORMANT", self.summary.total)?;
        } else {
            writeln!(f, "  {} SCENARIO(S) NON-CONFORMANT", self.summary.failed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_types::{NodeId, NodeMismatch};

    fn make_results(pass: usize, fail: usize) -> Vec<VerificationResult> {
        let mut results = Vec::new();
        for i in 0..pass {
            results.push(VerificationResult::pass(&format!("case {}", i)));
        }
        for i in 0..fail {
            results.push(VerificationResult::fail(
                &format!("broken case {}", i),
                vec![NodeMismatch {
                    id: NodeId::new("check-desktop"),
                    expected: true,
                    actual: false,
                }],
                None,
            ));
        }
        results
    }

    #[test]
    fn test_report_all_passed() {
        let now = Utc::now();
        let report = RunReport::from_results(make_results(5, 0), 0, now, now);
        assert!(report.all_passed());
        assert_eq!(report.summary.total, 5);
        assert!(report.failures().is_empty());
    }

    #[test]
    fn test_report_with_failures() {
        let now = Utc::now();
        let report = RunReport::from_results(make_results(3, 2), 0, now, now);
        assert!(!report.all_passed());
        assert_eq!(report.summary.failed, 2);
        assert_eq!(report.failures().len(), 2);
    }

    #[test]
    fn test_report_display_verdicts() {
        let now = Utc::now();
        let clean = RunReport::from_results(make_results(2, 0), 0, now, now);
        assert!(clean.to_string().contains("CONFORMANT"));
        let dirty = RunReport::from_results(make_results(1, 1), 0, now, now);
        assert!(dirty.to_string().contains("NON-CONFORMANT"));
        assert!(dirty.to_string().contains("check-desktop"));
    }

    #[test]
    fn test_empty_report() {
        let now = Utc::now();
        let report = RunReport::from_results(vec![], 0, now, now);
        assert!(report.all_passed());
        assert!((report.summary.pass_rate() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_serializes() {
        let now = Utc::now();
        let report = RunReport::from_results(make_results(1, 1), 1, now, now);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"skipped\":1"));
    }
}
