//! Persisting and formatting run reports.
//!
//! `place --report` writes a [`BatchReport`] as JSON; `sort` prints
//! [`format_sort`] at the end of a run.

use std::path::Path;
use std::time::Duration;

use crate::error::{PhotoslotError, Result};
use crate::placement::BatchReport;
use crate::sorter::SortReport;

/// Save a batch report as pretty JSON.
pub fn save(report: &BatchReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(|e| PhotoslotError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn format_sort(report: &SortReport) -> String {
    let verb = if report.dry_run { "Would move" } else { "Moved" };
    format!(
        "Total files: {}\n{verb}: {}\nSkipped (already exists): {}\nFailed: {}\nTime: {}\n",
        report.total,
        report.moved(),
        report.skipped(),
        report.failed(),
        format_duration(report.elapsed)
    )
}

/// `"42 sec (1 min)"`, rounded like a stopwatch.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    format!("{} sec ({} min)", secs.round() as u64, (secs / 60.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::Slot;
    use crate::orientation::Orientation;
    use crate::placement::PlacementOutcome;

    fn sample() -> BatchReport {
        BatchReport {
            labelled: 3,
            outcomes: vec![
                PlacementOutcome::Placed {
                    index: 0,
                    image: "a.jpg".into(),
                    label: "ammu_landscape_1".into(),
                },
                PlacementOutcome::Unmatched {
                    index: 1,
                    image: "b.jpg".into(),
                    slot: Slot::new(Orientation::Portrait, 2),
                },
                PlacementOutcome::Failed {
                    index: 2,
                    image: "c.jpg".into(),
                    label: "ammu_landscape_2".into(),
                    reason: "boom".into(),
                },
                PlacementOutcome::Unreadable {
                    index: 3,
                    image: "d.jpg".into(),
                    reason: "bad header".into(),
                },
            ],
        }
    }

    #[test]
    fn test_save_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.json");
        save(&sample(), &path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains(r#""status": "unmatched""#));
        let saved: BatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(saved, sample());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(95)), "95 sec (2 min)");
        assert_eq!(format_duration(Duration::from_millis(400)), "0 sec (0 min)");
    }
}
