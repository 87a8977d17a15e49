//! Drainage statistics: outlet volume and network aggregation.
//!
//! Consumes the final drop positions and the shared visit log after a
//! run (or on demand mid-run). Each drop that finished on an outlet
//! cell is treated as a sphere of equal radius, and the summed volume is
//! appended to a comma-separated log file, one line per run.

use std::collections::{HashMap, HashSet};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::drop::Raindrop;
use crate::error::{Result, SimError};
use crate::simulation::Simulation;
use crate::types::Coord;
use crate::visit_log::VisitLog;

/// Default visit-count threshold for [`common_network`].
pub const DEFAULT_NETWORK_THRESHOLD: usize = 3;

/// Number of drops whose final position lies in the outlet set.
///
/// This is an exact coordinate membership test, not an elevation
/// comparison, mirroring how the final selection is performed.
pub fn outlet_count(drops: &[Raindrop], outlets: &HashSet<Coord>) -> usize {
    drops
        .iter()
        .filter(|d| outlets.contains(&(d.x, d.y)))
        .count()
}

/// Total water volume that reached an outlet, in cm³.
///
/// `(4/3) * pi * radius^3` per arriving drop. Display rounds to two
/// decimals; persistence keeps full precision.
pub fn total_volume(radius: f64, outlet_drops: usize) -> f64 {
    (4.0 / 3.0) * std::f64::consts::PI * radius.powi(3) * outlet_drops as f64
}

/// Distinct logged coordinates visited at least `threshold` times.
///
/// Duplicates are counted across the whole run, all drops combined.
/// Membership is order-independent; the result is sorted so callers get
/// a stable presentation order.
pub fn common_network(log: &VisitLog, threshold: usize) -> Vec<Coord> {
    let mut counts: HashMap<Coord, usize> = HashMap::new();
    for &coord in log.entries() {
        *counts.entry(coord).or_insert(0) += 1;
    }

    let mut cells: Vec<Coord> = counts
        .into_iter()
        .filter(|&(_, n)| n >= threshold)
        .map(|(coord, _)| coord)
        .collect();
    cells.sort_unstable();
    cells
}

/// The full visit log in append order, duplicates included.
///
/// Entries carry the log's `(column, row)` swap; a trace consumer must
/// apply the same convention to line up with grid indexing.
pub fn all_network(log: &VisitLog) -> &[Coord] {
    log.entries()
}

/// One persisted line of the outlet volume log.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutletRecord {
    /// Total volume in cm³, full precision.
    pub total_volume: f64,
    /// Drops that finished on an outlet cell.
    pub outlet_drops: usize,
    /// Drops in the whole run.
    pub total_drops: usize,
    /// Drop radius in cm.
    pub radius: f64,
}

impl OutletRecord {
    /// Derives the record from a finished (or paused) run.
    pub fn from_run(sim: &Simulation) -> Self {
        let radius = sim.config().radius;
        let outlet_drops = outlet_count(sim.drops(), sim.outlets());
        Self {
            total_volume: total_volume(radius, outlet_drops),
            outlet_drops,
            total_drops: sim.drops().len(),
            radius,
        }
    }

    /// The comma-separated line persisted per run, without the newline.
    pub fn csv_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.total_volume, self.outlet_drops, self.total_drops, self.radius
        )
    }

    /// Appends this record to `path`, creating the file if needed.
    ///
    /// Strictly append-only: prior records are never touched, so the
    /// file accumulates one line per run.
    pub fn append_to(&self, path: &Path) -> Result<()> {
        let record_io = |source| SimError::RecordIo {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(record_io)?;
        writeln!(file, "{}", self.csv_line()).map_err(record_io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drop::Raindrop;
    use crate::visit_log::VisitLog;

    #[test]
    fn outlet_count_uses_exact_coordinate_membership() {
        let outlets: HashSet<Coord> = [(0, 0), (4, 4)].into_iter().collect();
        let drops = vec![
            Raindrop::at(0, 0, 4),
            Raindrop::at(4, 4, 4),
            Raindrop::at(2, 2, 4),
            Raindrop::at(4, 4, 4),
        ];

        assert_eq!(outlet_count(&drops, &outlets), 3);
    }

    #[test]
    fn ten_outlet_drops_at_radius_0_3_display_as_1_13() {
        let vol = total_volume(0.3, 10);
        let expected = (4.0 / 3.0) * std::f64::consts::PI * 0.3_f64.powi(3) * 10.0;

        assert_eq!(vol, expected);
        assert_eq!(format!("{vol:.2}"), "1.13");
    }

    #[test]
    fn common_network_applies_the_threshold_exactly() {
        let mut log = VisitLog::new();
        for _ in 0..4 {
            log.push((2, 2));
        }
        for _ in 0..2 {
            log.push((3, 3));
        }

        assert_eq!(common_network(&log, 3), vec![(2, 2)]);
        // At threshold 2 both cells qualify, in sorted order.
        assert_eq!(common_network(&log, 2), vec![(2, 2), (3, 3)]);
        assert!(common_network(&VisitLog::new(), 3).is_empty());
    }

    #[test]
    fn all_network_returns_the_log_verbatim() {
        let mut log = VisitLog::new();
        log.push((1, 0));
        log.push((1, 0));
        log.push((0, 2));

        assert_eq!(all_network(&log), &[(1, 0), (1, 0), (0, 2)]);
    }

    #[test]
    fn csv_line_keeps_full_precision_and_field_order() {
        let record = OutletRecord {
            total_volume: total_volume(0.3, 10),
            outlet_drops: 10,
            total_drops: 10,
            radius: 0.3,
        };
        let line = record.csv_line();
        let fields: Vec<&str> = line.split(',').collect();

        assert_eq!(fields.len(), 4);
        // Full precision round-trips, unlike the 2-decimal display form.
        assert_eq!(fields[0].parse::<f64>().unwrap(), record.total_volume);
        assert_eq!(fields[1], "10");
        assert_eq!(fields[2], "10");
        assert_eq!(fields[3], "0.3");
    }
}
