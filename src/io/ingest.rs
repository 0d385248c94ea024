//! CSV ingest and cleaning.
//!
//! This module is responsible for turning a raw sensor log CSV into a clean,
//! strictly x-sorted set of `(x, y)` points that are safe to fit.
//!
//! Design goals:
//! - **Fail fast** on structural problems (missing file, short rows,
//!   non-numeric fields) with 1-based line numbers in the message
//! - **Count, don't fail,** the expected row skips (empty fields, repeats,
//!   low-signal rows)
//! - **Deterministic behavior** (first-seen wins, stable ordering)
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashSet;
use std::fs::File;

use csv::StringRecord;

use crate::domain::{DatasetStats, FitConfig, SamplePoint, SkipCounts};
use crate::error::AppError;

/// Ingest output: cleaned points (sorted ascending by x) + stats + skip tallies.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub points: Vec<SamplePoint>,
    pub stats: DatasetStats,
    pub rows_read: usize,
    pub rows_used: usize,
    pub skipped: SkipCounts,
}

/// What [`Screen::offer`] did with a parsed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Accepted,
    /// The x or y value already appeared on an accepted row.
    Duplicate,
    /// Both readings were below their quality floors.
    LowSignal,
}

/// Cleaning accumulator: dedup sets + quality floors + accepted rows.
///
/// Invariants maintained across `offer` calls:
/// - no two accepted rows share an x value, and no two share a y value
///   (first-seen wins; the x check and the y check use independent sets)
/// - every accepted row satisfies NOT (x < x_floor AND y < y_floor)
/// - rejected rows leave the seen-sets untouched
#[derive(Debug, Clone)]
pub struct Screen {
    x_floor: f64,
    y_floor: f64,
    accepted: Vec<SamplePoint>,
    seen_x: HashSet<u64>,
    seen_y: HashSet<u64>,
    skipped: SkipCounts,
}

impl Screen {
    pub fn new(x_floor: f64, y_floor: f64) -> Self {
        Self {
            x_floor,
            y_floor,
            accepted: Vec::new(),
            seen_x: HashSet::new(),
            seen_y: HashSet::new(),
            skipped: SkipCounts::default(),
        }
    }

    /// Offer one parsed row to the screen.
    ///
    /// The dedup gate runs before the floor gate, so a repeated low-signal row
    /// counts as a duplicate, not as low-signal.
    pub fn offer(&mut self, x: f64, y: f64) -> Offer {
        if self.seen_x.contains(&float_key(x)) || self.seen_y.contains(&float_key(y)) {
            self.skipped.duplicate += 1;
            return Offer::Duplicate;
        }

        if x < self.x_floor && y < self.y_floor {
            self.skipped.low_signal += 1;
            return Offer::LowSignal;
        }

        self.seen_x.insert(float_key(x));
        self.seen_y.insert(float_key(y));
        self.accepted.push(SamplePoint { x, y });
        Offer::Accepted
    }

    pub fn note_empty(&mut self) {
        self.skipped.empty += 1;
    }

    /// Consume the screen, returning accepted points sorted ascending by x.
    ///
    /// Ordering is strict: accepted x values are pairwise distinct.
    pub fn finish(mut self) -> (Vec<SamplePoint>, SkipCounts) {
        self.accepted.sort_by(|a, b| a.x.total_cmp(&b.x));
        (self.accepted, self.skipped)
    }
}

/// Set-identity key for a reading.
///
/// `to_bits` gives exact float identity; +0.0 and -0.0 compare equal as
/// readings, so they fold to one key. Non-finite values are rejected before
/// reaching the sets.
fn float_key(v: f64) -> u64 {
    (if v == 0.0 { 0.0 } else { v }).to_bits()
}

/// Load and clean the sensor log named by `config`.
pub fn load_samples(config: &FitConfig) -> Result<IngestedData, AppError> {
    let file = File::open(&config.csv_path).map_err(|e| {
        AppError::usage(format!(
            "Failed to open CSV '{}': {e}",
            config.csv_path.display()
        ))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    // The header row is ignored, but reading it keeps line numbering honest.
    reader
        .headers()
        .map_err(|e| AppError::data(format!("Failed to read CSV header: {e}")))?;

    let mut screen = Screen::new(config.x_floor, config.y_floor);
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after the header
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record =
            result.map_err(|e| AppError::data(format!("CSV parse error at line {line}: {e}")))?;

        let x_raw = get_field(&record, config.x_col, line, "x")?;
        let y_raw = get_field(&record, config.y_col, line, "y")?;

        if x_raw.is_empty() || y_raw.is_empty() {
            screen.note_empty();
            continue;
        }

        let x = parse_reading(x_raw, line, "x")?;
        let y = parse_reading(y_raw, line, "y")?;

        screen.offer(x, y);
    }

    let (points, skipped) = screen.finish();
    let rows_used = points.len();

    let stats = compute_stats(&points)
        .ok_or_else(|| AppError::data("No valid rows remain after cleaning/filtering."))?;

    Ok(IngestedData {
        points,
        stats,
        rows_read,
        rows_used,
        skipped,
    })
}

fn get_field<'a>(
    record: &'a StringRecord,
    idx: usize,
    line: usize,
    name: &str,
) -> Result<&'a str, AppError> {
    record.get(idx).ok_or_else(|| {
        AppError::data(format!(
            "Line {line}: row has no {name} column (expected field index {idx})."
        ))
    })
}

fn parse_reading(s: &str, line: usize, name: &str) -> Result<f64, AppError> {
    let v = s
        .parse::<f64>()
        .map_err(|_| AppError::data(format!("Line {line}: invalid {name} value '{s}'.")))?;
    if !v.is_finite() {
        return Err(AppError::data(format!(
            "Line {line}: non-finite {name} value '{s}'."
        )));
    }
    Ok(v)
}

fn compute_stats(points: &[SamplePoint]) -> Option<DatasetStats> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for p in points {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }

    if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }

    Some(DatasetStats {
        n_points: points.len(),
        x_min,
        x_max,
        y_min,
        y_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn test_config(csv_path: PathBuf) -> FitConfig {
        FitConfig {
            csv_path,
            x_col: 2,
            y_col: 3,
            x_floor: 404.0,
            y_floor: 1800.0,
            show_stats: false,
            plot: false,
            plot_width: 100,
            plot_height: 25,
            export_results: None,
            export_curve: None,
        }
    }

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("calfit_{}_{name}.csv", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn screen_applies_floor_only_when_both_readings_are_below() {
        let mut screen = Screen::new(404.0, 1800.0);

        assert_eq!(screen.offer(500.0, 2000.0), Offer::Accepted);
        // Boundary row: 404 < 404 is false, so the floor gate does not fire.
        assert_eq!(screen.offer(404.0, 1800.0), Offer::Accepted);
        assert_eq!(screen.offer(300.0, 100.0), Offer::LowSignal);
        // One reading below, one above: kept.
        assert_eq!(screen.offer(300.0, 2500.0), Offer::Accepted);

        let (points, skipped) = screen.finish();
        assert_eq!(points.len(), 3);
        assert_eq!(skipped.low_signal, 1);
        for p in &points {
            assert!(!(p.x < 404.0 && p.y < 1800.0));
        }
    }

    #[test]
    fn screen_skips_repeats_on_either_axis() {
        let mut screen = Screen::new(0.0, 0.0);

        assert_eq!(screen.offer(1.0, 2.0), Offer::Accepted);
        // Same x, new y: skipped, and the first-seen mapping survives.
        assert_eq!(screen.offer(1.0, 3.0), Offer::Duplicate);
        // New x, already-seen y: skipped too.
        assert_eq!(screen.offer(4.0, 2.0), Offer::Duplicate);
        assert_eq!(screen.offer(4.0, 3.0), Offer::Accepted);

        let (points, skipped) = screen.finish();
        assert_eq!(points, vec![
            SamplePoint { x: 1.0, y: 2.0 },
            SamplePoint { x: 4.0, y: 3.0 },
        ]);
        assert_eq!(skipped.duplicate, 2);
    }

    #[test]
    fn screen_rejected_rows_do_not_mark_values_as_seen() {
        let mut screen = Screen::new(404.0, 1800.0);

        // Below both floors: rejected without entering the seen-sets...
        assert_eq!(screen.offer(300.0, 100.0), Offer::LowSignal);
        // ...so a later row re-using y=100 with a strong x is not a duplicate.
        assert_eq!(screen.offer(500.0, 100.0), Offer::Accepted);

        let (points, _) = screen.finish();
        assert_eq!(points, vec![SamplePoint { x: 500.0, y: 100.0 }]);
    }

    #[test]
    fn screen_output_is_strictly_ascending_in_x() {
        let mut screen = Screen::new(0.0, 0.0);
        for &(x, y) in &[(5.0, 50.0), (1.0, 10.0), (3.0, 30.0), (2.0, 20.0)] {
            assert_eq!(screen.offer(x, y), Offer::Accepted);
        }

        let (points, _) = screen.finish();
        for pair in points.windows(2) {
            assert!(pair[0].x < pair[1].x);
        }
    }

    #[test]
    fn load_samples_skips_header_and_empty_fields() {
        let path = write_temp_csv(
            "header_empty",
            "ts,probe,ch_a,ch_b\n\
             a,b,500,2000\n\
             a,b,,2100\n\
             a,b,600,\n\
             a,b,700,2200\n",
        );
        let config = test_config(path.clone());

        let data = load_samples(&config).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(data.rows_read, 4);
        assert_eq!(data.rows_used, 2);
        assert_eq!(data.skipped.empty, 2);
        assert_eq!(data.points, vec![
            SamplePoint { x: 500.0, y: 2000.0 },
            SamplePoint { x: 700.0, y: 2200.0 },
        ]);
        assert_eq!(data.stats.x_min, 500.0);
        assert_eq!(data.stats.x_max, 700.0);
    }

    #[test]
    fn load_samples_fails_on_non_numeric_field() {
        let path = write_temp_csv("bad_value", "h0,h1,h2,h3\na,b,500,2000\na,b,oops,2100\n");
        let config = test_config(path.clone());

        let err = load_samples(&config).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("line 3") || err.to_string().contains("Line 3"));
    }

    #[test]
    fn load_samples_fails_on_short_row() {
        let path = write_temp_csv("short_row", "h0,h1,h2,h3\na,b,500\n");
        let config = test_config(path.clone());

        let err = load_samples(&config).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn load_samples_fails_when_nothing_survives() {
        let path = write_temp_csv("all_filtered", "h0,h1,h2,h3\na,b,1,2\na,b,3,4\n");
        let config = test_config(path.clone());

        let err = load_samples(&config).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn load_samples_missing_file_is_a_usage_error() {
        let config = test_config(PathBuf::from("/nonexistent/calfit-no-such-file.csv"));
        let err = load_samples(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
