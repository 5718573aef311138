use std::cmp;
use std::fmt;
use std::sync::atomic::Ordering;

use itertools::Itertools as _;
use itertools::MinMaxResult;

use crate::catalog::HistoryPoint;
use crate::fmt::format_number;
use crate::view::TERM_COLUMNS;

/// Minimum bar length
const MIN_CHART_BAR_LEN: usize = 10;

/// Value history rendered as horizontal bars
pub struct HistoryChart {
    /// History points, oldest first
    pub points: Vec<HistoryPoint>,
}

/// Filled cell count for a value relative to the chart maximum
fn bar_fill(value: f64, max: f64, length: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        0
    } else if value >= max {
        length
    } else {
        (length as f64 * value / max) as usize
    }
}

impl fmt::Display for HistoryChart {
    /// Output the value history
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let max = match self
            .points
            .iter()
            .map(|p| p.value)
            .minmax_by(f64::total_cmp)
        {
            MinMaxResult::NoElements => return writeln!(f, "No value history"),
            MinMaxResult::OneElement(m) | MinMaxResult::MinMax(_, m) => m,
        };

        let values: Vec<String> = self.points.iter().map(|p| format_number(p.value)).collect();
        let date_len = self
            .points
            .iter()
            .map(|p| p.date.chars().count())
            .max()
            .unwrap_or(0);
        let value_len = values.iter().map(|v| v.chars().count()).max().unwrap_or(0);

        // date, 2 chars gap, 2 bar edges, 1 char gap, value
        let fixed_len = date_len + value_len + 5;
        let term_width = cmp::max(
            TERM_COLUMNS.load(Ordering::SeqCst),
            fixed_len + MIN_CHART_BAR_LEN,
        );
        let bar_len = term_width - fixed_len;

        for (point, value) in self.points.iter().zip(values) {
            let fill = bar_fill(point.value, max, bar_len);
            writeln!(
                f,
                "{}{}  ▕{}{}▏ {}{}",
                point.date,
                " ".repeat(date_len - point.date.chars().count()),
                "█".repeat(fill),
                " ".repeat(bar_len - fill),
                " ".repeat(value_len - value.chars().count()),
                value,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serial_test::serial;

    fn point(date: &str, value: f64) -> HistoryPoint {
        HistoryPoint {
            date: date.to_string(),
            value,
        }
    }

    #[test]
    #[serial]
    fn test_output_history_chart() {
        TERM_COLUMNS.store(40, Ordering::SeqCst);
        assert_eq!(
            format!(
                "{}",
                HistoryChart {
                    points: vec![
                        point("2025-01-01", 500_000.0),
                        point("2025-02-01", 1_000_000.0),
                        point("2025-03-01", 2_000_000.0),
                    ]
                }
            ),
            "2025-01-01  ▕████               ▏ 500.0K\n\
             2025-02-01  ▕█████████          ▏   1.0M\n\
             2025-03-01  ▕███████████████████▏   2.0M\n"
        );
    }

    #[test]
    #[serial]
    fn test_output_history_chart_infinite() {
        TERM_COLUMNS.store(40, Ordering::SeqCst);
        assert_eq!(
            format!(
                "{}",
                HistoryChart {
                    points: vec![
                        point("2025-01-01", 1000.0),
                        point("2025-02-01", f64::INFINITY),
                    ]
                }
            ),
            "2025-01-01  ▕                     ▏ 1.0K\n\
             2025-02-01  ▕█████████████████████▏    ∞\n"
        );
    }

    #[test]
    fn test_output_history_chart_empty() {
        assert_eq!(
            format!("{}", HistoryChart { points: vec![] }),
            "No value history\n"
        );
    }

    #[test]
    fn test_bar_fill() {
        assert_eq!(bar_fill(0.0, 100.0, 10), 0);
        assert_eq!(bar_fill(-5.0, 100.0, 10), 0);
        assert_eq!(bar_fill(50.0, 100.0, 10), 5);
        assert_eq!(bar_fill(100.0, 100.0, 10), 10);
        assert_eq!(bar_fill(150.0, 100.0, 10), 10);
        assert_eq!(bar_fill(5.0, 0.0, 10), 0);
        assert_eq!(bar_fill(f64::NAN, 100.0, 10), 0);
        assert_eq!(bar_fill(10.0, f64::INFINITY, 10), 0);
        assert_eq!(bar_fill(f64::INFINITY, f64::INFINITY, 10), 10);
    }
}
