use std::fmt;

use ansi_term::Colour::Purple;
use anyhow::Context as _;

use crate::catalog::Catalog;
use crate::fmt::format_number;

/// One calculator line
struct CalcEntry {
    /// Item name
    name: String,
    /// Selected quantity
    quantity: u64,
    /// Unit value
    worth: f64,
}

/// Value calculator selection
pub struct CalcSummary {
    entries: Vec<CalcEntry>,
}

/// Parse a "name=quantity" selection spec
fn parse_spec(spec: &str) -> anyhow::Result<(&str, u64)> {
    let (name, quantity) = spec
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Invalid selection {spec:?}, expected NAME=QUANTITY"))?;
    let name = name.trim();
    anyhow::ensure!(
        !name.is_empty(),
        "Invalid selection {:?}, empty item name",
        spec
    );
    let quantity = quantity
        .trim()
        .parse()
        .with_context(|| format!("Invalid quantity in {spec:?}"))?;
    Ok((name, quantity))
}

impl CalcSummary {
    /// Resolve selection specs against the catalog
    ///
    /// Zero quantities are dropped, unknown item names are an error.
    pub fn build(catalog: &Catalog, specs: &[String]) -> anyhow::Result<Self> {
        let mut entries = Vec::new();
        for spec in specs {
            let (name, quantity) = parse_spec(spec)?;
            if quantity == 0 {
                continue;
            }
            let item = catalog.find(name)?;
            entries.push(CalcEntry {
                name: item.name.clone(),
                quantity,
                worth: item.worth(),
            });
        }
        Ok(Self { entries })
    }

    /// Total value of the selection
    fn total(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.worth * e.quantity as f64)
            .sum()
    }
}

impl fmt::Display for CalcSummary {
    /// Output the selection lines and total
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let max_name_len = self
            .entries
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &self.entries {
            writeln!(
                f,
                "{}{}  {} × {} = {}",
                entry.name,
                " ".repeat(max_name_len - entry.name.chars().count()),
                entry.quantity,
                format_number(entry.worth),
                format_number(entry.worth * entry.quantity as f64),
            )?;
        }
        writeln!(
            f,
            "Total: {}",
            Purple.bold().paint(format_number(self.total()))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spec() {
        assert_eq!(parse_spec("Frost Dragon=3").unwrap(), ("Frost Dragon", 3));
        assert_eq!(parse_spec("Frost Dragon = 3").unwrap(), ("Frost Dragon", 3));
        assert_eq!(parse_spec("x=0").unwrap(), ("x", 0));
        assert!(parse_spec("Frost Dragon").is_err());
        assert!(parse_spec("=3").is_err());
        assert!(parse_spec("x=abc").is_err());
        assert!(parse_spec("x=-1").is_err());
        assert!(parse_spec("x=3.5").is_err());
    }

    #[test]
    fn test_output_calc_summary() {
        assert_eq!(
            format!(
                "{}",
                CalcSummary {
                    entries: vec![
                        CalcEntry {
                            name: "Frost Dragon".to_string(),
                            quantity: 3,
                            worth: 1_500_000.0,
                        },
                        CalcEntry {
                            name: "Pixel Cat".to_string(),
                            quantity: 10,
                            worth: 2500.0,
                        },
                    ]
                }
            ),
            "Frost Dragon  3 × 1.5M = 4.5M\n\
             Pixel Cat     10 × 2.5K = 25.0K\n\
             Total: \u{1b}[1;35m4.5M\u{1b}[0m\n"
        );
    }

    #[test]
    fn test_output_calc_summary_infinite() {
        assert_eq!(
            format!(
                "{}",
                CalcSummary {
                    entries: vec![CalcEntry {
                        name: "Void".to_string(),
                        quantity: 2,
                        worth: f64::INFINITY,
                    }]
                }
            ),
            "Void  2 × ∞ = ∞\nTotal: \u{1b}[1;35m∞\u{1b}[0m\n"
        );
    }

    #[test]
    fn test_output_calc_summary_empty() {
        assert_eq!(
            format!("{}", CalcSummary { entries: vec![] }),
            "Total: \u{1b}[1;35m0\u{1b}[0m\n"
        );
    }
}
