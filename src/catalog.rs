use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use ansi_term::Colour::{Green, Purple, Red};
use ansi_term::Style;
use anyhow::Context as _;

use crate::config;
use crate::fmt::{RawValue, format_value, parse_value};

/// Value trend since the previous update
#[derive(Clone, Copy, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Value went up
    Rising,
    /// Value went down
    Falling,
    /// Value did not move
    #[default]
    Stable,
}

impl Trend {
    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Rising => "Rising",
            Self::Falling => "Falling",
            Self::Stable => "Stable",
        }
    }

    /// Terminal style for the label
    pub fn style(self) -> Style {
        match self {
            Self::Rising => Green.normal(),
            Self::Falling => Red.normal(),
            Self::Stable => Style::new(),
        }
    }
}

/// Terminal style for a change annotation ("+5.2%", "-3%", ...)
pub fn change_style(change: &str) -> Style {
    if change.starts_with('+') {
        Green.normal()
    } else if change.starts_with('-') {
        Red.normal()
    } else {
        Style::new()
    }
}

/// Recorded value of an item at a past date
#[derive(Clone, Debug, serde::Deserialize)]
pub struct HistoryPoint {
    /// ISO date (yyyy-mm-dd)
    pub date: String,
    /// Value at that date
    pub value: f64,
}

/// A catalog item
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Item {
    /// Item name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Current value
    pub value: RawValue,
    /// Value trend
    #[serde(default)]
    pub trend: Trend,
    /// Change annotation since the previous update
    #[serde(default)]
    pub change: String,
    /// Item image
    #[serde(default)]
    pub image_url: Option<String>,
    /// Free-form additional fields
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
    /// Past values
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
}

impl Item {
    /// Numeric value of the item, for sorting and arithmetic
    pub fn worth(&self) -> f64 {
        match &self.value {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => parse_value(s),
        }
    }
}

impl fmt::Display for Item {
    /// Output item details
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        let mut fields: Vec<(&str, String, Style)> = vec![
            ("Value", format_value(&self.value), Purple.normal()),
            ("Trend", self.trend.label().to_string(), self.trend.style()),
        ];
        if !self.change.is_empty() {
            fields.push(("Change", self.change.clone(), change_style(&self.change)));
        }
        if let Some(url) = &self.image_url {
            fields.push(("Image", url.clone(), Style::new()));
        }
        for (key, val) in &self.extra {
            fields.push((key.as_str(), val.clone(), Style::new()));
        }
        let max_key_len = fields
            .iter()
            .map(|(k, _, _)| k.chars().count())
            .max()
            .unwrap_or(0);
        for (key, val, style) in fields {
            writeln!(
                f,
                "{}:{} {}",
                key,
                " ".repeat(max_key_len - key.chars().count()),
                style.paint(val)
            )?;
        }
        Ok(())
    }
}

/// Sort key for item listings
#[derive(Clone, Copy, Debug)]
pub enum SortKey {
    /// Sort by item name
    Name,
    /// Sort by numeric value
    Value,
}

/// Sort direction for item listings
#[derive(Clone, Copy, Debug)]
pub enum SortOrder {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// All catalog items
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Load all item files from a catalog directory
    pub fn load(dir: &Path, cfg: &config::CatalogConfig) -> anyhow::Result<Self> {
        let mut items = Vec::new();
        for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file()
                || entry.path().extension() != Some(OsStr::new("toml"))
            {
                continue;
            }
            let toml_data = std::fs::read_to_string(entry.path())
                .with_context(|| format!("Failed to read {:?}", entry.path()))?;
            let mut item: Item = toml::from_str(&toml_data)
                .with_context(|| format!("Failed to parse {:?}", entry.path()))?;
            if cfg.name_blacklist.iter().any(|r| r.is_match(&item.name)) {
                continue;
            }
            item.history.sort_by(|a, b| a.date.cmp(&b.date));
            items.push(item);
        }
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self { items })
    }

    /// Look up an item by name, ignoring case
    pub fn find(&self, name: &str) -> anyhow::Result<&Item> {
        self.items
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("No item named {name:?}"))
    }

    /// Filter and sort items for the listing view
    pub fn select(&self, search: Option<&str>, key: SortKey, order: SortOrder) -> Vec<Item> {
        let mut items: Vec<Item> = match search {
            Some(term) => {
                let term = term.to_lowercase();
                self.items
                    .iter()
                    .filter(|i| i.name.to_lowercase().contains(&term))
                    .cloned()
                    .collect()
            }
            None => self.items.clone(),
        };
        items.sort_by(|a, b| {
            let ord = match key {
                SortKey::Name => a.name.cmp(&b.name),
                SortKey::Value => a.worth().total_cmp(&b.worth()),
            };
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        items
    }
}
