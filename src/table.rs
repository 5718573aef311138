use std::cmp;
use std::fmt;
use std::sync::atomic::Ordering;

use ansi_term::Colour::Purple;
use ansi_term::Style;

use crate::catalog::{Item, change_style};
use crate::fmt::format_value;
use crate::view::TERM_COLUMNS;

/// Minimum width kept for the name column before truncation
const MIN_NAME_LEN: usize = 10;

/// Items rendered as a listing table
pub struct CatalogTable {
    /// Table rows
    pub items: Vec<Item>,
}

/// Truncate a string on char boundaries, appending an ellipsis
fn ellipsis(s: &str, max_len: usize) -> String {
    assert!(max_len >= 1);

    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let mut new_s: String = s.chars().take(max_len - 1).collect();
        new_s.push('…');
        new_s
    }
}

impl fmt::Display for CatalogTable {
    /// Output the item listing
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "No matching items");
        }

        let values: Vec<String> = self.items.iter().map(|i| format_value(&i.value)).collect();
        let value_len = cmp::max(
            "Value".len(),
            values.iter().map(|v| v.chars().count()).max().unwrap_or(0),
        );
        let trend_len = cmp::max(
            "Trend".len(),
            self.items
                .iter()
                .map(|i| i.trend.label().len())
                .max()
                .unwrap_or(0),
        );

        // 3 column gaps of 2 chars each, change column last and unpadded
        let fixed_len = value_len + trend_len + "Change".len() + 6;
        let term_width = cmp::max(
            TERM_COLUMNS.load(Ordering::SeqCst),
            MIN_NAME_LEN + fixed_len,
        );
        let name_max_len = term_width - fixed_len;
        let names: Vec<String> = self
            .items
            .iter()
            .map(|i| ellipsis(&i.name, name_max_len))
            .collect();
        let name_len = cmp::max(
            "Item".len(),
            names.iter().map(|n| n.chars().count()).max().unwrap_or(0),
        );

        let header = Style::new().bold();
        writeln!(
            f,
            "{}{}  {}{}  {}{}  {}",
            header.paint("Item"),
            " ".repeat(name_len - "Item".len()),
            " ".repeat(value_len - "Value".len()),
            header.paint("Value"),
            header.paint("Trend"),
            " ".repeat(trend_len - "Trend".len()),
            header.paint("Change"),
        )?;

        for ((item, name), value) in self.items.iter().zip(names).zip(values) {
            writeln!(
                f,
                "{}{}  {}{}  {}{}  {}",
                name,
                " ".repeat(name_len - name.chars().count()),
                " ".repeat(value_len - value.chars().count()),
                Purple.paint(value),
                item.trend.style().paint(item.trend.label()),
                " ".repeat(trend_len - item.trend.label().len()),
                change_style(&item.change).paint(&item.change),
            )?;
        }

        Ok(())
    }
}
