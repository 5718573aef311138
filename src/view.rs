//! View common stuff

use std::fmt;
use std::sync::atomic::AtomicUsize;

use crate::calc::CalcSummary;
use crate::catalog::Item;
use crate::chart::HistoryChart;
use crate::table::CatalogTable;

/// Data behind a rendered view
pub enum ViewData {
    /// Item listing
    Table(CatalogTable),
    /// Single item details
    Detail(Item),
    /// Item value history
    History(HistoryChart),
    /// Calculator summary
    Calc(CalcSummary),
}

impl fmt::Display for ViewData {
    /// Output view content
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Table(v) => v.fmt(f),
            Self::Detail(v) => v.fmt(f),
            Self::History(v) => v.fmt(f),
            Self::Calc(v) => v.fmt(f),
        }
    }
}

// Global stuff, initialized by main function or unit tests
pub static TERM_COLUMNS: AtomicUsize = AtomicUsize::new(0);
