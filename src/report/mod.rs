//! Reporting utilities: currency/percent formatting and text tables.

pub mod format;

pub use format::*;
