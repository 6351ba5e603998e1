//! Signal extraction from fetched page HTML.

pub mod html_signals;

pub use html_signals::{extract_html_signals, HtmlSignals};
