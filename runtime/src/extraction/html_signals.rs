//! Structural and behavioural phishing indicators in fetched HTML.
//!
//! `PopUpWindow` and `RightClickDisabled` are plain text matches over the raw
//! markup. Obfuscated or dynamically injected scripts are not detected.

use crate::features::url_parts::host_of;
use crate::features::{FeatureName, FeatureRecord};
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use std::sync::LazyLock;

static POPUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"window\.open").unwrap());

static RIGHT_CLICK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"event.button ?== ?2").unwrap());

/// The four page-derived signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HtmlSignals {
    pub iframe_or_frame: bool,
    pub popup_window: bool,
    pub right_click_disabled: bool,
    pub ext_form_action: bool,
}

impl HtmlSignals {
    /// Signals for a page that could not be fetched: nothing is flagged.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Write the signals into a record as 0/1 values.
    pub fn apply(&self, record: &mut FeatureRecord) {
        record.set_flag(FeatureName::IframeOrFrame, self.iframe_or_frame);
        record.set_flag(FeatureName::PopUpWindow, self.popup_window);
        record.set_flag(FeatureName::RightClickDisabled, self.right_click_disabled);
        record.set_flag(FeatureName::ExtFormAction, self.ext_form_action);
    }

    pub fn to_record(&self) -> FeatureRecord {
        let mut record = FeatureRecord::new();
        self.apply(&mut record);
        record
    }
}

/// Scan page HTML. `page_host` is the authority of the URL that was fetched.
///
/// Parsing is lenient; broken markup yields whatever elements the HTML5
/// parser recovers, and anything that cannot be found counts as absent.
pub fn extract_html_signals(html: &str, page_host: &str) -> HtmlSignals {
    let document = Html::parse_document(html);

    HtmlSignals {
        iframe_or_frame: has_frame(&document),
        popup_window: POPUP_RE.is_match(html),
        right_click_disabled: RIGHT_CLICK_RE.is_match(html),
        ext_form_action: first_form_posts_elsewhere(&document, page_host),
    }
}

fn has_frame(document: &Html) -> bool {
    match Selector::parse("iframe, frame") {
        Ok(sel) => document.select(&sel).next().is_some(),
        Err(_) => false,
    }
}

/// Only the first `<form>` is considered.
fn first_form_posts_elsewhere(document: &Html, page_host: &str) -> bool {
    let Ok(sel) = Selector::parse("form") else {
        return false;
    };
    let Some(form) = document.select(&sel).next() else {
        return false;
    };

    match form.value().attr("action") {
        Some(action) if !action.is_empty() => {
            let action_host = host_of(action);
            !action_host.is_empty() && action_host != page_host
        }
        _ => false,
    }
}
