use lazy_static::lazy_static;
use regex::Regex;

use crate::models::AttributeRecord;

lazy_static! {
    // ============ CATEGORY DECORATORS ============
    // Aggregators inject separator "channels" such as
    // `•----• UK Sports •----•`, `######## ITALIAN MOVIES ########`,
    // `======== SERIES ========`, `***** Arabic Sport *****`, `|PL| -= Poland =-`
    static ref CATEGORY_DECORATOR: Regex = Regex::new(r"-{4}|#{4}|={4}|\*{4}|-=").unwrap();

    /// ASCII letter runs kept when turning a category header into a group name
    static ref ALPHA_RUN: Regex = Regex::new(r"[a-zA-Z]+").unwrap();
}

/// Heuristics that tell decorative category markers apart from real channels
pub struct CategoryClassifier;

impl CategoryClassifier {
    /// Whether the record is an aggregator-injected separator rather than a channel
    ///
    /// Best effort: a real channel whose name happens to contain one of the
    /// decorators is reported as a category. A record without `tvg-name` is not one.
    pub fn is_category_header(record: &AttributeRecord) -> bool {
        Self::is_category_name(record.tvg_name())
    }

    /// Decorator check on a bare `tvg-name` value
    pub fn is_category_name(tvg_name: &str) -> bool {
        CATEGORY_DECORATOR.is_match(tvg_name)
    }

    /// Group name derived from a category header: its alphabetic runs joined by spaces
    ///
    /// `•----• UK Sports •----•` becomes `UK Sports`, digits and glyphs are dropped.
    pub fn derive_group_name(tvg_name: &str) -> String {
        ALPHA_RUN
            .find_iter(tvg_name)
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
