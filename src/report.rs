//! Rendering of a finished scan for the sections the user asked for

use serde::Serialize;

use crate::error::Result;
use crate::models::{ScanReport, ScanStatistics};

/// Which parts of a scan report to print
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSections {
    pub groups: bool,
    /// Filter the categories were collected for
    pub categories: Option<String>,
    /// Filter the channels were collected for
    pub channels: Option<String>,
    pub stats: bool,
}

/// JSON shape of a report; absent sections are omitted
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    groups: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<CategoriesView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    playlist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a ScanStatistics>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoriesView<'a> {
    group: &'a str,
    names: &'a [String],
}

/// Human readable report, one block per requested section
pub fn render_text(report: &ScanReport, sections: &ReportSections) -> String {
    let mut out = String::new();

    if sections.groups {
        out.push_str(&format!("Groups:\n{:?}\n\n", report.groups));
    }
    if let Some(group) = &sections.categories {
        out.push_str(&format!(
            "Categories whose group-title includes {}:\n{:?}\n\n",
            group, report.categories
        ));
    }
    if sections.channels.is_some() {
        out.push_str(&format!("{}\n", report.filtered_playlist()));
    }
    if sections.stats {
        out.push_str(&format!("Stats:\n{}\n\n", report.stats));
    }

    out
}

/// Requested sections as a single pretty-printed JSON document
pub fn render_json(report: &ScanReport, sections: &ReportSections) -> Result<String> {
    let view = ReportView {
        groups: sections.groups.then_some(report.groups.as_slice()),
        categories: sections.categories.as_deref().map(|group| CategoriesView {
            group,
            names: &report.categories,
        }),
        playlist: sections
            .channels
            .as_ref()
            .map(|_| report.filtered_playlist()),
        stats: sections.stats.then_some(&report.stats),
    };

    Ok(serde_json::to_string_pretty(&view)?)
}
