use serde::Serialize;
use std::collections::HashMap;

/// Attribute key holding the channel's country/category grouping
pub const GROUP_TITLE: &str = "group-title";
/// Attribute key holding the channel's display name
pub const TVG_NAME: &str = "tvg-name";

/// Structured form of one `#EXTINF:` line
///
/// Keys keep the casing found in the playlist (`tvg-ID` and `tvg-id` are different keys).
/// When a key repeats on one line the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRecord {
    pub attributes: HashMap<String, String>,
    /// Usually `-1` (live / unknown length)
    pub duration: i32,
    /// Free text after the first comma following the attribute block
    pub title: String,
}

impl AttributeRecord {
    /// Look up a raw attribute value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|s| s.as_str())
    }

    /// `group-title` value, empty when the line has none
    pub fn group_title(&self) -> &str {
        self.get(GROUP_TITLE).unwrap_or_default()
    }

    /// `tvg-name` value, empty when the line has none
    pub fn tvg_name(&self) -> &str {
        self.get(TVG_NAME).unwrap_or_default()
    }
}

/// One EXTINF line paired with the URL line that follows it
///
/// Both lines are kept exactly as read, terminators included, so they can be
/// re-emitted verbatim.
#[derive(Debug, Clone)]
pub struct ChannelEntry<'a> {
    pub extinf: &'a str,
    pub url: &'a str,
    pub record: AttributeRecord,
}

/// Counters collected during a single scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatistics {
    /// Header lines plus two per EXTINF/URL pair
    pub lines: usize,
    /// EXTINF/URL pairs read, parsed or not
    pub channels: usize,
    /// Pairs whose EXTINF line matched the expected structure
    pub matched_channels: usize,
    pub category_headers: usize,
    /// Category headers whose group matched the category filter
    pub matched_category_headers: usize,
    /// Distinct group titles
    pub groups: usize,
    /// Pairs whose group matched the channel filter
    pub matched_group_channels: usize,
}

impl ScanStatistics {
    pub fn new_line(&mut self) {
        self.lines += 1;
    }

    /// Count an EXTINF/URL pair (and its two lines)
    pub fn new_channel(&mut self) {
        self.channels += 1;
        self.lines += 2;
    }

    pub fn new_channel_match(&mut self) {
        self.matched_channels += 1;
    }

    pub fn new_category_header(&mut self) {
        self.category_headers += 1;
    }

    pub fn new_category_header_match(&mut self) {
        self.matched_category_headers += 1;
    }

    pub fn new_group(&mut self) {
        self.groups += 1;
    }

    pub fn new_group_channel_match(&mut self) {
        self.matched_group_channels += 1;
    }

    /// Pairs that failed the structural match
    pub fn unmatched_channels(&self) -> usize {
        self.channels - self.matched_channels
    }
}

impl std::fmt::Display for ScanStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} lines parsed", self.lines)?;
        writeln!(f, "{}/{} channels parsed", self.matched_channels, self.channels)?;
        writeln!(f, "{} groups found", self.groups)?;
        writeln!(f, "{} channels are category headers", self.category_headers)?;
        writeln!(
            f,
            "{} category headers for given group",
            self.matched_category_headers
        )?;
        write!(f, "{} channels in given group", self.matched_group_channels)
    }
}

/// Everything a finished scan produced
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// Distinct group titles in first-seen order
    pub groups: Vec<String>,
    /// `tvg-name` of category headers whose group matched the category filter
    pub categories: Vec<String>,
    /// Leading `#EXTM3U` / `#EXT-X...` lines, verbatim
    pub file_header: String,
    /// Raw EXTINF+URL pairs whose group matched the channel filter
    pub channels: String,
    pub stats: ScanStatistics,
}

impl ScanReport {
    /// File header followed by the selected channel pairs, ready to be saved as a playlist
    pub fn filtered_playlist(&self) -> String {
        format!("{}{}", self.file_header, self.channels)
    }
}
