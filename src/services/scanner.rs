use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{ChannelEntry, ScanReport};
use crate::services::classifier::CategoryClassifier;
use crate::services::m3u_parser::{is_file_header, parse_extinf, rewrite_group_title};

/// Optional group filters for one scan
///
/// Each filter is a substring tested against a channel's original `group-title`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Collect category header names for matching groups
    pub category_filter: Option<String>,
    /// Copy matching EXTINF/URL pairs into the channel output
    pub channel_filter: Option<String>,
    /// Rewrite `group-title` of matching lines with the last category header's name
    pub rename_filter: Option<String>,
}

impl ScanOptions {
    /// Build options; empty filters count as not set
    pub fn new(
        category_filter: Option<String>,
        channel_filter: Option<String>,
        rename_filter: Option<String>,
    ) -> Self {
        Self {
            category_filter: non_empty(category_filter),
            channel_filter: non_empty(channel_filter),
            rename_filter: non_empty(rename_filter),
        }
    }
}

fn non_empty(filter: Option<String>) -> Option<String> {
    filter.filter(|f| !f.is_empty())
}

fn group_matches(filter: &Option<String>, group_title: &str) -> bool {
    filter
        .as_deref()
        .is_some_and(|f| group_title.contains(f))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Consuming `#EXTM3U` / `#EXT-X...` lines
    AtHeader,
    /// The pending line is an EXTINF candidate; the next one is its URL
    AtChannel,
    Done,
}

/// Mutable state owned by a single scan
#[derive(Debug, Default)]
struct ScanContext {
    report: ScanReport,
    /// Group name derived from the most recent category header, if any was seen
    rename_target: Option<String>,
}

/// Single-pass reader that pairs EXTINF lines with their URLs and collects
/// groups, category headers, filtered channels and statistics
#[derive(Debug, Clone, Default)]
pub struct PlaylistScanner {
    options: ScanOptions,
}

impl PlaylistScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan a playlist file
    ///
    /// A missing file is reported before anything is read.
    pub fn scan_file(&self, path: impl AsRef<Path>) -> Result<ScanReport> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::InputNotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        tracing::info!("Scanning playlist: {}", path.display());

        self.scan(BufReader::new(file))
    }

    /// Scan playlist lines from any buffered reader
    ///
    /// Only I/O failures are returned as errors; malformed EXTINF lines are
    /// logged, counted and skipped.
    pub fn scan<R: BufRead>(&self, mut reader: R) -> Result<ScanReport> {
        let mut ctx = ScanContext::default();
        let mut state = ScanState::AtHeader;
        let mut extinf = String::new();
        let mut url = String::new();

        while state != ScanState::Done {
            state = match state {
                ScanState::AtHeader => {
                    extinf.clear();
                    if reader.read_line(&mut extinf)? == 0 {
                        ScanState::Done
                    } else if is_file_header(&extinf) {
                        ctx.report.file_header.push_str(&extinf);
                        ctx.report.stats.new_line();
                        ScanState::AtHeader
                    } else {
                        ScanState::AtChannel
                    }
                }
                ScanState::AtChannel => {
                    url.clear();
                    let read = reader.read_line(&mut url)?;
                    if read == 0 || url.trim_end_matches(['\r', '\n']).is_empty() {
                        tracing::debug!("No URL after {}, end of playlist", extinf.trim_end());
                        ScanState::Done
                    } else {
                        self.process_pair(&mut ctx, &extinf, &url);

                        extinf.clear();
                        if reader.read_line(&mut extinf)? == 0 {
                            ScanState::Done
                        } else {
                            ScanState::AtChannel
                        }
                    }
                }
                ScanState::Done => ScanState::Done,
            };
        }

        let stats = &ctx.report.stats;
        tracing::info!(
            "Scan complete: {}/{} channels parsed, {} groups, {} category headers",
            stats.matched_channels,
            stats.channels,
            stats.groups,
            stats.category_headers
        );

        Ok(ctx.report)
    }

    fn process_pair(&self, ctx: &mut ScanContext, extinf: &str, url: &str) {
        match parse_extinf(extinf) {
            Ok(record) => self.record_channel(ctx, ChannelEntry { extinf, url, record }),
            Err(e) => {
                tracing::error!("{}", e);
                tracing::warn!("Channel failed to match: {}", extinf.trim_end());
            }
        }
        ctx.report.stats.new_channel();
    }

    fn record_channel(&self, ctx: &mut ScanContext, entry: ChannelEntry<'_>) {
        let report = &mut ctx.report;
        report.stats.new_channel_match();

        let group_title = entry.record.group_title();
        if !report.groups.iter().any(|g| g == group_title) {
            report.groups.push(group_title.to_string());
            report.stats.new_group();
        }

        if CategoryClassifier::is_category_header(&entry.record) {
            let tvg_name = entry.record.tvg_name();
            report.stats.new_category_header();

            if group_matches(&self.options.category_filter, group_title) {
                report.categories.push(tvg_name.to_string());
                report.stats.new_category_header_match();
            }

            if self.options.rename_filter.is_some() {
                let derived = CategoryClassifier::derive_group_name(tvg_name);
                tracing::debug!("{} will be used as group-title=\"{}\"", tvg_name, derived);
                ctx.rename_target = Some(derived);
            }
        }

        // Rewrites apply to output only; filters keep testing the original group
        let mut extinf = Cow::Borrowed(entry.extinf);
        if group_matches(&self.options.rename_filter, group_title) {
            match &ctx.rename_target {
                Some(target) => {
                    extinf = Cow::Owned(rewrite_group_title(entry.extinf, target));
                    tracing::debug!("sub result is {}", extinf.trim_end());
                }
                None => tracing::warn!(
                    "No category header seen before group {}, group-title left unchanged",
                    group_title
                ),
            }
        }

        if group_matches(&self.options.channel_filter, group_title) {
            report.channels.push_str(&extinf);
            report.channels.push_str(entry.url);
            report.stats.new_group_channel_match();
        }
    }
}
