use clap::Parser;
use std::path::PathBuf;

use m3u_toolbox::report::ReportSections;
use m3u_toolbox::services::scanner::ScanOptions;

/// Define CLI arguments
#[derive(Debug, Parser)]
#[command(
    version,
    about = "Toolbox for IPTV aggregator M3U playlists",
    long_about = "Lists the groups of an IPTV playlist, the category headers inside a group,\n\
                  or extracts the channels of a group as a new playlist. Category headers are\n\
                  the decorative separator entries (`•----• UK Sports •----•`) that aggregators\n\
                  insert between channel blocks."
)]
pub struct CliArgs {
    /// Path to the m3u file
    pub m3u_file: PathBuf,

    /// Display all the groups in the m3u file
    #[arg(short, long)]
    pub groups: bool,

    /// Display all the category headers whose group-title includes GROUP
    #[arg(short, long, value_name = "GROUP")]
    pub categories: Option<String>,

    /// Print the file header and all the channels whose group-title includes GROUP
    #[arg(long, visible_alias = "ch", value_name = "GROUP")]
    pub channels: Option<String>,

    /// Replace group-title with the preceding category header's name for groups including GROUP
    #[arg(long, visible_alias = "cg", value_name = "GROUP")]
    pub change_groups: Option<String>,

    /// Enable detailed debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Show file stats
    #[arg(long)]
    pub stats: bool,

    /// Print the requested sections as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new(
            self.categories.clone(),
            self.channels.clone(),
            self.change_groups.clone(),
        )
    }

    /// Sections to print, based on the filters that survived option parsing
    pub fn report_sections(&self, options: &ScanOptions) -> ReportSections {
        ReportSections {
            groups: self.groups,
            categories: options.category_filter.clone(),
            channels: options.channel_filter.clone(),
            stats: self.stats,
        }
    }
}
