//! Parsing and classification of IPTV aggregator M3U playlists
//!
//! A single pass over the playlist pairs every `#EXTINF` line with its URL,
//! collects group titles, spots decorative category headers and optionally
//! copies (and relabels) the channels of selected groups.

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod services;

pub use error::{AppError, RecordParseError, Result};
pub use models::{AttributeRecord, ScanReport, ScanStatistics};
pub use services::scanner::{PlaylistScanner, ScanOptions};
