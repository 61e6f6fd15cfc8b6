pub mod playlist;

pub use playlist::{
    AttributeRecord, ChannelEntry, ScanReport, ScanStatistics, GROUP_TITLE, TVG_NAME,
};
