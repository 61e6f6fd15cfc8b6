pub mod classifier;
pub mod m3u_parser;
pub mod scanner;
