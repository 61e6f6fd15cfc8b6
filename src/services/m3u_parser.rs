use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

use crate::error::RecordParseError;
use crate::models::AttributeRecord;

const EXTINF_PREFIX: &str = "#EXTINF:";
const FILE_HEADER_PREFIX: &str = "#EXTM3U";
const EXTENDED_HEADER_PREFIX: &str = "#EXT-X";

lazy_static! {
    /// Outer structure of an EXTINF line: signed single-digit duration,
    /// one or more ` key="value"` pairs, a comma, then the title
    static ref EXTINF_REGEX: Regex =
        Regex::new(r#"^#EXTINF:(-?[0-9])((?:\s+[^\s="]*="[^"]*")+),(.*)"#).unwrap();

    /// Regex to pull key="value" pairs out of the attribute block;
    /// keys follow the same grammar as in EXTINF_REGEX
    static ref ATTR_REGEX: Regex = Regex::new(r#"([^\s="]+)="([^"]*)""#).unwrap();

    /// First quoted value of a whitespace-delimited group-title key
    static ref GROUP_TITLE_REGEX: Regex = Regex::new(r#"(\s)group-title="[^"]*""#).unwrap();
}

/// Whether a line belongs to the leading block of global directives
pub fn is_file_header(line: &str) -> bool {
    line.starts_with(FILE_HEADER_PREFIX) || line.starts_with(EXTENDED_HEADER_PREFIX)
}

/// Parse an EXTINF line
/// Format: #EXTINF:-1 tvg-id="..." tvg-name="..." tvg-logo="..." group-title="...",Title
///
/// The line is validated as a whole first; the attribute block is then scanned
/// for pairs on its own, so values may hold pipes, glyphs or commas.
pub fn parse_extinf(line: &str) -> Result<AttributeRecord, RecordParseError> {
    let line = line.trim_end_matches(['\r', '\n']);

    if !line.starts_with(EXTINF_PREFIX) {
        return Err(RecordParseError::MissingPrefix);
    }

    let caps = EXTINF_REGEX
        .captures(line)
        .ok_or_else(|| RecordParseError::StructureMismatch {
            line: line.to_string(),
        })?;

    let duration = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(-1);
    let block = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    let title = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

    Ok(AttributeRecord {
        attributes: parse_attributes(block),
        duration,
        title: title.to_string(),
    })
}

/// Extract key="value" pairs in order of appearance; a repeated key keeps its last value
fn parse_attributes(block: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    for caps in ATTR_REGEX.captures_iter(block) {
        let key = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
        let value = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
        attributes.insert(key, value);
    }
    attributes
}

/// Replace the value of the first `group-title="..."` in a raw EXTINF line
///
/// Purely textual: everything else on the line, terminator included, is untouched.
/// Lines without a group-title come back unchanged.
pub fn rewrite_group_title(line: &str, group: &str) -> String {
    GROUP_TITLE_REGEX
        .replace(line, |caps: &Captures| format!(r#"{}group-title="{}""#, &caps[1], group))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_file_header() {
        assert!(is_file_header("#EXTM3U\n"));
        assert!(is_file_header("#EXTM3U url-tvg=\"http://epg\""));
        assert!(is_file_header("#EXT-X-SESSION-DATA:DATA-ID=\"x\""));
        assert!(!is_file_header("#EXTINF:-1 tvg-name=\"A\",A"));
        assert!(!is_file_header("http://x/1"));
        assert!(!is_file_header(""));
    }

    #[test]
    fn test_parse_extinf() {
        let line = r#"#EXTINF:-1 tvg-ID="uk.Sky" tvg-name="|GB| SKY SPORTS News HD" tvg-logo="http://logo.com/sky.svg" group-title="UNITED KINGDOM",|GB| SKY SPORTS News HD"#;
        let record = parse_extinf(line).unwrap();

        assert_eq!(record.duration, -1);
        assert_eq!(record.title, "|GB| SKY SPORTS News HD");
        assert_eq!(record.get("tvg-ID"), Some("uk.Sky"));
        assert_eq!(record.tvg_name(), "|GB| SKY SPORTS News HD");
        assert_eq!(record.group_title(), "UNITED KINGDOM");
        assert_eq!(record.get("tvg-logo"), Some("http://logo.com/sky.svg"));
        assert_eq!(record.attributes.len(), 4);
    }

    #[test]
    fn test_parse_extinf_keeps_special_characters() {
        let line = "#EXTINF:0 tvg-ID=\"\" tvg-name=\"•----• UK Sports, Live •----•\" group-title=\"A|B\",•----• UK Sports •----•\r\n";
        let record = parse_extinf(line).unwrap();

        assert_eq!(record.duration, 0);
        assert_eq!(record.tvg_name(), "•----• UK Sports, Live •----•");
        assert_eq!(record.group_title(), "A|B");
        assert_eq!(record.get("tvg-ID"), Some(""));
        assert_eq!(record.title, "•----• UK Sports •----•");
    }

    #[test]
    fn test_parse_extinf_title_may_contain_commas() {
        let line = r#"#EXTINF:-1 tvg-name="News" group-title="US",News, Weather, Sports"#;
        let record = parse_extinf(line).unwrap();
        assert_eq!(record.title, "News, Weather, Sports");
    }

    #[test]
    fn test_parse_extinf_duplicate_key_last_wins() {
        let line = r#"#EXTINF:-1 tvg-name="First" group-title="G" tvg-name="Second",Title"#;
        let record = parse_extinf(line).unwrap();
        assert_eq!(record.tvg_name(), "Second");
    }

    #[test]
    fn test_parse_extinf_keys_are_case_sensitive() {
        let line = r#"#EXTINF:-1 tvg-ID="upper" tvg-id="lower",Title"#;
        let record = parse_extinf(line).unwrap();
        assert_eq!(record.get("tvg-ID"), Some("upper"));
        assert_eq!(record.get("tvg-id"), Some("lower"));
    }

    #[test]
    fn test_parse_extinf_without_group_title() {
        let line = r#"#EXTINF:-1 tvg-name="Orphan",Orphan"#;
        let record = parse_extinf(line).unwrap();
        assert_eq!(record.group_title(), "");
    }

    #[test]
    fn test_parse_extinf_missing_closing_quote() {
        let line = r#"#EXTINF:-1 tvg-name="Broken,Broken"#;
        assert!(matches!(
            parse_extinf(line),
            Err(RecordParseError::StructureMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_extinf_requires_attributes() {
        assert!(parse_extinf("#EXTINF:-1,Canal Teste").is_err());
    }

    #[test]
    fn test_parse_extinf_multi_digit_duration_rejected() {
        let line = r#"#EXTINF:120 tvg-name="Clip",Clip"#;
        assert!(parse_extinf(line).is_err());
    }

    #[test]
    fn test_parse_extinf_wrong_prefix() {
        assert_eq!(
            parse_extinf("http://x/1"),
            Err(RecordParseError::MissingPrefix)
        );
    }

    #[test]
    fn test_rewrite_group_title() {
        let line = "#EXTINF:-1 tvg-name=\"|GB| SKY\" group-title=\"UNITED KINGDOM\",|GB| SKY\n";
        assert_eq!(
            rewrite_group_title(line, "UK Sports"),
            "#EXTINF:-1 tvg-name=\"|GB| SKY\" group-title=\"UK Sports\",|GB| SKY\n"
        );
    }

    #[test]
    fn test_rewrite_group_title_only_first_occurrence() {
        let line = r#"#EXTINF:-1 group-title="A" group-title="B",T"#;
        assert_eq!(
            rewrite_group_title(line, "C"),
            r#"#EXTINF:-1 group-title="C" group-title="B",T"#
        );
    }

    #[test]
    fn test_rewrite_group_title_without_key() {
        let line = r#"#EXTINF:-1 tvg-name="A",A"#;
        assert_eq!(rewrite_group_title(line, "C"), line);
    }

    #[test]
    fn test_rewrite_group_title_ignores_prefixed_keys() {
        let line = r#"#EXTINF:-1 x-group-title="A" group-title="B",T"#;
        assert_eq!(
            rewrite_group_title(line, "C"),
            r#"#EXTINF:-1 x-group-title="A" group-title="C",T"#
        );
    }

    #[test]
    fn test_parse_extinf_value_ending_in_equals() {
        let line = r#"#EXTINF:-1 tvg-name="|PL| Polsat" tvg-logo="http://logo/get.php?id=" group-title="POLAND",|PL| Polsat"#;
        let record = parse_extinf(line).unwrap();

        assert_eq!(record.tvg_name(), "|PL| Polsat");
        assert_eq!(record.get("tvg-logo"), Some("http://logo/get.php?id="));
        assert_eq!(record.group_title(), "POLAND");
        assert_eq!(record.title, "|PL| Polsat");
        assert_eq!(record.attributes.len(), 3);
    }

    #[test]
    fn test_parse_extinf_values_with_url_punctuation() {
        let line = r#"#EXTINF:-1 tvg-ID="a=b" tvg-name="News=" tvg-logo="http://h:8080/l.php?u=x&p=y" group-title="US: News & Talk=",News"#;
        let record = parse_extinf(line).unwrap();

        assert_eq!(record.duration, -1);
        assert_eq!(record.get("tvg-ID"), Some("a=b"));
        assert_eq!(record.tvg_name(), "News=");
        assert_eq!(record.get("tvg-logo"), Some("http://h:8080/l.php?u=x&p=y"));
        assert_eq!(record.group_title(), "US: News & Talk=");
        assert_eq!(record.title, "News");
    }
}
