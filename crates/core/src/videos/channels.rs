use std::collections::HashSet;

/// Parse a channel list: one channel per line, blank lines and `#` comments
/// skipped, duplicates dropped keeping the first occurrence.
pub fn parse_channel_list(contents: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| seen.insert(line.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_list() {
        let contents = "\
# news
UC_x5XG1OV2P6uZZ5FSM9Ttw

  @GoogleDevelopers
UC_x5XG1OV2P6uZZ5FSM9Ttw
#@disabled
https://www.youtube.com/@rustlang
";
        assert_eq!(
            parse_channel_list(contents),
            vec![
                "UC_x5XG1OV2P6uZZ5FSM9Ttw",
                "@GoogleDevelopers",
                "https://www.youtube.com/@rustlang",
            ]
        );
    }

    #[test]
    fn test_parse_empty_channel_list() {
        assert!(parse_channel_list("").is_empty());
        assert!(parse_channel_list("\n# only comments\n\n").is_empty());
    }
}
