use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::normalize::normalize_institution;
use crate::text_processing::char_len;

/// Institution prefixes in priority order. Each captures up to 100 trailing
/// characters and stops at a newline, comma, semicolon or period.
pub(crate) static DEFAULT_UNIVERSITY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:trường\s+)?đại\s+học\s+[^\r\n,;.]{2,100}",
        r"(?i)(?:trường\s+)?university\s+[^\r\n,;.]{2,100}",
        r"(?i)(?:trường\s+)?học\s+viện\s+[^\r\n,;.]{2,100}",
        r"(?i)(?:trường\s+)?cao\s+đẳng\s+[^\r\n,;.]{2,100}",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Find the candidate's university.
///
/// The first pattern with any match wins. Among that pattern's matches the
/// longest is taken, on the assumption that the longer mention is the more
/// complete institution name; on equal length the earlier mention is kept.
pub fn extract_university(text: &str) -> Option<String> {
    extract_university_with_config(text, &ParsingConfig::default())
}

pub(crate) fn extract_university_with_config(text: &str, config: &ParsingConfig) -> Option<String> {
    let patterns = config.university_patterns.resolve(&DEFAULT_UNIVERSITY_PATTERNS);

    for re in &patterns {
        let mut best: Option<&str> = None;
        for m in re.find_iter(text) {
            let candidate = m.as_str();
            if best.is_none_or(|b| char_len(candidate) > char_len(b)) {
                best = Some(candidate);
            }
        }
        if let Some(found) = best {
            let name = normalize_institution(found);
            if !name.is_empty() {
                return Some(name);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_match_wins() {
        let text = "Học vấn\nĐại học Bách Khoa\n2016 - 2020\nTốt nghiệp Đại học Bách Khoa Thành phố Hồ Chí Minh";
        assert_eq!(
            extract_university(text).as_deref(),
            Some("Đại học Bách Khoa Thành phố Hồ Chí Minh")
        );
    }

    #[test]
    fn test_stops_at_punctuation() {
        let text = "Trường Đại học Kinh tế Quốc dân, Hà Nội";
        assert_eq!(
            extract_university(text).as_deref(),
            Some("Trường Đại học Kinh tế Quốc dân")
        );
        let text = "University of Economics; GPA 3.2";
        assert_eq!(
            extract_university(text).as_deref(),
            Some("University of Economics")
        );
    }

    #[test]
    fn test_priority_order() {
        // "Đại học" outranks "Học viện" even though it appears later.
        let text = "Học viện Công nghệ Bưu chính Viễn thông\nĐại học FPT";
        assert_eq!(extract_university(text).as_deref(), Some("Đại học FPT"));
    }

    #[test]
    fn test_hoc_vien_and_cao_dang() {
        assert_eq!(
            extract_university("Học viện Kỹ thuật Mật mã").as_deref(),
            Some("Học viện Kỹ thuật Mật mã")
        );
        assert_eq!(
            extract_university("Cao đẳng FPT Polytechnic").as_deref(),
            Some("Cao đẳng FPT Polytechnic")
        );
    }

    #[test]
    fn test_equal_length_keeps_first() {
        let text = "Đại học AAAA\nĐại học BBBB";
        assert_eq!(extract_university(text).as_deref(), Some("Đại học AAAA"));
    }

    #[test]
    fn test_whitespace_collapsed() {
        let text = "ĐẠI  HỌC   QUỐC GIA   HÀ NỘI";
        assert_eq!(
            extract_university(text).as_deref(),
            Some("ĐẠI HỌC QUỐC GIA HÀ NỘI")
        );
    }

    #[test]
    fn test_caps_capture_at_100_chars() {
        let long_name = "A".repeat(150);
        let text = format!("University {long_name}");
        let found = extract_university(&text).unwrap();
        assert_eq!(char_len(&found), "University ".len() + 100);
    }

    #[test]
    fn test_none() {
        assert_eq!(extract_university("Self-taught developer"), None);
    }

    #[test]
    fn test_configured_patterns() {
        use crate::ParsingConfigBuilder;
        let text = "Graduated from Institute of Technology Bandung";

        let extended = ParsingConfigBuilder::new()
            .add_university_pattern(r"(?i)institute\s+of\s+[^\r\n,;.]{2,100}".to_string())
            .build()
            .unwrap();
        assert_eq!(
            extract_university_with_config(text, &extended).as_deref(),
            Some("Institute of Technology Bandung")
        );

        let replaced = ParsingConfigBuilder::new()
            .set_university_patterns(vec![r"(?i)học\s+viện\s+\S+".to_string()])
            .build()
            .unwrap();
        assert_eq!(
            extract_university_with_config("Đại học FPT", &replaced),
            None
        );
    }
}
