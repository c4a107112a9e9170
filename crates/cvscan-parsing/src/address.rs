use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::normalize::HCM_CANONICAL;

/// A city pattern and the label to store when it matches.
///
/// With `canonical == None` the matched text is stored as found.
#[derive(Debug, Clone)]
pub struct AddressPattern {
    pub regex: Regex,
    pub canonical: Option<String>,
}

impl AddressPattern {
    pub fn new(pattern: &str, canonical: Option<&str>) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            canonical: canonical.map(str::to_string),
        })
    }
}

/// Built-in city patterns in priority order. Each tolerates missing or
/// substituted diacritics (`Ha Noi`, `Da Nang`).
pub(crate) static DEFAULT_ADDRESS_PATTERNS: Lazy<Vec<AddressPattern>> = Lazy::new(|| {
    [
        (
            r"(?i)(?:\bTP\.?\s*|\bThành\s+phố\s+)H[ồôo]\s*Ch[íi]\s*Minh\b",
            None,
        ),
        (r"(?i)\bTP\.?\s*HCM\b|\bHCMC\b", Some(HCM_CANONICAL)),
        (r"(?i)\bH[ồôo]\s*Ch[íi]\s*Minh\b", None),
        (r"(?i)\bH[àa]\s*N[ộôo]i\b", None),
        (r"(?i)\b[ĐD][àa]\s*N[ẵăa]ng\b", None),
        (r"(?i)\bC[ầâa]n\s*Th[ơo]\b", None),
        (r"(?i)\bH[ảa]i\s*Ph[òo]ng\b", None),
        (r"(?i)\bNha\s*Trang\b", None),
    ]
    .into_iter()
    .map(|(pattern, canonical)| AddressPattern::new(pattern, canonical).unwrap())
    .collect()
});

/// Find the candidate's city.
///
/// Patterns are tried in priority order; the first one that matches
/// anywhere in the text wins, regardless of where in the text it matched.
pub fn extract_address(text: &str) -> Option<String> {
    extract_address_with_config(text, &ParsingConfig::default())
}

pub(crate) fn extract_address_with_config(text: &str, config: &ParsingConfig) -> Option<String> {
    let patterns = config.address_patterns.resolve(&DEFAULT_ADDRESS_PATTERNS);
    patterns.iter().find_map(|p| {
        p.regex.find(text).map(|m| match &p.canonical {
            Some(label) => label.clone(),
            None => m.as_str().to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_hcm_name_kept_as_found() {
        assert_eq!(
            extract_address("Địa chỉ: Quận 1, TP. Hồ Chí Minh").as_deref(),
            Some("TP. Hồ Chí Minh")
        );
        assert_eq!(
            extract_address("Sống tại Thành phố Hồ Chí Minh").as_deref(),
            Some("Thành phố Hồ Chí Minh")
        );
    }

    #[test]
    fn test_hcm_abbreviation_is_canonicalized() {
        assert_eq!(extract_address("Quận 7, TP.HCM").as_deref(), Some(HCM_CANONICAL));
        assert_eq!(extract_address("tp hcm").as_deref(), Some(HCM_CANONICAL));
        assert_eq!(extract_address("Based in HCMC").as_deref(), Some(HCM_CANONICAL));
    }

    #[test]
    fn test_other_cities_as_found() {
        assert_eq!(extract_address("Cầu Giấy, Hà Nội").as_deref(), Some("Hà Nội"));
        assert_eq!(extract_address("Ha Noi, Vietnam").as_deref(), Some("Ha Noi"));
        assert_eq!(extract_address("Hải Châu, Đà Nẵng").as_deref(), Some("Đà Nẵng"));
        assert_eq!(extract_address("Ninh Kiều, Cần Thơ").as_deref(), Some("Cần Thơ"));
        assert_eq!(extract_address("Lê Chân, Hải Phòng").as_deref(), Some("Hải Phòng"));
        assert_eq!(extract_address("Khánh Hòa - Nha Trang").as_deref(), Some("Nha Trang"));
    }

    #[test]
    fn test_priority_order_beats_text_order() {
        // Hà Nội appears first in the text but HCM has higher priority.
        let text = "Quê quán: Hà Nội\nNơi ở hiện tại: TP.HCM";
        assert_eq!(extract_address(text).as_deref(), Some(HCM_CANONICAL));
    }

    #[test]
    fn test_no_false_positive_inside_words() {
        assert_eq!(extract_address("I can thoroughly test code"), None);
        assert_eq!(extract_address("no city here"), None);
    }

    #[test]
    fn test_custom_city_pattern() {
        use crate::ParsingConfigBuilder;
        let config = ParsingConfigBuilder::new()
            .add_address_pattern(r"(?i)\bBiên\s*Hòa\b", Some("Biên Hòa"))
            .build()
            .unwrap();
        assert_eq!(
            extract_address_with_config("Sống ở bien hoa, Đồng Nai", &config),
            None
        );
        assert_eq!(
            extract_address_with_config("Sống ở Biên  Hòa, Đồng Nai", &config).as_deref(),
            Some("Biên Hòa")
        );
    }

    #[test]
    fn test_replaced_city_patterns() {
        use crate::ParsingConfigBuilder;
        let config = ParsingConfigBuilder::new()
            .set_address_patterns(vec![(r"(?i)\bVũng\s*Tàu\b".to_string(), None)])
            .build()
            .unwrap();
        let text = "Hà Nội, sau đó chuyển về Vũng Tàu";
        assert_eq!(
            extract_address_with_config(text, &config).as_deref(),
            Some("Vũng Tàu")
        );
        assert_eq!(extract_address(text).as_deref(), Some("Hà Nội"));
    }
}
