use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::normalize::normalize_phone;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_.%+-]+@[A-Za-z0-9_.-]+\.[A-Za-z]{2,}").unwrap());

// Optional +84 / 84 / 0 prefix, then three digit groups with optional
// space, dot or hyphen separators.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+84|84|0)[\s.-]?[0-9]{1,3}[\s.-]?[0-9]{3,4}[\s.-]?[0-9]{3,4}").unwrap()
});

/// First syntactic email address in the text, lower-cased.
///
/// No deliverability or TLD checks.
pub fn extract_email(text: &str) -> Option<String> {
    extract_email_with_config(text, &ParsingConfig::default())
}

pub(crate) fn extract_email_with_config(text: &str, config: &ParsingConfig) -> Option<String> {
    let re = config.email_re.as_ref().unwrap_or(&EMAIL_RE);
    re.find(text).map(|m| m.as_str().to_lowercase())
}

/// First Vietnamese-style phone number in the text, normalized.
pub fn extract_phone(text: &str) -> Option<String> {
    extract_phone_with_config(text, &ParsingConfig::default())
}

pub(crate) fn extract_phone_with_config(text: &str, config: &ParsingConfig) -> Option<String> {
    let re = config.phone_re.as_ref().unwrap_or(&PHONE_RE);
    re.find(text).map(|m| normalize_phone(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_lowercased() {
        assert_eq!(
            extract_email("Contact: jane.doe+hr@Example.CO.uk for details").as_deref(),
            Some("jane.doe+hr@example.co.uk")
        );
    }

    #[test]
    fn test_first_email_wins() {
        let text = "Email: an.nguyen@gmail.com\nBackup: an@company.vn";
        assert_eq!(extract_email(text).as_deref(), Some("an.nguyen@gmail.com"));
    }

    #[test]
    fn test_email_stops_at_vietnamese_text() {
        let text = "Liên hệ:vothaibao50@gmail.com(ưu tiên)";
        assert_eq!(extract_email(text).as_deref(), Some("vothaibao50@gmail.com"));
    }

    #[test]
    fn test_no_email() {
        assert_eq!(extract_email("no at sign here"), None);
        assert_eq!(extract_email("user@localhost"), None);
    }

    #[test]
    fn test_phone_hyphen_and_space() {
        assert_eq!(
            extract_phone("Điện thoại: 090-123 4567").as_deref(),
            Some("090 123 4567")
        );
    }

    #[test]
    fn test_phone_country_code() {
        assert_eq!(
            extract_phone("SĐT: +84 945 446 761").as_deref(),
            Some("+84 945 446 761")
        );
    }

    #[test]
    fn test_phone_dotted_kept() {
        assert_eq!(
            extract_phone("Phone 0901.234.567").as_deref(),
            Some("0901.234.567")
        );
    }

    #[test]
    fn test_phone_compact() {
        assert_eq!(extract_phone("Tel:0987654321").as_deref(), Some("0987654321"));
    }

    #[test]
    fn test_no_phone() {
        assert_eq!(extract_phone("Phone: not provided"), None);
        assert_eq!(extract_phone("Room 12"), None);
    }

    #[test]
    fn test_custom_email_regex() {
        use crate::ParsingConfigBuilder;
        let config = ParsingConfigBuilder::new()
            .email_regex(r"[a-z]+@company\.vn")
            .build()
            .unwrap();
        let text = "personal: a@gmail.com work: hr@company.vn";
        assert_eq!(
            extract_email_with_config(text, &config).as_deref(),
            Some("hr@company.vn")
        );
    }
}
