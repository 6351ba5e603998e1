//! Lexical URL features — everything derivable from the URL string alone.

use super::url_parts::UrlParts;
use super::{FeatureName, FeatureRecord};
use regex::Regex;
use std::sync::LazyLock;

/// Dotted-quad host, anchored. Octet ranges are not checked.
static IPV4_HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").unwrap());

/// Decimal digits (Unicode `Nd`). Fractions, Roman numerals and other
/// number forms are not digits.
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

/// Compute the sixteen lexical features for a URL.
///
/// Never fails: malformed input parses to empty components, and features
/// computed from empty components are zero.
pub fn extract_lexical(url: &str) -> FeatureRecord {
    let parts = UrlParts::parse(url);
    let mut record = FeatureRecord::new();

    record.set_count(FeatureName::NumDots, count_char(url, '.'));
    record.set_count(FeatureName::NumDash, count_char(url, '-'));
    record.set_count(FeatureName::UrlLength, url.chars().count());
    record.set_flag(FeatureName::AtSymbol, url.contains('@'));
    record.set_count(FeatureName::NumUnderscore, count_char(url, '_'));
    record.set_count(FeatureName::NumPercent, count_char(url, '%'));
    record.set_count(FeatureName::NumQueryComponents, count_char(url, '='));
    record.set_count(FeatureName::NumAmpersand, count_char(url, '&'));
    record.set_count(FeatureName::NumHash, count_char(url, '#'));
    record.set_count(FeatureName::NumNumericChars, DIGIT_RE.find_iter(url).count());
    record.set_flag(FeatureName::NoHttps, !starts_with_https(url));
    record.set_flag(FeatureName::IpAddress, is_ipv4_host(&parts.host));
    record.set_count(FeatureName::HostnameLength, parts.host_len());
    record.set_count(FeatureName::PathLength, parts.path_len());
    record.set_count(FeatureName::QueryLength, parts.query_len());
    record.set_flag(FeatureName::DoubleSlashInPath, parts.path.contains("//"));

    record
}

/// Whether a host string is a bare dotted-quad address.
pub fn is_ipv4_host(host: &str) -> bool {
    IPV4_HOST_RE.is_match(host)
}

fn count_char(s: &str, needle: char) -> usize {
    s.chars().filter(|&c| c == needle).count()
}

fn starts_with_https(url: &str) -> bool {
    url.get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("https"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(record: &FeatureRecord, name: FeatureName) -> f64 {
        record.get(name).unwrap()
    }

    #[test]
    fn test_always_produces_full_lexical_set() {
        for url in [
            "",
            "example.com",
            "http://",
            "::::",
            "https://пример.рф/путь?к=в",
            "\u{0}\u{7f}%%%",
            "http://[::1",
        ] {
            let record = extract_lexical(url);
            assert_eq!(record.len(), FeatureName::LEXICAL.len(), "url: {url:?}");
            for name in FeatureName::LEXICAL {
                assert!(record.contains(name), "{name} missing for {url:?}");
            }
            for name in FeatureName::HTML {
                assert!(!record.contains(name));
            }
        }
    }

    #[test]
    fn test_empty_url_is_all_zero_except_no_https() {
        let record = extract_lexical("");
        for (name, v) in record.iter() {
            let expected = if name == FeatureName::NoHttps { 1.0 } else { 0.0 };
            assert_eq!(v, expected, "{name}");
        }
    }

    #[test]
    fn test_counts() {
        let url = "http://my-site_x.example.com/a%20b?x=1&y=2&z=3#frag";
        let r = extract_lexical(url);
        assert_eq!(value(&r, FeatureName::NumDots), 2.0);
        assert_eq!(value(&r, FeatureName::NumDash), 1.0);
        assert_eq!(value(&r, FeatureName::NumUnderscore), 1.0);
        assert_eq!(value(&r, FeatureName::NumPercent), 1.0);
        assert_eq!(value(&r, FeatureName::NumQueryComponents), 3.0);
        assert_eq!(value(&r, FeatureName::NumAmpersand), 2.0);
        assert_eq!(value(&r, FeatureName::NumHash), 1.0);
        assert_eq!(value(&r, FeatureName::NumNumericChars), 5.0);
        assert_eq!(value(&r, FeatureName::UrlLength), url.len() as f64);
    }

    #[test]
    fn test_numeric_chars_counts_only_digits() {
        let r = extract_lexical("http://a.test/½Ⅻ");
        assert_eq!(value(&r, FeatureName::NumNumericChars), 0.0);

        // Arabic-Indic and full-width digits are decimal digits.
        let r = extract_lexical("http://a.test/٣٤?p=７");
        assert_eq!(value(&r, FeatureName::NumNumericChars), 3.0);

        let r = extract_lexical("http://h1.test/2024/¼");
        assert_eq!(value(&r, FeatureName::NumNumericChars), 5.0);
    }

    #[test]
    fn test_lengths() {
        let r = extract_lexical("https://login.bank.test/secure/verify?id=77");
        assert_eq!(value(&r, FeatureName::HostnameLength), 15.0);
        assert_eq!(value(&r, FeatureName::PathLength), 14.0);
        assert_eq!(value(&r, FeatureName::QueryLength), 5.0);
    }

    #[test]
    fn test_no_https_is_case_insensitive_prefix() {
        assert_eq!(value(&extract_lexical("HTTPS://Example.com/x"), FeatureName::NoHttps), 0.0);
        assert_eq!(value(&extract_lexical("https://example.com"), FeatureName::NoHttps), 0.0);
        assert_eq!(value(&extract_lexical("http://example.com"), FeatureName::NoHttps), 1.0);
        assert_eq!(value(&extract_lexical("example.com"), FeatureName::NoHttps), 1.0);
        assert_eq!(value(&extract_lexical("httpé://x"), FeatureName::NoHttps), 1.0);
    }

    #[test]
    fn test_ip_address_anchored() {
        assert!(is_ipv4_host("192.168.1.1"));
        assert!(is_ipv4_host("999.1.1.1"));
        assert!(!is_ipv4_host("192.168.1.1.1"));
        assert!(!is_ipv4_host("192.168.1"));
        assert!(!is_ipv4_host("example.com"));
        assert!(!is_ipv4_host("192.168.1.1:8080"));
        assert!(!is_ipv4_host(""));

        let r = extract_lexical("http://192.168.1.1/admin");
        assert_eq!(value(&r, FeatureName::IpAddress), 1.0);
        let r = extract_lexical("http://192.168.1.1.1/admin");
        assert_eq!(value(&r, FeatureName::IpAddress), 0.0);
        let r = extract_lexical("http://example.com/");
        assert_eq!(value(&r, FeatureName::IpAddress), 0.0);
    }

    #[test]
    fn test_at_symbol_and_double_slash() {
        let r = extract_lexical("http://paypal.com@evil.test//redirect");
        assert_eq!(value(&r, FeatureName::AtSymbol), 1.0);
        assert_eq!(value(&r, FeatureName::DoubleSlashInPath), 1.0);

        // The scheme separator is not part of the path.
        let r = extract_lexical("https://example.com/a/b");
        assert_eq!(value(&r, FeatureName::DoubleSlashInPath), 0.0);
        assert_eq!(value(&r, FeatureName::AtSymbol), 0.0);
    }

    #[test]
    fn test_scheme_less_url_has_no_host() {
        let r = extract_lexical("192.168.0.1/login");
        assert_eq!(value(&r, FeatureName::HostnameLength), 0.0);
        assert_eq!(value(&r, FeatureName::IpAddress), 0.0);
        assert_eq!(value(&r, FeatureName::PathLength), 17.0);
    }

    #[test]
    fn test_unicode_url_lengths_are_characters() {
        let r = extract_lexical("http://ä.de");
        assert_eq!(value(&r, FeatureName::UrlLength), 11.0);
        assert_eq!(value(&r, FeatureName::HostnameLength), 4.0);
    }

    #[test]
    fn test_end_to_end_example_lexical_part() {
        let r = extract_lexical("http://192.168.0.1/login?user=1&pass=2");
        assert_eq!(value(&r, FeatureName::IpAddress), 1.0);
        assert_eq!(value(&r, FeatureName::NoHttps), 1.0);
        assert_eq!(value(&r, FeatureName::NumAmpersand), 1.0);
        assert_eq!(value(&r, FeatureName::NumQueryComponents), 2.0);
        assert_eq!(value(&r, FeatureName::HostnameLength), 11.0);
        assert_eq!(value(&r, FeatureName::PathLength), 6.0);
        assert_eq!(value(&r, FeatureName::QueryLength), 13.0);
    }
}
