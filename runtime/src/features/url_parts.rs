//! Split a URL string into scheme, authority, path, query and fragment.
//!
//! This is a generic-URI split, not a WHATWG parse: nothing is normalized,
//! percent-decoded, or validated, and scheme-less input such as
//! `example.com/login` keeps everything in the path. The trained model saw
//! components produced this way, so the lengths must be measured the same way.
//! Splitting never fails.

/// Schemes whose last path segment may carry `;params`.
const PARAM_SCHEMES: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtsps", "rtspu",
    "sip", "sips", "mms", "sftp", "tel",
];

/// Components of a URL. Missing components are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: String,
    /// Full authority (`user@host:port`), not just the hostname.
    pub host: String,
    pub path: String,
    pub params: String,
    pub query: String,
    pub fragment: String,
}

impl UrlParts {
    pub fn parse(url: &str) -> Self {
        let cleaned: String = url
            .trim_start_matches(|c: char| c <= ' ')
            .chars()
            .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
            .collect();
        let mut rest = cleaned.as_str();
        let mut parts = UrlParts::default();

        if let Some((scheme, after)) = split_scheme(rest) {
            parts.scheme = scheme.to_ascii_lowercase();
            rest = after;
        }

        if let Some(after_slashes) = rest.strip_prefix("//") {
            let end = after_slashes
                .find(['/', '?', '#'])
                .unwrap_or(after_slashes.len());
            parts.host = after_slashes[..end].to_string();
            rest = &after_slashes[end..];
        }

        if let Some((before, fragment)) = rest.split_once('#') {
            parts.fragment = fragment.to_string();
            rest = before;
        }
        if let Some((before, query)) = rest.split_once('?') {
            parts.query = query.to_string();
            rest = before;
        }

        if PARAM_SCHEMES.contains(&parts.scheme.as_str()) && rest.contains(';') {
            let (path, params) = split_params(rest);
            parts.path = path.to_string();
            parts.params = params.to_string();
        } else {
            parts.path = rest.to_string();
        }

        parts
    }

    /// Authority length in characters.
    pub fn host_len(&self) -> usize {
        self.host.chars().count()
    }

    pub fn path_len(&self) -> usize {
        self.path.chars().count()
    }

    pub fn query_len(&self) -> usize {
        self.query.chars().count()
    }
}

/// Authority of a URL, or an empty string when it has none.
pub fn host_of(url: &str) -> String {
    UrlParts::parse(url).host
}

fn split_scheme(url: &str) -> Option<(&str, &str)> {
    let colon = url.find(':')?;
    let candidate = &url[..colon];
    let mut chars = candidate.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some((candidate, &url[colon + 1..]))
}

/// Params attach to the last segment only; without a `/` the first `;` wins.
fn split_params(path: &str) -> (&str, &str) {
    let idx = match path.rfind('/') {
        Some(slash) => match path[slash..].find(';') {
            Some(offset) => slash + offset,
            None => return (path, ""),
        },
        None => match path.find(';') {
            Some(i) => i,
            None => return (path, ""),
        },
    };
    (&path[..idx], &path[idx + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        let p = UrlParts::parse("http://192.168.0.1/login?user=1&pass=2#top");
        assert_eq!(p.scheme, "http");
        assert_eq!(p.host, "192.168.0.1");
        assert_eq!(p.path, "/login");
        assert_eq!(p.query, "user=1&pass=2");
        assert_eq!(p.fragment, "top");
    }

    #[test]
    fn test_authority_keeps_userinfo_and_port() {
        let p = UrlParts::parse("https://admin@Example.COM:8443/a");
        assert_eq!(p.scheme, "https");
        assert_eq!(p.host, "admin@Example.COM:8443");
        assert_eq!(p.path, "/a");
    }

    #[test]
    fn test_no_scheme_is_all_path() {
        let p = UrlParts::parse("example.com/login");
        assert_eq!(p.scheme, "");
        assert_eq!(p.host, "");
        assert_eq!(p.path, "example.com/login");
    }

    #[test]
    fn test_scheme_is_lowercased_and_path_not_defaulted() {
        let p = UrlParts::parse("HTTPS://Example.com");
        assert_eq!(p.scheme, "https");
        assert_eq!(p.host, "Example.com");
        assert_eq!(p.path, "");
    }

    #[test]
    fn test_host_port_without_slashes() {
        // "localhost" is a valid scheme token, so the rest is path.
        let p = UrlParts::parse("localhost:8080/x");
        assert_eq!(p.scheme, "localhost");
        assert_eq!(p.host, "");
        assert_eq!(p.path, "8080/x");
    }

    #[test]
    fn test_invalid_scheme_chars() {
        let p = UrlParts::parse("1http://example.com");
        assert_eq!(p.scheme, "");
        assert_eq!(p.path, "1http://example.com");
    }

    #[test]
    fn test_params_split_from_last_segment() {
        let p = UrlParts::parse("http://h.test/a;x/b;type=i?q=1");
        assert_eq!(p.path, "/a;x/b");
        assert_eq!(p.params, "type=i");
        assert_eq!(p.query, "q=1");
    }

    #[test]
    fn test_params_ignored_for_other_schemes() {
        let p = UrlParts::parse("data:text/plain;base64,AAAA");
        assert_eq!(p.scheme, "data");
        assert_eq!(p.path, "text/plain;base64,AAAA");
        assert_eq!(p.params, "");
    }

    #[test]
    fn test_control_chars_removed() {
        let p = UrlParts::parse("  \thttp://exa\nmple.com/p\tath");
        assert_eq!(p.host, "example.com");
        assert_eq!(p.path, "/path");
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(UrlParts::parse(""), UrlParts::default());
        let p = UrlParts::parse("http://[::1");
        assert_eq!(p.host, "[::1");
        let p = UrlParts::parse("://");
        assert_eq!(p.scheme, "");
        assert_eq!(p.path, "://");
    }

    #[test]
    fn test_unicode_lengths_are_chars() {
        let p = UrlParts::parse("http://bücher.de/straße");
        assert_eq!(p.host_len(), 9);
        assert_eq!(p.path_len(), 7);
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://good.test/login"), "good.test");
        assert_eq!(host_of("/login"), "");
        assert_eq!(host_of("//cdn.test/x.js"), "cdn.test");
    }
}
