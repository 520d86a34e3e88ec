//! Base-URL handling shared by all platform clients.

use reqwest::Url;

use crate::error::ConnectorError;

/// Parses a base URL, ensuring exactly one trailing slash so joins append to
/// the root path instead of replacing the last path segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ConnectorError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised)
        .map_err(|e| ConnectorError::Api(format!("invalid base URL '{base_url}': {e}")))
}

/// Joins a relative path onto the base URL.
pub(crate) fn join_url(base_url: &Url, path: &str) -> Result<Url, ConnectorError> {
    base_url
        .join(path)
        .map_err(|e| ConnectorError::Api(format!("invalid request path '{path}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_url_normalises_trailing_slash() {
        let url = parse_base_url("https://graph.facebook.com/v18.0").expect("valid");
        assert_eq!(url.as_str(), "https://graph.facebook.com/v18.0/");
        let url = parse_base_url("https://api.linkedin.com/").expect("valid");
        assert_eq!(url.as_str(), "https://api.linkedin.com/");
    }

    #[test]
    fn join_url_appends_to_path() {
        let base = parse_base_url("https://graph.facebook.com/v18.0").expect("valid");
        let url = join_url(&base, "act_987654/insights").expect("valid");
        assert_eq!(
            url.as_str(),
            "https://graph.facebook.com/v18.0/act_987654/insights"
        );
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
    }
}
