// Utility functions

use std::collections::HashMap;
use url::Url;

/// Values a client sends when it interpolated an unset identifier.
const PLACEHOLDER_VALUES: [&str; 2] = ["undefined", "null"];

/// Join `origin` and a path template such as `/clubs/{id}/members`.
///
/// Placeholders are substituted from `params` and percent-encoded as a single
/// segment; `query` is appended in the given order, repeated keys included.
pub fn build_upstream_url(
    origin: &Url,
    template: &str,
    params: &HashMap<String, String>,
    query: &[(String, String)],
) -> Result<Url, String> {
    let mut url = origin.clone();
    url.set_query(None);
    url.set_fragment(None);

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| format!("Upstream origin cannot be a base: {}", origin))?;
        segments.pop_if_empty();
        for segment in template.split('/').filter(|s| !s.is_empty()) {
            match segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                Some(name) => {
                    let value = params
                        .get(name)
                        .ok_or_else(|| format!("Missing path parameter: {}", name))?;
                    segments.push(value);
                }
                None => {
                    segments.push(segment);
                }
            }
        }
    }

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Parse a raw query string, keeping order and repeated keys.
pub fn parse_query(raw: Option<&str>) -> Vec<(String, String)> {
    raw.map(|qs| {
        url::form_urlencoded::parse(qs.as_bytes())
            .into_owned()
            .collect()
    })
    .unwrap_or_default()
}

/// True when a path parameter is absent, blank, or a client-side placeholder.
pub fn is_missing_param(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => true,
        Some(v) => v.is_empty() || PLACEHOLDER_VALUES.contains(&v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_url_with_origin_path_prefix() {
        let origin = Url::parse("https://api.example.com/api/").unwrap();
        let url = build_upstream_url(&origin, "/clubs/my-clubs", &HashMap::new(), &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/clubs/my-clubs");

        let origin = Url::parse("https://api.example.com/api").unwrap();
        let url = build_upstream_url(&origin, "/clubs/my-clubs", &HashMap::new(), &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/clubs/my-clubs");
    }

    #[test]
    fn test_build_url_substitutes_and_encodes_params() {
        let origin = Url::parse("http://localhost:8000").unwrap();
        let url = build_upstream_url(
            &origin,
            "/events/{id}/registrations",
            &params(&[("id", "a b/c")]),
            &[],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/events/a%20b%2Fc/registrations"
        );
    }

    #[test]
    fn test_build_url_keeps_query_order_and_repeats() {
        let origin = Url::parse("http://localhost:8000").unwrap();
        let query = vec![
            ("sport".to_string(), "tennis".to_string()),
            ("page".to_string(), "2".to_string()),
            ("sport".to_string(), "golf".to_string()),
        ];
        let url = build_upstream_url(&origin, "/events", &HashMap::new(), &query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/events?sport=tennis&page=2&sport=golf"
        );
    }

    #[test]
    fn test_build_url_missing_param_is_error() {
        let origin = Url::parse("http://localhost:8000").unwrap();
        let err = build_upstream_url(&origin, "/clubs/{id}", &HashMap::new(), &[]).unwrap_err();
        assert!(err.contains("id"));
    }

    #[test]
    fn test_parse_query() {
        assert!(parse_query(None).is_empty());
        assert_eq!(
            parse_query(Some("q=club%20a&tier=gold&tier=silver")),
            vec![
                ("q".to_string(), "club a".to_string()),
                ("tier".to_string(), "gold".to_string()),
                ("tier".to_string(), "silver".to_string()),
            ]
        );
    }

    #[test]
    fn test_is_missing_param() {
        assert!(is_missing_param(None));
        assert!(is_missing_param(Some("")));
        assert!(is_missing_param(Some("  ")));
        assert!(is_missing_param(Some("undefined")));
        assert!(is_missing_param(Some("null")));
        assert!(!is_missing_param(Some("42")));
    }
}
