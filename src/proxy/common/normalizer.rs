// Response normalizer
// JSON bodies are re-serialised, anything else is passed through as text

use serde_json::Value;

use super::response::{GatewayResponse, TEXT_CONTENT_TYPE};
use crate::proxy::upstream::UpstreamResponse;

/// Turn a buffered upstream response into the canonical gateway response.
///
/// Never fails: a body that is not JSON (an HTML error page, say) is an
/// expected branch and is returned verbatim with the upstream status.
pub fn normalize(response: &UpstreamResponse) -> GatewayResponse {
    if response.body.is_empty() {
        return GatewayResponse::json(response.status, &Value::Object(Default::default()));
    }

    // Invalid UTF-8 sequences become U+FFFD.
    let text = String::from_utf8_lossy(&response.body);

    match serde_json::from_str::<Value>(&text) {
        Ok(value) => GatewayResponse::json(response.status, &value),
        Err(e) => {
            tracing::debug!(
                "Upstream body is not JSON (status {}): {}",
                response.status,
                e
            );
            let content_type = response
                .content_type()
                .unwrap_or(TEXT_CONTENT_TYPE)
                .to_string();
            GatewayResponse::text(response.status, content_type, text.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use proptest::prelude::*;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
    use serde_json::json;

    fn upstream(status: u16, body: &str, content_type: Option<&'static str>) -> UpstreamResponse {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        UpstreamResponse {
            status,
            headers,
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_json_body_is_reserialised() {
        let resp = normalize(&upstream(200, "{ \"token\" : \"abc\" }", None));
        assert_eq!(resp.status, 200);
        assert_eq!(resp.content_type, "application/json");
        assert_eq!(&resp.body[..], br#"{"token":"abc"}"#);
    }

    #[test]
    fn test_key_order_is_preserved() {
        let resp = normalize(&upstream(200, r#"{"z":1,"a":2,"m":3}"#, None));
        assert_eq!(&resp.body[..], br#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn test_empty_body_becomes_empty_object() {
        let resp = normalize(&upstream(204, "", None));
        assert_eq!(resp.status, 204);
        assert_eq!(resp.json_body().unwrap(), json!({}));
    }

    #[test]
    fn test_whitespace_body_is_text() {
        let resp = normalize(&upstream(200, "  \n", Some("text/plain")));
        assert_eq!(resp.content_type, "text/plain");
        assert_eq!(&resp.body[..], b"  \n");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let resp = normalize(&UpstreamResponse {
            status: 200,
            headers: HeaderMap::new(),
            body: Bytes::from_static(b"caf\xE9"),
        });
        assert_eq!(resp.content_type, TEXT_CONTENT_TYPE);
        assert_eq!(&resp.body[..], "caf\u{FFFD}".as_bytes());
    }

    #[test]
    fn test_html_error_page_passes_through() {
        let resp = normalize(&upstream(502, "<html>error</html>", Some("text/html")));
        assert_eq!(resp.status, 502);
        assert_eq!(resp.content_type, "text/html");
        assert_eq!(&resp.body[..], b"<html>error</html>");
    }

    #[test]
    fn test_text_without_content_type_defaults_to_plain() {
        let resp = normalize(&upstream(500, "Server Error", None));
        assert_eq!(resp.content_type, TEXT_CONTENT_TYPE);
        assert_eq!(&resp.body[..], b"Server Error");
    }

    #[test]
    fn test_status_is_kept_for_json_errors() {
        let resp = normalize(&upstream(
            422,
            r#"{"message":"The name field is required."}"#,
            Some("application/json"),
        ));
        assert_eq!(resp.status, 422);
        assert_eq!(
            resp.json_body().unwrap()["message"],
            "The name field is required."
        );
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-zA-Z0-9 _-]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::vec(("[a-z]{1,6}", inner), 0..4)
                    .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_json_round_trips(value in arb_json(), status in 100u16..600) {
            let raw = serde_json::to_string_pretty(&value).unwrap();
            let resp = normalize(&upstream(status, &raw, None));
            prop_assert_eq!(resp.status, status);
            prop_assert_eq!(resp.json_body().unwrap(), value);
        }

        #[test]
        fn prop_non_json_text_is_unchanged(text in "<[a-z]{1,8}>[a-z ]{0,20}", status in 100u16..600) {
            let resp = normalize(&upstream(status, &text, None));
            prop_assert_eq!(resp.status, status);
            prop_assert_eq!(String::from_utf8(resp.body.to_vec()).unwrap(), text);
        }
    }
}
