//! URL and query string composition.

use folio_core::Params;
use serde_json::Value;
use urlencoding::encode;

/// Join a base URL and a path with exactly one slash between them.
///
/// ```
/// use folio_transport::join_url;
///
/// assert_eq!(join_url("https://api.storyblok.com/v2/", "/cdn/stories"), "https://api.storyblok.com/v2/cdn/stories");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

/// Serialize parameters in insertion order.
///
/// Arrays become `key[]=a&key[]=b` and objects `key[sub]=v`, with brackets
/// percent-encoded. Null values are skipped.
///
/// ```
/// use folio_core::Params;
/// use folio_transport::to_query_string;
///
/// let params = Params::new().with("is_startpage", false).with("search_term", "test");
/// assert_eq!(to_query_string(&params), "is_startpage=false&search_term=test");
/// ```
pub fn to_query_string(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params.iter() {
        push_pairs(&mut pairs, encode(key).into_owned(), value);
    }
    pairs.join("&")
}

fn push_pairs(pairs: &mut Vec<String>, prefix: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            let nested = format!("{prefix}{}", encode("[]"));
            for item in items {
                push_pairs(pairs, nested.clone(), item);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                let nested = format!("{prefix}{}", encode(&format!("[{key}]")));
                push_pairs(pairs, nested, item);
            }
        }
        Value::String(s) => pairs.push(format!("{prefix}={}", encode(s))),
        other => pairs.push(format!("{prefix}={}", encode(&other.to_string()))),
    }
}
