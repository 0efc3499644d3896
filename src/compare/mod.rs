//! Response classification.
//!
//! [`compare`] looks at two fetch outcomes and picks a strategy:
//!
//! | A       | B       | selectors | strategy                              |
//! |---------|---------|-----------|---------------------------------------|
//! | failed  | ok      | any       | trimmed error of A vs status of B     |
//! | ok      | failed  | any       | status of A vs trimmed error of B     |
//! | failed  | failed  | any       | text diff of both trimmed errors      |
//! | ok      | ok      | none      | structural JSON diff of the bodies    |
//! | ok      | ok      | some      | text diff per selected HTML element   |

use crate::diff::{diff_json, diff_text, HtmlDocument};
use crate::error::{ErrorContext, Result};
use crate::model::{
    Comparison, DiffFragment, FetchError, FetchOutcome, Fetcher, Response, Side, Strategy,
};
use std::time::Instant;

/// Reduce an error message to its tail starting at the last `:`.
///
/// This strips the host and address prefix that differs between the two
/// sides, e.g. `dial tcp 10.0.0.1:80: connection refused` becomes
/// `: connection refused`. A message without `:` is returned unchanged.
#[must_use]
pub fn trim_error_host(message: &str) -> &str {
    message.rfind(':').map_or(message, |idx| &message[idx..])
}

fn trimmed(err: &FetchError) -> &str {
    trim_error_host(err.message())
}

/// Compare two fetch outcomes.
///
/// Fetch failures become fragments rather than errors. Body read failures,
/// malformed JSON and invalid selectors abort the comparison.
pub fn compare(a: FetchOutcome, b: FetchOutcome, selectors: Option<&[String]>) -> Result<Comparison> {
    match (a, b) {
        (Err(err_a), Ok(resp_b)) => {
            tracing::debug!(error = err_a.message(), "side A failed to fetch");
            let fragments = vec![
                DiffFragment::deletion(trimmed(&err_a)),
                DiffFragment::insertion(resp_b.status()),
            ];
            Ok(Comparison::new(Strategy::FetchFailure, fragments))
        }
        (Ok(resp_a), Err(err_b)) => {
            tracing::debug!(error = err_b.message(), "side B failed to fetch");
            let fragments = vec![
                DiffFragment::deletion(resp_a.status()),
                DiffFragment::insertion(trimmed(&err_b)),
            ];
            Ok(Comparison::new(Strategy::FetchFailure, fragments))
        }
        (Err(err_a), Err(err_b)) => {
            tracing::debug!("both sides failed to fetch, diffing error messages");
            let fragments = diff_text(trimmed(&err_a), trimmed(&err_b));
            Ok(Comparison::new(Strategy::ErrorText, fragments))
        }
        (Ok(resp_a), Ok(resp_b)) => match selectors {
            None => compare_json(resp_a, resp_b),
            Some(selectors) => compare_html(resp_a, resp_b, selectors),
        },
    }
}

fn read_side(resp: Response, side: Side) -> Result<Vec<u8>> {
    resp.read_body().with_context(|| format!("side {side}"))
}

fn compare_json(resp_a: Response, resp_b: Response) -> Result<Comparison> {
    tracing::debug!("comparing bodies as JSON");
    let body_a = read_side(resp_a, Side::A)?;
    let body_b = read_side(resp_b, Side::B)?;
    let fragments = diff_json(&body_a, &body_b)?;
    Ok(Comparison::new(Strategy::Json, fragments))
}

fn compare_html(resp_a: Response, resp_b: Response, selectors: &[String]) -> Result<Comparison> {
    tracing::debug!(selectors = selectors.len(), "comparing selected HTML elements");
    let doc_a = HtmlDocument::parse(&read_side(resp_a, Side::A)?);
    let doc_b = HtmlDocument::parse(&read_side(resp_b, Side::B)?);

    let mut fragments = Vec::new();
    for selector in selectors {
        let text_a = doc_a.extract_text(selector)?;
        let text_b = doc_b.extract_text(selector)?;
        let found = diff_text(&text_a, &text_b);
        tracing::debug!(selector = %selector, fragments = found.len(), "element compared");
        fragments.extend(found);
    }
    Ok(Comparison::new(Strategy::Html, fragments))
}

/// Fetch both URLs with `fetcher` (A first, then B) and compare them.
pub fn compare_urls(
    fetcher: &impl Fetcher,
    url_a: &str,
    url_b: &str,
    selectors: Option<&[String]>,
) -> Result<Comparison> {
    let start = Instant::now();
    let a = fetcher.fetch(url_a);
    tracing::debug!(url = url_a, ok = a.is_ok(), elapsed = ?start.elapsed(), "fetched side A");

    let start = Instant::now();
    let b = fetcher.fetch(url_b);
    tracing::debug!(url = url_b, ok = b.is_ok(), elapsed = ?start.elapsed(), "fetched side B");

    compare(a, b, selectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RespDiffError;
    use std::collections::HashMap;

    fn ok(body: &str) -> FetchOutcome {
        Ok(Response::from_bytes(200, "200 OK", body.as_bytes().to_vec()))
    }

    fn refused(host: &str) -> FetchOutcome {
        Err(FetchError::new(format!(
            "dial tcp {host}:80: connection refused"
        )))
    }

    #[test]
    fn test_trim_error_host() {
        assert_eq!(
            trim_error_host("dial tcp 127.0.0.1:80: connection refused"),
            ": connection refused"
        );
        assert_eq!(trim_error_host("timeout"), "timeout");
        assert_eq!(trim_error_host("ends with:"), ":");
        assert_eq!(trim_error_host(""), "");
    }

    #[test]
    fn test_a_failed_b_ok() {
        let result = compare(refused("10.0.0.1"), ok("{}"), None).unwrap();
        assert_eq!(result.strategy, Strategy::FetchFailure);
        assert_eq!(
            result.fragments,
            vec![
                DiffFragment::deletion(": connection refused"),
                DiffFragment::insertion("200 OK"),
            ]
        );
    }

    #[test]
    fn test_b_failed_a_ok() {
        let a = Ok(Response::from_bytes(404, "404 Not Found", Vec::new()));
        let result = compare(a, refused("10.0.0.2"), Some(&["h1".to_string()][..])).unwrap();
        assert_eq!(
            result.fragments,
            vec![
                DiffFragment::deletion("404 Not Found"),
                DiffFragment::insertion(": connection refused"),
            ]
        );
    }

    #[test]
    fn test_both_failed_same_tail_is_empty() {
        let result = compare(refused("10.0.0.1"), refused("10.0.0.2"), None).unwrap();
        assert_eq!(result.strategy, Strategy::ErrorText);
        assert!(result.is_empty());
    }

    #[test]
    fn test_both_failed_different_tails() {
        let a = Err(FetchError::new("get x: connection refused"));
        let b = Err(FetchError::new("get y: connection reset"));
        let result = compare(a, b, None).unwrap();
        assert_eq!(result.strategy, Strategy::ErrorText);
        assert!(result.insertions() >= 1 && result.deletions() >= 1);
    }

    #[test]
    fn test_json_path() {
        let result = compare(ok(r#"{"a":1}"#), ok(r#"{"a":2}"#), None).unwrap();
        assert_eq!(result.strategy, Strategy::Json);
        assert_eq!(result.deletions(), 1);
        assert_eq!(result.insertions(), 1);
    }

    #[test]
    fn test_json_path_rejects_html() {
        let err = compare(ok("<h1>Hi</h1>"), ok(r#"{"a":2}"#), None).unwrap_err();
        assert!(matches!(err, RespDiffError::Json { .. }));
    }

    #[test]
    fn test_html_path_in_selector_order() {
        let a = ok("<h1>Hello</h1><p>same</p><footer>v1</footer>");
        let b = ok("<h1>Hi</h1><p>same</p><footer>v2</footer>");
        let selectors = vec!["footer".to_string(), "p".to_string(), "h1".to_string()];
        let result = compare(a, b, Some(selectors.as_slice())).unwrap();
        assert_eq!(result.strategy, Strategy::Html);
        assert_eq!(
            result.fragments,
            vec![
                DiffFragment::deletion("1"),
                DiffFragment::insertion("2"),
                DiffFragment::deletion("ello"),
                DiffFragment::insertion("i"),
            ]
        );
    }

    #[test]
    fn test_selector_matching_nothing() {
        let selectors = vec!["table".to_string()];
        let result = compare(ok("<p>a</p>"), ok("<p>b</p>"), Some(selectors.as_slice())).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_selector_list_compares_nothing() {
        let result = compare(ok("<p>a</p>"), ok("<p>b</p>"), Some(&[][..])).unwrap();
        assert_eq!(result.strategy, Strategy::Html);
        assert!(result.is_empty());
    }

    struct MapFetcher(HashMap<&'static str, &'static str>);

    impl Fetcher for MapFetcher {
        fn fetch(&self, url: &str) -> FetchOutcome {
            match self.0.get(url) {
                Some(body) => ok(body),
                None => Err(FetchError::new(format!("get {url}: no such host"))),
            }
        }
    }

    #[test]
    fn test_compare_urls_uses_fetcher() {
        let fetcher = MapFetcher(HashMap::from([("http://a", r#"{"v":[1,2]}"#)]));
        let result = compare_urls(&fetcher, "http://a", "http://b", None).unwrap();
        assert_eq!(
            result.fragments,
            vec![
                DiffFragment::deletion("200 OK"),
                DiffFragment::insertion(": no such host"),
            ]
        );
    }
}
