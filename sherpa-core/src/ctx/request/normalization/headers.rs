use crate::ctx::request::Headers;
use http::{HeaderMap, HeaderName, HeaderValue};

/// Builds a case-insensitive [`Headers`] value from runtime-native name/value pairs.
///
/// - Header names are canonicalized to lowercase (RFC 9110 §5.1).
/// - Leading and trailing whitespace is stripped from values (RFC 9112 §5.1).
/// - Repeated fields are folded into one comma-separated value (RFC 9110 §5.3),
///   in delivery order.
///
/// Never fails. Pairs whose name or value cannot be represented as an HTTP field
/// are dropped, and an empty input yields empty headers.
pub fn normalize_headers<I, N, V>(pairs: I) -> Headers
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: AsRef<[u8]>,
{
    let mut out = HeaderMap::new();

    for (name, value) in pairs {
        let name = name.as_ref();

        let canonical_name = match HeaderName::from_bytes(name.to_ascii_lowercase().as_bytes()) {
            Ok(h) => h,
            Err(_) => {
                tracing::debug!(header = name, "dropping header with invalid name");
                continue;
            }
        };

        let trimmed = value.as_ref().trim_ascii();

        if HeaderValue::from_bytes(trimmed).is_err() {
            tracing::debug!(header = name, "dropping header with invalid value");
            continue;
        }

        match out.get_mut(&canonical_name) {
            Some(existing) => {
                let mut merged = existing.as_bytes().to_vec();
                merged.extend_from_slice(b", ");
                merged.extend_from_slice(trimmed);

                // Both halves were valid field values, and so is ", ".
                if let Ok(v) = HeaderValue::from_bytes(&merged) {
                    *existing = v;
                }
            }
            None => {
                if let Ok(v) = HeaderValue::from_bytes(trimmed) {
                    out.insert(canonical_name, v);
                }
            }
        }
    }

    Headers::new(out)
}

/// Convenience for runtimes that already hand out an [`http::HeaderMap`].
pub fn normalize_header_map(raw: &HeaderMap) -> Headers {
    normalize_headers(
        raw.iter()
            .map(|(name, value)| (name.as_str(), value.as_bytes())),
    )
}
