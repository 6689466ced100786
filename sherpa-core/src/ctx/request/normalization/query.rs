use crate::ctx::request::QueryParams;
use url::form_urlencoded;

/// Parses a raw query string (without the leading `?`) into a multi-value mapping.
///
/// Decoding follows `application/x-www-form-urlencoded`: `+` is a space and
/// percent-escapes are decoded. A key without `=` maps to the empty string.
/// Repeated keys collect every value in the order they appear.
pub fn parse_query(query: Option<&str>) -> QueryParams {
    let mut params = QueryParams::default();

    let Some(query) = query else {
        return params;
    };

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params.append(key.into_owned(), value.into_owned());
    }

    params
}
