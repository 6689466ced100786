use crate::ctx::request::PathParams;
use crate::ctx::request::RequestRejectError;
use crate::route::RouteDescriptor;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use url::Url;

// Origin used to resolve origin-form targets ("/users/7?x=1") that the local
// server hands over without scheme or authority.
static PLACEHOLDER_ORIGIN: Lazy<Url> =
    Lazy::new(|| Url::parse("http://localhost/").expect("static origin is a valid url"));

/// Parses a request target that is either origin-form or an absolute URL.
///
/// Dot segments are resolved by the parser (RFC 3986 §5.2.4), so `/a/../b`
/// becomes `/b` before params are resolved.
pub fn parse_request_target(raw: &str) -> Result<Url, RequestRejectError> {
    Url::options()
        .base_url(Some(&*PLACEHOLDER_ORIGIN))
        .parse(raw)
        .map_err(|source| RequestRejectError::InvalidUrl {
            url: raw.to_string(),
            source,
        })
}

/// Extracts the named captures of `route` from `path` by position.
///
/// The n-th non-empty component of `path` pairs with the n-th segment of the
/// route; dynamic segments take the percent-decoded component as their value.
/// Literal components are not compared here, the route was already selected.
///
/// A path with fewer components than the route is a caller bug. The missing
/// captures are left out instead of panicking.
pub fn resolve_path_params(path: &str, route: &RouteDescriptor) -> PathParams {
    let mut params = PathParams::default();
    let mut components = path.split('/').filter(|c| !c.is_empty());

    for segment in route.segments() {
        let Some(component) = components.next() else {
            tracing::debug!(
                route = %route,
                path,
                "request path is shorter than its route"
            );
            break;
        };

        if segment.is_dynamic() {
            let value = percent_decode_str(component).decode_utf8_lossy();
            params.insert(segment.name(), value);
        }
    }

    params
}
