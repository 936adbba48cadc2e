use http::HeaderMap;
use http::header::ACCEPT;

/// Decides whether a client accepts a JSON representation
///
/// Injected into the normalization layer so the representation choice can
/// be exercised in tests without header parsing. Called once per request,
/// before the wrapped service runs.
pub trait Negotiator: Send + Sync {
    /// Whether the request's accept preferences admit `application/json`
    fn accepts_json(&self, headers: &HeaderMap) -> bool;
}

/// Default negotiator backed by the request's `Accept` header
///
/// JSON is admitted by an exact `application/json` range, an
/// `application/*` range, or `*/*`, each with a non-zero `q` weight.
/// A request carrying no parseable media range expresses no preference
/// and defaults to JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptHeader;

impl Negotiator for AcceptHeader {
    fn accepts_json(&self, headers: &HeaderMap) -> bool {
        let mut saw_range = false;

        for value in headers.get_all(ACCEPT) {
            let Ok(text) = value.to_str() else { continue };
            for segment in text.split(',') {
                let Some((range, quality)) = media_range(segment) else {
                    continue;
                };
                saw_range = true;
                if quality > 0.0 && admits_json(range) {
                    return true;
                }
            }
        }

        !saw_range
    }
}

/// Split one `Accept` segment into its media range and `q` weight
///
/// Parameters other than `q` are ignored; an unparseable `q` keeps the
/// default weight of 1.
fn media_range(segment: &str) -> Option<(&str, f32)> {
    let mut parts = segment.split(';');
    let range = parts.next()?.trim();
    if range.is_empty() {
        return None;
    }

    let mut quality = 1.0_f32;
    for param in parts {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case("q")
            && let Ok(parsed) = value.trim().parse::<f32>()
        {
            quality = parsed;
        }
    }

    Some((range, quality))
}

fn admits_json(range: &str) -> bool {
    range == "*/*"
        || range.eq_ignore_ascii_case("application/*")
        || range.eq_ignore_ascii_case("application/json")
}
