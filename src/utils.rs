use rand::{Rng, distr::Alphanumeric};

use crate::types::Image;

pub const STATE_LENGTH: usize = 32;
pub const DEFAULT_TOP_LIMIT: u32 = 20;
pub const DEFAULT_TIME_RANGE: &str = "medium_term";

/// Random alphanumeric value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// Parses the `limit` query value from its leading digits, so `"5abc"` is 5.
///
/// Falls back to [`DEFAULT_TOP_LIMIT`] when there are no leading digits or
/// the value is zero or does not fit.
pub fn parse_limit(raw: Option<&str>) -> u32 {
    raw.map(|v| {
        let v = v.trim_start();
        let v = v.strip_prefix('+').unwrap_or(v);
        let end = v.find(|c: char| !c.is_ascii_digit()).unwrap_or(v.len());
        &v[..end]
    })
    .and_then(|digits| digits.parse::<u32>().ok())
    .filter(|limit| *limit > 0)
    .unwrap_or(DEFAULT_TOP_LIMIT)
}

pub fn first_image_url(images: &[Image]) -> Option<String> {
    images.first().map(|image| image.url.clone())
}

/// Treats empty and whitespace-only query values as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
