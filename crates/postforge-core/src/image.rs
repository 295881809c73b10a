//! Image URL lookup in provider responses

use serde_json::Value;

/// Where the image URL may appear, tried in order (JSON pointers)
pub const IMAGE_URL_PATHS: &[&str] = &["/data/url", "/url"];

/// Returned when the response carries no recognizable URL
pub const IMAGE_URL_PLACEHOLDER: &str = "Image generated (check API response format)";

/// First non-empty string found at one of [`IMAGE_URL_PATHS`]
pub fn find_image_url(body: &Value) -> Option<&str> {
    IMAGE_URL_PATHS
        .iter()
        .filter_map(|path| body.pointer(path))
        .filter_map(Value::as_str)
        .find(|url| !url.is_empty())
}

/// Image URL from a response, or the placeholder
pub fn extract_image_url(body: &Value) -> String {
    find_image_url(body)
        .unwrap_or(IMAGE_URL_PLACEHOLDER)
        .to_string()
}
