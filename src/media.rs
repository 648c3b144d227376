/// MIME types accepted for product media, matched against the data URI header.
const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "video/mp4",
    "video/webm",
    "video/ogg",
];

/// Check a single `data:<mime>;base64,<payload>` URI against the allow-list.
pub fn is_allowed_data_uri(uri: &str) -> bool {
    let Some(rest) = uri.strip_prefix("data:") else {
        return false;
    };
    let Some((header, payload)) = rest.split_once(',') else {
        return false;
    };
    if payload.is_empty() {
        return false;
    }
    let Some(mime) = header.strip_suffix(";base64") else {
        return false;
    };
    ALLOWED_MIME_TYPES.contains(&mime)
}

/// Validate every media item in a product payload, returning the first
/// offender's index for the error message.
pub fn validate_media(items: &[String]) -> Result<(), String> {
    for (idx, item) in items.iter().enumerate() {
        if !is_allowed_data_uri(item) {
            return Err(format!("media item {idx} is not an allowed data URI"));
        }
    }
    Ok(())
}
