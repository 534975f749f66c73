//! Base64 data URI decoding

use data_encoding::BASE64;
use once_cell::sync::Lazy;
use regex::Regex;

static DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:([A-Za-z0-9.+/-]+);base64,(.+)$").expect("data URI pattern compiles")
});

/// Error type for data URI decoding
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Not a `data:<mime>;base64,<payload>` string
    #[error("invalid data URI")]
    InvalidDataUri,
    /// The payload is not valid base64
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] data_encoding::DecodeError),
}

/// An image recovered from a data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// MIME type, e.g. `image/png`
    pub mime: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

/// Decode a `data:<mime>;base64,<payload>` string into its parts
pub fn decode_data_uri(input: &str) -> Result<DecodedImage, ImageError> {
    let captures = DATA_URI_RE
        .captures(input)
        .ok_or(ImageError::InvalidDataUri)?;

    let mime = captures[1].to_string();
    let data = BASE64.decode(captures[2].as_bytes())?;

    Ok(DecodedImage { mime, data })
}
