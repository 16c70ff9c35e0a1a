//! Inline preview images stored as `data:` URLs
//!
//! A thumbnail carries its own bytes, so a template never depends on an
//! asset directory. Both base64 and percent-encoded payloads are accepted;
//! hand-written SVG thumbnails are usually percent-encoded.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ImageError;

/// Default upper bound for a thumbnail data URL, in bytes
pub const DEFAULT_MAX_THUMBNAIL_BYTES: usize = 64 * 1024;

const PLACEHOLDER_SVG: &str = concat!(
    "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 200 150'>",
    "<rect width='200' height='150' fill='#e2e8f0'/>",
    "<rect x='70' y='45' width='60' height='45' rx='4' fill='none' stroke='#94a3b8' stroke-width='4'/>",
    "<circle cx='88' cy='62' r='6' fill='#94a3b8'/>",
    "<path d='M74 86 L95 68 L108 78 L126 60 L126 86 Z' fill='#94a3b8'/>",
    "</svg>"
);

/// How the payload of a data URL is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    Base64,
    Percent,
}

/// A self-contained image encoded as a `data:` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResource {
    url: String,
    media_type: String,
    encoding: PayloadEncoding,
    /// Byte offset of the payload within `url`
    payload_start: usize,
}

impl ImageResource {
    /// Parse and validate a data URL no larger than [`DEFAULT_MAX_THUMBNAIL_BYTES`].
    ///
    /// The media type must be `image/*` and the payload must be non-empty.
    /// The payload is decoded once to check it.
    pub fn parse(url: impl Into<String>) -> Result<Self, ImageError> {
        Self::parse_with_limit(url, DEFAULT_MAX_THUMBNAIL_BYTES)
    }

    /// Parse and validate a data URL of at most `limit` bytes.
    ///
    /// The size is checked before any decoding happens.
    pub fn parse_with_limit(url: impl Into<String>, limit: usize) -> Result<Self, ImageError> {
        let url = url.into();
        if url.len() > limit {
            return Err(ImageError::TooLarge {
                size: url.len(),
                limit,
            });
        }
        let header_and_payload = url.strip_prefix("data:").ok_or(ImageError::NotDataUrl)?;
        let comma = header_and_payload
            .find(',')
            .ok_or(ImageError::MissingPayload)?;
        let header = &header_and_payload[..comma];

        let (media_type, encoding) = match header.strip_suffix(";base64") {
            Some(mt) => (mt, PayloadEncoding::Base64),
            None => (header, PayloadEncoding::Percent),
        };
        // Parameters such as ";charset=utf-8" are not part of the media type
        let media_type = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !media_type.starts_with("image/") {
            return Err(ImageError::NotAnImage(media_type));
        }

        let payload_start = "data:".len() + comma + 1;
        if payload_start >= url.len() {
            return Err(ImageError::EmptyPayload);
        }

        let resource = Self {
            url,
            media_type,
            encoding,
            payload_start,
        };
        resource.decode()?;
        Ok(resource)
    }

    /// Build a base64 SVG resource from markup
    pub fn from_svg(svg: &str) -> Self {
        Self::from_bytes("image/svg+xml", svg.as_bytes())
    }

    /// Build a base64 resource from raw bytes
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        let prefix = format!("data:{};base64,", media_type);
        let payload_start = prefix.len();
        Self {
            url: prefix + &STANDARD.encode(bytes),
            media_type: media_type.to_ascii_lowercase(),
            encoding: PayloadEncoding::Base64,
            payload_start,
        }
    }

    /// Neutral image for templates without artwork
    pub fn placeholder() -> Self {
        Self::from_svg(PLACEHOLDER_SVG)
    }

    pub fn as_data_url(&self) -> &str {
        &self.url
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn encoding(&self) -> PayloadEncoding {
        self.encoding
    }

    /// Size of the encoded data URL, the quantity bounded at registration
    pub fn encoded_len(&self) -> usize {
        self.url.len()
    }

    /// Decode the payload into raw image bytes
    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        let payload = &self.url[self.payload_start..];
        match self.encoding {
            PayloadEncoding::Base64 => STANDARD
                .decode(payload)
                .map_err(|e| ImageError::Base64(e.to_string())),
            PayloadEncoding::Percent => percent_decode(payload),
        }
    }
}

impl fmt::Display for ImageResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Decode `%XX` escapes, rejecting any `%` not followed by two hex digits
fn percent_decode(payload: &str) -> Result<Vec<u8>, ImageError> {
    let bytes = payload.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'%' {
            continue;
        }
        let escape_ok = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !escape_ok {
            return Err(ImageError::PercentEscape(i));
        }
    }
    Ok(urlencoding::decode_binary(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent_encoded_svg() {
        let image = ImageResource::parse(
            "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg'%3E%3C/svg%3E",
        )
        .unwrap();
        assert_eq!(image.media_type(), "image/svg+xml");
        assert_eq!(image.encoding(), PayloadEncoding::Percent);
        assert_eq!(
            image.decode().unwrap(),
            b"<svg xmlns='http://www.w3.org/2000/svg'></svg>".to_vec()
        );
    }

    #[test]
    fn test_parse_base64_png_header() {
        let image = ImageResource::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(image.media_type(), "image/png");
        assert_eq!(image.decode().unwrap()[..4], [0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_media_type_parameters_ignored() {
        let image = ImageResource::parse("data:image/svg+xml;charset=utf-8,%3Csvg/%3E").unwrap();
        assert_eq!(image.media_type(), "image/svg+xml");
    }

    #[test]
    fn test_parse_rejections() {
        assert_eq!(
            ImageResource::parse("https://example.com/a.png"),
            Err(ImageError::NotDataUrl)
        );
        assert_eq!(
            ImageResource::parse("data:image/png;base64"),
            Err(ImageError::MissingPayload)
        );
        assert_eq!(
            ImageResource::parse("data:text/plain,hello"),
            Err(ImageError::NotAnImage("text/plain".to_string()))
        );
        assert_eq!(
            ImageResource::parse("data:image/png;base64,"),
            Err(ImageError::EmptyPayload)
        );
        assert!(matches!(
            ImageResource::parse("data:image/png;base64,not*base64"),
            Err(ImageError::Base64(_))
        ));
    }

    #[test]
    fn test_bad_percent_escape_rejected_on_parse() {
        assert_eq!(
            ImageResource::parse("data:image/svg+xml,%3Csvg%G1"),
            Err(ImageError::PercentEscape(6))
        );
        // A sign is not a hex digit even though integer parsing accepts it
        assert_eq!(
            ImageResource::parse("data:image/svg+xml,%3Csvg%+1"),
            Err(ImageError::PercentEscape(6))
        );
        assert_eq!(
            ImageResource::parse("data:image/svg+xml,%3Csvg%4"),
            Err(ImageError::PercentEscape(6))
        );
    }

    #[test]
    fn test_percent_decode_keeps_utf8_and_escaped_percent() {
        let image = ImageResource::parse("data:image/svg+xml,%3Ctext%3E侍 100%25%3C/text%3E").unwrap();
        assert_eq!(
            String::from_utf8(image.decode().unwrap()).unwrap(),
            "<text>侍 100%</text>"
        );
    }

    #[test]
    fn test_size_checked_before_decoding() {
        let url = format!("data:image/png;base64,{}", "*".repeat(64));
        assert_eq!(
            ImageResource::parse_with_limit(url.as_str(), 32),
            Err(ImageError::TooLarge {
                size: url.len(),
                limit: 32
            })
        );
        // Within the limit the same payload reaches the base64 check
        assert!(matches!(
            ImageResource::parse_with_limit(url, 1024),
            Err(ImageError::Base64(_))
        ));

        let oversized = format!("data:image/svg+xml,{}", "a".repeat(DEFAULT_MAX_THUMBNAIL_BYTES));
        assert!(matches!(
            ImageResource::parse(oversized),
            Err(ImageError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_from_svg_round_trips_through_parse() {
        let image = ImageResource::from_svg("<svg/>");
        assert!(image.as_data_url().starts_with("data:image/svg+xml;base64,"));
        let reparsed = ImageResource::parse(image.as_data_url()).unwrap();
        assert_eq!(reparsed, image);
        assert_eq!(reparsed.decode().unwrap(), b"<svg/>".to_vec());
    }

    #[test]
    fn test_placeholder_is_small_svg() {
        let placeholder = ImageResource::placeholder();
        assert_eq!(placeholder.media_type(), "image/svg+xml");
        assert!(placeholder.encoded_len() < DEFAULT_MAX_THUMBNAIL_BYTES);
        let svg = String::from_utf8(placeholder.decode().unwrap()).unwrap();
        assert!(svg.starts_with("<svg"));
    }
}
