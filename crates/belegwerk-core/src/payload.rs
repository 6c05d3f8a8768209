// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Encoded image payloads exchanged between capture, editor, and the remote
// image service. A payload is a `data:` URI wrapping base64 image bytes.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{BelegwerkError, Result};

/// Immutable encoded image, e.g. `data:image/jpeg;base64,/9j/4AAQ...`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePayload(String);

impl ImagePayload {
    /// Wrap raw encoded bytes (JPEG, PNG, ...), sniffing the format from the
    /// file signature.
    pub fn from_encoded(bytes: &[u8]) -> Result<Self> {
        let format = image::guess_format(bytes)
            .map_err(|err| BelegwerkError::ImageDecode(format!("unknown image format: {err}")))?;
        Ok(Self::from_encoded_as(bytes, format))
    }

    /// Wrap raw encoded bytes whose format is already known.
    pub fn from_encoded_as(bytes: &[u8], format: ImageFormat) -> Self {
        Self(format!(
            "data:{};base64,{}",
            format.to_mime_type(),
            BASE64.encode(bytes)
        ))
    }

    /// Take a string produced elsewhere (usually the image service) as-is.
    ///
    /// Both full data URIs and bare base64 bodies are accepted.
    pub fn from_data_uri(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the encoded string, for logging.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// MIME type from the data URI header, if there is one.
    pub fn mime_type(&self) -> Option<&str> {
        let header = self.0.strip_prefix("data:")?.split_once(',')?.0;
        header.split(';').next().filter(|m| !m.is_empty())
    }

    /// The base64 body with any `data:...,` header removed.
    pub fn base64_body(&self) -> &str {
        match self.0.split_once(',') {
            Some((_, body)) => body,
            None => &self.0,
        }
    }

    /// Decode back to the raw encoded image bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(self.base64_body().trim())
            .map_err(|err| BelegwerkError::ImageDecode(format!("invalid base64 payload: {err}")))
    }

    /// Native pixel dimensions `(width, height)`, read from the image header.
    #[instrument(skip(self), fields(payload_len = self.len()))]
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        let bytes = self.decode_bytes()?;
        let dims = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|err| BelegwerkError::ImageDecode(format!("unreadable image header: {err}")))?;
        debug!(width = dims.0, height = dims.1, "payload dimensions read");
        Ok(dims)
    }
}

// Payloads run to megabytes; keep them out of debug output.
impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime", &self.mime_type())
            .field("len", &self.0.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode png");
        out.into_inner()
    }

    #[test]
    fn encodes_as_data_uri_with_sniffed_mime() {
        let payload = ImagePayload::from_encoded(&png_bytes(3, 2)).expect("png");
        assert!(payload.as_str().starts_with("data:image/png;base64,"));
        assert_eq!(payload.mime_type(), Some("image/png"));
    }

    #[test]
    fn decodes_back_to_same_bytes() {
        let bytes = png_bytes(4, 4);
        let payload = ImagePayload::from_encoded(&bytes).unwrap();
        assert_eq!(payload.decode_bytes().unwrap(), bytes);
    }

    #[test]
    fn bare_base64_is_accepted() {
        let bytes = png_bytes(2, 2);
        let payload = ImagePayload::from_data_uri(BASE64.encode(&bytes));
        assert_eq!(payload.mime_type(), None);
        assert_eq!(payload.decode_bytes().unwrap(), bytes);
    }

    #[test]
    fn reads_native_dimensions() {
        let payload = ImagePayload::from_encoded(&png_bytes(640, 480)).unwrap();
        assert_eq!(payload.dimensions().unwrap(), (640, 480));
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(matches!(
            ImagePayload::from_encoded(b"definitely not an image"),
            Err(BelegwerkError::ImageDecode(_))
        ));
    }

    #[test]
    fn debug_output_omits_body() {
        let payload = ImagePayload::from_encoded(&png_bytes(1, 1)).unwrap();
        let shown = format!("{payload:?}");
        assert!(!shown.contains("base64"));
        assert!(shown.contains("image/png"));
    }
}
