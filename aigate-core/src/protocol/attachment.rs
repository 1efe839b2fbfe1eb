//! Binary attachments and their inline transport encoding

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::fs;
use std::path::Path;

/// An image supplied by the caller for a multimodal request
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    /// Raw image bytes
    pub bytes: Vec<u8>,

    /// Declared mime type, e.g. `image/png`
    pub mime_type: String,
}

impl ImageAttachment {
    /// Create an attachment from bytes and a mime type
    pub fn new(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Read an attachment from disk, inferring the mime type from the extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(mime_for_extension)
            .unwrap_or(OCTET_STREAM);
        Ok(Self::new(bytes, mime_type))
    }

    /// Standard padded base64 of the bytes
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:` URI embedding the bytes
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

impl fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

const OCTET_STREAM: &str = "application/octet-stream";

fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => OCTET_STREAM,
    }
}
