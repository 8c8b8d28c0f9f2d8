//! Document rendering — turns the first page of an uploaded PDF into a JPEG payload.
//!
//! `AppState` holds an `Arc<dyn DocumentRenderer>`. The production backend is
//! `PdfiumRenderer`; tests substitute a fixed fixture image.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, RgbImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod pdfium;

pub use pdfium::PdfiumRenderer;

pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// The PDF header may be preceded by junk, but must appear within the first 1024 bytes.
const PDF_HEADER_SEARCH_WINDOW: usize = 1024;
const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("The uploaded file is not a PDF")]
    NotAPdf,

    #[error("The PDF could not be opened: {0}")]
    InvalidPdf(String),

    #[error("The PDF has no pages")]
    EmptyDocument,

    #[error("PDF rendering backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Failed to rasterise the first page: {0}")]
    Rasterize(String),

    #[error("Failed to encode the page image: {0}")]
    Encode(#[from] image::ImageError),
}

/// A single rendered page, encoded for transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub mime_type: String,
    /// Base64 (standard alphabet) of the encoded image bytes.
    pub data: String,
}

/// Converts raw PDF bytes into an image of page 1. Implementations are blocking.
pub trait DocumentRenderer: Send + Sync {
    fn render_first_page(&self, pdf: &[u8]) -> Result<ImagePayload, RenderError>;
}

/// Rejects bytes that cannot be a PDF before any rendering backend is touched.
pub fn ensure_pdf_header(bytes: &[u8]) -> Result<(), RenderError> {
    let window = &bytes[..bytes.len().min(PDF_HEADER_SEARCH_WINDOW + PDF_MAGIC.len())];
    if window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC) {
        Ok(())
    } else {
        Err(RenderError::NotAPdf)
    }
}

/// JPEG-encodes an RGB image and wraps it as a base64 payload.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<ImagePayload, RenderError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality).encode_image(image)?;

    Ok(ImagePayload {
        mime_type: JPEG_MIME_TYPE.to_string(),
        data: STANDARD.encode(&buf),
    })
}
