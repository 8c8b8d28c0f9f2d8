use std::path::PathBuf;

use image::{DynamicImage, RgbaImage};
use pdfium_render::prelude::*;
use tracing::debug;

use crate::config::Config;
use crate::render::{encode_jpeg, ensure_pdf_header, DocumentRenderer, ImagePayload, RenderError};

/// Renders page 1 of a PDF through the pdfium library.
///
/// The library is bound per call, so a missing pdfium install surfaces as a
/// `RenderError::BackendUnavailable` on the request instead of failing startup.
#[derive(Debug, Clone)]
pub struct PdfiumRenderer {
    library_dir: Option<PathBuf>,
    target_width: u32,
    jpeg_quality: u8,
}

impl PdfiumRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            library_dir: config.pdfium_library_path.as_ref().map(PathBuf::from),
            target_width: config.render_width_px,
            jpeg_quality: config.jpeg_quality,
        }
    }

    fn bind(&self) -> Result<Pdfium, RenderError> {
        let bindings = match &self.library_dir {
            Some(dir) => {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| RenderError::BackendUnavailable(e.to_string()))?;

        Ok(Pdfium::new(bindings))
    }
}

impl DocumentRenderer for PdfiumRenderer {
    fn render_first_page(&self, pdf: &[u8]) -> Result<ImagePayload, RenderError> {
        ensure_pdf_header(pdf)?;

        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|e| RenderError::InvalidPdf(e.to_string()))?;

        let page_count = document.pages().len();
        if page_count == 0 {
            return Err(RenderError::EmptyDocument);
        }

        // Only the first page is ever considered.
        let page = document
            .pages()
            .first()
            .map_err(|e| RenderError::InvalidPdf(e.to_string()))?;

        let render_config = PdfRenderConfig::new().set_target_width(self.target_width as i32);
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| RenderError::Rasterize(e.to_string()))?;

        let (width, height) = (bitmap.width() as u32, bitmap.height() as u32);
        let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(|| {
            RenderError::Rasterize(format!("bitmap buffer does not match {width}x{height}"))
        })?;

        debug!("Rendered page 1 of {page_count} at {width}x{height}");

        // JPEG has no alpha channel.
        let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
        encode_jpeg(&rgb, self.jpeg_quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    /// Builds a minimal PDF with one blank page per `(width, height)` media box.
    fn build_pdf(pages: &[(u32, u32)]) -> Vec<u8> {
        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                (0..pages.len())
                    .map(|i| format!("{} 0 R", i + 3))
                    .collect::<Vec<_>>()
                    .join(" "),
                pages.len()
            ),
        ];
        for (w, h) in pages {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {w} {h}] >>"
            ));
        }

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref_at = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }

    fn renderer() -> PdfiumRenderer {
        PdfiumRenderer::new(&Config {
            render_width_px: 400,
            ..Config::default()
        })
    }

    #[test]
    fn test_non_pdf_rejected_before_binding_backend() {
        // Would be BackendUnavailable if the header check did not run first.
        let result = renderer().render_first_page(b"<html>not a resume</html>");
        assert!(matches!(result, Err(RenderError::NotAPdf)));
    }

    #[test]
    fn test_missing_library_dir_is_backend_unavailable() {
        let renderer = PdfiumRenderer::new(&Config {
            pdfium_library_path: Some("/nonexistent/pdfium".to_string()),
            ..Config::default()
        });
        let result = renderer.render_first_page(&build_pdf(&[(200, 100)]));
        assert!(matches!(result, Err(RenderError::BackendUnavailable(_))));
    }

    /// A renderer bound to the pdfium in `PDFIUM_LIBRARY_PATH`, or `None` when it is unset.
    fn installed_renderer() -> Option<PdfiumRenderer> {
        let dir = std::env::var("PDFIUM_LIBRARY_PATH").ok().filter(|d| !d.is_empty());
        if dir.is_none() {
            eprintln!("PDFIUM_LIBRARY_PATH not set; skipping pdfium rendering test");
        }
        dir.map(|dir| {
            PdfiumRenderer::new(&Config {
                pdfium_library_path: Some(dir),
                render_width_px: 400,
                ..Config::default()
            })
        })
    }

    #[test]
    fn test_only_first_page_is_rendered() {
        let Some(renderer) = installed_renderer() else {
            return;
        };
        // Landscape first page, portrait second page.
        let pdf = build_pdf(&[(200, 100), (100, 200), (100, 200)]);
        let payload = renderer.render_first_page(&pdf).unwrap();

        assert_eq!(payload.mime_type, "image/jpeg");
        let jpeg = STANDARD.decode(&payload.data).unwrap();
        let image = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(image.width(), 400);
        assert_eq!(image.height(), 200);
    }

    #[test]
    fn test_single_page_document_renders_at_target_width() {
        let Some(renderer) = installed_renderer() else {
            return;
        };
        let payload = renderer.render_first_page(&build_pdf(&[(100, 200)])).unwrap();

        let jpeg = STANDARD.decode(&payload.data).unwrap();
        let image = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((image.width(), image.height()), (400, 800));
    }

    #[test]
    fn test_truncated_pdf_is_invalid() {
        let Some(renderer) = installed_renderer() else {
            return;
        };
        let pdf = build_pdf(&[(200, 100)]);
        let result = renderer.render_first_page(&pdf[..20]);
        assert!(matches!(result, Err(RenderError::InvalidPdf(_))));
    }
}
