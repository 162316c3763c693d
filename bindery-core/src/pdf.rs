//! PDF assembly — one page per source image, each page sized to its image.
//!
//! Documents are built with `printpdf` 0.8, whose data-oriented API
//! constructs `PdfPage` structs holding `Vec<Op>` operation lists and
//! serialises them via `PdfDocument::save()`. Image bytes are handed to
//! printpdf's own decoder first, which keeps JPEG streams unrecompressed;
//! encodings it cannot ingest are losslessly re-wrapped as RGB8 through the
//! `image` crate.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};

use crate::error::{CoreError, CoreResult};

/// Pixel density assumed when deriving page dimensions from pixel
/// dimensions. Comic pages carry no reliable physical size, so only the
/// aspect ratio matters to the reader.
const PAGE_DPI: f32 = 96.0;

const MM_PER_INCH: f32 = 25.4;

/// Assembles the ordered images into a single PDF at `out_path`, one page
/// per image in input order. Returns the number of pages written.
///
/// The full byte stream is produced in memory before anything is persisted;
/// on a write failure the partial output file is removed rather than left
/// truncated on disk.
pub fn assemble_pdf(images: &[PathBuf], title: &str, out_path: &Path) -> CoreResult<usize> {
    if images.is_empty() {
        return Err(CoreError::NoImagesFound);
    }

    let mut doc = PdfDocument::new(title);
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let mut pdf_pages: Vec<PdfPage> = Vec::with_capacity(images.len());

    for image_path in images {
        let bytes = fs::read(image_path).map_err(|e| {
            CoreError::Assembly(format!("cannot read {}: {}", image_path.display(), e))
        })?;
        let raw = decode_page(&bytes, &mut warnings).map_err(|e| {
            CoreError::Assembly(format!("cannot decode {}: {}", image_path.display(), e))
        })?;

        let page_w = Mm(raw.width as f32 / PAGE_DPI * MM_PER_INCH);
        let page_h = Mm(raw.height as f32 / PAGE_DPI * MM_PER_INCH);

        let xobject_id = doc.add_image(&raw);
        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: None,
                scale_y: None,
                dpi: Some(PAGE_DPI),
                rotate: None,
            },
        }];
        pdf_pages.push(PdfPage::new(page_w, page_h, ops));
    }

    doc.with_pages(pdf_pages);

    debug!(
        "assembled {} page(s) for {}",
        images.len(),
        out_path.display()
    );

    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    if let Err(e) = fs::write(out_path, &bytes) {
        let _ = fs::remove_file(out_path);
        return Err(CoreError::Assembly(format!(
            "failed to write {}: {}",
            out_path.display(),
            e
        )));
    }

    Ok(images.len())
}

/// Decodes image bytes into a printpdf `RawImage`, preferring printpdf's own
/// decoder and falling back to a lossless RGB8 conversion via the `image`
/// crate for encodings it rejects.
fn decode_page(bytes: &[u8], warnings: &mut Vec<PdfWarnMsg>) -> Result<RawImage, String> {
    match RawImage::decode_from_bytes(bytes, warnings) {
        Ok(raw) => Ok(raw),
        Err(_) => {
            let decoded = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
            let width = decoded.width() as usize;
            let height = decoded.height() as usize;
            let rgb = decoded.to_rgb8();
            Ok(RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width,
                height,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            })
        }
    }
}
