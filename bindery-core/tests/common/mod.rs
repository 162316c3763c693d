//! Shared helpers for integration tests: tiny page images and .cbz
//! archives built on the fly.
#![allow(dead_code)]

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// A small valid PNG, usable as page content.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([180, 90, 30]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encode test png");
    buf.into_inner()
}

/// Writes a .cbz archive containing the given (name, bytes) entries.
pub fn build_cbz(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let file = File::create(path).expect("create test archive");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        writer.start_file(*name, options).expect("start zip entry");
        writer.write_all(data).expect("write zip entry");
    }
    writer.finish().expect("finish test archive");
}

/// Writes a .cbz archive whose entries are small PNG pages with the given
/// names.
pub fn build_pages_cbz(path: &Path, names: &[&str]) {
    let entries: Vec<(&str, Vec<u8>)> =
        names.iter().map(|name| (*name, png_bytes(8, 8))).collect();
    build_cbz(path, &entries);
}
