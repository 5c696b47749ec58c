//! Chart images supplied by the front end.
//!
//! The browser posts its rendered chart as a data URL. Anything that fails to
//! decode (bad base64, truncated PNG, unsupported format) yields `None` and the
//! report is rendered without the chart.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Decoded raster image, alpha composited onto white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub width: u32,
    pub height: u32,
    /// 8-bit RGB samples, row-major, top row first.
    pub rgb: Vec<u8>,
}

impl ChartImage {
    /// Decode PNG/JPEG bytes.
    pub fn decode(bytes: &[u8]) -> Option<ChartImage> {
        let decoded = match image::load_from_memory(bytes) {
            Ok(decoded) => decoded,
            Err(err) => {
                debug!(error = %err, len = bytes.len(), "chart image could not be decoded");
                return None;
            }
        };
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return None;
        }

        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            let alpha = u32::from(a);
            for channel in [r, g, b] {
                let blended = (u32::from(channel) * alpha + 255 * (255 - alpha)) / 255;
                rgb.push(blended as u8);
            }
        }
        Some(ChartImage { width, height, rgb })
    }
}

/// Extract image bytes from a data URL or raw base64 string.
///
/// For data URLs everything after the first comma is decoded. Whitespace is
/// ignored.
pub fn decode_chart_payload(text: &str) -> Option<Vec<u8>> {
    let encoded = match text.split_once(',') {
        Some((_, data)) => data,
        None => text,
    };
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            debug!(error = %err, "chart payload is not valid base64");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, pixel: Rgba<u8>) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, pixel);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_data_url_and_raw_base64() {
        let png = png_bytes(2, 2, Rgba([255, 0, 0, 255]));
        let raw = STANDARD.encode(&png);
        let url = format!("data:image/png;base64,{raw}");

        assert_eq!(decode_chart_payload(&raw), Some(png.clone()));
        assert_eq!(decode_chart_payload(&url), Some(png));
    }

    #[test]
    fn test_invalid_payloads() {
        assert_eq!(decode_chart_payload(""), None);
        assert_eq!(decode_chart_payload("data:image/png;base64,"), None);
        assert_eq!(decode_chart_payload("not base64 at all!"), None);
    }

    #[test]
    fn test_decode_composites_alpha_on_white() {
        let png = png_bytes(3, 1, Rgba([0, 0, 0, 0]));
        let chart = ChartImage::decode(&png).unwrap();
        assert_eq!((chart.width, chart.height), (3, 1));
        assert!(chart.rgb.iter().all(|&c| c == 255));

        let opaque = ChartImage::decode(&png_bytes(1, 1, Rgba([10, 20, 30, 255]))).unwrap();
        assert_eq!(opaque.rgb, vec![10, 20, 30]);
    }

    #[test]
    fn test_truncated_png_is_rejected() {
        let png = png_bytes(16, 16, Rgba([1, 2, 3, 255]));
        assert!(ChartImage::decode(&png[..png.len() / 2]).is_none());
        assert!(ChartImage::decode(b"\x89PNG").is_none());
    }
}
