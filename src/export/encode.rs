//! Bitmap → embeddable payload.
//!
//! The payload is the raw 8-bit RGB raster, alpha flattened over white and
//! zlib-compressed, which a PDF image XObject takes as-is with
//! `/Filter /FlateDecode`.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbaImage;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    /// zlib stream of `width * height * 3` RGB bytes.
    pub data: Vec<u8>,
}

impl EncodedImage {
    pub fn pixels(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Composite one channel over a white background.
fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u32;
    let a = alpha as u32;
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

pub fn flatten_rgb(bitmap: &RgbaImage) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(bitmap.width() as usize * bitmap.height() as usize * 3);
    for px in bitmap.pixels() {
        let [r, g, b, a] = px.0;
        rgb.extend([over_white(r, a), over_white(g, a), over_white(b, a)]);
    }
    rgb
}

pub fn encode(bitmap: &RgbaImage) -> std::io::Result<EncodedImage> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&flatten_rgb(bitmap))?;
    Ok(EncodedImage {
        width: bitmap.width(),
        height: bitmap.height(),
        data: encoder.finish()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use image::Rgba;
    use std::io::Read;

    #[test]
    fn transparent_pixels_become_white() {
        assert_eq!(over_white(0, 0), 255);
        assert_eq!(over_white(10, 255), 10);
        assert_eq!(over_white(0, 128), 127);
    }

    #[test]
    fn payload_inflates_to_rgb_raster() {
        let mut bitmap = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255]));
        bitmap.put_pixel(1, 0, Rgba([200, 100, 50, 0]));
        let encoded = encode(&bitmap).unwrap();
        assert_eq!(encoded.pixels(), (3, 2));

        let mut raw = Vec::new();
        ZlibDecoder::new(encoded.data.as_slice())
            .read_to_end(&mut raw)
            .unwrap();
        assert_eq!(raw.len(), 3 * 2 * 3);
        assert_eq!(&raw[0..3], &[0, 0, 0]);
        assert_eq!(&raw[3..6], &[255, 255, 255]);
    }
}
