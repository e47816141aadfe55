//! Lossless PNG encoding of cropped regions.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::DispatchResult;

/// Encode the cropped region as PNG bytes, dimensions preserved exactly.
pub fn encode_png(img: &RgbaImage) -> DispatchResult<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn encoded_png_round_trips_dimensions() {
        let mut img = RgbaImage::new(31, 17);
        img.put_pixel(3, 4, Rgba([10, 20, 30, 255]));

        let bytes = encode_png(&img).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (31, 17));
        assert_eq!(decoded.to_rgba8().get_pixel(3, 4).0, [10, 20, 30, 255]);
    }
}
