use linkshield_common::error::{LinkshieldError, LinkshieldResult};

/// Decode every QR payload found in an uploaded image, in detection
/// order. An image that decodes but contains no QR grid yields an empty
/// list, which callers must treat differently from undecodable bytes.
pub fn decode_payloads(bytes: &[u8]) -> LinkshieldResult<Vec<String>> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| LinkshieldError::Decode(format!("failed to read image: {e}")))?;
    let luma = image.to_luma8();
    let (width, height) = luma.dimensions();

    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            luma.get_pixel(x as u32, y as u32)[0]
        });

    let mut payloads = Vec::new();
    for grid in prepared.detect_grids() {
        match grid.decode() {
            Ok((_meta, content)) => payloads.push(content),
            Err(err) => tracing::debug!(?err, "skipping undecodable grid"),
        }
    }

    Ok(payloads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn blank_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(64, 64, image::Rgb([255, 255, 255]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .expect("png encodes");
        buf.into_inner()
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_payloads(b"definitely not an image").unwrap_err();
        assert!(matches!(err, LinkshieldError::Decode(_)));
    }

    #[test]
    fn empty_input_is_a_decode_error() {
        let err = decode_payloads(&[]).unwrap_err();
        assert!(matches!(err, LinkshieldError::Decode(_)));
    }

    #[test]
    fn image_without_qr_yields_empty_list() {
        let payloads = decode_payloads(&blank_png()).expect("valid image");
        assert!(payloads.is_empty());
    }
}
