const MIN_DIMENSION: u32 = 256;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to build QR code: {0:?}")]
    QrError(qrcode::types::QrError),
    #[error("Failed to encode QR code image")]
    PngEncodeError(#[from] image::ImageError),
}

/// Renders arbitrary text as a PNG data-URL, sized for an on-screen scan
/// target.
pub fn data_url(text: &str) -> Result<String, RenderError> {
    let code = qrcode::QrCode::new(text.as_bytes()).map_err(RenderError::QrError)?;

    let rendered = code
        .render::<image::Luma<u8>>()
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .build();

    let mut png = Vec::new();
    image::DynamicImage::ImageLuma8(rendered).write_to(&mut png, image::ImageOutputFormat::Png)?;

    Ok(format!("data:image/png;base64,{}", base64::encode(&png)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_a_decodable_png_data_url() {
        let data_url = data_url("{\"classId\":1,\"lectureId\":2,\"timestamp\":0}").unwrap();

        let payload = data_url
            .strip_prefix("data:image/png;base64,")
            .expect("data-URL prefix");

        let image = image::load_from_memory(&base64::decode(payload).unwrap()).unwrap();

        use image::GenericImageView;
        assert!(image.width() >= MIN_DIMENSION);
        assert!(image.height() >= MIN_DIMENSION);
    }
}
