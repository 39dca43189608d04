const DATA_URL_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64";

/// A student's registered face, held as the data-URL string the camera
/// capture produced. Not a biometric template; the real matcher is an
/// external integration.
#[derive(Clone, Debug, diesel::AsExpression, diesel::FromSqlRow, PartialEq)]
#[sql_type = "diesel::sql_types::Text"]
pub struct FaceImage(String);

#[derive(Debug, thiserror::Error)]
pub enum ParseFaceImageError {
    #[error("Face image must be a base64 image data-URL")]
    NotADataUrl,
    #[error("Failed to decode face image base64 payload")]
    Base64DecodeError(#[from] base64::DecodeError),
    #[error("Failed to decode face image")]
    ImageDecodeError(#[from] image::ImageError),
}

impl FaceImage {
    /// Accepts only data-URLs whose payload decodes to a real image.
    pub fn parse(data_url: &str) -> Result<Self, ParseFaceImageError> {
        let comma = data_url.find(',').ok_or(ParseFaceImageError::NotADataUrl)?;
        let (header, payload) = data_url.split_at(comma);

        if !header.starts_with(DATA_URL_PREFIX) || !header.ends_with(BASE64_MARKER) {
            return Err(ParseFaceImageError::NotADataUrl);
        }

        let bytes = base64::decode(&payload[1..])?;
        image::load_from_memory(&bytes)?;

        Ok(Self(data_url.to_string()))
    }

    pub fn digest(&self) -> String {
        format!("{:x}", md5::compute(self.0.as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<ST, DB> diesel::deserialize::FromSql<ST, DB> for FaceImage
where
    DB: diesel::backend::Backend,
    String: diesel::deserialize::FromSql<ST, DB>,
{
    fn from_sql(bytes: Option<&DB::RawValue>) -> diesel::deserialize::Result<Self> {
        Ok(Self(String::from_sql(bytes)?))
    }
}

impl<DB> diesel::serialize::ToSql<diesel::sql_types::Text, DB> for FaceImage
where
    DB: diesel::backend::Backend,
    String: diesel::serialize::ToSql<diesel::sql_types::Text, DB>,
{
    fn to_sql<W: std::io::Write>(
        &self,
        out: &mut diesel::serialize::Output<W, DB>,
    ) -> diesel::serialize::Result {
        self.0.to_sql(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_data_url() -> String {
        let image =
            image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(4, 4, image::Rgb([9, 9, 9])));
        let mut png = Vec::new();
        image
            .write_to(&mut png, image::ImageOutputFormat::Png)
            .unwrap();
        format!("data:image/png;base64,{}", base64::encode(&png))
    }

    #[test]
    fn accepts_a_png_data_url() {
        let data_url = png_data_url();
        let face = FaceImage::parse(&data_url).unwrap();
        assert_eq!(face.as_str(), data_url);
    }

    #[test]
    fn rejects_plain_text() {
        assert!(matches!(
            FaceImage::parse("not a face"),
            Err(ParseFaceImageError::NotADataUrl)
        ));
    }

    #[test]
    fn rejects_a_data_url_with_garbage_payload() {
        assert!(matches!(
            FaceImage::parse("data:image/png;base64,####"),
            Err(ParseFaceImageError::Base64DecodeError(_))
        ));
    }

    #[test]
    fn rejects_valid_base64_that_is_not_an_image() {
        let data_url = format!("data:image/png;base64,{}", base64::encode(b"hello"));
        assert!(matches!(
            FaceImage::parse(&data_url),
            Err(ParseFaceImageError::ImageDecodeError(_))
        ));
    }

    #[test]
    fn digest_is_stable() {
        let data_url = png_data_url();
        let face = FaceImage::parse(&data_url).unwrap();
        assert_eq!(face.digest(), face.digest());
        assert_eq!(face.digest().len(), 32);
    }
}
