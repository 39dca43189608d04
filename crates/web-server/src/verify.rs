//! The face-verification seam. The production matcher lives in a separate
//! computer-vision project; until that lands, check-ins run against a mock
//! that waits a fixed delay and accepts everything.

use crate::db::model::FaceImage;

pub trait FaceVerifier: Send + Sync {
    /// Compares a submitted capture against the student's registered
    /// reference image. `submitted` may be absent; implementations decide
    /// whether that can ever match.
    fn verify<'a>(
        &'a self,
        submitted: Option<&'a FaceImage>,
        reference: &'a FaceImage,
    ) -> futures::future::BoxFuture<'a, bool>;
}

/// Shared handle the endpoints pull out of app data; swapping the inner
/// implementation never touches call sites.
#[derive(Clone)]
pub struct Verifier(std::sync::Arc<dyn FaceVerifier>);

impl Verifier {
    pub fn new(verifier: std::sync::Arc<dyn FaceVerifier>) -> Self {
        Self(verifier)
    }
}

impl std::ops::Deref for Verifier {
    type Target = dyn FaceVerifier;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

pub struct MockFaceVerifier {
    delay: std::time::Duration,
}

impl MockFaceVerifier {
    pub fn new(delay: std::time::Duration) -> Self {
        Self { delay }
    }
}

impl FaceVerifier for MockFaceVerifier {
    fn verify<'a>(
        &'a self,
        submitted: Option<&'a FaceImage>,
        reference: &'a FaceImage,
    ) -> futures::future::BoxFuture<'a, bool> {
        let delay = self.delay;
        Box::pin(async move {
            log::debug!(
                "  MOCK VERIFY submitted={:?} reference={}",
                submitted.map(FaceImage::digest),
                reference.digest()
            );

            if delay > std::time::Duration::from_millis(0) {
                actix_web::rt::time::delay_for(delay).await;
            }

            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face() -> FaceImage {
        let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            2,
            2,
            image::Rgb([1, 2, 3]),
        ));
        let mut png = Vec::new();
        image
            .write_to(&mut png, image::ImageOutputFormat::Png)
            .unwrap();
        FaceImage::parse(&format!("data:image/png;base64,{}", base64::encode(&png))).unwrap()
    }

    #[actix_rt::test]
    async fn mock_always_matches() {
        let verifier = MockFaceVerifier::new(std::time::Duration::from_millis(0));
        let reference = face();
        assert!(verifier.verify(None, &reference).await);
        assert!(verifier.verify(Some(&reference), &reference).await);
    }
}
