use actix_web::{post, web, HttpResponse};

const VERIFICATION_METHOD: &str = "face_recognition";

#[derive(Debug, super::Error, thiserror::Error)]
pub enum Error {
    #[status_code(UNAUTHORIZED)]
    #[error(transparent)]
    TokenError(#[from] crate::session::TokenError),
    #[error("Session lookup failed")]
    SessionLookupFailed(#[source] crate::db::QueryError),
    #[status_code(UNAUTHORIZED)]
    #[error("Session not found; sign in again")]
    UnknownToken,
    #[status_code(FORBIDDEN)]
    #[error("A student session is required")]
    NotAStudent,
    #[error("Failed to fetch student")]
    FetchStudentFailed(#[source] crate::db::QueryError),
    #[status_code(UNAUTHORIZED)]
    #[error("Student account no longer exists")]
    NoSuchStudent,
    #[status_code(FORBIDDEN)]
    #[error("Face not registered. Please register your face before checking in")]
    FaceNotRegistered,
    #[status_code(BAD_REQUEST)]
    #[error("QR code expired")]
    QrExpired,
    #[status_code(BAD_REQUEST)]
    #[error("This lecture requires your location to check in")]
    LocationRequired,
    #[status_code(BAD_REQUEST)]
    #[error("You are {0} m from the classroom, outside the 50 m check-in radius")]
    OutsideGeofence(i64),
    #[status_code(BAD_REQUEST)]
    #[error("Unusable face image")]
    BadFaceImage(#[source] crate::db::model::face_image::ParseFaceImageError),
    #[status_code(UNAUTHORIZED)]
    #[error("Face verification failed")]
    FaceMismatch,
    #[error("Failed to record attendance")]
    RecordAttendanceFailed(#[source] crate::db::QueryError),
}

/// The QR check-in flow. Order matters: an unregistered face blocks the
/// attempt before the payload, the geofence, or the verifier is even
/// looked at, and nothing is written until verification passes. Each
/// failure returns the student to an idle/retry state; there is no
/// automatic retry and no compensating write.
#[post("/checkin")]
pub async fn endpoint(
    req: actix_web::HttpRequest,
    body: web::Json<presence_web_core::CheckinRequest>,
    db: web::Data<crate::db::System>,
    verifier: web::Data<crate::verify::Verifier>,
) -> Result<actix_web::HttpResponse, Error> {
    use presence_web_core::checkin;

    log::debug!("POST /checkin");

    let token = crate::session::token_from(&req)?;
    let session = crate::db::model::Session::fetch_by_token(&db, token)
        .await
        .map_err(Error::SessionLookupFailed)?
        .ok_or(Error::UnknownToken)?;

    let student_id = session.student.ok_or(Error::NotAStudent)?;

    log::debug!("  STUDENT {}", student_id);

    let (face_registered, reference) = crate::db::model::Student::fetch_face(&db, student_id)
        .await
        .map_err(Error::FetchStudentFailed)?
        .ok_or(Error::NoSuchStudent)?;

    // A registered flag without a stored image is treated as unregistered.
    let reference = match (face_registered, reference) {
        (true, Some(reference)) => reference,
        _ => return Err(Error::FaceNotRegistered),
    };

    let body = body.into_inner();

    if !body.payload.is_fresh(chrono::Utc::now().timestamp_millis()) {
        return Err(Error::QrExpired);
    }

    if let Some(reference_point) = body.payload.location {
        let reading = body.location.ok_or(Error::LocationRequired)?;
        let distance = checkin::haversine_distance_meters(reference_point, reading);

        log::debug!("  DISTANCE {:.1}m", distance);

        if !checkin::within_geofence(distance) {
            return Err(Error::OutsideGeofence(distance.round() as i64));
        }
    }

    let submitted = body
        .face_image
        .as_deref()
        .map(crate::db::model::FaceImage::parse)
        .transpose()
        .map_err(Error::BadFaceImage)?;

    if !verifier.verify(submitted.as_ref(), &reference).await {
        return Err(Error::FaceMismatch);
    }

    let record_id = crate::db::model::AttendanceRecord::insert(
        &db,
        student_id,
        body.payload.class_id,
        body.payload.lecture_id,
        chrono::Utc::now().naive_utc(),
        presence_web_core::AttendanceStatus::Present,
        String::from(VERIFICATION_METHOD),
    )
    .await
    .map_err(Error::RecordAttendanceFailed)?;

    log::debug!("  RECORD {}", record_id);

    Ok(HttpResponse::Created().json(presence_web_core::CheckinReceipt {
        record: record_id,
        status: presence_web_core::AttendanceStatus::Present,
        verification_method: String::from(VERIFICATION_METHOD),
    }))
}
