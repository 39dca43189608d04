use actix_web::{post, web, HttpResponse};

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
    #[error("A teacher session is required")]
    NotATeacher,
    #[status_code(NOT_FOUND)]
    #[error("No such lecture")]
    NoSuchLecture,
    #[error("Failed to fetch lecture")]
    FetchLectureFailed(#[source] crate::db::QueryError),
    #[error("Failed to fetch teacher profile")]
    FetchTeacherFailed(#[source] crate::db::QueryError),
    #[error("Failed to serialize QR payload")]
    PayloadEncodeError(#[source] serde_json::Error),
    #[error("Failed to store QR code on lecture")]
    RecordQrFailed(#[source] crate::db::QueryError),
    #[error("Failed to render QR code")]
    RenderFailed(#[from] crate::qr::RenderError),
}

/// Issues a fresh QR payload for a lecture, stamps it with the current
/// time, stores the payload text on the lecture row, and returns it beside
/// a PNG data-URL for projection. The payload is plain JSON, unsigned;
/// validity is re-derived from the embedded timestamp at check-in.
#[post("/lectures/{id:\\d+}/qr")]
pub async fn endpoint(
    req: actix_web::HttpRequest,
    lecture_id: web::Path<i32>,
    issue: web::Json<presence_web_core::QrIssueRequest>,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    log::debug!("POST /lectures/{}/qr", lecture_id);

    let token = crate::session::token_from(&req)?;
    let session = crate::db::model::Session::fetch_by_token(&db, token)
        .await
        .map_err(Error::SessionLookupFailed)?
        .ok_or(Error::UnknownToken)?;

    let teacher_id = session.teacher.ok_or(Error::NotATeacher)?;

    let lecture = crate::db::model::Lecture::fetch(&db, *lecture_id)
        .await
        .map_err(Error::FetchLectureFailed)?
        .ok_or(Error::NoSuchLecture)?;

    let teacher_name = crate::db::model::Teacher::fetch(&db, teacher_id)
        .await
        .map_err(Error::FetchTeacherFailed)?
        .map(|teacher| teacher.full_name);

    let payload = presence_web_core::checkin::QrPayload {
        class_id: lecture.class,
        lecture_id: *lecture_id,
        timestamp: chrono::Utc::now().timestamp_millis(),
        lecture_name: Some(lecture.title),
        teacher_name,
        location: issue.into_inner().location,
    };

    let payload_text = payload.encode().map_err(Error::PayloadEncodeError)?;

    crate::db::model::Lecture::record_qr(&db, *lecture_id, payload_text.clone())
        .await
        .map_err(|err| match err {
            crate::db::UpdateQueryError::NoSuchRecord => Error::NoSuchLecture,
            crate::db::UpdateQueryError::QueryError(err) => Error::RecordQrFailed(err),
        })?;

    let image_data_url = crate::qr::data_url(&payload_text)?;

    Ok(HttpResponse::Ok().json(presence_web_core::IssuedQr {
        payload,
        image_data_url,
    }))
}
