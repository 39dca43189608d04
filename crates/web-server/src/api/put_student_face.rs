use actix_web::{put, web, HttpResponse};

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
    #[status_code(FORBIDDEN)]
    #[error("Cannot register a face for another student")]
    WrongStudent,
    #[status_code(BAD_REQUEST)]
    #[error("Unusable face image")]
    BadFaceImage(#[from] crate::db::model::face_image::ParseFaceImageError),
    #[status_code(NOT_FOUND)]
    #[error("No such student")]
    NoSuchStudent,
    #[error("Database update failed")]
    DatabaseUpdateQueryError(#[source] crate::db::QueryError),
}

#[put("/students/{id:\\d+}/face")]
pub async fn endpoint(
    req: actix_web::HttpRequest,
    student_id: web::Path<i32>,
    registration: web::Json<presence_web_core::FaceRegistration>,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    log::debug!("PUT /students/{}/face", student_id);

    let token = crate::session::token_from(&req)?;
    let session = crate::db::model::Session::fetch_by_token(&db, token)
        .await
        .map_err(Error::SessionLookupFailed)?
        .ok_or(Error::UnknownToken)?;

    let session_student_id = session.student.ok_or(Error::NotAStudent)?;
    if session_student_id != *student_id {
        return Err(Error::WrongStudent);
    }

    let face = crate::db::model::FaceImage::parse(&registration.face_image)?;

    log::debug!("  FACE DIGEST {}", face.digest());

    crate::db::model::Student::register_face(&db, *student_id, face)
        .await
        .map_err(|err| match err {
            crate::db::UpdateQueryError::NoSuchRecord => Error::NoSuchStudent,
            crate::db::UpdateQueryError::QueryError(err) => Error::DatabaseUpdateQueryError(err),
        })?;

    Ok(HttpResponse::Ok().json(()))
}
