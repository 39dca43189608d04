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
    #[error("A teacher session is required")]
    NotATeacher,
    #[status_code(NOT_FOUND)]
    #[error("No such attendance record")]
    NoSuchRecord,
    #[error("Database update failed")]
    DatabaseUpdateQueryError(#[source] crate::db::QueryError),
}

#[put("/attendance/{id:\\d+}")]
pub async fn endpoint(
    req: actix_web::HttpRequest,
    record_id: web::Path<i32>,
    edit: web::Json<presence_web_core::AttendanceEdit>,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    let token = crate::session::token_from(&req)?;
    let session = crate::db::model::Session::fetch_by_token(&db, token)
        .await
        .map_err(Error::SessionLookupFailed)?
        .ok_or(Error::UnknownToken)?;

    session.teacher.ok_or(Error::NotATeacher)?;

    crate::db::model::AttendanceRecord::set_status(&db, *record_id, edit.status)
        .await
        .map_err(|err| match err {
            crate::db::UpdateQueryError::NoSuchRecord => Error::NoSuchRecord,
            crate::db::UpdateQueryError::QueryError(err) => Error::DatabaseUpdateQueryError(err),
        })?;

    Ok(HttpResponse::Ok().json(()))
}
