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
    #[error("Database query failed")]
    DatabaseQueryError(#[from] crate::db::QueryError),
}

#[post("/lectures")]
pub async fn endpoint(
    req: actix_web::HttpRequest,
    desc: web::Json<presence_web_core::NewLecture>,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    let token = crate::session::token_from(&req)?;
    let session = crate::db::model::Session::fetch_by_token(&db, token)
        .await
        .map_err(Error::SessionLookupFailed)?
        .ok_or(Error::UnknownToken)?;

    session.teacher.ok_or(Error::NotATeacher)?;

    let lecture_id = crate::db::model::Lecture::insert(&db, desc.into_inner()).await?;

    Ok(HttpResponse::Created().json(lecture_id))
}
