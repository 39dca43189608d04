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

#[post("/classes")]
pub async fn endpoint(
    req: actix_web::HttpRequest,
    desc: web::Json<presence_web_core::NewClass>,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    let token = crate::session::token_from(&req)?;
    let session = crate::db::model::Session::fetch_by_token(&db, token)
        .await
        .map_err(Error::SessionLookupFailed)?
        .ok_or(Error::UnknownToken)?;

    let teacher_id = session.teacher.ok_or(Error::NotATeacher)?;

    let class_id = crate::db::model::Class::insert(&db, teacher_id, desc.into_inner()).await?;

    Ok(HttpResponse::Created().json(class_id))
}
