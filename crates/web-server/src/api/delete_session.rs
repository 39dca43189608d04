use actix_web::{delete, web, HttpResponse};

#[derive(Debug, super::Error, thiserror::Error)]
pub enum Error {
    #[status_code(UNAUTHORIZED)]
    #[error(transparent)]
    TokenError(#[from] crate::session::TokenError),
    #[status_code(UNAUTHORIZED)]
    #[error("Session not found; sign in again")]
    UnknownToken,
    #[error("Database update failed")]
    DatabaseUpdateQueryError(#[source] crate::db::QueryError),
}

/// Sign-out: the session row is the only server-side state, so deleting it
/// is the whole teardown.
#[delete("/auth/session")]
pub async fn endpoint(
    req: actix_web::HttpRequest,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    let token = crate::session::token_from(&req)?;

    crate::db::model::Session::delete_by_token(&db, token)
        .await
        .map_err(|err| match err {
            crate::db::UpdateQueryError::NoSuchRecord => Error::UnknownToken,
            crate::db::UpdateQueryError::QueryError(err) => Error::DatabaseUpdateQueryError(err),
        })?;

    Ok(HttpResponse::NoContent().finish())
}
