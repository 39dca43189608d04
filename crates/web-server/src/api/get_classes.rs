use actix_web::{get, web, HttpResponse};

#[derive(Debug, super::Error, thiserror::Error)]
pub enum Error {
    #[status_code(BAD_REQUEST)]
    #[error("Failed to decode query string")]
    QueryStringDecodeError(#[from] serde_qs::Error),
    #[error("Database query failed")]
    DatabaseQueryError(#[from] crate::db::QueryError),
}

#[get("/classes")]
pub async fn endpoint(
    req: actix_web::HttpRequest,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    let params: presence_web_core::ClassQueryParams = serde_qs::from_str(req.query_string())?;

    Ok(crate::db::model::Class::fetch_all(&db, params.teacher)
        .await
        .map(|classes| HttpResponse::Ok().json(presence_web_core::Classes::from(classes)))?)
}
