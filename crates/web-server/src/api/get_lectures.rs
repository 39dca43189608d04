use actix_web::{get, web, HttpResponse};

#[derive(Debug, super::Error, thiserror::Error)]
pub enum Error {
    #[status_code(BAD_REQUEST)]
    #[error("Failed to decode query string")]
    QueryStringDecodeError(#[from] serde_qs::Error),
    #[error("Database query failed")]
    DatabaseQueryError(#[from] crate::db::QueryError),
}

#[get("/lectures")]
pub async fn endpoint(
    req: actix_web::HttpRequest,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    let params: presence_web_core::LectureQueryParams = serde_qs::from_str(req.query_string())?;

    Ok(crate::db::model::Lecture::fetch_all(&db, params.class)
        .await
        .map(|lectures| HttpResponse::Ok().json(presence_web_core::Lectures::from(lectures)))?)
}
