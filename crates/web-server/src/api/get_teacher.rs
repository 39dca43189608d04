use actix_web::{get, web, HttpResponse};

#[derive(Debug, super::Error, thiserror::Error)]
pub enum Error {
    #[error("Database query failed")]
    DatabaseQueryError(#[from] crate::db::QueryError),
}

#[get("/teachers/{id:\\d+}")]
pub async fn endpoint(
    teacher_id: web::Path<i32>,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    Ok(crate::db::model::Teacher::fetch(&db, *teacher_id)
        .await
        .map(|teacher| {
            HttpResponse::Ok()
                .json(teacher.map(|teacher| -> presence_web_core::Teacher { teacher.into() }))
        })?)
}
