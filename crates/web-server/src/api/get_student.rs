use actix_web::{get, web, HttpResponse};

#[derive(Debug, super::Error, thiserror::Error)]
pub enum Error {
    #[error("Database query failed")]
    DatabaseQueryError(#[from] crate::db::QueryError),
}

#[get("/students/{id:\\d+}")]
pub async fn endpoint(
    student_id: web::Path<i32>,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    Ok(crate::db::model::Student::fetch(&db, *student_id)
        .await
        .map(|student| {
            HttpResponse::Ok()
                .json(student.map(|student| -> presence_web_core::Student { student.into() }))
        })?)
}
