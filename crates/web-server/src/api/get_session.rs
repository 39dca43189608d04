use actix_web::{get, web, HttpResponse};

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
    #[status_code(UNAUTHORIZED)]
    #[error("Session refers to a deleted account")]
    StaleSession,
    #[error("Database query failed")]
    DatabaseQueryError(#[from] crate::db::QueryError),
}

#[get("/auth/session")]
pub async fn endpoint(
    req: actix_web::HttpRequest,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    let token = crate::session::token_from(&req)?;

    let session = crate::db::model::Session::fetch_by_token(&db, token)
        .await
        .map_err(Error::SessionLookupFailed)?
        .ok_or(Error::UnknownToken)?;

    let profile = match (session.student, session.teacher) {
        (Some(student_id), _) => crate::db::model::Student::fetch(&db, student_id)
            .await?
            .map(|student| presence_web_core::SessionProfile::Student {
                id: student_id,
                profile: student.into(),
            }),
        (_, Some(teacher_id)) => crate::db::model::Teacher::fetch(&db, teacher_id)
            .await?
            .map(|teacher| presence_web_core::SessionProfile::Teacher {
                id: teacher_id,
                profile: teacher.into(),
            }),
        (None, None) => None,
    };

    profile
        .map(|profile| HttpResponse::Ok().json(profile))
        .ok_or(Error::StaleSession)
}
