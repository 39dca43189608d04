use actix_web::{post, web, HttpResponse};

#[derive(Debug, super::Error, thiserror::Error)]
pub enum Error {
    #[status_code(CONFLICT)]
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("Database query failed")]
    DatabaseQueryError(#[from] crate::db::QueryError),
}

#[post("/auth/teachers")]
pub async fn endpoint(
    profile: web::Json<presence_web_core::NewTeacher>,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    let profile = profile.into_inner();

    log::debug!("POST /auth/teachers {}", profile.email);

    if crate::db::model::Teacher::fetch_credentials(&db, profile.email.clone())
        .await?
        .is_some()
    {
        return Err(Error::EmailTaken);
    }

    let full_name = profile.full_name.clone();
    let password_digest = crate::session::password_digest(&profile.password);

    let teacher_id = crate::db::model::Teacher::insert(&db, profile, password_digest).await?;

    let token = crate::session::issue_token();
    crate::db::model::Session::insert(&db, token.clone(), None, Some(teacher_id)).await?;

    Ok(HttpResponse::Created().json(presence_web_core::SessionGrant {
        token,
        role: presence_web_core::Role::Teacher,
        id: teacher_id,
        full_name,
    }))
}
