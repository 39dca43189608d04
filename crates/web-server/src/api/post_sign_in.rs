use actix_web::{post, web, HttpResponse};

#[derive(Debug, super::Error, thiserror::Error)]
pub enum Error {
    #[status_code(UNAUTHORIZED)]
    #[error("Invalid email or password")]
    BadCredentials,
    #[error("Database query failed")]
    DatabaseQueryError(#[from] crate::db::QueryError),
}

/// Sign-in is role-agnostic: the email is looked up among students first,
/// then teachers, mirroring the two SPA login forms sharing one account
/// namespace.
#[post("/auth/sessions")]
pub async fn endpoint(
    credentials: web::Json<presence_web_core::Credentials>,
    db: web::Data<crate::db::System>,
) -> Result<actix_web::HttpResponse, Error> {
    let credentials = credentials.into_inner();

    log::debug!("POST /auth/sessions {}", credentials.email);

    let supplied_digest = crate::session::password_digest(&credentials.password);

    let grant = match crate::db::model::Student::fetch_credentials(&db, credentials.email.clone())
        .await?
    {
        Some((student_id, stored_digest, full_name)) if stored_digest == supplied_digest => {
            (presence_web_core::Role::Student, student_id, full_name)
        }
        _ => match crate::db::model::Teacher::fetch_credentials(&db, credentials.email).await? {
            Some((teacher_id, stored_digest, full_name)) if stored_digest == supplied_digest => {
                (presence_web_core::Role::Teacher, teacher_id, full_name)
            }
            _ => return Err(Error::BadCredentials),
        },
    };

    let (role, id, full_name) = grant;

    let token = crate::session::issue_token();
    match role {
        presence_web_core::Role::Student => {
            crate::db::model::Session::insert(&db, token.clone(), Some(id), None).await?
        }
        presence_web_core::Role::Teacher => {
            crate::db::model::Session::insert(&db, token.clone(), None, Some(id)).await?
        }
    }

    Ok(HttpResponse::Created().json(presence_web_core::SessionGrant {
        token,
        role,
        id,
        full_name,
    }))
}
