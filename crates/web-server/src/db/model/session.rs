use crate::db::schema::sessions;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

/// A signed-in identity; exactly one of `student`/`teacher` is set.
#[derive(diesel::Queryable)]
pub struct Session {
    pub student: Option<i32>,
    pub teacher: Option<i32>,
}

#[derive(diesel::Insertable)]
#[table_name = "sessions"]
struct NewSession {
    pub token: String,
    pub student: Option<i32>,
    pub teacher: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
}

impl Session {
    pub async fn insert(
        db: &crate::db::System,
        session_token: String,
        student_id: Option<i32>,
        teacher_id: Option<i32>,
    ) -> Result<(), crate::db::QueryError> {
        db.run_query({
            let db = db.clone();
            move |db_connection| {
                let _guard = db.sessions_insertion_guard().lock();

                diesel::insert_into(sessions::table)
                    .values(&NewSession {
                        token: session_token,
                        student: student_id,
                        teacher: teacher_id,
                        created_at: chrono::Utc::now().naive_utc(),
                    })
                    .execute(&db_connection)
                    .map(|_| ())
            }
        })
        .await
    }

    pub async fn fetch_by_token(
        db: &crate::db::System,
        session_token: String,
    ) -> Result<Option<Self>, crate::db::QueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::sessions::dsl::*;
            sessions
                .select((student, teacher))
                .filter(token.eq(session_token))
                .load::<Self>(&db_connection)
        })
        .await
        .map(|mut sessions| sessions.pop())
    }

    pub async fn delete_by_token(
        db: &crate::db::System,
        session_token: String,
    ) -> Result<(), crate::db::UpdateQueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::sessions::dsl::*;
            diesel::delete(sessions.filter(token.eq(session_token))).execute(&db_connection)
        })
        .await
        .map_err(crate::db::UpdateQueryError::QueryError)
        .and_then(|result| match result {
            1 => Ok(()),
            0 => Err(crate::db::UpdateQueryError::NoSuchRecord),
            _ => unreachable!(),
        })
    }
}
