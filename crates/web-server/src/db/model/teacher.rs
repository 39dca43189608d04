use crate::db::schema::teachers;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(diesel::Queryable)]
pub struct Teacher {
    pub email: String,
    pub full_name: String,
    pub department: String,
    pub subjects: Option<String>,
}

#[derive(diesel::Insertable)]
#[table_name = "teachers"]
struct NewTeacher {
    pub email: String,
    pub password_digest: String,
    pub full_name: String,
    pub department: String,
    pub subjects: Option<String>,
}

impl Into<presence_web_core::Teacher> for Teacher {
    fn into(self) -> presence_web_core::Teacher {
        presence_web_core::Teacher {
            email: self.email,
            full_name: self.full_name,
            department: self.department,
            subjects: self
                .subjects
                .map(|subjects| subjects.split(',').map(str::to_string).collect()),
        }
    }
}

impl Teacher {
    pub async fn insert(
        db: &crate::db::System,
        profile: presence_web_core::NewTeacher,
        password_digest: String,
    ) -> Result<i32, crate::db::QueryError> {
        db.run_query({
            let db = db.clone();
            move |db_connection| {
                let _guard = db.teachers_insertion_guard().lock();

                diesel::insert_into(teachers::table)
                    .values(&NewTeacher {
                        email: profile.email,
                        password_digest,
                        full_name: profile.full_name,
                        department: profile.department,
                        subjects: profile.subjects.map(|subjects| subjects.join(",")),
                    })
                    .execute(&db_connection)?;

                Ok(*teachers::table
                    .select(teachers::id)
                    .order(teachers::id.desc())
                    .limit(1)
                    .load(&db_connection)?
                    .get(0)
                    .unwrap())
            }
        })
        .await
    }

    pub async fn fetch(
        db: &crate::db::System,
        teacher_id: i32,
    ) -> Result<Option<Self>, crate::db::QueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::teachers::dsl::*;
            teachers
                .select((email, full_name, department, subjects))
                .filter(id.eq(teacher_id))
                .load::<Self>(&db_connection)
        })
        .await
        .map(|mut teachers| teachers.pop())
    }

    /// Looks a teacher up for sign-in; returns `(id, password_digest,
    /// full_name)`.
    pub async fn fetch_credentials(
        db: &crate::db::System,
        by_email: String,
    ) -> Result<Option<(i32, String, String)>, crate::db::QueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::teachers::dsl::*;
            teachers
                .select((id, password_digest, full_name))
                .filter(email.eq(by_email))
                .load::<(i32, String, String)>(&db_connection)
        })
        .await
        .map(|mut rows| rows.pop())
    }
}
