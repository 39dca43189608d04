use crate::db::schema::students;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(diesel::Queryable)]
pub struct Student {
    pub email: String,
    pub full_name: String,
    pub roll_number: String,
    pub department: String,
    pub year: i32,
    pub face_registered: bool,
}

#[derive(diesel::Insertable)]
#[table_name = "students"]
struct NewStudent {
    pub email: String,
    pub password_digest: String,
    pub full_name: String,
    pub roll_number: String,
    pub department: String,
    pub year: i32,
}

impl Into<presence_web_core::Student> for Student {
    fn into(self) -> presence_web_core::Student {
        presence_web_core::Student {
            email: self.email,
            full_name: self.full_name,
            roll_number: self.roll_number,
            department: self.department,
            year: self.year,
            face_registered: self.face_registered,
        }
    }
}

impl Student {
    pub async fn insert(
        db: &crate::db::System,
        profile: presence_web_core::NewStudent,
        password_digest: String,
    ) -> Result<i32, crate::db::QueryError> {
        db.run_query({
            let db = db.clone();
            move |db_connection| {
                let _guard = db.students_insertion_guard().lock();

                diesel::insert_into(students::table)
                    .values(&NewStudent {
                        email: profile.email,
                        password_digest,
                        full_name: profile.full_name,
                        roll_number: profile.roll_number,
                        department: profile.department,
                        year: profile.year,
                    })
                    .execute(&db_connection)?;

                Ok(*students::table
                    .select(students::id)
                    .order(students::id.desc())
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
        student_id: i32,
    ) -> Result<Option<Self>, crate::db::QueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::students::dsl::*;
            students
                .select((
                    email,
                    full_name,
                    roll_number,
                    department,
                    year,
                    face_registered,
                ))
                .filter(id.eq(student_id))
                .load::<Self>(&db_connection)
        })
        .await
        .map(|mut students| students.pop())
    }

    /// Looks a student up for sign-in; returns `(id, password_digest,
    /// full_name)`.
    pub async fn fetch_credentials(
        db: &crate::db::System,
        by_email: String,
    ) -> Result<Option<(i32, String, String)>, crate::db::QueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::students::dsl::*;
            students
                .select((id, password_digest, full_name))
                .filter(email.eq(by_email))
                .load::<(i32, String, String)>(&db_connection)
        })
        .await
        .map(|mut rows| rows.pop())
    }

    /// Returns `(face_registered, face_image)` for the check-in gate.
    pub async fn fetch_face(
        db: &crate::db::System,
        student_id: i32,
    ) -> Result<Option<(bool, Option<crate::db::model::FaceImage>)>, crate::db::QueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::students::dsl::*;
            students
                .select((face_registered, face_image))
                .filter(id.eq(student_id))
                .load::<(bool, Option<crate::db::model::FaceImage>)>(&db_connection)
        })
        .await
        .map(|mut rows| rows.pop())
    }

    pub async fn register_face(
        db: &crate::db::System,
        student_id: i32,
        face: crate::db::model::FaceImage,
    ) -> Result<(), crate::db::UpdateQueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::students::dsl::*;
            diesel::update(students.filter(id.eq(student_id)))
                .set((face_image.eq(Some(face)), face_registered.eq(true)))
                .execute(&db_connection)
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
