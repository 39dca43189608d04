use crate::db::schema::attendance_records;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(diesel::Queryable)]
pub struct AttendanceRecord {
    pub student: i32,
    pub class: i32,
    pub lecture: i32,
    pub timestamp: chrono::NaiveDateTime,
    pub status: crate::db::model::Status,
    pub verification_method: String,
}

#[derive(diesel::Insertable)]
#[table_name = "attendance_records"]
struct NewAttendanceRecord {
    pub student: i32,
    pub class: i32,
    pub lecture: i32,
    pub timestamp: chrono::NaiveDateTime,
    pub status: crate::db::model::Status,
    pub verification_method: String,
}

impl Into<presence_web_core::AttendanceRecord> for AttendanceRecord {
    fn into(self) -> presence_web_core::AttendanceRecord {
        presence_web_core::AttendanceRecord {
            student: self.student,
            class: self.class,
            lecture: self.lecture,
            timestamp: self.timestamp,
            status: self.status.0,
            verification_method: self.verification_method,
        }
    }
}

impl AttendanceRecord {
    /// One bare insert per successful verification flow. Deliberately no
    /// upsert and no lecture+student uniqueness: a second successful
    /// check-in yields a second row.
    pub async fn insert(
        db: &crate::db::System,
        student_id: i32,
        class_id: i32,
        lecture_id: i32,
        timestamp: chrono::NaiveDateTime,
        status: presence_web_core::AttendanceStatus,
        verification_method: String,
    ) -> Result<i32, crate::db::QueryError> {
        db.run_query({
            let db = db.clone();
            move |db_connection| {
                let _guard = db.attendance_insertion_guard().lock();

                diesel::insert_into(attendance_records::table)
                    .values(&NewAttendanceRecord {
                        student: student_id,
                        class: class_id,
                        lecture: lecture_id,
                        timestamp,
                        status: crate::db::model::Status(status),
                        verification_method,
                    })
                    .execute(&db_connection)?;

                Ok(*attendance_records::table
                    .select(attendance_records::id)
                    .order(attendance_records::id.desc())
                    .limit(1)
                    .load(&db_connection)?
                    .get(0)
                    .unwrap())
            }
        })
        .await
    }

    pub async fn fetch_all(
        db: &crate::db::System,
        params: presence_web_core::AttendanceQueryParams,
    ) -> Result<Vec<(i32, Self)>, crate::db::QueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::attendance_records::dsl::*;

            let mut query = attendance_records
                .select((
                    id,
                    (student, class, lecture, timestamp, status, verification_method),
                ))
                .into_boxed();

            if let Some(class_id) = params.class {
                query = query.filter(class.eq(class_id));
            }

            if let Some(lecture_id) = params.lecture {
                query = query.filter(lecture.eq(lecture_id));
            }

            query.order_by(id).load::<(i32, Self)>(&db_connection)
        })
        .await
    }

    /// The manual teacher edit; re-labels the verification method so the
    /// override is visible next to face-verified rows.
    pub async fn set_status(
        db: &crate::db::System,
        record_id: i32,
        new_status: presence_web_core::AttendanceStatus,
    ) -> Result<(), crate::db::UpdateQueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::attendance_records::dsl::*;
            diesel::update(attendance_records.filter(id.eq(record_id)))
                .set((
                    status.eq(crate::db::model::Status(new_status)),
                    verification_method.eq(String::from("Manual")),
                ))
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
