use crate::db::schema::lectures;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(diesel::Queryable)]
pub struct Lecture {
    pub class: i32,
    pub title: String,
    pub date: chrono::NaiveDate,
    pub qr_code: Option<String>,
}

#[derive(diesel::Insertable)]
#[table_name = "lectures"]
struct NewLecture {
    pub class: i32,
    pub title: String,
    pub date: chrono::NaiveDate,
}

impl Into<presence_web_core::Lecture> for Lecture {
    fn into(self) -> presence_web_core::Lecture {
        presence_web_core::Lecture {
            class: self.class,
            title: self.title,
            date: self.date,
            qr_code: self.qr_code,
        }
    }
}

impl Lecture {
    pub async fn insert(
        db: &crate::db::System,
        desc: presence_web_core::NewLecture,
    ) -> Result<i32, crate::db::QueryError> {
        db.run_query({
            let db = db.clone();
            move |db_connection| {
                let _guard = db.lectures_insertion_guard().lock();

                diesel::insert_into(lectures::table)
                    .values(&NewLecture {
                        class: desc.class,
                        title: desc.title,
                        date: desc.date,
                    })
                    .execute(&db_connection)?;

                Ok(*lectures::table
                    .select(lectures::id)
                    .order(lectures::id.desc())
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
        lecture_id: i32,
    ) -> Result<Option<Self>, crate::db::QueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::lectures::dsl::*;
            lectures
                .select((class, title, date, qr_code))
                .filter(id.eq(lecture_id))
                .load::<Self>(&db_connection)
        })
        .await
        .map(|mut lectures| lectures.pop())
    }

    pub async fn fetch_all(
        db: &crate::db::System,
        for_class: Option<i32>,
    ) -> Result<Vec<(i32, Self)>, crate::db::QueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::lectures::dsl::*;

            let mut query = lectures
                .select((id, (class, title, date, qr_code)))
                .into_boxed();

            if let Some(class_id) = for_class {
                query = query.filter(class.eq(class_id));
            }

            query
                .order_by(date)
                .then_order_by(id)
                .load::<(i32, Self)>(&db_connection)
        })
        .await
    }

    /// Stores the payload text of the most recently issued QR code.
    pub async fn record_qr(
        db: &crate::db::System,
        lecture_id: i32,
        qr_text: String,
    ) -> Result<(), crate::db::UpdateQueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::lectures::dsl::*;
            diesel::update(lectures.filter(id.eq(lecture_id)))
                .set(qr_code.eq(qr_text))
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
