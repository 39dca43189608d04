use crate::db::schema::classes;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(diesel::Queryable)]
pub struct Class {
    pub teacher: i32,
    pub name: String,
    pub department: String,
    pub year: i32,
}

#[derive(diesel::Insertable)]
#[table_name = "classes"]
struct NewClass {
    pub teacher: i32,
    pub name: String,
    pub department: String,
    pub year: i32,
}

impl Into<presence_web_core::Class> for Class {
    fn into(self) -> presence_web_core::Class {
        presence_web_core::Class {
            teacher: self.teacher,
            name: self.name,
            department: self.department,
            year: self.year,
        }
    }
}

impl Class {
    pub async fn insert(
        db: &crate::db::System,
        teacher_id: i32,
        desc: presence_web_core::NewClass,
    ) -> Result<i32, crate::db::QueryError> {
        db.run_query({
            let db = db.clone();
            move |db_connection| {
                let _guard = db.classes_insertion_guard().lock();

                diesel::insert_into(classes::table)
                    .values(&NewClass {
                        teacher: teacher_id,
                        name: desc.name,
                        department: desc.department,
                        year: desc.year,
                    })
                    .execute(&db_connection)?;

                Ok(*classes::table
                    .select(classes::id)
                    .order(classes::id.desc())
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
        taught_by: Option<i32>,
    ) -> Result<Vec<(i32, Self)>, crate::db::QueryError> {
        db.run_query(move |db_connection| {
            use crate::db::schema::classes::dsl::*;

            let mut query = classes
                .select((id, (teacher, name, department, year)))
                .into_boxed();

            if let Some(teacher_id) = taught_by {
                query = query.filter(teacher.eq(teacher_id));
            }

            query.order_by(id).load::<(i32, Self)>(&db_connection)
        })
        .await
    }
}
