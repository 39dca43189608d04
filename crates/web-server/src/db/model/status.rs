/// SQL mapping for `presence_web_core::AttendanceStatus`; stored as its
/// display text ("Present"/"Absent"/"Late").
#[derive(Clone, Copy, Debug, diesel::AsExpression, diesel::FromSqlRow, Eq, PartialEq)]
#[sql_type = "diesel::sql_types::Text"]
pub struct Status(pub presence_web_core::AttendanceStatus);

impl<ST, DB> diesel::deserialize::FromSql<ST, DB> for Status
where
    DB: diesel::backend::Backend,
    String: diesel::deserialize::FromSql<ST, DB>,
{
    fn from_sql(bytes: Option<&DB::RawValue>) -> diesel::deserialize::Result<Self> {
        String::from_sql(bytes)?
            .parse::<presence_web_core::AttendanceStatus>()
            .map(Status)
            .map_err(|err| Box::new(err) as Box<dyn std::error::Error + Send + Sync>)
    }
}

impl<DB> diesel::serialize::ToSql<diesel::sql_types::Text, DB> for Status
where
    DB: diesel::backend::Backend,
    String: diesel::serialize::ToSql<diesel::sql_types::Text, DB>,
{
    fn to_sql<W: std::io::Write>(
        &self,
        out: &mut diesel::serialize::Output<W, DB>,
    ) -> diesel::serialize::Result {
        self.0.to_string().to_sql(out)
    }
}
