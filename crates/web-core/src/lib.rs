pub mod checkin;

#[derive(serde::Serialize)]
pub struct ErrorDesc {
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<Box<ErrorDesc>>,
}

impl From<&dyn std::error::Error> for ErrorDesc {
    fn from(error: &dyn std::error::Error) -> Self {
        Self {
            description: format!("{}", error),
            cause: error
                .source()
                .map(|source| Box::new(ErrorDesc::from(source))),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Student {
    pub email: String,
    pub full_name: String,
    pub roll_number: String,
    pub department: String,
    pub year: i32,
    pub face_registered: bool,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct NewStudent {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub roll_number: String,
    pub department: String,
    pub year: i32,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Teacher {
    pub email: String,
    pub full_name: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<String>>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct NewTeacher {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<String>>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct SessionGrant {
    pub token: String,
    pub role: Role,
    pub id: i32,
    pub full_name: String,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum SessionProfile {
    Student {
        id: i32,
        #[serde(flatten)]
        profile: Student,
    },
    Teacher {
        id: i32,
        #[serde(flatten)]
        profile: Teacher,
    },
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceRegistration {
    pub face_image: String,
}

#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct QrIssueRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<checkin::GeoPoint>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Class {
    pub teacher: i32,
    pub name: String,
    pub department: String,
    pub year: i32,
}

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Classes(#[serde(with = "tuple_vec_map")] Vec<(i32, Class)>);

impl<T, I> From<I> for Classes
where
    T: Into<Class>,
    I: IntoIterator<Item = (i32, T)>,
{
    fn from(i: I) -> Self {
        Self(i.into_iter().map(|(id, class)| (id, class.into())).collect())
    }
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct NewClass {
    pub name: String,
    pub department: String,
    pub year: i32,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ClassQueryParams {
    pub teacher: Option<i32>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Lecture {
    pub class: i32,
    pub title: String,
    pub date: chrono::NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Lectures(#[serde(with = "tuple_vec_map")] Vec<(i32, Lecture)>);

impl<T, I> From<I> for Lectures
where
    T: Into<Lecture>,
    I: IntoIterator<Item = (i32, T)>,
{
    fn from(i: I) -> Self {
        Self(
            i.into_iter()
                .map(|(id, lecture)| (id, lecture.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct NewLecture {
    pub class: i32,
    pub title: String,
    pub date: chrono::NaiveDate,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct LectureQueryParams {
    pub class: Option<i32>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Late => "Late",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown attendance status '{0}'")]
pub struct ParseAttendanceStatusError(pub String);

impl std::str::FromStr for AttendanceStatus {
    type Err = ParseAttendanceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(Self::Present),
            "Absent" => Ok(Self::Absent),
            "Late" => Ok(Self::Late),
            other => Err(ParseAttendanceStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct AttendanceRecord {
    pub student: i32,
    pub class: i32,
    pub lecture: i32,
    #[serde(with = "chrono::naive::serde::ts_seconds")]
    pub timestamp: chrono::NaiveDateTime,
    pub status: AttendanceStatus,
    pub verification_method: String,
}

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct AttendanceRecords(#[serde(with = "tuple_vec_map")] Vec<(i32, AttendanceRecord)>);

impl<T, I> From<I> for AttendanceRecords
where
    T: Into<AttendanceRecord>,
    I: IntoIterator<Item = (i32, T)>,
{
    fn from(i: I) -> Self {
        Self(
            i.into_iter()
                .map(|(id, record)| (id, record.into()))
                .collect(),
        )
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct AttendanceQueryParams {
    pub class: Option<i32>,
    pub lecture: Option<i32>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct AttendanceEdit {
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    pub payload: checkin::QrPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<checkin::GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_image: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct CheckinReceipt {
    pub record: i32,
    pub status: AttendanceStatus,
    pub verification_method: String,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedQr {
    pub payload: checkin::QrPayload,
    pub image_data_url: String,
}
