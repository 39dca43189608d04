pub mod attendance_record;
pub mod class;
pub mod face_image;
pub mod lecture;
pub mod session;
pub mod status;
pub mod student;
pub mod teacher;

pub use attendance_record::AttendanceRecord;
pub use class::Class;
pub use face_image::FaceImage;
pub use lecture::Lecture;
pub use session::Session;
pub use status::Status;
pub use student::Student;
pub use teacher::Teacher;
