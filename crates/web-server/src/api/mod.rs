mod delete_session;
mod get_attendance;
mod get_classes;
mod get_lectures;
mod get_session;
mod get_student;
mod get_teacher;
mod post_checkin;
mod post_class;
mod post_lecture;
mod post_lecture_qr;
mod post_sign_in;
mod post_student;
mod post_teacher;
mod put_attendance;
mod put_student_face;

pub use presence_web_server_derive::ApiError as Error;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(delete_session::endpoint)
        .service(get_attendance::endpoint)
        .service(get_classes::endpoint)
        .service(get_lectures::endpoint)
        .service(get_session::endpoint)
        .service(get_student::endpoint)
        .service(get_teacher::endpoint)
        .service(post_checkin::endpoint)
        .service(post_class::endpoint)
        .service(post_lecture::endpoint)
        .service(post_lecture_qr::endpoint)
        .service(post_sign_in::endpoint)
        .service(post_student::endpoint)
        .service(post_teacher::endpoint)
        .service(put_attendance::endpoint)
        .service(put_student_face::endpoint);
}
