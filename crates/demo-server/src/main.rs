//! The throwaway demo endpoints that shipped alongside Presence+: a
//! fixed-status attendance sink, a QR generator that answers with an HTML
//! `<img>` tag, and a toy in-memory roster. Everything lives in process
//! memory; restarting the server resets it. Deliberately no shared
//! configuration with `presenced`.

use actix_web::{get, post, web, HttpResponse};

const QR_TARGET_URL: &str = "https://presence.example/checkin";

#[derive(Clone, serde::Deserialize, serde::Serialize)]
struct RosterEntry {
    id: i32,
    name: String,
    attendance: bool,
}

struct Roster(std::sync::Mutex<Vec<RosterEntry>>);

impl Roster {
    fn seeded() -> Self {
        Self(std::sync::Mutex::new(vec![
            RosterEntry {
                id: 1,
                name: String::from("Aarav Patel"),
                attendance: false,
            },
            RosterEntry {
                id: 2,
                name: String::from("Diya Sharma"),
                attendance: true,
            },
            RosterEntry {
                id: 3,
                name: String::from("Rohan Mehta"),
                attendance: false,
            },
        ]))
    }
}

#[derive(serde::Serialize)]
struct Message {
    message: String,
}

impl Message {
    fn new<T: Into<String>>(message: T) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(serde::Deserialize)]
struct SubmitAttendance {
    status: String,
}

#[post("/submit-attendance")]
async fn submit_attendance(body: web::Json<SubmitAttendance>) -> HttpResponse {
    match body.status.as_str() {
        "present" | "absent" => HttpResponse::Ok().json(Message::new(format!(
            "Attendance marked as {}",
            body.status
        ))),
        _ => HttpResponse::BadRequest().json(Message::new("Invalid attendance status")),
    }
}

#[derive(Debug, thiserror::Error)]
enum RenderQrError {
    #[error("Failed to build QR code: {0:?}")]
    QrError(qrcode::types::QrError),
    #[error("Failed to encode QR code image")]
    PngEncodeError(#[from] image::ImageError),
}

impl actix_web::ResponseError for RenderQrError {}

fn qr_data_url(text: &str) -> Result<String, RenderQrError> {
    let code = qrcode::QrCode::new(text.as_bytes()).map_err(RenderQrError::QrError)?;

    let rendered = code.render::<image::Luma<u8>>().min_dimensions(200, 200).build();

    let mut png = Vec::new();
    image::DynamicImage::ImageLuma8(rendered).write_to(&mut png, image::ImageOutputFormat::Png)?;

    Ok(format!("data:image/png;base64,{}", base64::encode(&png)))
}

#[get("/generate-qr")]
async fn generate_qr() -> Result<HttpResponse, RenderQrError> {
    let data_url = qr_data_url(QR_TARGET_URL)?;

    Ok(HttpResponse::Ok()
        .content_type("text/html")
        .body(format!("<img src=\"{}\" alt=\"QR code\"/>", data_url)))
}

#[get("/api/attendance")]
async fn list_attendance(roster: web::Data<Roster>) -> HttpResponse {
    let roster = roster.0.lock().unwrap();
    HttpResponse::Ok().json(&*roster)
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkAttendance {
    student_id: i32,
    is_present: bool,
}

#[post("/api/attendance")]
async fn mark_attendance(
    body: web::Json<MarkAttendance>,
    roster: web::Data<Roster>,
) -> HttpResponse {
    let mut roster = roster.0.lock().unwrap();

    match roster.iter_mut().find(|entry| entry.id == body.student_id) {
        Some(entry) => {
            entry.attendance = body.is_present;
            HttpResponse::Ok().json(&*roster)
        }
        None => HttpResponse::NotFound().json(Message::new("Student not found")),
    }
}

#[derive(structopt::StructOpt)]
struct CliOptions {
    #[structopt(short, long, default_value = "0.0.0.0")]
    host: String,
    #[structopt(short, long, default_value = "5000")]
    port: u16,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use structopt::StructOpt;

    env_logger::init_from_env(env_logger::Env::new().filter("PRESENCE_DEMO_LOG"));

    let cli_options = CliOptions::from_args();

    let roster = web::Data::new(Roster::seeded());

    log::info!("listening on {}:{}", cli_options.host, cli_options.port);

    actix_web::HttpServer::new(move || {
        actix_web::App::new()
            .app_data(roster.clone())
            .service(submit_attendance)
            .service(generate_qr)
            .service(list_attendance)
            .service(mark_attendance)
    })
    .bind((cli_options.host.as_str(), cli_options.port))?
    .run()
    .await
}
