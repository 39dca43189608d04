//! End-to-end exercises of the check-in pipeline against a scratch SQLite
//! database, with the mock verifier's delay set to zero.

macro_rules! test_app {
    ($db:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .data($db.clone())
                .data(presenced::verify::Verifier::new(std::sync::Arc::new(
                    presenced::verify::MockFaceVerifier::new(std::time::Duration::from_millis(0)),
                )))
                .service(actix_web::web::scope("/api").configure(presenced::api::configure)),
        )
        .await
    };
}

macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&mut $app, $req).await;
        let status = resp.status();
        let bytes = actix_web::test::read_body(resp).await;
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }};
}

fn scratch_db() -> (tempfile::TempDir, presenced::db::System) {
    let dir = tempfile::tempdir().unwrap();
    let db = presenced::db::System::new(&dir.path().join("presence.db")).unwrap();
    (dir, db)
}

fn face_data_url() -> String {
    let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        8,
        8,
        image::Rgb([120, 90, 70]),
    ));
    let mut png = Vec::new();
    image
        .write_to(&mut png, image::ImageOutputFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", base64::encode(&png))
}

fn fresh_payload(class_id: i64, lecture_id: i64) -> serde_json::Value {
    serde_json::json!({
        "classId": class_id,
        "lectureId": lecture_id,
        "timestamp": chrono::Utc::now().timestamp_millis(),
    })
}

macro_rules! sign_up_student {
    ($app:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/students")
            .set_json(&serde_json::json!({
                "email": "asha@example.edu",
                "password": "hunter2",
                "full_name": "Asha Rao",
                "roll_number": "CS-042",
                "department": "CS",
                "year": 3,
            }))
            .to_request();
        let (status, grant) = call_json!($app, req);
        assert_eq!(status, actix_web::http::StatusCode::CREATED);
        (
            grant["token"].as_str().unwrap().to_string(),
            grant["id"].as_i64().unwrap(),
        )
    }};
}

// Creates a teacher, one class, and one lecture; yields the teacher token
// plus both ids.
macro_rules! seed_lecture {
    ($app:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/teachers")
            .set_json(&serde_json::json!({
                "email": "prof@example.edu",
                "password": "lecture",
                "full_name": "Prof Iyer",
                "department": "CS",
                "subjects": ["Networks"],
            }))
            .to_request();
        let (status, grant) = call_json!($app, req);
        assert_eq!(status, actix_web::http::StatusCode::CREATED);
        let token = grant["token"].as_str().unwrap().to_string();

        let req = actix_web::test::TestRequest::post()
            .uri("/api/classes")
            .header("X-Session-Token", token.clone())
            .set_json(&serde_json::json!({
                "name": "Networks",
                "department": "CS",
                "year": 3,
            }))
            .to_request();
        let (status, class_id) = call_json!($app, req);
        assert_eq!(status, actix_web::http::StatusCode::CREATED);
        let class_id = class_id.as_i64().unwrap();

        let req = actix_web::test::TestRequest::post()
            .uri("/api/lectures")
            .header("X-Session-Token", token.clone())
            .set_json(&serde_json::json!({
                "class": class_id,
                "title": "Routing",
                "date": "2026-09-01",
            }))
            .to_request();
        let (status, lecture_id) = call_json!($app, req);
        assert_eq!(status, actix_web::http::StatusCode::CREATED);

        (token, class_id, lecture_id.as_i64().unwrap())
    }};
}

macro_rules! register_face {
    ($app:expr, $token:expr, $student_id:expr) => {{
        let req = actix_web::test::TestRequest::put()
            .uri(&format!("/api/students/{}/face", $student_id))
            .header("X-Session-Token", $token.clone())
            .set_json(&serde_json::json!({ "faceImage": face_data_url() }))
            .to_request();
        let (status, _) = call_json!($app, req);
        assert_eq!(status, actix_web::http::StatusCode::OK);
    }};
}

#[actix_rt::test]
async fn unregistered_face_blocks_checkin_before_any_attendance_write() {
    let (_dir, db) = scratch_db();
    let mut app = test_app!(db);

    let (_teacher_token, class_id, lecture_id) = seed_lecture!(app);
    let (token, _student_id) = sign_up_student!(app);

    let req = actix_web::test::TestRequest::post()
        .uri("/api/checkin")
        .header("X-Session-Token", token)
        .set_json(&serde_json::json!({ "payload": fresh_payload(class_id, lecture_id) }))
        .to_request();
    let (status, body) = call_json!(app, req);

    assert_eq!(status, actix_web::http::StatusCode::FORBIDDEN);
    assert!(body["description"]
        .as_str()
        .unwrap()
        .contains("register your face"));

    let req = actix_web::test::TestRequest::get()
        .uri("/api/attendance")
        .to_request();
    let (status, records) = call_json!(app, req);
    assert_eq!(status, actix_web::http::StatusCode::OK);
    assert!(records.as_object().unwrap().is_empty());
}

#[actix_rt::test]
async fn successful_checkin_records_attendance() {
    let (_dir, db) = scratch_db();
    let mut app = test_app!(db);

    let (_teacher_token, class_id, lecture_id) = seed_lecture!(app);
    let (token, student_id) = sign_up_student!(app);
    register_face!(app, token, student_id);

    let req = actix_web::test::TestRequest::post()
        .uri("/api/checkin")
        .header("X-Session-Token", token)
        .set_json(&serde_json::json!({
            "payload": fresh_payload(class_id, lecture_id),
            "faceImage": face_data_url(),
        }))
        .to_request();
    let (status, receipt) = call_json!(app, req);

    assert_eq!(status, actix_web::http::StatusCode::CREATED);
    assert_eq!(receipt["status"], "Present");
    assert_eq!(receipt["verification_method"], "face_recognition");

    let req = actix_web::test::TestRequest::get()
        .uri(&format!("/api/attendance?lecture={}", lecture_id))
        .to_request();
    let (status, records) = call_json!(app, req);
    assert_eq!(status, actix_web::http::StatusCode::OK);

    let records = records.as_object().unwrap();
    assert_eq!(records.len(), 1);
    let record = records.values().next().unwrap();
    assert_eq!(record["student"].as_i64().unwrap(), student_id);
    assert_eq!(record["status"], "Present");
}

// Pins the known gap: there is no idempotency key, so a second successful
// verification stores a second row.
#[actix_rt::test]
async fn repeated_checkin_is_not_deduplicated() {
    let (_dir, db) = scratch_db();
    let mut app = test_app!(db);

    let (_teacher_token, class_id, lecture_id) = seed_lecture!(app);
    let (token, student_id) = sign_up_student!(app);
    register_face!(app, token, student_id);

    for _ in 0..2 {
        let req = actix_web::test::TestRequest::post()
            .uri("/api/checkin")
            .header("X-Session-Token", token.clone())
            .set_json(&serde_json::json!({ "payload": fresh_payload(class_id, lecture_id) }))
            .to_request();
        let (status, _) = call_json!(app, req);
        assert_eq!(status, actix_web::http::StatusCode::CREATED);
    }

    let req = actix_web::test::TestRequest::get()
        .uri(&format!("/api/attendance?lecture={}", lecture_id))
        .to_request();
    let (_, records) = call_json!(app, req);
    assert_eq!(records.as_object().unwrap().len(), 2);
}

#[actix_rt::test]
async fn expired_qr_is_rejected() {
    let (_dir, db) = scratch_db();
    let mut app = test_app!(db);

    let (_teacher_token, class_id, lecture_id) = seed_lecture!(app);
    let (token, student_id) = sign_up_student!(app);
    register_face!(app, token, student_id);

    let stale = serde_json::json!({
        "classId": class_id,
        "lectureId": lecture_id,
        "timestamp": chrono::Utc::now().timestamp_millis() - (30 * 60 * 1000 + 60_000),
    });

    let req = actix_web::test::TestRequest::post()
        .uri("/api/checkin")
        .header("X-Session-Token", token)
        .set_json(&serde_json::json!({ "payload": stale }))
        .to_request();
    let (status, body) = call_json!(app, req);

    assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
    assert_eq!(body["description"], "QR code expired");
}

#[actix_rt::test]
async fn out_of_range_location_reports_the_distance() {
    let (_dir, db) = scratch_db();
    let mut app = test_app!(db);

    let (_teacher_token, class_id, lecture_id) = seed_lecture!(app);
    let (token, student_id) = sign_up_student!(app);
    register_face!(app, token, student_id);

    let mut payload = fresh_payload(class_id, lecture_id);
    payload["location"] = serde_json::json!({ "lat": 0.0, "lng": 0.0 });

    // One degree of latitude away: ~111 km from the classroom.
    let req = actix_web::test::TestRequest::post()
        .uri("/api/checkin")
        .header("X-Session-Token", token.clone())
        .set_json(&serde_json::json!({
            "payload": payload.clone(),
            "location": { "lat": 1.0, "lng": 0.0 },
        }))
        .to_request();
    let (status, body) = call_json!(app, req);

    assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
    let description = body["description"].as_str().unwrap().to_string();
    assert!(description.contains("m from the classroom"), "{}", description);
    assert!(description.contains("111"), "{}", description);

    // No reading at all is its own failure; there is no fallback path.
    let req = actix_web::test::TestRequest::post()
        .uri("/api/checkin")
        .header("X-Session-Token", token)
        .set_json(&serde_json::json!({ "payload": payload }))
        .to_request();
    let (status, body) = call_json!(app, req);

    assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
    assert!(body["description"]
        .as_str()
        .unwrap()
        .contains("requires your location"));
}

#[actix_rt::test]
async fn session_lifecycle() {
    let (_dir, db) = scratch_db();
    let mut app = test_app!(db);

    let (token, student_id) = sign_up_student!(app);

    let req = actix_web::test::TestRequest::post()
        .uri("/api/auth/sessions")
        .set_json(&serde_json::json!({ "email": "asha@example.edu", "password": "wrong" }))
        .to_request();
    let (status, _) = call_json!(app, req);
    assert_eq!(status, actix_web::http::StatusCode::UNAUTHORIZED);

    let req = actix_web::test::TestRequest::get()
        .uri("/api/auth/session")
        .header("X-Session-Token", token.clone())
        .to_request();
    let (status, profile) = call_json!(app, req);
    assert_eq!(status, actix_web::http::StatusCode::OK);
    assert_eq!(profile["role"], "student");
    assert_eq!(profile["id"].as_i64().unwrap(), student_id);
    assert_eq!(profile["face_registered"], false);

    let req = actix_web::test::TestRequest::delete()
        .uri("/api/auth/session")
        .header("X-Session-Token", token.clone())
        .to_request();
    let (status, _) = call_json!(app, req);
    assert_eq!(status, actix_web::http::StatusCode::NO_CONTENT);

    let req = actix_web::test::TestRequest::get()
        .uri("/api/auth/session")
        .header("X-Session-Token", token)
        .to_request();
    let (status, _) = call_json!(app, req);
    assert_eq!(status, actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn issuing_a_qr_stamps_and_stores_the_payload() {
    let (_dir, db) = scratch_db();
    let mut app = test_app!(db);

    let (teacher_token, class_id, lecture_id) = seed_lecture!(app);

    let req = actix_web::test::TestRequest::post()
        .uri(&format!("/api/lectures/{}/qr", lecture_id))
        .header("X-Session-Token", teacher_token)
        .set_json(&serde_json::json!({ "location": { "lat": 12.97, "lng": 77.59 } }))
        .to_request();
    let (status, issued) = call_json!(app, req);

    assert_eq!(status, actix_web::http::StatusCode::OK);
    assert_eq!(issued["payload"]["classId"].as_i64().unwrap(), class_id);
    assert_eq!(issued["payload"]["lectureId"].as_i64().unwrap(), lecture_id);
    assert_eq!(issued["payload"]["lectureName"], "Routing");
    assert!(issued["imageDataUrl"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));

    let req = actix_web::test::TestRequest::get()
        .uri(&format!("/api/lectures?class={}", class_id))
        .to_request();
    let (_, lectures) = call_json!(app, req);
    let lecture = &lectures[lecture_id.to_string()];
    let stored = lecture["qr_code"].as_str().unwrap();
    assert!(stored.contains("\"lectureId\""));
}
