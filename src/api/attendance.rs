use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use serde_json::json;

use crate::attendance::error::ErrorKind;
use crate::attendance::report::{TodayReport, UserAttendanceReport, UserDaysReport};
use crate::attendance::{AttendanceEngine, AttendanceError, Operation, legacy_message};

fn error_status(e: &AttendanceError) -> StatusCode {
    match e.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message(status: StatusCode, message: String) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "message": message }))
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/{user_id}/checkin",
    params(
        ("user_id", description = "User checking in")
    ),
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Check-in successful"
        })),
        (status = 400, description = "A session is still open", body = Object, example = json!({
            "message": "User has already checked in and not checked out yet."
        })),
        (status = 500, description = "Record store failure", body = Object, example = json!({
            "message": "Error during check-in: Database error: pool timed out"
        }))
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    engine: web::Data<AttendanceEngine>,
    path: web::Path<u64>,
) -> impl Responder {
    let user_id = path.into_inner();
    let result = engine.check_in(user_id).await;

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => error_status(e),
    };
    message(status, legacy_message(Operation::CheckIn, &result))
}

/// Check-out endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/{user_id}/checkout",
    params(
        ("user_id", description = "User checking out")
    ),
    responses(
        (status = 200, description = "Checked out, or open sessions closed as absent after midnight", body = Object, example = json!({
            "message": "Check-out successful. Status: Present, Working hours: 08:45:00"
        })),
        (status = 400, description = "No check-in today (an absent marker is recorded) or nothing left to close", body = Object, example = json!({
            "message": "All check-ins already checked out."
        })),
        (status = 500, description = "Record store failure", body = Object, example = json!({
            "message": "Error during check-out: Database error: pool timed out"
        }))
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    engine: web::Data<AttendanceEngine>,
    path: web::Path<u64>,
) -> impl Responder {
    let user_id = path.into_inner();
    let result = engine.check_out(user_id).await;

    let status = match &result {
        Ok(outcome) if outcome.is_rejection() => StatusCode::BAD_REQUEST,
        Ok(_) => StatusCode::OK,
        Err(e) => error_status(e),
    };
    message(status, legacy_message(Operation::CheckOut, &result))
}

/// Today's sessions and working hours of one user
#[utoipa::path(
    get,
    path = "/api/attendance/{user_id}/today",
    params(
        ("user_id", description = "User ID")
    ),
    responses(
        (status = 200, body = TodayReport)
    ),
    tag = "Attendance"
)]
pub async fn today_attendance(
    engine: web::Data<AttendanceEngine>,
    path: web::Path<u64>,
) -> impl Responder {
    HttpResponse::Ok().json(engine.today_attendance(path.into_inner()).await)
}

/// Full history of one user with per-day and total working hours
#[utoipa::path(
    get,
    path = "/api/attendance/{user_id}",
    params(
        ("user_id", description = "User ID")
    ),
    responses(
        (status = 200, body = UserAttendanceReport)
    ),
    tag = "Attendance"
)]
pub async fn all_attendance(
    engine: web::Data<AttendanceEngine>,
    path: web::Path<u64>,
) -> impl Responder {
    HttpResponse::Ok().json(engine.all_attendance(path.into_inner()).await)
}

/// Every user's attendance, grouped per user and day
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, body = [UserDaysReport])
    ),
    tag = "Attendance"
)]
pub async fn all_users_attendance(engine: web::Data<AttendanceEngine>) -> impl Responder {
    HttpResponse::Ok().json(engine.all_users_attendance().await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test};
    use chrono::NaiveTime;
    use serde_json::Value;

    use crate::attendance::clock::FixedClock;
    use crate::attendance::engine::tests::{FailingStore, at, day};
    use crate::attendance::status::StatusThresholds;
    use crate::routes::attendance_routes;
    use crate::store::{AttendanceStore, MemoryStore};

    use super::*;

    fn engine(store: Arc<dyn AttendanceStore>, time: NaiveTime) -> web::Data<AttendanceEngine> {
        web::Data::new(AttendanceEngine::new(
            store,
            Arc::new(FixedClock::at(day(10), time)),
            StatusThresholds::default(),
        ))
    }

    async fn post(engine: web::Data<AttendanceEngine>, uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(App::new().app_data(engine).configure(attendance_routes)).await;
        let resp = test::call_service(&app, test::TestRequest::post().uri(uri).to_request()).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    async fn get(engine: web::Data<AttendanceEngine>, uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(App::new().app_data(engine).configure(attendance_routes)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_check_in_then_duplicate() {
        let store = Arc::new(MemoryStore::new());

        let (status, body) = post(engine(store.clone(), at(9, 0)), "/attendance/1/checkin").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Check-in successful");

        let (status, body) = post(engine(store, at(9, 5)), "/attendance/1/checkin").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "User has already checked in and not checked out yet."
        );
    }

    #[actix_web::test]
    async fn test_checkout_flow_status_codes() {
        let store = Arc::new(MemoryStore::new());

        let (status, body) = post(engine(store.clone(), at(8, 0)), "/attendance/1/checkout").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("not checked in"));

        post(engine(store.clone(), at(9, 0)), "/attendance/1/checkin").await;
        let (status, body) = post(engine(store.clone(), at(17, 0)), "/attendance/1/checkout").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "Check-out successful. Status: Present, Working hours: 08:00:00"
        );

        let (status, body) = post(engine(store, at(17, 5)), "/attendance/1/checkout").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("already checked out"));
    }

    #[actix_web::test]
    async fn test_store_failure_maps_to_500() {
        let (status, body) = post(engine(Arc::new(FailingStore), at(9, 0)), "/attendance/1/checkin").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].as_str().unwrap().starts_with("Error during check-in"));
    }

    #[actix_web::test]
    async fn test_reports_stay_200_on_store_failure() {
        let (status, body) = get(engine(Arc::new(FailingStore), at(9, 0)), "/attendance/1/today").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["workingHours"], "00:00:00");
        assert_eq!(body["attendances"], json!([]));

        let (status, body) = get(engine(Arc::new(FailingStore), at(9, 0)), "/attendance").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn test_history_and_all_users_reports() {
        let store = Arc::new(MemoryStore::new());
        post(engine(store.clone(), at(9, 0)), "/attendance/3/checkin").await;
        post(engine(store.clone(), at(13, 30)), "/attendance/3/checkout").await;

        let (_, body) = get(engine(store.clone(), at(14, 0)), "/attendance/3").await;
        assert_eq!(body["totalWorkingHours"], "04:30:00");
        assert_eq!(body["days"][0]["status"], "HalfDay");

        let (_, body) = get(engine(store, at(14, 0)), "/attendance").await;
        assert_eq!(body[0]["userId"], 3);
        assert_eq!(body[0]["days"][0]["attendances"][0]["checkOutTime"], "13:30:00");
    }
}
