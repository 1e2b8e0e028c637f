use crate::attendance::report::{
    AttendanceView, DaySummary, TodayReport, UserAttendanceReport, UserDaysReport,
};
use crate::model::attendance::AttendanceStatus;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance API",
        version = "1.0.0",
        description = r#"
## Attendance Tracking

Tracks employee presence through check-in / check-out events and derives
daily and aggregate working hours.

### Rules
- A user may hold several sessions per day, but only one open session at a time
- A day's working hours run from its **first check-in** to its **last check-out**
- Status per day: **Absent** below 4h, **HalfDay** from 4h, **Present** from 8h
- Checking out without any check-in today records the day as **Absent**
- Checking out just after midnight closes the day's open sessions as **Absent**

### Response Format
- Check-in / check-out answer with `{"message": "..."}`
- Reports use camelCase JSON, durations are `hh:mm:ss`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::today_attendance,
        crate::api::attendance::all_attendance,
        crate::api::attendance::all_users_attendance
    ),
    components(
        schemas(
            AttendanceStatus,
            AttendanceView,
            DaySummary,
            TodayReport,
            UserAttendanceReport,
            UserDaysReport
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_attendance_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/attendance",
            "/api/attendance/{user_id}",
            "/api/attendance/{user_id}/today",
            "/api/attendance/{user_id}/checkin",
            "/api/attendance/{user_id}/checkout",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected} in {paths:?}"
            );
        }
    }
}
