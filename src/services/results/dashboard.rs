//! 管理端首页汇总

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ResultService, staff_stats::response_percentage};
use crate::models::results::responses::DashboardResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn dashboard(
    service: &ResultService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    macro_rules! try_count {
        ($expr:expr, $what:literal) => {
            match $expr.await {
                Ok(value) => value,
                Err(e) => {
                    tracing::error!(concat!("Failed to count ", $what, ": {}"), e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(ErrorCode::InternalServerError, "查询汇总失败"),
                    ));
                }
            }
        };
    }

    let total_students = try_count!(storage.count_students(), "students");
    let total_courses = try_count!(storage.count_courses(), "courses");
    let total_staff = try_count!(storage.count_staff(), "staff");
    let total_questions = try_count!(storage.count_questions(), "questions");

    let active_event = match storage.get_active_event().await {
        Ok(event) => event,
        Err(e) => {
            tracing::error!("Failed to load active event: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询汇总失败",
                )),
            );
        }
    };

    let responded_count = match &active_event {
        Some(event) => {
            try_count!(storage.count_distinct_responders(event.id, None), "responders")
        }
        None => 0,
    };

    let response = DashboardResponse {
        total_students,
        total_courses,
        total_staff,
        total_questions,
        active_event,
        responded_count,
        completion_rate: response_percentage(responded_count, total_students),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
