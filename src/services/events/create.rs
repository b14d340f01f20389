//! 活动创建服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::events::requests::CreateEventRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_roll_number;

pub async fn create_event(
    service: &EventService,
    event_data: CreateEventRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if event_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "活动标题不能为空",
        )));
    }

    // 填了的学号边界格式要对
    for roll in [
        event_data.start_roll_number.as_deref(),
        event_data.end_roll_number.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        if let Err(msg) = validate_roll_number(roll) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::RollNumberInvalid, msg)));
        }
    }

    if let Some(msg) = window_violation(
        event_data.is_open_to_all,
        event_data.start_roll_number.as_deref(),
        event_data.end_roll_number.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 活动覆盖的课程必须都存在
    for course_id in &event_data.course_ids {
        match storage.get_course_by_id(*course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    format!("课程 {course_id} 不存在"),
                )));
            }
            Err(e) => {
                tracing::error!("Failed to check course {}: {}", course_id, e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(ErrorCode::InternalServerError, "创建活动失败"),
                ));
            }
        }
    }

    match storage.create_event(event_data).await {
        Ok(event) => {
            tracing::info!("Event {} created: {}", event.id, event.title);
            Ok(HttpResponse::Ok().json(ApiResponse::success(event, "活动创建成功")))
        }
        Err(e) => {
            tracing::error!("Failed to create event: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "创建活动失败",
                )),
            )
        }
    }
}

/// 校验活动的学号区间组合。
/// 起止学号要么都填要么都不填，限定范围的活动必须都填且起始不大于结束。
pub(crate) fn window_violation(
    is_open_to_all: bool,
    start: Option<&str>,
    end: Option<&str>,
) -> Option<&'static str> {
    match (start, end) {
        (None, None) => (!is_open_to_all).then_some("限定范围的活动必须填写起止学号"),
        (Some(start), Some(end)) => (start > end).then_some("起始学号不能大于结束学号"),
        _ => Some("起止学号必须同时填写"),
    }
}

#[cfg(test)]
mod tests {
    use super::window_violation;

    #[test]
    fn test_open_event_without_bounds_is_valid() {
        assert_eq!(window_violation(true, None, None), None);
    }

    #[test]
    fn test_restricted_event_requires_bounds() {
        assert!(window_violation(false, None, None).is_some());
    }

    #[test]
    fn test_lone_bound_is_rejected_even_when_open() {
        assert!(window_violation(true, Some("71812300010"), None).is_some());
        assert!(window_violation(false, None, Some("71812300050")).is_some());
    }

    #[test]
    fn test_bound_order_is_enforced() {
        assert!(
            window_violation(false, Some("71812300060"), Some("71812300020")).is_some()
        );
        assert_eq!(
            window_violation(false, Some("71812300020"), Some("71812300060")),
            None
        );
    }
}
