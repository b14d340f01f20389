use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use super::create::window_violation;
use crate::models::events::entities::FeedbackEvent;
use crate::models::events::requests::UpdateEventRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_roll_number;

pub async fn update_event(
    service: &EventService,
    event_id: i64,
    update_data: UpdateEventRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(ref title) = update_data.title {
        if title.trim().is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "活动标题不能为空",
            )));
        }
    }

    for roll in [
        update_data.start_roll_number.as_deref(),
        update_data.end_roll_number.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        if let Err(msg) = validate_roll_number(roll) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::RollNumberInvalid, msg)));
        }
    }

    let existing = match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EventNotFound,
                "活动不存在",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to load event {}: {}", event_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "更新活动失败",
                )),
            );
        }
    };

    // 部分更新也不能把活动改成非法的学号区间组合
    let (is_open_to_all, start, end) = merged_window(&existing, &update_data);
    if let Some(msg) = window_violation(is_open_to_all, start.as_deref(), end.as_deref()) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    if let Some(ref course_ids) = update_data.course_ids {
        for course_id in course_ids {
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
                        ApiResponse::error_empty(ErrorCode::InternalServerError, "更新活动失败"),
                    ));
                }
            }
        }
    }

    match storage.update_event(event_id, update_data).await {
        Ok(Some(event)) => {
            tracing::info!("Event {} updated", event_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(event, "活动更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EventNotFound,
            "活动不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to update event {}: {}", event_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "更新活动失败",
                )),
            )
        }
    }
}

/// 合并更新后活动的学号区间，未提供的字段沿用现有值
pub(crate) fn merged_window(
    existing: &FeedbackEvent,
    update: &UpdateEventRequest,
) -> (bool, Option<String>, Option<String>) {
    (
        update.is_open_to_all.unwrap_or(existing.is_open_to_all),
        update
            .start_roll_number
            .clone()
            .or_else(|| existing.start_roll_number.clone()),
        update
            .end_roll_number
            .clone()
            .or_else(|| existing.end_roll_number.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::super::create::window_violation;
    use super::merged_window;
    use crate::models::events::entities::FeedbackEvent;
    use crate::models::events::requests::UpdateEventRequest;

    fn event(
        is_open_to_all: bool,
        start: Option<&str>,
        end: Option<&str>,
    ) -> FeedbackEvent {
        FeedbackEvent {
            id: 1,
            title: "期中反馈".to_string(),
            description: None,
            warning_message: None,
            is_active: false,
            is_open_to_all,
            start_roll_number: start.map(String::from),
            end_roll_number: end.map(String::from),
            created_at: chrono::Utc::now(),
        }
    }

    fn patch() -> UpdateEventRequest {
        UpdateEventRequest {
            title: None,
            description: None,
            warning_message: None,
            is_open_to_all: None,
            start_roll_number: None,
            end_roll_number: None,
            course_ids: None,
        }
    }

    fn check(existing: &FeedbackEvent, update: &UpdateEventRequest) -> Option<&'static str> {
        let (open, start, end) = merged_window(existing, update);
        window_violation(open, start.as_deref(), end.as_deref())
    }

    #[test]
    fn test_partial_update_cannot_set_lone_bound() {
        let existing = event(true, None, None);
        let update = UpdateEventRequest {
            start_roll_number: Some("71812300010".to_string()),
            ..patch()
        };
        assert!(check(&existing, &update).is_some());
    }

    #[test]
    fn test_closing_event_without_bounds_is_rejected() {
        let existing = event(true, None, None);
        let update = UpdateEventRequest {
            is_open_to_all: Some(false),
            ..patch()
        };
        assert!(check(&existing, &update).is_some());
    }

    #[test]
    fn test_bound_order_rechecked_against_kept_bound() {
        let existing = event(false, Some("71812300020"), Some("71812300050"));
        let update = UpdateEventRequest {
            start_roll_number: Some("71812300060".to_string()),
            ..patch()
        };
        assert!(check(&existing, &update).is_some());
    }

    #[test]
    fn test_valid_partial_update_keeps_other_bound() {
        let existing = event(false, Some("71812300020"), Some("71812300050"));
        let update = UpdateEventRequest {
            start_roll_number: Some("71812300010".to_string()),
            ..patch()
        };
        assert_eq!(check(&existing, &update), None);
    }
}
