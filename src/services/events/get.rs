use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::events::responses::EventDetailResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_event(
    service: &EventService,
    event_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let event = match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EventNotFound,
                "活动不存在",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to get event {}: {}", event_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询活动失败",
                )),
            );
        }
    };

    match storage.list_event_courses(event_id).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EventDetailResponse { event, courses },
            "查询成功",
        ))),
        Err(e) => {
            tracing::error!("Failed to list courses of event {}: {}", event_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询活动失败",
                )),
            )
        }
    }
}
