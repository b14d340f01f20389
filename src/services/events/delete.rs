use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::{ApiResponse, ErrorCode};

/// 软删除活动，历史反馈数据保留
pub async fn delete_event(
    service: &EventService,
    event_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.soft_delete_event(event_id).await {
        Ok(true) => {
            tracing::info!("Event {} deleted", event_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("活动已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EventNotFound,
            "活动不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to delete event {}: {}", event_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "删除活动失败",
                )),
            )
        }
    }
}
