//! 活动激活开关
//!
//! 同一时刻至多一个激活活动，激活某个活动会先让其它活动全部失效，
//! 整个切换在存储层的单个事务内完成。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn activate_event(
    service: &EventService,
    event_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_active_event(event_id).await {
        Ok(true) => {
            tracing::info!("Event {} activated", event_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("活动已激活")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EventNotFound,
            "活动不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to activate event {}: {}", event_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "激活活动失败",
                )),
            )
        }
    }
}

pub async fn deactivate_events(
    service: &EventService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.clear_active_event().await {
        Ok(()) => {
            tracing::info!("Active event cleared");
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("活动已关闭")))
        }
        Err(e) => {
            tracing::error!("Failed to deactivate events: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "关闭活动失败",
                )),
            )
        }
    }
}
