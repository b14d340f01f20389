use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::events::responses::EventListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_events(
    service: &EventService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_events().await {
        Ok(events) => {
            let total = events.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                EventListResponse { events, total },
                "查询成功",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to list events: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询活动列表失败",
                )),
            )
        }
    }
}
