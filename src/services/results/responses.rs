use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::results::responses::ResponsesListResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 活动的原始反馈记录，管理端逐条核查用
pub async fn list_responses(
    service: &ResultService,
    event_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_event_by_id(event_id).await {
        Ok(Some(_)) => {}
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
                    "查询反馈记录失败",
                )),
            );
        }
    }

    match storage.list_responses(event_id).await {
        Ok(rows) => {
            let total = rows.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ResponsesListResponse { rows, total },
                "查询成功",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to list responses: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询反馈记录失败",
                )),
            )
        }
    }
}
