use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GeneralFeedbackService;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::general_feedback::requests::ResolveFeedbackRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 标记反馈已处理，负责人只能处理自己负责的类别
pub async fn resolve_feedback(
    service: &GeneralFeedbackService,
    feedback_id: i64,
    resolve_data: ResolveFeedbackRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_current_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    let feedback = match storage.get_general_feedback_by_id(feedback_id).await {
        Ok(Some(feedback)) => feedback,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FeedbackNotFound,
                "反馈不存在",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to load general feedback {}: {}", feedback_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "处理反馈失败",
                )),
            );
        }
    };

    if !current_user.is_admin() && current_user.incharge_category != Some(feedback.category.clone())
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能处理自己负责的反馈类别",
        )));
    }

    match storage
        .resolve_general_feedback(feedback_id, resolve_data.admin_response.as_deref())
        .await
    {
        Ok(Some(updated)) => {
            tracing::info!("General feedback {} resolved", feedback_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "反馈已处理")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeedbackNotFound,
            "反馈不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to resolve general feedback {}: {}", feedback_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "处理反馈失败",
                )),
            )
        }
    }
}
