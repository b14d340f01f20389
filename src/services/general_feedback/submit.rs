use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GeneralFeedbackService;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

/// 意见反馈内容长度上限
const MAX_CONTENT_LENGTH: usize = 2000;

pub async fn submit_feedback(
    service: &GeneralFeedbackService,
    feedback_data: crate::models::general_feedback::requests::SubmitGeneralFeedbackRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_current_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    let content = feedback_data.content.trim();
    if content.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "反馈内容不能为空",
        )));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("反馈内容最长 {MAX_CONTENT_LENGTH} 字"),
        )));
    }

    match storage
        .create_general_feedback(current_user.id, &feedback_data.category, content)
        .await
    {
        Ok(feedback) => {
            tracing::info!(
                "General feedback {} submitted to category {}",
                feedback.id,
                feedback.category
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(feedback, "反馈提交成功")))
        }
        Err(e) => {
            tracing::error!("Failed to submit general feedback: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "反馈提交失败",
                )),
            )
        }
    }
}
