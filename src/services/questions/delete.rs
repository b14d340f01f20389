use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::models::{ApiResponse, ErrorCode};

/// 删除题目，已收到评分的题目不允许删除
pub async fn delete_question(
    service: &QuestionService,
    question_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.count_question_responses(question_id).await {
        Ok(count) if count > 0 => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::HasResponses,
                "该题目已收到评分，不能删除",
            )));
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!("Failed to count question responses: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "删除题目失败",
                )),
            );
        }
    }

    match storage.delete_question(question_id).await {
        Ok(true) => {
            tracing::info!("Question {} deleted", question_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("题目已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "题目不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to delete question {}: {}", question_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "删除题目失败",
                )),
            )
        }
    }
}
