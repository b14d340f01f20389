use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_questions(
    service: &QuestionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_questions().await {
        Ok(questions) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(questions, "查询成功")))
        }
        Err(e) => {
            tracing::error!("Failed to list questions: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询题目列表失败",
                )),
            )
        }
    }
}
