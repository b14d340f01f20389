use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_question(
    service: &QuestionService,
    question_data: CreateQuestionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let text = question_data.text.trim();
    if text.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "题目内容不能为空",
        )));
    }

    match storage.create_question(text).await {
        Ok(question) => {
            tracing::info!("Question {} created", question.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(question, "题目创建成功")))
        }
        Err(e) => {
            tracing::error!("Failed to create question: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "创建题目失败",
                )),
            )
        }
    }
}
