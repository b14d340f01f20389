//! 请求参数解析错误处理器
//!
//! JSON 体或查询串解析失败时返回统一的 ApiResponse 错误结构。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("JSON payload error on {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "请求 Content-Type 必须为 application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("请求体格式错误: {e}"),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "请求体过大".to_string()
        }
        other => format!("请求体解析失败: {other}"),
    };
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Query payload error on {}: {}", req.path(), err);
    let message = match &err {
        QueryPayloadError::Deserialize(e) => format!("查询参数格式错误: {e}"),
        other => format!("查询参数解析失败: {other}"),
    };
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}
