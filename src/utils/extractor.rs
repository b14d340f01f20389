//! 路径参数安全提取器
//!
//! 路径中的数字 ID 解析失败时返回统一的 JSON 错误响应，
//! 而不是 actix 默认的纯文本 404/400。

use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest, error::ErrorBadRequest};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal, $label:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|v| v.parse::<i64>().ok())
                    .filter(|v| *v > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(ErrorBadRequest(
                        serde_json::to_string(&ApiResponse::<()>::error_empty(
                            ErrorCode::BadRequest,
                            concat!("无效的", $label, " ID"),
                        ))
                        .unwrap_or_default(),
                    )),
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id", "资源");
define_safe_i64_extractor!(SafeEventIdI64, "event_id", "活动");
define_safe_i64_extractor!(SafeCourseIdI64, "course_id", "课程");
define_safe_i64_extractor!(SafeStaffIdI64, "staff_id", "教师");
define_safe_i64_extractor!(SafeQuestionIdI64, "question_id", "题目");
