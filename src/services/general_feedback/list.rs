//! 意见反馈列表
//!
//! 管理员可以看全部类别，负责人只能看自己负责的类别。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GeneralFeedbackService;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::general_feedback::requests::GeneralFeedbackListQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_feedback(
    service: &GeneralFeedbackService,
    mut query: GeneralFeedbackListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_current_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    // 负责人的查询强制限定在自己负责的类别
    if !current_user.is_admin() {
        let Some(own_category) = current_user.incharge_category.clone() else {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "当前账号未绑定反馈类别",
            )));
        };
        if let Some(ref requested) = query.category {
            if *requested != own_category {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能查看自己负责的反馈类别",
                )));
            }
        }
        query.category = Some(own_category);
    }

    match storage.list_general_feedback(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            tracing::error!("Failed to list general feedback: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询反馈列表失败",
                )),
            )
        }
    }
}
