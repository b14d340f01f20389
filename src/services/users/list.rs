use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::responses::UserListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_users(service: &UserService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_users().await {
        Ok(users) => {
            let total = users.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserListResponse { users, total },
                "查询成功",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to list users: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询用户列表失败",
                )),
            )
        }
    }
}
