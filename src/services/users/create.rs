//! 后台用户创建服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_password, validate_username};

pub async fn create_user(
    service: &UserService,
    user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 验证用户名格式
    if let Err(msg) = validate_username(&user_data.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 2. 验证密码强度
    let password_validation = validate_password(&user_data.password);
    if !password_validation.is_valid {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordInvalid,
            password_validation.error_message(),
        )));
    }

    // 3. 学生账号走导入流程，不在这里创建
    if user_data.role == UserRole::Student {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "学生账号请通过学生导入创建",
        )));
    }

    // 4. 负责人账号必须绑定反馈类别
    if user_data.role == UserRole::Incharge && user_data.incharge_category.is_none() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "负责人账号必须指定负责的反馈类别",
        )));
    }

    // 5. 哈希密码
    let password_hash = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "创建用户失败",
                )),
            );
        }
    };

    let create_request = CreateUserRequest {
        password: password_hash,
        ..user_data
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            tracing::info!("User {} created", user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "用户创建成功")))
        }
        Err(e) => {
            if e.message().contains("UNIQUE constraint failed") {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::AlreadyExists,
                    "用户名已存在",
                )));
            }
            tracing::error!("Failed to create user: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "创建用户失败",
                )),
            )
        }
    }
}
