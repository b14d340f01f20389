//! 修改自己的密码，后台用户与学生走同一个入口

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::users::requests::ChangePasswordRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password;

pub async fn change_password(
    service: &UserService,
    password_data: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_current_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    // 1. 新密码必须符合策略
    let password_validation = validate_password(&password_data.new_password);
    if !password_validation.is_valid {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordInvalid,
            password_validation.error_message(),
        )));
    }

    // 2. 校验旧密码，主体存放在哪个表由角色决定
    let old_hash = if current_user.is_student() {
        match storage.get_student_by_id(current_user.id).await {
            Ok(Some(student)) => student.password_hash,
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "账号不存在",
                )));
            }
            Err(e) => {
                tracing::error!("Failed to load student for password change: {}", e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(ErrorCode::InternalServerError, "修改密码失败"),
                ));
            }
        }
    } else {
        match storage.get_user_by_id(current_user.id).await {
            Ok(Some(user)) => user.password_hash,
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "账号不存在",
                )));
            }
            Err(e) => {
                tracing::error!("Failed to load user for password change: {}", e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(ErrorCode::InternalServerError, "修改密码失败"),
                ));
            }
        }
    };

    if !verify_password(&password_data.old_password, &old_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "旧密码不正确",
        )));
    }

    // 3. 写入新密码
    let new_hash = match hash_password(&password_data.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "修改密码失败",
                )),
            );
        }
    };

    let result = if current_user.is_student() {
        storage
            .update_student_password(current_user.id, &new_hash)
            .await
    } else {
        storage
            .update_user_password(current_user.id, &new_hash)
            .await
    };

    match result {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::<()>::success_empty("密码修改成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "账号不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to update password: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "修改密码失败",
                )),
            )
        }
    }
}
