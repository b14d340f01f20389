use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::entities::CurrentUser;
use crate::models::auth::requests::StudentLoginRequest;
use crate::models::auth::responses::LoginResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;
use crate::utils::password::verify_password;
use crate::utils::validate::validate_roll_number;

use super::AuthService;

pub async fn handle_student_login(
    service: &AuthService,
    login_request: StudentLoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 学号格式不对就不用查库了
    if let Err(msg) = validate_roll_number(&login_request.roll_number) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            format!("Roll number or password is incorrect: {msg}"),
        )));
    }

    match storage.get_student_by_roll(&login_request.roll_number).await {
        Ok(Some(student)) => {
            if verify_password(&login_request.password, &student.password_hash) {
                match student.generate_token_pair(login_request.remember_me.then(|| {
                    chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry)
                })) {
                    Ok(token_pair) => {
                        tracing::info!(
                            "Student {} logged in successfully",
                            student.roll_number
                        );

                        let response = LoginResponse {
                            access_token: token_pair.access_token,
                            expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                            user: CurrentUser::from_student(&student),
                            created_at: chrono::Utc::now(),
                        };

                        let refresh_cookie =
                            jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

                        Ok(HttpResponse::Ok()
                            .cookie(refresh_cookie)
                            .json(ApiResponse::success(response, "Login successful")))
                    }
                    Err(e) => {
                        tracing::error!("Failed to generate JWT token: {}", e);
                        Ok(
                            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                "Login failed, unable to generate token",
                            )),
                        )
                    }
                }
            } else {
                Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ErrorCode::AuthFailed,
                    "Roll number or password is incorrect",
                )))
            }
        }
        Ok(None) => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Roll number or password is incorrect",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Login failed: {e}"),
            )),
        ),
    }
}
