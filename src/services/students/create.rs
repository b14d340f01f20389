//! 学生创建服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_roll_number};

pub async fn create_student(
    service: &StudentService,
    student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 学号必须符合配置的格式
    if let Err(msg) = validate_roll_number(&student_data.roll_number) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::RollNumberInvalid, msg)));
    }

    if student_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "姓名不能为空",
        )));
    }

    if let Some(ref email) = student_data.email {
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    }

    // 2. 未提供密码时使用配置的初始密码
    let password = student_data
        .password
        .clone()
        .unwrap_or_else(|| config.students.default_password.clone());

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "创建学生失败",
                )),
            );
        }
    };

    match storage.create_student(student_data, password_hash).await {
        Ok(student) => {
            tracing::info!("Student {} created", student.roll_number);
            Ok(HttpResponse::Ok().json(ApiResponse::success(student, "学生创建成功")))
        }
        Err(e) => {
            if e.message().contains("UNIQUE constraint failed") {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::AlreadyExists,
                    "学号已存在",
                )));
            }
            tracing::error!("Failed to create student: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "创建学生失败",
                )),
            )
        }
    }
}
