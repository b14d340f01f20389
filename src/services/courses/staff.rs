//! 课程教师管理

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::requests::CreateStaffRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_staff(
    service: &CourseService,
    course_id: i64,
    staff_data: CreateStaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if staff_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "教师姓名不能为空",
        )));
    }

    // 课程必须存在
    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "课程不存在",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to check course {}: {}", course_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "添加教师失败",
                )),
            );
        }
    }

    match storage.create_staff(course_id, staff_data.name.trim()).await {
        Ok(member) => {
            tracing::info!("Staff {} added to course {}", member.name, course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(member, "教师添加成功")))
        }
        Err(e) => {
            tracing::error!("Failed to create staff: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "添加教师失败",
                )),
            )
        }
    }
}

/// 删除教师，已收到反馈的教师不允许删除
pub async fn delete_staff(
    service: &CourseService,
    staff_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.count_staff_feedback(staff_id).await {
        Ok(count) if count > 0 => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::HasResponses,
                "该教师已收到反馈，不能删除",
            )));
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!("Failed to count staff feedback: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "删除教师失败",
                )),
            );
        }
    }

    match storage.delete_staff(staff_id).await {
        Ok(true) => {
            tracing::info!("Staff {} deleted", staff_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("教师已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StaffNotFound,
            "教师不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to delete staff {}: {}", staff_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "删除教师失败",
                )),
            )
        }
    }
}
