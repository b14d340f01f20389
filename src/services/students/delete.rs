use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};

/// 删除学生，已提交过反馈的学生不允许删除
pub async fn delete_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.count_student_feedback(student_id).await {
        Ok(count) if count > 0 => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::HasResponses,
                "该学生已提交过反馈，不能删除",
            )));
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!("Failed to count student feedback: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "删除学生失败",
                )),
            );
        }
    }

    match storage.delete_student(student_id).await {
        Ok(true) => {
            tracing::info!("Student {} deleted", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("学生已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "学生不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to delete student: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "删除学生失败",
                )),
            )
        }
    }
}

/// 清空学生名单，反馈记录会随学生一起级联删除，谨慎使用
pub async fn delete_all_students(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_all_students().await {
        Ok(deleted) => {
            tracing::warn!("All students deleted, {} rows removed", deleted);
            Ok(HttpResponse::Ok().json(ApiResponse::success(deleted, "学生名单已清空")))
        }
        Err(e) => {
            tracing::error!("Failed to delete all students: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "清空学生名单失败",
                )),
            )
        }
    }
}
