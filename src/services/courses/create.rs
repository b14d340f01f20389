use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if course_data.code.trim().is_empty() || course_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "课程代码和名称不能为空",
        )));
    }

    match storage.create_course(course_data).await {
        Ok(course) => {
            tracing::info!("Course {} created", course.code);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程创建成功")))
        }
        Err(e) => {
            if e.message().contains("UNIQUE constraint failed") {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::AlreadyExists,
                    "课程代码已存在",
                )));
            }
            tracing::error!("Failed to create course: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "创建课程失败",
                )),
            )
        }
    }
}
