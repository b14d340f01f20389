use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::responses::CourseListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_courses_with_staff().await {
        Ok(courses) => {
            let total = courses.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                CourseListResponse { courses, total },
                "查询成功",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to list courses: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询课程列表失败",
                )),
            )
        }
    }
}
