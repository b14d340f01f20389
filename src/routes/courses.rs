use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{CreateCourseRequest, CreateStaffRequest};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::{SafeIDI64, SafeStaffIdI64};

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(course_data.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(course_id.0, &req).await
}

pub async fn create_staff(
    req: HttpRequest,
    course_id: SafeIDI64,
    staff_data: web::Json<CreateStaffRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_staff(course_id.0, staff_data.into_inner(), &req)
        .await
}

pub async fn delete_staff(req: HttpRequest, staff_id: SafeStaffIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_staff(staff_id.0, &req).await
}

pub async fn import_courses(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.import_courses(payload, &req).await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_courses))
                    .route("", web::post().to(create_course))
                    .route("/import", web::post().to(import_courses))
                    .route("/staff/{staff_id}", web::delete().to(delete_staff))
                    .route("/{id}", web::delete().to(delete_course))
                    .route("/{id}/staff", web::post().to(create_staff)),
            ),
    );
}
