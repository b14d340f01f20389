use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::ResultService;
use crate::utils::{SafeEventIdI64, SafeStaffIdI64};

// 懒加载的全局 ResultService 实例
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.dashboard(&req).await
}

pub async fn staff_stats(
    req: HttpRequest,
    event_id: SafeEventIdI64,
    staff_id: SafeStaffIdI64,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .staff_stats(event_id.0, staff_id.0, &req)
        .await
}

pub async fn list_responses(
    req: HttpRequest,
    event_id: SafeEventIdI64,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list_responses(event_id.0, &req).await
}

pub async fn export_responses(
    req: HttpRequest,
    event_id: SafeEventIdI64,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.export_responses(event_id.0, &req).await
}

// 配置路由
pub fn configure_result_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/results")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::reviewer_roles()))
                    .route("/dashboard", web::get().to(dashboard))
                    .route(
                        "/events/{event_id}/staff/{staff_id}",
                        web::get().to(staff_stats),
                    )
                    .route(
                        "/events/{event_id}/responses",
                        web::get().to(list_responses),
                    )
                    .route("/events/{event_id}/export", web::get().to(export_responses)),
            ),
    );
}
