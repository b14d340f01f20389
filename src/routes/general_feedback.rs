use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::general_feedback::requests::{
    GeneralFeedbackListQuery, ResolveFeedbackRequest, SubmitGeneralFeedbackRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GeneralFeedbackService;
use crate::utils::SafeIDI64;

// 懒加载的全局 GeneralFeedbackService 实例
static GENERAL_FEEDBACK_SERVICE: Lazy<GeneralFeedbackService> =
    Lazy::new(GeneralFeedbackService::new_lazy);

pub async fn submit_feedback(
    req: HttpRequest,
    feedback_data: web::Json<SubmitGeneralFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    GENERAL_FEEDBACK_SERVICE
        .submit_feedback(feedback_data.into_inner(), &req)
        .await
}

pub async fn list_feedback(
    req: HttpRequest,
    query: web::Query<GeneralFeedbackListQuery>,
) -> ActixResult<HttpResponse> {
    GENERAL_FEEDBACK_SERVICE
        .list_feedback(query.into_inner(), &req)
        .await
}

pub async fn resolve_feedback(
    req: HttpRequest,
    feedback_id: SafeIDI64,
    resolve_data: web::Json<ResolveFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    GENERAL_FEEDBACK_SERVICE
        .resolve_feedback(feedback_id.0, resolve_data.into_inner(), &req)
        .await
}

pub async fn category_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    GENERAL_FEEDBACK_SERVICE.category_stats(&req).await
}

// 配置路由
pub fn configure_general_feedback_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/general-feedback")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("/submit")
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
                    .route("", web::post().to(submit_feedback)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::reviewer_roles()))
                    .route("", web::get().to(list_feedback))
                    .route("/stats", web::get().to(category_stats))
                    .route("/{id}/resolve", web::put().to(resolve_feedback)),
            ),
    );
}
