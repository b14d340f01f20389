use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::feedback::requests::SubmitFeedbackRequest;
use crate::models::users::entities::UserRole;
use crate::services::FeedbackService;

// 懒加载的全局 FeedbackService 实例
static FEEDBACK_SERVICE: Lazy<FeedbackService> = Lazy::new(FeedbackService::new_lazy);

pub async fn check_eligibility(req: HttpRequest) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.check_eligibility(&req).await
}

pub async fn submit_feedback(
    req: HttpRequest,
    submission: web::Json<SubmitFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .submit_feedback(submission.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_feedback_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/feedback")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
                    .route("/eligibility", web::get().to(check_eligibility))
                    .route("/submit", web::post().to(submit_feedback)),
            ),
    );
}
