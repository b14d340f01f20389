use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::users::entities::UserRole;
use crate::services::QuestionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 QuestionService 实例
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

pub async fn list_questions(req: HttpRequest) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.list_questions(&req).await
}

pub async fn create_question(
    req: HttpRequest,
    question_data: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .create_question(question_data.into_inner(), &req)
        .await
}

pub async fn delete_question(
    req: HttpRequest,
    question_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.delete_question(question_id.0, &req).await
}

// 配置路由
pub fn configure_question_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_questions))
                    .route("", web::post().to(create_question))
                    .route("/{id}", web::delete().to(delete_question)),
            ),
    );
}
