use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode};

/// 删除课程，已收到反馈的课程不允许删除
pub async fn delete_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.count_course_feedback(course_id).await {
        Ok(count) if count > 0 => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::HasResponses,
                "该课程已收到反馈，不能删除",
            )));
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!("Failed to count course feedback: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "删除课程失败",
                )),
            );
        }
    }

    match storage.delete_course(course_id).await {
        Ok(true) => {
            tracing::info!("Course {} deleted", course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("课程已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "课程不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to delete course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "删除课程失败",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::events::requests::CreateEventRequest;
    use crate::models::feedback::requests::FeedbackBatchEntry;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::services::CourseService;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use actix_web::web;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};
    use std::sync::Arc;

    async fn memory_storage() -> Arc<dyn Storage> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt)
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        Arc::new(SeaOrmStorage { db })
    }

    #[tokio::test]
    async fn test_delete_course_with_responses_is_rejected() {
        let storage = memory_storage().await;

        let course = storage
            .create_course(CreateCourseRequest {
                code: "CS101".to_string(),
                name: "数据结构".to_string(),
            })
            .await
            .unwrap();
        let staff = storage.create_staff(course.id, "王老师").await.unwrap();
        let student = storage
            .create_student(
                CreateStudentRequest {
                    roll_number: "71812300001".to_string(),
                    name: "李明".to_string(),
                    email: None,
                    password: None,
                },
                "hash".to_string(),
            )
            .await
            .unwrap();
        let question = storage
            .create_question("Clarity of explanation and communication")
            .await
            .unwrap();
        let event = storage
            .create_event(CreateEventRequest {
                title: "期中反馈".to_string(),
                description: None,
                warning_message: None,
                is_open_to_all: true,
                start_roll_number: None,
                end_roll_number: None,
                course_ids: vec![course.id],
            })
            .await
            .unwrap();
        storage
            .insert_feedback_batch(
                student.id,
                event.id,
                vec![FeedbackBatchEntry {
                    course_id: course.id,
                    staff_id: staff.id,
                    ratings: vec![(question.id, 3)],
                }],
            )
            .await
            .unwrap();

        let request = actix_web::test::TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request();
        let service = CourseService::new_lazy();

        let response = service.delete_course(course.id, &request).await.unwrap();
        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);

        // 课程和教师都原样保留
        assert!(storage.get_course_by_id(course.id).await.unwrap().is_some());
        assert!(storage.get_staff_by_id(staff.id).await.unwrap().is_some());
    }
}
