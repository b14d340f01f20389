pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::questions::requests::CreateQuestionRequest;
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建问卷题目
    pub async fn create_question(
        &self,
        question_data: CreateQuestionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_question(self, question_data, request).await
    }

    // 题目列表
    pub async fn list_questions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_questions(self, request).await
    }

    // 删除题目
    pub async fn delete_question(
        &self,
        question_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_question(self, question_id, request).await
    }
}
