pub mod list;
pub mod resolve;
pub mod stats;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::general_feedback::requests::{
    GeneralFeedbackListQuery, ResolveFeedbackRequest, SubmitGeneralFeedbackRequest,
};
use crate::storage::Storage;

pub struct GeneralFeedbackService {
    storage: Option<Arc<dyn Storage>>,
}

impl GeneralFeedbackService {
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

    // 学生提交意见反馈
    pub async fn submit_feedback(
        &self,
        feedback_data: SubmitGeneralFeedbackRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_feedback(self, feedback_data, request).await
    }

    // 反馈列表，负责人只能看自己负责的类别
    pub async fn list_feedback(
        &self,
        query: GeneralFeedbackListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_feedback(self, query, request).await
    }

    // 标记反馈已处理
    pub async fn resolve_feedback(
        &self,
        feedback_id: i64,
        resolve_data: ResolveFeedbackRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        resolve::resolve_feedback(self, feedback_id, resolve_data, request).await
    }

    // 按类别统计
    pub async fn category_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::category_stats(self, request).await
    }
}
