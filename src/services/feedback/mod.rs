pub mod eligibility;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::feedback::requests::SubmitFeedbackRequest;
use crate::storage::Storage;

pub struct FeedbackService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeedbackService {
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

    pub(crate) fn get_config(&self) -> &'static AppConfig {
        AppConfig::get()
    }

    // 当前学生的资格检查，合格时附带问卷表单数据
    pub async fn check_eligibility(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        eligibility::check_eligibility(self, request).await
    }

    // 提交课程反馈
    pub async fn submit_feedback(
        &self,
        submission: SubmitFeedbackRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_feedback(self, submission, request).await
    }
}
