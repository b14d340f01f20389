pub mod dashboard;
pub mod export;
pub mod responses;
pub mod staff_stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
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

    // 某教师在某活动中的反馈汇总
    pub async fn staff_stats(
        &self,
        event_id: i64,
        staff_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        staff_stats::staff_stats(self, event_id, staff_id, request).await
    }

    // 管理端首页汇总
    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::dashboard(self, request).await
    }

    // 活动的原始反馈记录
    pub async fn list_responses(
        &self,
        event_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        responses::list_responses(self, event_id, request).await
    }

    // 导出活动反馈为 xlsx
    pub async fn export_responses(
        &self,
        event_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_responses(self, event_id, request).await
    }
}

/// 四舍五入保留两位小数
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(11.0 / 3.0), 3.67);
        assert_eq!(round2(40.0), 40.0);
        assert_eq!(round2(0.0), 0.0);
    }
}
