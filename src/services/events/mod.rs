pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod toggle;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::events::requests::{CreateEventRequest, UpdateEventRequest};
use crate::storage::Storage;

pub struct EventService {
    storage: Option<Arc<dyn Storage>>,
}

impl EventService {
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

    // 创建反馈活动
    pub async fn create_event(
        &self,
        event_data: CreateEventRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_event(self, event_data, request).await
    }

    // 活动列表
    pub async fn list_events(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_events(self, request).await
    }

    // 活动详情（含课程列表）
    pub async fn get_event(&self, event_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_event(self, event_id, request).await
    }

    // 更新活动
    pub async fn update_event(
        &self,
        event_id: i64,
        update_data: UpdateEventRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_event(self, event_id, update_data, request).await
    }

    // 激活活动，同一时刻只允许一个活动处于激活状态
    pub async fn activate_event(
        &self,
        event_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        toggle::activate_event(self, event_id, request).await
    }

    // 关闭当前激活的活动
    pub async fn deactivate_events(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        toggle::deactivate_events(self, request).await
    }

    // 软删除活动
    pub async fn delete_event(
        &self,
        event_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_event(self, event_id, request).await
    }
}
