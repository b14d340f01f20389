pub mod create;
pub mod delete;
pub mod import;
pub mod list;
pub mod staff;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{CreateCourseRequest, CreateStaffRequest};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 创建课程
    pub async fn create_course(
        &self,
        course_data: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, course_data, request).await
    }

    // 课程列表（含教师）
    pub async fn list_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_courses(self, request).await
    }

    // 删除课程
    pub async fn delete_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, course_id, request).await
    }

    // 为课程添加教师
    pub async fn create_staff(
        &self,
        course_id: i64,
        staff_data: CreateStaffRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        staff::create_staff(self, course_id, staff_data, request).await
    }

    // 删除教师
    pub async fn delete_staff(
        &self,
        staff_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        staff::delete_staff(self, staff_id, request).await
    }

    // 从表格批量导入课程与教师
    pub async fn import_courses(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_courses(self, payload, request).await
    }
}
