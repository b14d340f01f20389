use serde::Deserialize;
use ts_rs::TS;

// 创建课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub code: String,
    pub name: String,
}

// 为课程添加教师请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateStaffRequest {
    pub name: String,
}
