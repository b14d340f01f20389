use serde::Serialize;
use ts_rs::TS;

use crate::models::courses::entities::{Course, StaffMember};

// 课程及其任课教师
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseWithStaff {
    #[serde(flatten)]
    pub course: Course,
    pub staff: Vec<StaffMember>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub courses: Vec<CourseWithStaff>,
    pub total: i64,
}

// 课程/教师批量导入结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseImportResponse {
    pub courses_created: i64,
    pub staff_created: i64,
    pub skipped: i64,
    pub errors: Vec<String>,
    pub omitted_errors: i64,
}
