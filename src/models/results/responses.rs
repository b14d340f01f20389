use serde::Serialize;
use ts_rs::TS;

use crate::models::courses::entities::{Course, StaffMember};
use crate::models::events::entities::FeedbackEvent;

// 单个题目的平均分
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/results.ts")]
pub struct QuestionAverage {
    pub question_id: i64,
    pub text: String,
    /// 保留两位小数，无评分时为 0.0
    pub average: f64,
    pub rating_count: i64,
}

// 未提交反馈的学生
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/results.ts")]
pub struct NonResponder {
    pub roll_number: String,
    pub name: String,
}

// 某教师在某次活动中的反馈汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/results.ts")]
pub struct StaffResultsResponse {
    pub staff: StaffMember,
    pub course: Course,
    pub event_id: i64,
    pub question_averages: Vec<QuestionAverage>,
    /// 对该教师提交过反馈的学生数（去重）
    pub responded_count: i64,
    pub total_students: i64,
    /// 百分比，保留两位小数，总人数为 0 时为 0.0
    pub response_percentage: f64,
    pub non_responders: Vec<NonResponder>,
}

// 管理端首页汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/results.ts")]
pub struct DashboardResponse {
    pub total_students: i64,
    pub total_courses: i64,
    pub total_staff: i64,
    pub total_questions: i64,
    pub active_event: Option<FeedbackEvent>,
    /// 当前活动下提交过反馈的学生数（去重）
    pub responded_count: i64,
    /// 百分比，保留两位小数，无学生或无活动时为 0.0
    pub completion_rate: f64,
}

// 原始反馈记录（管理端查看）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/results.ts")]
pub struct ResponseRow {
    pub feedback_id: i64,
    pub student_roll_number: String,
    pub student_name: String,
    pub course_code: String,
    pub staff_name: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    /// 题目 ID 顺序与题库一致的评分列表
    pub ratings: Vec<RatingCell>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/results.ts")]
pub struct RatingCell {
    pub question_id: i64,
    pub rating: i32,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/results.ts")]
pub struct ResponsesListResponse {
    pub rows: Vec<ResponseRow>,
    pub total: i64,
}
