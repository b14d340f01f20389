use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;
use crate::models::general_feedback::entities::{FeedbackCategory, GeneralFeedback};

// 反馈列表项（附带提交学生信息）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/general_feedback.ts")]
pub struct GeneralFeedbackItem {
    #[serde(flatten)]
    pub feedback: GeneralFeedback,
    pub student_roll_number: String,
    pub student_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/general_feedback.ts")]
pub struct GeneralFeedbackListResponse {
    pub items: Vec<GeneralFeedbackItem>,
    pub pagination: PaginationInfo,
}

// 按月统计条目（month 形如 "2026-08"）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/general_feedback.ts")]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

// 单个类别的统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/general_feedback.ts")]
pub struct CategoryStats {
    pub category: FeedbackCategory,
    pub total: i64,
    pub resolved: i64,
    pub unresolved: i64,
    /// 最近 6 个月（含当月）的提交数量，按月份升序
    pub monthly: Vec<MonthlyCount>,
}
