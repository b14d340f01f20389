use serde::Serialize;
use ts_rs::TS;

use crate::models::courses::responses::CourseWithStaff;
use crate::models::events::entities::FeedbackEvent;
use crate::models::questions::entities::Question;

// 学生资格检查结果
//
// eligible 为 true 时附带问卷表单所需的课程与题目；
// 为 false 时 reason 说明原因，不在学号区间时附带活动的提示语。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct EligibilityResponse {
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<EligibilityReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<FeedbackEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<CourseWithStaff>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub enum EligibilityReason {
    NoActiveEvent,
    OutOfRange,
    AlreadySubmitted,
}

// 提交结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct SubmitFeedbackResponse {
    /// 实际写入的课程反馈条数
    pub submitted_courses: i64,
    /// 写入的评分总数
    pub submitted_ratings: i64,
    /// 因未选择教师而被忽略的课程数
    pub skipped_courses: i64,
}
