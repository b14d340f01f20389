use serde::Deserialize;
use ts_rs::TS;

use crate::models::general_feedback::entities::FeedbackCategory;

// 提交通用意见反馈请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/general_feedback.ts")]
pub struct SubmitGeneralFeedbackRequest {
    pub category: FeedbackCategory,
    pub content: String,
}

// 处理反馈请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/general_feedback.ts")]
pub struct ResolveFeedbackRequest {
    #[serde(default)]
    pub admin_response: Option<String>,
}

// 反馈列表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/general_feedback.ts")]
pub struct GeneralFeedbackListQuery {
    #[serde(default)]
    pub category: Option<FeedbackCategory>,
    /// true 只看已处理，false 只看未处理，省略则全部
    #[serde(default)]
    pub resolved: Option<bool>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}
