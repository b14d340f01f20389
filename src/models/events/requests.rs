use serde::Deserialize;
use ts_rs::TS;

// 创建反馈活动请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub warning_message: Option<String>,
    #[serde(default = "default_open_to_all")]
    pub is_open_to_all: bool,
    #[serde(default)]
    pub start_roll_number: Option<String>,
    #[serde(default)]
    pub end_roll_number: Option<String>,
    /// 本次活动覆盖的课程
    #[serde(default)]
    pub course_ids: Vec<i64>,
}

fn default_open_to_all() -> bool {
    true
}

// 更新反馈活动请求（字段省略表示不修改）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub warning_message: Option<String>,
    #[serde(default)]
    pub is_open_to_all: Option<bool>,
    #[serde(default)]
    pub start_roll_number: Option<String>,
    #[serde(default)]
    pub end_roll_number: Option<String>,
    #[serde(default)]
    pub course_ids: Option<Vec<i64>>,
}
