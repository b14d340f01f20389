use serde::Serialize;
use ts_rs::TS;

use crate::models::courses::entities::Course;
use crate::models::events::entities::FeedbackEvent;

// 活动详情（含覆盖的课程）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: FeedbackEvent,
    pub courses: Vec<Course>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventListResponse {
    pub events: Vec<FeedbackEvent>,
    pub total: i64,
}
