use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 问卷题目实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Question {
    pub id: i64,
    pub text: String,
}
