use serde::Deserialize;
use ts_rs::TS;

// 创建问卷题目请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct CreateQuestionRequest {
    pub text: String,
}
