use serde::Deserialize;
use ts_rs::TS;

use crate::models::general_feedback::entities::FeedbackCategory;
use crate::models::users::entities::UserRole;

// 创建后台用户请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub incharge_category: Option<FeedbackCategory>,
}

// 修改密码请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}
