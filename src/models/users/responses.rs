use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::User;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub total: i64,
}
