use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::general_feedback::entities::FeedbackCategory;
use crate::models::students::entities::Student;
use crate::models::users::entities::{User, UserRole};

// 当前请求的认证主体
//
// 后台用户与学生存放在不同的表中，认证中间件根据令牌中的角色
// 解析出统一的主体信息并放入请求扩展，供各个服务读取。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub role: UserRole,
    /// 负责人账号对应的反馈类别
    pub incharge_category: Option<FeedbackCategory>,
}

impl CurrentUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.username.clone(),
            role: user.role.clone(),
            incharge_category: user.incharge_category.clone(),
        }
    }

    pub fn from_student(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            role: UserRole::Student,
            incharge_category: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }
}
