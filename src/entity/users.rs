//! 用户实体（管理员 / 负责人）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub incharge_category: Option<String>,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::general_feedback::entities::FeedbackCategory;
        use crate::models::users::entities::{User, UserRole};
        use chrono::{DateTime, Utc};
        use std::str::FromStr;

        User {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            role: UserRole::from_str(&self.role).unwrap_or(UserRole::Incharge),
            incharge_category: self
                .incharge_category
                .as_deref()
                .and_then(|c| FeedbackCategory::from_str(c).ok()),
            last_login: self
                .last_login
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
