//! 通用意见反馈实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "general_feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category: String,
    pub content: String,
    pub student_id: i64,
    pub is_resolved: bool,
    pub admin_response: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_general_feedback(
        self,
    ) -> crate::models::general_feedback::entities::GeneralFeedback {
        use crate::models::general_feedback::entities::{FeedbackCategory, GeneralFeedback};
        use chrono::{DateTime, Utc};
        use std::str::FromStr;

        GeneralFeedback {
            id: self.id,
            category: FeedbackCategory::from_str(&self.category)
                .unwrap_or(FeedbackCategory::General),
            content: self.content,
            student_id: self.student_id,
            is_resolved: self.is_resolved,
            admin_response: self.admin_response,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
