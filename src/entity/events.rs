//! 反馈活动实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub warning_message: Option<String>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub is_open_to_all: bool,
    pub start_roll_number: Option<String>,
    pub end_roll_number: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_courses::Entity")]
    EventCourses,
    #[sea_orm(has_many = "super::feedback_responses::Entity")]
    FeedbackResponses,
}

impl Related<super::event_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventCourses.def()
    }
}

impl Related<super::feedback_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackResponses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_event(self) -> crate::models::events::entities::FeedbackEvent {
        use crate::models::events::entities::FeedbackEvent;
        use chrono::{DateTime, Utc};

        FeedbackEvent {
            id: self.id,
            title: self.title,
            description: self.description,
            warning_message: self.warning_message,
            is_active: self.is_active,
            is_open_to_all: self.is_open_to_all,
            start_roll_number: self.start_roll_number,
            end_roll_number: self.end_roll_number,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
