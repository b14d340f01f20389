//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub roll_number: String,
    pub name: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::feedback_responses::Entity")]
    FeedbackResponses,
    #[sea_orm(has_many = "super::general_feedback::Entity")]
    GeneralFeedback,
}

impl Related<super::feedback_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedbackResponses.def()
    }
}

impl Related<super::general_feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneralFeedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::Student;
        use chrono::{DateTime, Utc};

        Student {
            id: self.id,
            roll_number: self.roll_number,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
