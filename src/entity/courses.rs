//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::staff::Entity")]
    Staff,
    #[sea_orm(has_many = "super::event_courses::Entity")]
    EventCourses,
    #[sea_orm(has_many = "super::feedback_responses::Entity")]
    FeedbackResponses,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
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

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        crate::models::courses::entities::Course {
            id: self.id,
            code: self.code,
            name: self.name,
        }
    }
}
