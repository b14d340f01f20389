//! 问卷题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::question_responses::Entity")]
    QuestionResponses,
}

impl Related<super::question_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuestionResponses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_question(self) -> crate::models::questions::entities::Question {
        crate::models::questions::entities::Question {
            id: self.id,
            text: self.text,
        }
    }
}
