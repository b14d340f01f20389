use super::SeaOrmStorage;
use crate::entity::question_responses::{
    Column as QuestionResponseColumn, Entity as QuestionResponses,
};
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::errors::{CFSystemError, Result};
use crate::models::questions::entities::Question;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建题目
    pub async fn create_question_impl(&self, text: &str) -> Result<Question> {
        let model = ActiveModel {
            text: Set(text.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 列出所有题目
    pub async fn list_questions_impl(&self) -> Result<Vec<Question>> {
        let result = Questions::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询题目列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_question()).collect())
    }

    /// 删除题目
    pub async fn delete_question_impl(&self, id: i64) -> Result<bool> {
        let result = Questions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("删除题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 题目已收到的评分条数
    pub async fn count_question_responses_impl(&self, question_id: i64) -> Result<i64> {
        let count = QuestionResponses::find()
            .filter(QuestionResponseColumn::QuestionId.eq(question_id))
            .count(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计评分数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 题目总数
    pub async fn count_questions_impl(&self) -> Result<i64> {
        let count = Questions::find()
            .count(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计题目数量失败: {e}")))?;

        Ok(count as i64)
    }
}
