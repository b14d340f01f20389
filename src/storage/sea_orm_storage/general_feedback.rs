use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::general_feedback::{ActiveModel, Column, Entity as GeneralFeedbacks};
use crate::entity::students::Entity as Students;
use crate::errors::{CFSystemError, Result};
use crate::models::{
    PaginationInfo,
    general_feedback::{
        entities::{FeedbackCategory, GeneralFeedback},
        requests::GeneralFeedbackListQuery,
        responses::{GeneralFeedbackItem, GeneralFeedbackListResponse},
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 提交通用意见反馈
    pub async fn create_general_feedback_impl(
        &self,
        student_id: i64,
        category: &FeedbackCategory,
        content: &str,
    ) -> Result<GeneralFeedback> {
        let model = ActiveModel {
            category: Set(category.to_string()),
            content: Set(content.to_string()),
            student_id: Set(student_id),
            is_resolved: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("写入意见反馈失败: {e}")))?;

        Ok(result.into_general_feedback())
    }

    /// 通过 ID 获取反馈
    pub async fn get_general_feedback_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<GeneralFeedback>> {
        let result = GeneralFeedbacks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询意见反馈失败: {e}")))?;

        Ok(result.map(|m| m.into_general_feedback()))
    }

    /// 分页列出反馈（附带学生信息）
    pub async fn list_general_feedback_impl(
        &self,
        query: GeneralFeedbackListQuery,
    ) -> Result<GeneralFeedbackListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = GeneralFeedbacks::find();

        if let Some(ref category) = query.category {
            select = select.filter(Column::Category.eq(category.to_string()));
        }
        if let Some(resolved) = query.resolved {
            select = select.filter(Column::IsResolved.eq(resolved));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计意见反馈失败: {e}")))?
            as i64;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询意见反馈失败: {e}")))?;

        let students: HashMap<i64, _> = Students::find()
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let items = models
            .into_iter()
            .filter_map(|m| {
                let student = students.get(&m.student_id)?;
                Some(GeneralFeedbackItem {
                    student_roll_number: student.roll_number.clone(),
                    student_name: student.name.clone(),
                    feedback: m.into_general_feedback(),
                })
            })
            .collect();

        let total_pages = if total == 0 {
            0
        } else {
            (total + size as i64 - 1) / size as i64
        };

        Ok(GeneralFeedbackListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total,
                total_pages,
            },
        })
    }

    /// 标记反馈已处理
    pub async fn resolve_general_feedback_impl(
        &self,
        id: i64,
        admin_response: Option<&str>,
    ) -> Result<Option<GeneralFeedback>> {
        let Some(existing) = GeneralFeedbacks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询意见反馈失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.is_resolved = Set(true);
        if let Some(response) = admin_response {
            model.admin_response = Set(Some(response.to_string()));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("更新意见反馈失败: {e}")))?;

        Ok(Some(updated.into_general_feedback()))
    }

    /// 按类别统计数量
    pub async fn count_general_feedback_impl(
        &self,
        category: &FeedbackCategory,
        resolved: Option<bool>,
    ) -> Result<i64> {
        let mut select =
            GeneralFeedbacks::find().filter(Column::Category.eq(category.to_string()));
        if let Some(resolved) = resolved {
            select = select.filter(Column::IsResolved.eq(resolved));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计意见反馈失败: {e}")))?;

        Ok(count as i64)
    }

    /// 按类别统计时间区间内的提交数量
    pub async fn count_general_feedback_between_impl(
        &self,
        category: &FeedbackCategory,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64> {
        let count = GeneralFeedbacks::find()
            .filter(Column::Category.eq(category.to_string()))
            .filter(Column::CreatedAt.gte(start.timestamp()))
            .filter(Column::CreatedAt.lt(end.timestamp()))
            .count(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计意见反馈失败: {e}")))?;

        Ok(count as i64)
    }
}
