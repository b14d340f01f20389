use super::SeaOrmStorage;
use crate::entity::courses::Entity as Courses;
use crate::entity::event_courses::{
    ActiveModel as EventCourseActiveModel, Column as EventCourseColumn, Entity as EventCourses,
};
use crate::entity::events::{ActiveModel, Column, Entity as Events};
use crate::errors::{CFSystemError, Result};
use crate::models::courses::entities::Course;
use crate::models::events::{
    entities::FeedbackEvent,
    requests::{CreateEventRequest, UpdateEventRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建活动并写入课程关联
    pub async fn create_event_impl(&self, req: CreateEventRequest) -> Result<FeedbackEvent> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CFSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            warning_message: Set(req.warning_message),
            is_active: Set(false),
            is_deleted: Set(false),
            is_open_to_all: Set(req.is_open_to_all),
            start_roll_number: Set(req.start_roll_number),
            end_roll_number: Set(req.end_roll_number),
            created_at: Set(now),
            ..Default::default()
        };

        let event = model
            .insert(&txn)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("创建活动失败: {e}")))?;

        for course_id in req.course_ids {
            let link = EventCourseActiveModel {
                event_id: Set(event.id),
                course_id: Set(course_id),
            };
            link.insert(&txn).await.map_err(|e| {
                CFSystemError::database_operation(format!("写入活动课程关联失败: {e}"))
            })?;
        }

        txn.commit()
            .await
            .map_err(|e| CFSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(event.into_event())
    }

    /// 通过 ID 获取活动（不含已软删除的）
    pub async fn get_event_by_id_impl(&self, id: i64) -> Result<Option<FeedbackEvent>> {
        let result = Events::find_by_id(id)
            .filter(Column::IsDeleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    /// 获取当前激活的活动
    pub async fn get_active_event_impl(&self) -> Result<Option<FeedbackEvent>> {
        let result = Events::find()
            .filter(Column::IsActive.eq(true))
            .filter(Column::IsDeleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询激活活动失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    /// 列出所有活动（不含已软删除的）
    pub async fn list_events_impl(&self) -> Result<Vec<FeedbackEvent>> {
        let result = Events::find()
            .filter(Column::IsDeleted.eq(false))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_event()).collect())
    }

    /// 更新活动
    pub async fn update_event_impl(
        &self,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<FeedbackEvent>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CFSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Events::find_by_id(id)
            .filter(Column::IsDeleted.eq(false))
            .one(&txn)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询活动失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(warning) = update.warning_message {
            model.warning_message = Set(Some(warning));
        }
        if let Some(open) = update.is_open_to_all {
            model.is_open_to_all = Set(open);
        }
        if let Some(start) = update.start_roll_number {
            model.start_roll_number = Set(Some(start));
        }
        if let Some(end) = update.end_roll_number {
            model.end_roll_number = Set(Some(end));
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("更新活动失败: {e}")))?;

        // 课程列表整体替换
        if let Some(course_ids) = update.course_ids {
            EventCourses::delete_many()
                .filter(EventCourseColumn::EventId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    CFSystemError::database_operation(format!("清除活动课程关联失败: {e}"))
                })?;
            for course_id in course_ids {
                let link = EventCourseActiveModel {
                    event_id: Set(id),
                    course_id: Set(course_id),
                };
                link.insert(&txn).await.map_err(|e| {
                    CFSystemError::database_operation(format!("写入活动课程关联失败: {e}"))
                })?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| CFSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(updated.into_event()))
    }

    /// 激活指定活动并让其它活动全部失效，单个事务内完成
    pub async fn set_active_event_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CFSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(target) = Events::find_by_id(id)
            .filter(Column::IsDeleted.eq(false))
            .one(&txn)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询活动失败: {e}")))?
        else {
            return Ok(false);
        };

        Events::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .exec(&txn)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("取消激活失败: {e}")))?;

        let mut model: ActiveModel = target.into();
        model.is_active = Set(true);
        model
            .update(&txn)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("激活活动失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CFSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }

    /// 取消所有活动的激活状态
    pub async fn clear_active_event_impl(&self) -> Result<()> {
        Events::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .exec(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("取消激活失败: {e}")))?;

        Ok(())
    }

    /// 软删除活动（同时取消激活）
    pub async fn soft_delete_event_impl(&self, id: i64) -> Result<bool> {
        let Some(existing) = Events::find_by_id(id)
            .filter(Column::IsDeleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询活动失败: {e}")))?
        else {
            return Ok(false);
        };

        let mut model: ActiveModel = existing.into();
        model.is_deleted = Set(true);
        model.is_active = Set(false);
        model
            .update(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("删除活动失败: {e}")))?;

        Ok(true)
    }

    /// 列出活动覆盖的课程
    pub async fn list_event_courses_impl(&self, event_id: i64) -> Result<Vec<Course>> {
        let links = EventCourses::find()
            .filter(EventCourseColumn::EventId.eq(event_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                CFSystemError::database_operation(format!("查询活动课程关联失败: {e}"))
            })?;

        let course_ids: Vec<i64> = links.into_iter().map(|l| l.course_id).collect();
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let courses = Courses::find()
            .filter(crate::entity::courses::Column::Id.is_in(course_ids))
            .order_by_asc(crate::entity::courses::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }
}
