use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::courses::Entity as Courses;
use crate::entity::feedback_responses::{
    ActiveModel as FeedbackActiveModel, Column as FeedbackColumn, Entity as FeedbackResponses,
};
use crate::entity::question_responses::{
    ActiveModel as QuestionResponseActiveModel, Column as QuestionResponseColumn,
    Entity as QuestionResponses,
};
use crate::entity::staff::Entity as Staff;
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{CFSystemError, Result};
use crate::models::feedback::requests::FeedbackBatchEntry;
use crate::models::results::responses::{RatingCell, ResponseRow};
use crate::models::students::entities::Student;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 学生在活动中是否已提交过反馈
    pub async fn has_submitted_impl(&self, student_id: i64, event_id: i64) -> Result<bool> {
        let count = FeedbackResponses::find()
            .filter(FeedbackColumn::StudentId.eq(student_id))
            .filter(FeedbackColumn::EventId.eq(event_id))
            .count(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询提交记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 事务性写入一批课程反馈
    ///
    /// 事务内先重查一次提交记录，两个并发提交只有先提交的事务能通过；
    /// 即使都通过了重查，(student_id, event_id, course_id) 唯一索引
    /// 也会让后写入的一方冲突回滚。
    pub async fn insert_feedback_batch_impl(
        &self,
        student_id: i64,
        event_id: i64,
        batch: Vec<FeedbackBatchEntry>,
    ) -> Result<(i64, i64)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CFSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let already = FeedbackResponses::find()
            .filter(FeedbackColumn::StudentId.eq(student_id))
            .filter(FeedbackColumn::EventId.eq(event_id))
            .count(&txn)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询提交记录失败: {e}")))?;

        if already > 0 {
            return Err(CFSystemError::conflict(format!(
                "学生 {student_id} 已在活动 {event_id} 中提交过反馈"
            )));
        }

        let mut submitted_courses = 0i64;
        let mut submitted_ratings = 0i64;

        for entry in batch {
            let feedback = FeedbackActiveModel {
                student_id: Set(student_id),
                event_id: Set(event_id),
                course_id: Set(entry.course_id),
                staff_id: Set(entry.staff_id),
                submitted_at: Set(now),
                ..Default::default()
            };

            let feedback = feedback
                .insert(&txn)
                .await
                .map_err(|e| CFSystemError::database_operation(format!("写入反馈失败: {e}")))?;
            submitted_courses += 1;

            for (question_id, rating) in entry.ratings {
                let response = QuestionResponseActiveModel {
                    feedback_id: Set(feedback.id),
                    question_id: Set(question_id),
                    rating: Set(rating),
                    ..Default::default()
                };
                response
                    .insert(&txn)
                    .await
                    .map_err(|e| {
                        CFSystemError::database_operation(format!("写入评分失败: {e}"))
                    })?;
                submitted_ratings += 1;
            }
        }

        txn.commit()
            .await
            .map_err(|e| CFSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((submitted_courses, submitted_ratings))
    }

    /// 某教师在某活动中收到的全部评分（question_id, rating）
    pub async fn ratings_by_staff_event_impl(
        &self,
        staff_id: i64,
        event_id: i64,
    ) -> Result<Vec<(i64, i32)>> {
        let feedback_ids: Vec<i64> = FeedbackResponses::find()
            .select_only()
            .column(FeedbackColumn::Id)
            .filter(FeedbackColumn::StaffId.eq(staff_id))
            .filter(FeedbackColumn::EventId.eq(event_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询反馈记录失败: {e}")))?;

        if feedback_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(i64, i32)> = QuestionResponses::find()
            .select_only()
            .column(QuestionResponseColumn::QuestionId)
            .column(QuestionResponseColumn::Rating)
            .filter(QuestionResponseColumn::FeedbackId.is_in(feedback_ids))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(rows)
    }

    /// 去重后的提交学生数，staff_id 为空时统计整个活动
    pub async fn count_distinct_responders_impl(
        &self,
        event_id: i64,
        staff_id: Option<i64>,
    ) -> Result<i64> {
        let mut select = FeedbackResponses::find()
            .select_only()
            .column(FeedbackColumn::StudentId)
            .distinct()
            .filter(FeedbackColumn::EventId.eq(event_id));

        if let Some(staff_id) = staff_id {
            select = select.filter(FeedbackColumn::StaffId.eq(staff_id));
        }

        let responders: Vec<i64> = select
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计提交人数失败: {e}")))?;

        Ok(responders.len() as i64)
    }

    /// 未对该教师提交反馈的学生
    pub async fn list_non_responders_impl(
        &self,
        event_id: i64,
        staff_id: i64,
    ) -> Result<Vec<Student>> {
        let responder_ids: Vec<i64> = FeedbackResponses::find()
            .select_only()
            .column(FeedbackColumn::StudentId)
            .distinct()
            .filter(FeedbackColumn::EventId.eq(event_id))
            .filter(FeedbackColumn::StaffId.eq(staff_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询提交学生失败: {e}")))?;

        let mut select = Students::find();
        if !responder_ids.is_empty() {
            select = select.filter(StudentColumn::Id.is_not_in(responder_ids));
        }

        let students = select
            .order_by_asc(StudentColumn::RollNumber)
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 活动的全部原始反馈记录
    pub async fn list_responses_impl(&self, event_id: i64) -> Result<Vec<ResponseRow>> {
        let feedback_rows = FeedbackResponses::find()
            .filter(FeedbackColumn::EventId.eq(event_id))
            .order_by_asc(FeedbackColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询反馈记录失败: {e}")))?;

        if feedback_rows.is_empty() {
            return Ok(Vec::new());
        }

        // 批量取出关联数据，按 ID 建索引
        let students: HashMap<i64, _> = Students::find()
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let courses: HashMap<i64, _> = Courses::find()
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let staff: HashMap<i64, _> = Staff::find()
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询教师失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let feedback_ids: Vec<i64> = feedback_rows.iter().map(|f| f.id).collect();
        let mut ratings_by_feedback: HashMap<i64, Vec<RatingCell>> = HashMap::new();
        let rating_rows = QuestionResponses::find()
            .filter(QuestionResponseColumn::FeedbackId.is_in(feedback_ids))
            .order_by_asc(QuestionResponseColumn::QuestionId)
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询评分失败: {e}")))?;
        for row in rating_rows {
            ratings_by_feedback
                .entry(row.feedback_id)
                .or_default()
                .push(RatingCell {
                    question_id: row.question_id,
                    rating: row.rating,
                });
        }

        let mut rows = Vec::with_capacity(feedback_rows.len());
        for feedback in feedback_rows {
            let Some(student) = students.get(&feedback.student_id) else {
                continue;
            };
            let Some(course) = courses.get(&feedback.course_id) else {
                continue;
            };
            let Some(member) = staff.get(&feedback.staff_id) else {
                continue;
            };

            rows.push(ResponseRow {
                feedback_id: feedback.id,
                student_roll_number: student.roll_number.clone(),
                student_name: student.name.clone(),
                course_code: course.code.clone(),
                staff_name: member.name.clone(),
                submitted_at: chrono::DateTime::from_timestamp(feedback.submitted_at, 0)
                    .unwrap_or_default(),
                ratings: ratings_by_feedback.remove(&feedback.id).unwrap_or_default(),
            });
        }

        Ok(rows)
    }
}
