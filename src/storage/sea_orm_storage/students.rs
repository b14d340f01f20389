use super::SeaOrmStorage;
use crate::entity::feedback_responses::{
    Column as FeedbackColumn, Entity as FeedbackResponses,
};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{CFSystemError, Result};
use crate::models::{
    PaginationInfo,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery},
        responses::StudentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(
        &self,
        req: CreateStudentRequest,
        password_hash: String,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            roll_number: Set(req.roll_number),
            name: Set(req.name),
            email: Set(req.email),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过学号获取学生
    pub async fn get_student_by_roll_impl(&self, roll_number: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::RollNumber.eq(roll_number))
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Students::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::RollNumber.contains(&escaped))
                    .add(Column::Name.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_asc(Column::RollNumber)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计学生数量失败: {e}")))?
            as i64;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询学生列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_student())
            .collect();

        let total_pages = if total == 0 {
            0
        } else {
            (total + size as i64 - 1) / size as i64
        };

        Ok(StudentListResponse {
            students,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total,
                total_pages,
            },
        })
    }

    /// 按学号插入或更新学生，返回 true 表示新建
    pub async fn upsert_student_by_roll_impl(
        &self,
        roll_number: &str,
        name: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let existing = Students::find()
            .filter(Column::RollNumber.eq(roll_number))
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询学生失败: {e}")))?;

        match existing {
            Some(model) => {
                // 已存在则只更新姓名和邮箱，保留学生自行修改过的密码
                let mut active: ActiveModel = model.into();
                active.name = Set(name.to_string());
                if email.is_some() {
                    active.email = Set(email.map(String::from));
                }
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(|e| {
                    CFSystemError::database_operation(format!("更新学生失败: {e}"))
                })?;
                Ok(false)
            }
            None => {
                let model = ActiveModel {
                    roll_number: Set(roll_number.to_string()),
                    name: Set(name.to_string()),
                    email: Set(email.map(String::from)),
                    password_hash: Set(password_hash.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                model.insert(&self.db).await.map_err(|e| {
                    CFSystemError::database_operation(format!("创建学生失败: {e}"))
                })?;
                Ok(true)
            }
        }
    }

    /// 更新学生密码
    pub async fn update_student_password_impl(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<bool> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(false);
        };

        let mut model: ActiveModel = existing.into();
        model.password_hash = Set(password_hash.to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp());
        model
            .update(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("更新学生密码失败: {e}")))?;

        Ok(true)
    }

    /// 删除学生
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除所有学生
    pub async fn delete_all_students_impl(&self) -> Result<u64> {
        let result = Students::delete_many()
            .exec(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("清空学生失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 学生总数
    pub async fn count_students_impl(&self) -> Result<i64> {
        let count = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计学生数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 学生已提交的课程反馈条数
    pub async fn count_student_feedback_impl(&self, student_id: i64) -> Result<i64> {
        let count = FeedbackResponses::find()
            .filter(FeedbackColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计反馈数量失败: {e}")))?;

        Ok(count as i64)
    }
}
