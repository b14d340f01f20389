use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::feedback_responses::{
    Column as FeedbackColumn, Entity as FeedbackResponses,
};
use crate::entity::staff::{
    ActiveModel as StaffActiveModel, Column as StaffColumn, Entity as Staff,
};
use crate::errors::{CFSystemError, Result};
use crate::models::courses::{
    entities::{Course, StaffMember},
    requests::CreateCourseRequest,
    responses::CourseWithStaff,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let model = ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过课程代码获取课程
    pub async fn get_course_by_code_impl(&self, code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 按课程代码查找或创建
    pub async fn find_or_create_course_impl(
        &self,
        code: &str,
        name: &str,
    ) -> Result<(Course, bool)> {
        if let Some(course) = self.get_course_by_code_impl(code).await? {
            return Ok((course, false));
        }

        let course = self
            .create_course_impl(CreateCourseRequest {
                code: code.to_string(),
                name: name.to_string(),
            })
            .await?;
        Ok((course, true))
    }

    /// 列出所有课程及其教师
    pub async fn list_courses_with_staff_impl(&self) -> Result<Vec<CourseWithStaff>> {
        let courses = Courses::find()
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询课程列表失败: {e}")))?;

        let staff = Staff::find()
            .order_by_asc(StaffColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询教师列表失败: {e}")))?;

        let mut result: Vec<CourseWithStaff> = courses
            .into_iter()
            .map(|c| CourseWithStaff {
                course: c.into_course(),
                staff: Vec::new(),
            })
            .collect();

        for member in staff {
            if let Some(entry) = result.iter_mut().find(|c| c.course.id == member.course_id) {
                entry.staff.push(member.into_staff());
            }
        }

        Ok(result)
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 课程已收到的反馈条数
    pub async fn count_course_feedback_impl(&self, course_id: i64) -> Result<i64> {
        let count = FeedbackResponses::find()
            .filter(FeedbackColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计反馈数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 课程总数
    pub async fn count_courses_impl(&self) -> Result<i64> {
        let count = Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计课程数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 为课程添加教师
    pub async fn create_staff_impl(&self, course_id: i64, name: &str) -> Result<StaffMember> {
        let model = StaffActiveModel {
            name: Set(name.to_string()),
            course_id: Set(course_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_staff())
    }

    /// 通过 ID 获取教师
    pub async fn get_staff_by_id_impl(&self, id: i64) -> Result<Option<StaffMember>> {
        let result = Staff::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_staff()))
    }

    /// 按课程与姓名查找或创建教师
    pub async fn find_or_create_staff_impl(
        &self,
        course_id: i64,
        name: &str,
    ) -> Result<(StaffMember, bool)> {
        let existing = Staff::find()
            .filter(StaffColumn::CourseId.eq(course_id))
            .filter(StaffColumn::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询教师失败: {e}")))?;

        if let Some(member) = existing {
            return Ok((member.into_staff(), false));
        }

        let member = self.create_staff_impl(course_id, name).await?;
        Ok((member, true))
    }

    /// 删除教师
    pub async fn delete_staff_impl(&self, id: i64) -> Result<bool> {
        let result = Staff::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 教师已收到的反馈条数
    pub async fn count_staff_feedback_impl(&self, staff_id: i64) -> Result<i64> {
        let count = FeedbackResponses::find()
            .filter(FeedbackColumn::StaffId.eq(staff_id))
            .count(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计反馈数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 教师总数
    pub async fn count_staff_impl(&self) -> Result<i64> {
        let count = Staff::find()
            .count(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("统计教师数量失败: {e}")))?;

        Ok(count as i64)
    }
}
