use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{
    courses::{
        entities::{Course, StaffMember},
        requests::CreateCourseRequest,
        responses::CourseWithStaff,
    },
    events::{
        entities::FeedbackEvent,
        requests::{CreateEventRequest, UpdateEventRequest},
    },
    feedback::requests::FeedbackBatchEntry,
    general_feedback::{
        entities::{FeedbackCategory, GeneralFeedback},
        requests::GeneralFeedbackListQuery,
        responses::GeneralFeedbackListResponse,
    },
    questions::entities::Question,
    results::responses::ResponseRow,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery},
        responses::StudentListResponse,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 后台用户管理方法
    // 创建用户（password 字段应当传入已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 列出所有后台用户
    async fn list_users(&self) -> Result<Vec<User>>;
    // 更新用户密码
    async fn update_user_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 学生管理方法
    // 创建学生
    async fn create_student(
        &self,
        student: CreateStudentRequest,
        password_hash: String,
    ) -> Result<Student>;
    // 通过ID获取学生信息
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过学号获取学生信息
    async fn get_student_by_roll(&self, roll_number: &str) -> Result<Option<Student>>;
    // 分页列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 按学号插入或更新学生，返回 true 表示新建
    async fn upsert_student_by_roll(
        &self,
        roll_number: &str,
        name: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<bool>;
    // 更新学生密码
    async fn update_student_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    // 删除学生
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 删除所有学生
    async fn delete_all_students(&self) -> Result<u64>;
    // 学生总数
    async fn count_students(&self) -> Result<i64>;
    // 学生已提交的课程反馈条数（删除冲突检查）
    async fn count_student_feedback(&self, student_id: i64) -> Result<i64>;

    /// 反馈活动管理方法
    // 创建活动（同时写入课程关联）
    async fn create_event(&self, event: CreateEventRequest) -> Result<FeedbackEvent>;
    // 通过ID获取活动（不含已软删除的）
    async fn get_event_by_id(&self, id: i64) -> Result<Option<FeedbackEvent>>;
    // 获取当前激活的活动
    async fn get_active_event(&self) -> Result<Option<FeedbackEvent>>;
    // 列出所有活动（不含已软删除的）
    async fn list_events(&self) -> Result<Vec<FeedbackEvent>>;
    // 更新活动
    async fn update_event(
        &self,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<FeedbackEvent>>;
    // 激活指定活动并让其它活动全部失效，单个事务内完成
    async fn set_active_event(&self, id: i64) -> Result<bool>;
    // 取消所有活动的激活状态
    async fn clear_active_event(&self) -> Result<()>;
    // 软删除活动
    async fn soft_delete_event(&self, id: i64) -> Result<bool>;
    // 列出活动覆盖的课程
    async fn list_event_courses(&self, event_id: i64) -> Result<Vec<Course>>;

    /// 课程与教师管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    // 通过课程代码获取课程
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    // 按课程代码查找或创建，返回 true 表示新建
    async fn find_or_create_course(&self, code: &str, name: &str) -> Result<(Course, bool)>;
    // 列出所有课程及其教师
    async fn list_courses_with_staff(&self) -> Result<Vec<CourseWithStaff>>;
    // 删除课程
    async fn delete_course(&self, id: i64) -> Result<bool>;
    // 课程已收到的反馈条数（删除冲突检查）
    async fn count_course_feedback(&self, course_id: i64) -> Result<i64>;
    // 课程总数
    async fn count_courses(&self) -> Result<i64>;
    // 为课程添加教师
    async fn create_staff(&self, course_id: i64, name: &str) -> Result<StaffMember>;
    // 通过ID获取教师
    async fn get_staff_by_id(&self, id: i64) -> Result<Option<StaffMember>>;
    // 按课程与姓名查找或创建教师，返回 true 表示新建
    async fn find_or_create_staff(&self, course_id: i64, name: &str)
    -> Result<(StaffMember, bool)>;
    // 删除教师
    async fn delete_staff(&self, id: i64) -> Result<bool>;
    // 教师已收到的反馈条数（删除冲突检查）
    async fn count_staff_feedback(&self, staff_id: i64) -> Result<i64>;
    // 教师总数
    async fn count_staff(&self) -> Result<i64>;

    /// 问卷题目管理方法
    // 创建题目
    async fn create_question(&self, text: &str) -> Result<Question>;
    // 列出所有题目
    async fn list_questions(&self) -> Result<Vec<Question>>;
    // 删除题目
    async fn delete_question(&self, id: i64) -> Result<bool>;
    // 题目已收到的评分条数（删除冲突检查）
    async fn count_question_responses(&self, question_id: i64) -> Result<i64>;
    // 题目总数
    async fn count_questions(&self) -> Result<i64>;

    /// 课程反馈方法
    // 学生在活动中是否已提交过反馈
    async fn has_submitted(&self, student_id: i64, event_id: i64) -> Result<bool>;
    // 事务性写入一批课程反馈，事务内再次检查重复提交
    // 返回（写入的课程反馈条数，写入的评分条数）
    async fn insert_feedback_batch(
        &self,
        student_id: i64,
        event_id: i64,
        batch: Vec<FeedbackBatchEntry>,
    ) -> Result<(i64, i64)>;
    // 某教师在某活动中收到的全部评分（question_id, rating）
    async fn ratings_by_staff_event(
        &self,
        staff_id: i64,
        event_id: i64,
    ) -> Result<Vec<(i64, i32)>>;
    // 去重后的提交学生数，staff_id 为空时统计整个活动
    async fn count_distinct_responders(
        &self,
        event_id: i64,
        staff_id: Option<i64>,
    ) -> Result<i64>;
    // 未对该教师提交反馈的学生
    async fn list_non_responders(&self, event_id: i64, staff_id: i64) -> Result<Vec<Student>>;
    // 活动的全部原始反馈记录（管理端查看 / 导出）
    async fn list_responses(&self, event_id: i64) -> Result<Vec<ResponseRow>>;

    /// 通用意见反馈方法
    // 提交反馈
    async fn create_general_feedback(
        &self,
        student_id: i64,
        category: &FeedbackCategory,
        content: &str,
    ) -> Result<GeneralFeedback>;
    // 通过ID获取反馈
    async fn get_general_feedback_by_id(&self, id: i64) -> Result<Option<GeneralFeedback>>;
    // 分页列出反馈（附带学生信息）
    async fn list_general_feedback(
        &self,
        query: GeneralFeedbackListQuery,
    ) -> Result<GeneralFeedbackListResponse>;
    // 标记反馈已处理
    async fn resolve_general_feedback(
        &self,
        id: i64,
        admin_response: Option<&str>,
    ) -> Result<Option<GeneralFeedback>>;
    // 按类别统计数量，可选只统计已处理/未处理
    async fn count_general_feedback(
        &self,
        category: &FeedbackCategory,
        resolved: Option<bool>,
    ) -> Result<i64>;
    // 按类别统计时间区间内的提交数量（月度统计）
    async fn count_general_feedback_between(
        &self,
        category: &FeedbackCategory,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
