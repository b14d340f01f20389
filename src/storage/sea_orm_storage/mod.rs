//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod events;
mod feedback;
mod general_feedback;
mod questions;
mod students;
mod users;

use crate::config::AppConfig;
use crate::errors::{CFSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CFSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CFSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CFSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CFSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 后台用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_impl().await
    }

    async fn update_user_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_user_password_impl(id, password_hash).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 学生模块
    async fn create_student(
        &self,
        student: CreateStudentRequest,
        password_hash: String,
    ) -> Result<Student> {
        self.create_student_impl(student, password_hash).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_roll(&self, roll_number: &str) -> Result<Option<Student>> {
        self.get_student_by_roll_impl(roll_number).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn upsert_student_by_roll(
        &self,
        roll_number: &str,
        name: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<bool> {
        self.upsert_student_by_roll_impl(roll_number, name, email, password_hash)
            .await
    }

    async fn update_student_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_student_password_impl(id, password_hash).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn delete_all_students(&self) -> Result<u64> {
        self.delete_all_students_impl().await
    }

    async fn count_students(&self) -> Result<i64> {
        self.count_students_impl().await
    }

    async fn count_student_feedback(&self, student_id: i64) -> Result<i64> {
        self.count_student_feedback_impl(student_id).await
    }

    // 活动模块
    async fn create_event(&self, event: CreateEventRequest) -> Result<FeedbackEvent> {
        self.create_event_impl(event).await
    }

    async fn get_event_by_id(&self, id: i64) -> Result<Option<FeedbackEvent>> {
        self.get_event_by_id_impl(id).await
    }

    async fn get_active_event(&self) -> Result<Option<FeedbackEvent>> {
        self.get_active_event_impl().await
    }

    async fn list_events(&self) -> Result<Vec<FeedbackEvent>> {
        self.list_events_impl().await
    }

    async fn update_event(
        &self,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<FeedbackEvent>> {
        self.update_event_impl(id, update).await
    }

    async fn set_active_event(&self, id: i64) -> Result<bool> {
        self.set_active_event_impl(id).await
    }

    async fn clear_active_event(&self) -> Result<()> {
        self.clear_active_event_impl().await
    }

    async fn soft_delete_event(&self, id: i64) -> Result<bool> {
        self.soft_delete_event_impl(id).await
    }

    async fn list_event_courses(&self, event_id: i64) -> Result<Vec<Course>> {
        self.list_event_courses_impl(event_id).await
    }

    // 课程与教师模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(code).await
    }

    async fn find_or_create_course(&self, code: &str, name: &str) -> Result<(Course, bool)> {
        self.find_or_create_course_impl(code, name).await
    }

    async fn list_courses_with_staff(&self) -> Result<Vec<CourseWithStaff>> {
        self.list_courses_with_staff_impl().await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn count_course_feedback(&self, course_id: i64) -> Result<i64> {
        self.count_course_feedback_impl(course_id).await
    }

    async fn count_courses(&self) -> Result<i64> {
        self.count_courses_impl().await
    }

    async fn create_staff(&self, course_id: i64, name: &str) -> Result<StaffMember> {
        self.create_staff_impl(course_id, name).await
    }

    async fn get_staff_by_id(&self, id: i64) -> Result<Option<StaffMember>> {
        self.get_staff_by_id_impl(id).await
    }

    async fn find_or_create_staff(
        &self,
        course_id: i64,
        name: &str,
    ) -> Result<(StaffMember, bool)> {
        self.find_or_create_staff_impl(course_id, name).await
    }

    async fn delete_staff(&self, id: i64) -> Result<bool> {
        self.delete_staff_impl(id).await
    }

    async fn count_staff_feedback(&self, staff_id: i64) -> Result<i64> {
        self.count_staff_feedback_impl(staff_id).await
    }

    async fn count_staff(&self) -> Result<i64> {
        self.count_staff_impl().await
    }

    // 问卷题目模块
    async fn create_question(&self, text: &str) -> Result<Question> {
        self.create_question_impl(text).await
    }

    async fn list_questions(&self) -> Result<Vec<Question>> {
        self.list_questions_impl().await
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        self.delete_question_impl(id).await
    }

    async fn count_question_responses(&self, question_id: i64) -> Result<i64> {
        self.count_question_responses_impl(question_id).await
    }

    async fn count_questions(&self) -> Result<i64> {
        self.count_questions_impl().await
    }

    // 课程反馈模块
    async fn has_submitted(&self, student_id: i64, event_id: i64) -> Result<bool> {
        self.has_submitted_impl(student_id, event_id).await
    }

    async fn insert_feedback_batch(
        &self,
        student_id: i64,
        event_id: i64,
        batch: Vec<FeedbackBatchEntry>,
    ) -> Result<(i64, i64)> {
        self.insert_feedback_batch_impl(student_id, event_id, batch)
            .await
    }

    async fn ratings_by_staff_event(
        &self,
        staff_id: i64,
        event_id: i64,
    ) -> Result<Vec<(i64, i32)>> {
        self.ratings_by_staff_event_impl(staff_id, event_id).await
    }

    async fn count_distinct_responders(
        &self,
        event_id: i64,
        staff_id: Option<i64>,
    ) -> Result<i64> {
        self.count_distinct_responders_impl(event_id, staff_id).await
    }

    async fn list_non_responders(&self, event_id: i64, staff_id: i64) -> Result<Vec<Student>> {
        self.list_non_responders_impl(event_id, staff_id).await
    }

    async fn list_responses(&self, event_id: i64) -> Result<Vec<ResponseRow>> {
        self.list_responses_impl(event_id).await
    }

    // 通用意见反馈模块
    async fn create_general_feedback(
        &self,
        student_id: i64,
        category: &FeedbackCategory,
        content: &str,
    ) -> Result<GeneralFeedback> {
        self.create_general_feedback_impl(student_id, category, content)
            .await
    }

    async fn get_general_feedback_by_id(&self, id: i64) -> Result<Option<GeneralFeedback>> {
        self.get_general_feedback_by_id_impl(id).await
    }

    async fn list_general_feedback(
        &self,
        query: GeneralFeedbackListQuery,
    ) -> Result<GeneralFeedbackListResponse> {
        self.list_general_feedback_impl(query).await
    }

    async fn resolve_general_feedback(
        &self,
        id: i64,
        admin_response: Option<&str>,
    ) -> Result<Option<GeneralFeedback>> {
        self.resolve_general_feedback_impl(id, admin_response).await
    }

    async fn count_general_feedback(
        &self,
        category: &FeedbackCategory,
        resolved: Option<bool>,
    ) -> Result<i64> {
        self.count_general_feedback_impl(category, resolved).await
    }

    async fn count_general_feedback_between(
        &self,
        category: &FeedbackCategory,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64> {
        self.count_general_feedback_between_impl(category, start, end)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::SeaOrmStorage;
    use crate::models::events::requests::CreateEventRequest;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    // 内存 SQLite 必须限制为单连接，多个连接各自是一个独立的空库
    async fn memory_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt)
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        SeaOrmStorage { db }
    }

    fn event(title: &str) -> CreateEventRequest {
        CreateEventRequest {
            title: title.to_string(),
            description: None,
            warning_message: None,
            is_open_to_all: true,
            start_roll_number: None,
            end_roll_number: None,
            course_ids: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_activate_event_deactivates_all_others() {
        let storage = memory_storage().await;

        let first = storage.create_event_impl(event("第一期反馈")).await.unwrap();
        let second = storage.create_event_impl(event("第二期反馈")).await.unwrap();

        assert!(storage.set_active_event_impl(first.id).await.unwrap());
        assert!(storage.set_active_event_impl(second.id).await.unwrap());

        let active: Vec<_> = storage
            .list_events_impl()
            .await
            .unwrap()
            .into_iter()
            .filter(|e| e.is_active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second.id);
        assert_eq!(
            storage.get_active_event_impl().await.unwrap().unwrap().id,
            second.id
        );
    }

    #[tokio::test]
    async fn test_upsert_student_by_roll_is_idempotent() {
        let storage = memory_storage().await;

        let created = storage
            .upsert_student_by_roll_impl("71812300001", "张三", None, "hash-initial")
            .await
            .unwrap();
        assert!(created);

        // 再次导入同一学号只更新资料，不产生第二条记录
        let created = storage
            .upsert_student_by_roll_impl(
                "71812300001",
                "张三丰",
                Some("zhang@example.edu"),
                "hash-other",
            )
            .await
            .unwrap();
        assert!(!created);

        assert_eq!(storage.count_students_impl().await.unwrap(), 1);
        let student = storage
            .get_student_by_roll_impl("71812300001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.name, "张三丰");
        assert_eq!(student.email.as_deref(), Some("zhang@example.edu"));
        // 学生已有的密码不被重复导入覆盖
        assert_eq!(student.password_hash, "hash-initial");
    }
}
