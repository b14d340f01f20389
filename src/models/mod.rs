//! 业务模型定义
//!
//! 按领域划分子模块，每个领域内再分为 entities / requests / responses。
//! 这些模型是 API 层与服务层共享的数据结构，与数据库实体（entity 模块）分离。

pub mod auth;
pub mod common;
pub mod courses;
pub mod events;
pub mod feedback;
pub mod general_feedback;
pub mod questions;
pub mod results;
pub mod students;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

// 程序启动时间，注入 app_data 供运行时长统计使用
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务状态码
///
/// 约定：200 成功，1xxx 参数校验，2xxx 认证授权，
/// 3xxx 资源不存在，4xxx 业务冲突，5xxx 服务端内部错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 200,

    // 参数校验
    BadRequest = 1000,
    RollNumberInvalid = 1001,
    RatingInvalid = 1002,
    PasswordInvalid = 1003,
    ImportFileParseFailed = 1010,
    ImportFileMissingColumn = 1011,
    ImportFileDataInvalid = 1012,

    // 认证授权
    AuthFailed = 2001,
    Unauthorized = 2002,
    Forbidden = 2003,

    // 资源不存在
    NotFound = 3000,
    UserNotFound = 3001,
    StudentNotFound = 3002,
    EventNotFound = 3003,
    CourseNotFound = 3004,
    StaffNotFound = 3005,
    QuestionNotFound = 3006,
    FeedbackNotFound = 3007,
    NoActiveEvent = 3008,

    // 业务冲突
    AlreadySubmitted = 4001,
    NotEligible = 4002,
    AlreadyExists = 4003,
    HasResponses = 4004,

    // 服务端内部错误
    InternalServerError = 5000,
    ExportFailed = 5001,
}
