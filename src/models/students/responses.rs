use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;
use crate::models::students::entities::Student;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub students: Vec<Student>,
    pub pagination: PaginationInfo,
}

// 批量导入结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentImportResponse {
    pub created: i64,
    pub updated: i64,
    pub failed: i64,
    /// 最多展示前若干条错误，其余以 omitted_errors 计数
    pub errors: Vec<String>,
    pub omitted_errors: i64,
}
