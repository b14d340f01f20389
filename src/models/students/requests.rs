use serde::Deserialize;
use ts_rs::TS;

// 创建学生请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub roll_number: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// 省略时使用配置的默认初始密码
    #[serde(default)]
    pub password: Option<String>,
}

// 学生列表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    /// 按学号前缀或姓名模糊搜索
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}
