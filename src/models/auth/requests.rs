use serde::Deserialize;
use ts_rs::TS;

// 后台用户登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 用户名
    pub username: String,
    /// 密码
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

// 学生登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct StudentLoginRequest {
    /// 学号
    pub roll_number: String,
    /// 密码
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}
