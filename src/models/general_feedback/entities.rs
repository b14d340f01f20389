use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 通用意见反馈类别
//
// 除 general 以外，每个类别都可以配置一名负责人账号，
// 负责人只能查看和处理自己类别下的反馈。
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/general_feedback.ts")]
pub enum FeedbackCategory {
    Fc,        // 食堂
    Library,   // 图书馆
    Transport, // 交通
    Sports,    // 体育
    Bookdepot, // 教材
    General,   // 其他
}

impl FeedbackCategory {
    pub const FC: &'static str = "fc";
    pub const LIBRARY: &'static str = "library";
    pub const TRANSPORT: &'static str = "transport";
    pub const SPORTS: &'static str = "sports";
    pub const BOOKDEPOT: &'static str = "bookdepot";
    pub const GENERAL: &'static str = "general";

    /// 可以配置负责人的类别（不含 general）
    pub fn incharge_categories() -> &'static [FeedbackCategory] {
        &[
            Self::Fc,
            Self::Library,
            Self::Transport,
            Self::Sports,
            Self::Bookdepot,
        ]
    }

    pub fn all() -> &'static [FeedbackCategory] {
        &[
            Self::Fc,
            Self::Library,
            Self::Transport,
            Self::Sports,
            Self::Bookdepot,
            Self::General,
        ]
    }
}

impl<'de> Deserialize<'de> for FeedbackCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的反馈类别: '{s}'. 支持的类别: fc, library, transport, sports, bookdepot, general"
            ))
        })
    }
}

impl std::fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FeedbackCategory::Fc => Self::FC,
            FeedbackCategory::Library => Self::LIBRARY,
            FeedbackCategory::Transport => Self::TRANSPORT,
            FeedbackCategory::Sports => Self::SPORTS,
            FeedbackCategory::Bookdepot => Self::BOOKDEPOT,
            FeedbackCategory::General => Self::GENERAL,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for FeedbackCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::FC => Ok(FeedbackCategory::Fc),
            Self::LIBRARY => Ok(FeedbackCategory::Library),
            Self::TRANSPORT => Ok(FeedbackCategory::Transport),
            Self::SPORTS => Ok(FeedbackCategory::Sports),
            Self::BOOKDEPOT => Ok(FeedbackCategory::Bookdepot),
            Self::GENERAL => Ok(FeedbackCategory::General),
            _ => Err(format!("Invalid feedback category: {s}")),
        }
    }
}

// 通用意见反馈实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/general_feedback.ts")]
pub struct GeneralFeedback {
    pub id: i64,
    pub category: FeedbackCategory,
    pub content: String,
    pub student_id: i64,
    pub is_resolved: bool,
    pub admin_response: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_round_trip() {
        for c in FeedbackCategory::all() {
            assert_eq!(&FeedbackCategory::from_str(&c.to_string()).unwrap(), c);
        }
    }

    #[test]
    fn test_general_has_no_incharge() {
        assert!(
            !FeedbackCategory::incharge_categories().contains(&FeedbackCategory::General)
        );
    }
}
