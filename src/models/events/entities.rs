use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 反馈活动实体
//
// 一次活动圈定一批课程和一个学号区间（或对全体开放），
// 同一时刻全系统最多只有一个活动处于激活状态。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct FeedbackEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// 学生不在学号区间内时展示的提示语
    pub warning_message: Option<String>,
    pub is_active: bool,
    pub is_open_to_all: bool,
    pub start_roll_number: Option<String>,
    pub end_roll_number: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FeedbackEvent {
    /// 判断学号是否在活动的参与范围内。
    ///
    /// 对全体开放时恒为真；否则要求起止学号都已配置，
    /// 且学号按字符串比较落在闭区间内（学号等长，字典序即数值序）。
    pub fn roll_in_range(&self, roll_number: &str) -> bool {
        if self.is_open_to_all {
            return true;
        }
        match (&self.start_roll_number, &self.end_roll_number) {
            (Some(start), Some(end)) => {
                roll_number >= start.as_str() && roll_number <= end.as_str()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(open: bool, start: Option<&str>, end: Option<&str>) -> FeedbackEvent {
        FeedbackEvent {
            id: 1,
            title: "Mid semester feedback".to_string(),
            description: None,
            warning_message: None,
            is_active: true,
            is_open_to_all: open,
            start_roll_number: start.map(String::from),
            end_roll_number: end.map(String::from),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_open_to_all_accepts_any_roll() {
        let e = event(true, None, None);
        assert!(e.roll_in_range("71812300001"));
        assert!(e.roll_in_range("71812399999"));
    }

    #[test]
    fn test_range_is_inclusive() {
        let e = event(false, Some("71812300020"), Some("71812300050"));
        assert!(e.roll_in_range("71812300020"));
        assert!(e.roll_in_range("71812300030"));
        assert!(e.roll_in_range("71812300050"));
        assert!(!e.roll_in_range("71812300019"));
        assert!(!e.roll_in_range("71812300060"));
    }

    #[test]
    fn test_missing_bound_blocks_everyone() {
        let e = event(false, Some("71812300020"), None);
        assert!(!e.roll_in_range("71812300030"));
        let e = event(false, None, None);
        assert!(!e.roll_in_range("71812300030"));
    }
}
