use serde::Deserialize;
use std::collections::BTreeMap;
use ts_rs::TS;

// 单门课程的评分载荷
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct CourseRatings {
    /// 本门课程选择的任课教师，未选择时该课程的评分会被忽略
    /// （strict_ratings 开启时则直接拒绝整次提交）
    #[serde(default)]
    pub staff_id: Option<i64>,
    /// 题目 ID 到评分 [1,4] 的映射
    #[serde(default)]
    pub ratings: BTreeMap<i64, i32>,
}

// 提交课程反馈请求
//
// 一次提交覆盖当前活动下的多门课程，课程 ID 作为键。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct SubmitFeedbackRequest {
    pub courses: BTreeMap<i64, CourseRatings>,
}

// 校验后的写入批次，一项对应一门课程
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackBatchEntry {
    pub course_id: i64,
    pub staff_id: i64,
    pub ratings: Vec<(i64, i32)>,
}

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 4;

pub fn rating_in_range(rating: i32) -> bool {
    (RATING_MIN..=RATING_MAX).contains(&rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(!rating_in_range(0));
        assert!(rating_in_range(1));
        assert!(rating_in_range(4));
        assert!(!rating_in_range(5));
    }

    #[test]
    fn test_submit_request_deserializes() {
        let body = r#"{
            "courses": {
                "3": { "staff_id": 7, "ratings": { "1": 4, "2": 3 } },
                "5": { "staff_id": null, "ratings": { "1": 2 } }
            }
        }"#;
        let req: SubmitFeedbackRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.courses.len(), 2);
        assert_eq!(req.courses[&3].staff_id, Some(7));
        assert_eq!(req.courses[&3].ratings[&1], 4);
        assert_eq!(req.courses[&5].staff_id, None);
    }
}
