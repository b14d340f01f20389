//! 意见反馈统计
//!
//! 每个类别给出总量、已处理与未处理数量，以及最近 6 个月
//! （含当月）按月的提交数量。管理员看全部类别，负责人只看自己的。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Datelike, TimeZone, Utc};

use super::GeneralFeedbackService;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::general_feedback::entities::FeedbackCategory;
use crate::models::general_feedback::responses::{CategoryStats, MonthlyCount};
use crate::models::{ApiResponse, ErrorCode};

/// 最近 6 个月的 (标签, 起, 止) 区间，按月份升序，止端开区间
pub(crate) fn month_ranges(now: DateTime<Utc>) -> Vec<(String, DateTime<Utc>, DateTime<Utc>)> {
    let mut starts = Vec::with_capacity(7);
    let mut year = now.year();
    let mut month = now.month();

    // 从当月起往前数 6 个月，再补一个下月初作为最后一个区间的终点
    for _ in 0..6 {
        starts.push((year, month));
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    starts.reverse();

    let (mut next_year, mut next_month) = (now.year(), now.month());
    if next_month == 12 {
        next_year += 1;
        next_month = 1;
    } else {
        next_month += 1;
    }

    let to_utc = |y: i32, m: u32| {
        Utc.with_ymd_and_hms(y, m, 1, 0, 0, 0)
            .single()
            .unwrap_or(now)
    };

    let mut ranges = Vec::with_capacity(6);
    for (i, (y, m)) in starts.iter().enumerate() {
        let start = to_utc(*y, *m);
        let end = if i + 1 < starts.len() {
            let (ny, nm) = starts[i + 1];
            to_utc(ny, nm)
        } else {
            to_utc(next_year, next_month)
        };
        ranges.push((format!("{y:04}-{m:02}"), start, end));
    }

    ranges
}

pub async fn category_stats(
    service: &GeneralFeedbackService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_current_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    let categories: Vec<FeedbackCategory> = if current_user.is_admin() {
        FeedbackCategory::all().to_vec()
    } else {
        match current_user.incharge_category.clone() {
            Some(category) => vec![category],
            None => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "当前账号未绑定反馈类别",
                )));
            }
        }
    };

    let ranges = month_ranges(Utc::now());
    let mut stats = Vec::with_capacity(categories.len());

    for category in categories {
        let total = match storage.count_general_feedback(&category, None).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!("Failed to count feedback for {}: {}", category, e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(ErrorCode::InternalServerError, "统计失败"),
                ));
            }
        };
        let resolved = match storage.count_general_feedback(&category, Some(true)).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!("Failed to count resolved feedback for {}: {}", category, e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(ErrorCode::InternalServerError, "统计失败"),
                ));
            }
        };

        let mut monthly = Vec::with_capacity(ranges.len());
        for (month, start, end) in &ranges {
            let count = match storage
                .count_general_feedback_between(&category, *start, *end)
                .await
            {
                Ok(count) => count,
                Err(e) => {
                    tracing::error!("Failed to count monthly feedback for {}: {}", category, e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(ErrorCode::InternalServerError, "统计失败"),
                    ));
                }
            };
            monthly.push(MonthlyCount {
                month: month.clone(),
                count,
            });
        }

        stats.push(CategoryStats {
            category,
            total,
            resolved,
            unresolved: total - resolved,
            monthly,
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "查询成功")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_ascending_months() {
        let now = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let ranges = month_ranges(now);
        assert_eq!(ranges.len(), 6);
        let labels: Vec<&str> = ranges.iter().map(|(m, _, _)| m.as_str()).collect();
        assert_eq!(
            labels,
            ["2026-03", "2026-04", "2026-05", "2026-06", "2026-07", "2026-08"]
        );
        // 区间首尾相接
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].2, pair[1].1);
        }
    }

    #[test]
    fn test_year_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let ranges = month_ranges(now);
        let labels: Vec<&str> = ranges.iter().map(|(m, _, _)| m.as_str()).collect();
        assert_eq!(
            labels,
            ["2025-09", "2025-10", "2025-11", "2025-12", "2026-01", "2026-02"]
        );
    }

    #[test]
    fn test_december_end_is_next_january() {
        let now = Utc.with_ymd_and_hms(2025, 12, 15, 0, 0, 0).unwrap();
        let ranges = month_ranges(now);
        let (_, _, end) = &ranges[5];
        assert_eq!(*end, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }
}
