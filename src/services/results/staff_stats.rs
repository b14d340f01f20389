//! 单个教师的反馈汇总
//!
//! 每道题的平均分按收到的评分计算，没有评分的题目平均分记 0.0；
//! 提交率按全体学生计算，没有学生时记 0.0。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::{ResultService, round2};
use crate::models::questions::entities::Question;
use crate::models::results::responses::{NonResponder, QuestionAverage, StaffResultsResponse};
use crate::models::{ApiResponse, ErrorCode};

/// 按题目聚合评分，纯函数方便单测
pub(crate) fn question_averages(
    questions: &[Question],
    ratings: &[(i64, i32)],
) -> Vec<QuestionAverage> {
    let mut sums: HashMap<i64, (i64, i64)> = HashMap::new();
    for (question_id, rating) in ratings {
        let entry = sums.entry(*question_id).or_insert((0, 0));
        entry.0 += *rating as i64;
        entry.1 += 1;
    }

    questions
        .iter()
        .map(|q| {
            let (sum, count) = sums.get(&q.id).copied().unwrap_or((0, 0));
            let average = if count == 0 {
                0.0
            } else {
                round2(sum as f64 / count as f64)
            };
            QuestionAverage {
                question_id: q.id,
                text: q.text.clone(),
                average,
                rating_count: count,
            }
        })
        .collect()
}

/// 提交率百分比
pub(crate) fn response_percentage(responded: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(responded as f64 * 100.0 / total as f64)
    }
}

pub async fn staff_stats(
    service: &ResultService,
    event_id: i64,
    staff_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let staff = match storage.get_staff_by_id(staff_id).await {
        Ok(Some(staff)) => staff,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StaffNotFound,
                "教师不存在",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to load staff {}: {}", staff_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询汇总失败",
                )),
            );
        }
    };

    let course = match storage.get_course_by_id(staff.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "课程不存在",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to load course {}: {}", staff.course_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询汇总失败",
                )),
            );
        }
    };

    if let Err(response) = ensure_event_exists(&storage, event_id).await {
        return Ok(response);
    }

    let questions = match storage.list_questions().await {
        Ok(questions) => questions,
        Err(e) => {
            tracing::error!("Failed to list questions: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询汇总失败",
                )),
            );
        }
    };

    let ratings = match storage.ratings_by_staff_event(staff_id, event_id).await {
        Ok(ratings) => ratings,
        Err(e) => {
            tracing::error!("Failed to load ratings: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询汇总失败",
                )),
            );
        }
    };

    let responded_count = match storage
        .count_distinct_responders(event_id, Some(staff_id))
        .await
    {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to count responders: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询汇总失败",
                )),
            );
        }
    };

    let total_students = match storage.count_students().await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to count students: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询汇总失败",
                )),
            );
        }
    };

    let non_responders = match storage.list_non_responders(event_id, staff_id).await {
        Ok(students) => students
            .into_iter()
            .map(|s| NonResponder {
                roll_number: s.roll_number,
                name: s.name,
            })
            .collect(),
        Err(e) => {
            tracing::error!("Failed to list non-responders: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询汇总失败",
                )),
            );
        }
    };

    let response = StaffResultsResponse {
        staff,
        course,
        event_id,
        question_averages: question_averages(&questions, &ratings),
        responded_count,
        total_students,
        response_percentage: response_percentage(responded_count, total_students),
        non_responders,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}

async fn ensure_event_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    event_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_event_by_id(event_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EventNotFound,
            "活动不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to load event {}: {}", event_id, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询汇总失败",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(ids: &[i64]) -> Vec<Question> {
        ids.iter()
            .map(|id| Question {
                id: *id,
                text: format!("Question {id}"),
            })
            .collect()
    }

    #[test]
    fn test_average_rounded_to_two_decimals() {
        let qs = questions(&[1]);
        // 4 + 3 + 4 = 11, 11 / 3 = 3.666...
        let ratings = vec![(1, 4), (1, 3), (1, 4)];
        let averages = question_averages(&qs, &ratings);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].average, 3.67);
        assert_eq!(averages[0].rating_count, 3);
    }

    #[test]
    fn test_question_without_ratings_reports_zero() {
        let qs = questions(&[1, 2]);
        let ratings = vec![(1, 4)];
        let averages = question_averages(&qs, &ratings);
        assert_eq!(averages[1].question_id, 2);
        assert_eq!(averages[1].average, 0.0);
        assert_eq!(averages[1].rating_count, 0);
    }

    #[test]
    fn test_empty_data_aggregates_to_zero() {
        let qs = questions(&[1]);
        let averages = question_averages(&qs, &[]);
        assert_eq!(averages[0].average, 0.0);
        assert_eq!(averages[0].rating_count, 0);
        assert_eq!(response_percentage(0, 0), 0.0);
    }

    #[test]
    fn test_response_percentage() {
        assert_eq!(response_percentage(4, 10), 40.0);
        assert_eq!(response_percentage(1, 3), 33.33);
        assert_eq!(response_percentage(10, 10), 100.0);
    }
}
