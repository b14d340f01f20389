//! 学生提交资格检查
//!
//! 依次检查：有无激活活动、学号是否在活动范围内、是否已提交过。
//! 三项都通过时返回问卷表单所需的课程（含教师）与题目列表。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::FeedbackService;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::events::entities::FeedbackEvent;
use crate::models::feedback::responses::{EligibilityReason, EligibilityResponse};
use crate::models::{ApiResponse, ErrorCode};

/// 资格判定，纯函数方便单测
pub(crate) fn eligibility_reason(
    event: Option<&FeedbackEvent>,
    roll_number: &str,
    already_submitted: bool,
) -> Option<EligibilityReason> {
    let Some(event) = event else {
        return Some(EligibilityReason::NoActiveEvent);
    };
    if !event.roll_in_range(roll_number) {
        return Some(EligibilityReason::OutOfRange);
    }
    if already_submitted {
        return Some(EligibilityReason::AlreadySubmitted);
    }
    None
}

/// 不在范围内时展示的提示语，活动没配置就用全局默认值
pub(crate) fn warning_for(event: &FeedbackEvent, default_message: &str) -> String {
    event
        .warning_message
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| default_message.to_string())
}

pub async fn check_eligibility(
    service: &FeedbackService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let Some(current_user) = RequireJWT::extract_current_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        )));
    };

    // 学号存放在学生表里，令牌里只有 ID
    let student = match storage.get_student_by_id(current_user.id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "学生不存在",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to load student {}: {}", current_user.id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "资格检查失败",
                )),
            );
        }
    };

    let event = match storage.get_active_event().await {
        Ok(event) => event,
        Err(e) => {
            tracing::error!("Failed to load active event: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "资格检查失败",
                )),
            );
        }
    };

    let already_submitted = match &event {
        Some(event) => match storage.has_submitted(student.id, event.id).await {
            Ok(submitted) => submitted,
            Err(e) => {
                tracing::error!("Failed to check submission: {}", e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(ErrorCode::InternalServerError, "资格检查失败"),
                ));
            }
        },
        None => false,
    };

    if let Some(reason) =
        eligibility_reason(event.as_ref(), &student.roll_number, already_submitted)
    {
        let warning_message = match (reason, &event) {
            (EligibilityReason::OutOfRange, Some(event)) => {
                Some(warning_for(event, &config.feedback.default_warning_message))
            }
            _ => None,
        };
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            EligibilityResponse {
                eligible: false,
                reason: Some(reason),
                warning_message,
                event: None,
                courses: Vec::new(),
                questions: Vec::new(),
            },
            "资格检查完成",
        )));
    }

    // 判定通过意味着活动一定存在
    let Some(event) = event else {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "资格检查失败",
            )),
        );
    };

    // 活动覆盖的课程，附带可选的教师列表
    let event_course_ids: HashSet<i64> = match storage.list_event_courses(event.id).await {
        Ok(courses) => courses.into_iter().map(|c| c.id).collect(),
        Err(e) => {
            tracing::error!("Failed to list event courses: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "资格检查失败",
                )),
            );
        }
    };

    let courses = match storage.list_courses_with_staff().await {
        Ok(all) => all
            .into_iter()
            .filter(|c| event_course_ids.contains(&c.course.id))
            .collect(),
        Err(e) => {
            tracing::error!("Failed to list courses: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "资格检查失败",
                )),
            );
        }
    };

    let questions = match storage.list_questions().await {
        Ok(questions) => questions,
        Err(e) => {
            tracing::error!("Failed to list questions: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "资格检查失败",
                )),
            );
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        EligibilityResponse {
            eligible: true,
            reason: None,
            warning_message: None,
            event: Some(event),
            courses,
            questions,
        },
        "资格检查完成",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(open: bool, start: Option<&str>, end: Option<&str>) -> FeedbackEvent {
        FeedbackEvent {
            id: 7,
            title: "End semester feedback".to_string(),
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
    fn test_no_active_event() {
        assert_eq!(
            eligibility_reason(None, "71812300001", false),
            Some(EligibilityReason::NoActiveEvent)
        );
    }

    #[test]
    fn test_out_of_range_checked_before_submission() {
        let e = event(false, Some("71812300020"), Some("71812300050"));
        // 已提交但不在范围内，范围先判
        assert_eq!(
            eligibility_reason(Some(&e), "71812300060", true),
            Some(EligibilityReason::OutOfRange)
        );
    }

    #[test]
    fn test_range_scenario() {
        let e = event(false, Some("71812300020"), Some("71812300050"));
        assert_eq!(eligibility_reason(Some(&e), "71812300030", false), None);
        assert_eq!(
            eligibility_reason(Some(&e), "71812300060", false),
            Some(EligibilityReason::OutOfRange)
        );
    }

    #[test]
    fn test_already_submitted() {
        let e = event(true, None, None);
        assert_eq!(
            eligibility_reason(Some(&e), "71812300001", true),
            Some(EligibilityReason::AlreadySubmitted)
        );
    }

    #[test]
    fn test_warning_falls_back_to_default() {
        let mut e = event(false, Some("71812300020"), Some("71812300050"));
        assert_eq!(warning_for(&e, "默认提示"), "默认提示");

        e.warning_message = Some("  ".to_string());
        assert_eq!(warning_for(&e, "默认提示"), "默认提示");

        e.warning_message = Some("本次反馈仅限三年级".to_string());
        assert_eq!(warning_for(&e, "默认提示"), "本次反馈仅限三年级");
    }
}
