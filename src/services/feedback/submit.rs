//! 课程反馈提交
//!
//! 提交前重新做一遍资格检查，然后逐课程校验载荷：课程必须属于当前活动、
//! 教师必须属于对应课程、题目必须存在、评分必须落在允许区间。
//! 未选择教师的课程默认被跳过，strict_ratings 开启时则拒绝整次提交。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};

use super::FeedbackService;
use super::eligibility::eligibility_reason;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::feedback::requests::{
    FeedbackBatchEntry, SubmitFeedbackRequest, rating_in_range,
};
use crate::models::feedback::responses::SubmitFeedbackResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 载荷校验失败的原因
#[derive(Debug, PartialEq)]
pub(crate) enum SubmitError {
    CourseNotInEvent(i64),
    StaffNotInCourse { course_id: i64, staff_id: i64 },
    UnknownQuestion(i64),
    RatingOutOfRange { question_id: i64, rating: i32 },
    MissingStaff(i64),
    NothingToSubmit,
}

impl SubmitError {
    pub(crate) fn error_code(&self) -> ErrorCode {
        match self {
            Self::CourseNotInEvent(_) => ErrorCode::CourseNotFound,
            Self::StaffNotInCourse { .. } => ErrorCode::StaffNotFound,
            Self::UnknownQuestion(_) => ErrorCode::QuestionNotFound,
            Self::RatingOutOfRange { .. } => ErrorCode::RatingInvalid,
            Self::MissingStaff(_) => ErrorCode::BadRequest,
            Self::NothingToSubmit => ErrorCode::BadRequest,
        }
    }

    pub(crate) fn message(&self) -> String {
        match self {
            Self::CourseNotInEvent(id) => format!("课程 {id} 不在本次活动范围内"),
            Self::StaffNotInCourse {
                course_id,
                staff_id,
            } => format!("教师 {staff_id} 不属于课程 {course_id}"),
            Self::UnknownQuestion(id) => format!("题目 {id} 不存在"),
            Self::RatingOutOfRange {
                question_id,
                rating,
            } => format!("题目 {question_id} 的评分 {rating} 超出允许范围"),
            Self::MissingStaff(id) => format!("课程 {id} 未选择教师"),
            Self::NothingToSubmit => "没有可写入的课程反馈".to_string(),
        }
    }
}

/// 校验载荷并生成写入批次，纯函数方便单测。
///
/// 返回 (批次, 被跳过的课程数)。
pub(crate) fn build_batch(
    submission: &SubmitFeedbackRequest,
    event_course_ids: &HashSet<i64>,
    staff_by_course: &HashMap<i64, HashSet<i64>>,
    question_ids: &HashSet<i64>,
    strict_ratings: bool,
) -> Result<(Vec<FeedbackBatchEntry>, i64), SubmitError> {
    let mut batch = Vec::new();
    let mut skipped = 0i64;

    for (course_id, course_ratings) in &submission.courses {
        if !event_course_ids.contains(course_id) {
            return Err(SubmitError::CourseNotInEvent(*course_id));
        }

        let Some(staff_id) = course_ratings.staff_id else {
            if strict_ratings {
                return Err(SubmitError::MissingStaff(*course_id));
            }
            skipped += 1;
            continue;
        };

        let staff_ok = staff_by_course
            .get(course_id)
            .map(|ids| ids.contains(&staff_id))
            .unwrap_or(false);
        if !staff_ok {
            return Err(SubmitError::StaffNotInCourse {
                course_id: *course_id,
                staff_id,
            });
        }

        let mut ratings = Vec::with_capacity(course_ratings.ratings.len());
        for (question_id, rating) in &course_ratings.ratings {
            if !question_ids.contains(question_id) {
                return Err(SubmitError::UnknownQuestion(*question_id));
            }
            if !rating_in_range(*rating) {
                return Err(SubmitError::RatingOutOfRange {
                    question_id: *question_id,
                    rating: *rating,
                });
            }
            ratings.push((*question_id, *rating));
        }

        batch.push(FeedbackBatchEntry {
            course_id: *course_id,
            staff_id,
            ratings,
        });
    }

    if batch.is_empty() {
        return Err(SubmitError::NothingToSubmit);
    }

    Ok((batch, skipped))
}

pub async fn submit_feedback(
    service: &FeedbackService,
    submission: SubmitFeedbackRequest,
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
                    "提交失败",
                )),
            );
        }
    };

    // 提交时重做资格检查，前端拿到的表单可能已经过期
    let event = match storage.get_active_event().await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::NoActiveEvent,
                "当前没有进行中的反馈活动",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to load active event: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "提交失败",
                )),
            );
        }
    };

    let already_submitted = match storage.has_submitted(student.id, event.id).await {
        Ok(submitted) => submitted,
        Err(e) => {
            tracing::error!("Failed to check submission: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "提交失败",
                )),
            );
        }
    };

    if let Some(reason) =
        eligibility_reason(Some(&event), &student.roll_number, already_submitted)
    {
        use crate::models::feedback::responses::EligibilityReason;
        let (code, message) = match reason {
            EligibilityReason::AlreadySubmitted => {
                (ErrorCode::AlreadySubmitted, "本次活动已提交过反馈")
            }
            _ => (ErrorCode::NotEligible, "不符合本次活动的提交条件"),
        };
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(code, message)));
    }

    // 取出校验所需的全部上下文
    let event_course_ids: HashSet<i64> = match storage.list_event_courses(event.id).await {
        Ok(courses) => courses.into_iter().map(|c| c.id).collect(),
        Err(e) => {
            tracing::error!("Failed to list event courses: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "提交失败",
                )),
            );
        }
    };

    let staff_by_course: HashMap<i64, HashSet<i64>> = match storage.list_courses_with_staff().await
    {
        Ok(all) => all
            .into_iter()
            .map(|c| (c.course.id, c.staff.into_iter().map(|s| s.id).collect()))
            .collect(),
        Err(e) => {
            tracing::error!("Failed to list courses: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "提交失败",
                )),
            );
        }
    };

    let question_ids: HashSet<i64> = match storage.list_questions().await {
        Ok(questions) => questions.into_iter().map(|q| q.id).collect(),
        Err(e) => {
            tracing::error!("Failed to list questions: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "提交失败",
                )),
            );
        }
    };

    let (batch, skipped_courses) = match build_batch(
        &submission,
        &event_course_ids,
        &staff_by_course,
        &question_ids,
        config.feedback.strict_ratings,
    ) {
        Ok(result) => result,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    match storage.insert_feedback_batch(student.id, event.id, batch).await {
        Ok((submitted_courses, submitted_ratings)) => {
            tracing::info!(
                "Student {} submitted feedback for event {}: {} courses, {} ratings",
                student.roll_number,
                event.id,
                submitted_courses,
                submitted_ratings
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmitFeedbackResponse {
                    submitted_courses,
                    submitted_ratings,
                    skipped_courses,
                },
                "反馈提交成功",
            )))
        }
        Err(e) if matches!(e, crate::errors::CFSystemError::Conflict(_)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AlreadySubmitted,
                "本次活动已提交过反馈",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to insert feedback batch: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "提交失败",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback::requests::CourseRatings;
    use std::collections::BTreeMap;

    fn context() -> (HashSet<i64>, HashMap<i64, HashSet<i64>>, HashSet<i64>) {
        let event_courses: HashSet<i64> = [10, 11].into_iter().collect();
        let mut staff_by_course = HashMap::new();
        staff_by_course.insert(10, [100, 101].into_iter().collect::<HashSet<i64>>());
        staff_by_course.insert(11, [102].into_iter().collect::<HashSet<i64>>());
        let questions: HashSet<i64> = [1, 2, 3].into_iter().collect();
        (event_courses, staff_by_course, questions)
    }

    fn submission(entries: Vec<(i64, Option<i64>, Vec<(i64, i32)>)>) -> SubmitFeedbackRequest {
        let mut courses = BTreeMap::new();
        for (course_id, staff_id, ratings) in entries {
            courses.insert(
                course_id,
                CourseRatings {
                    staff_id,
                    ratings: ratings.into_iter().collect(),
                },
            );
        }
        SubmitFeedbackRequest { courses }
    }

    #[test]
    fn test_valid_submission() {
        let (events, staff, questions) = context();
        let req = submission(vec![
            (10, Some(100), vec![(1, 4), (2, 3)]),
            (11, Some(102), vec![(1, 1)]),
        ]);
        let (batch, skipped) = build_batch(&req, &events, &staff, &questions, false).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(skipped, 0);
        assert_eq!(batch[0].course_id, 10);
        assert_eq!(batch[0].ratings.len(), 2);
    }

    #[test]
    fn test_course_outside_event_rejected() {
        let (events, staff, questions) = context();
        let req = submission(vec![(99, Some(100), vec![(1, 4)])]);
        assert_eq!(
            build_batch(&req, &events, &staff, &questions, false),
            Err(SubmitError::CourseNotInEvent(99))
        );
    }

    #[test]
    fn test_staff_must_belong_to_course() {
        let (events, staff, questions) = context();
        let req = submission(vec![(11, Some(100), vec![(1, 4)])]);
        assert_eq!(
            build_batch(&req, &events, &staff, &questions, false),
            Err(SubmitError::StaffNotInCourse {
                course_id: 11,
                staff_id: 100
            })
        );
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let (events, staff, questions) = context();
        for bad in [0, 5, -1] {
            let req = submission(vec![(10, Some(100), vec![(1, bad)])]);
            assert_eq!(
                build_batch(&req, &events, &staff, &questions, false),
                Err(SubmitError::RatingOutOfRange {
                    question_id: 1,
                    rating: bad
                })
            );
        }
    }

    #[test]
    fn test_unknown_question_rejected() {
        let (events, staff, questions) = context();
        let req = submission(vec![(10, Some(100), vec![(42, 3)])]);
        assert_eq!(
            build_batch(&req, &events, &staff, &questions, false),
            Err(SubmitError::UnknownQuestion(42))
        );
    }

    #[test]
    fn test_missing_staff_skipped_by_default() {
        let (events, staff, questions) = context();
        let req = submission(vec![
            (10, None, vec![(1, 4)]),
            (11, Some(102), vec![(2, 2)]),
        ]);
        let (batch, skipped) = build_batch(&req, &events, &staff, &questions, false).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(skipped, 1);
        assert_eq!(batch[0].course_id, 11);
    }

    #[test]
    fn test_missing_staff_rejected_in_strict_mode() {
        let (events, staff, questions) = context();
        let req = submission(vec![(10, None, vec![(1, 4)])]);
        assert_eq!(
            build_batch(&req, &events, &staff, &questions, true),
            Err(SubmitError::MissingStaff(10))
        );
    }

    #[test]
    fn test_all_skipped_is_an_error() {
        let (events, staff, questions) = context();
        let req = submission(vec![(10, None, vec![(1, 4)])]);
        assert_eq!(
            build_batch(&req, &events, &staff, &questions, false),
            Err(SubmitError::NothingToSubmit)
        );
    }
}
