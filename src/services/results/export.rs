//! 活动反馈导出
//!
//! 生成 xlsx 工作簿：固定列（学号、姓名、课程、教师、提交时间）
//! 加上问卷题目各一列，一行对应一条课程反馈。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::collections::HashMap;

use super::ResultService;
use crate::models::questions::entities::Question;
use crate::models::results::responses::ResponseRow;
use crate::models::{ApiResponse, ErrorCode};

pub async fn export_responses(
    service: &ResultService,
    event_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let event = match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EventNotFound,
                "活动不存在",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to load event {}: {}", event_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "导出失败",
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
                    "导出失败",
                )),
            );
        }
    };

    let rows = match storage.list_responses(event_id).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to list responses: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "导出失败",
                )),
            );
        }
    };

    let buffer = match build_workbook(&questions, &rows) {
        Ok(buffer) => buffer,
        Err(e) => {
            tracing::error!("Failed to build workbook: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    "生成导出文件失败",
                )),
            );
        }
    };

    tracing::info!(
        "Exported {} feedback rows for event {}",
        rows.len(),
        event_id
    );

    let file_name = format!("feedback_event_{}.xlsx", event.id);

    Ok(HttpResponse::Ok()
        .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(buffer))
}

fn build_workbook(questions: &[Question], rows: &[ResponseRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();

    let fixed_headers = ["Roll Number", "Name", "Course", "Staff", "Submitted At"];
    for (col, header) in fixed_headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    for (i, question) in questions.iter().enumerate() {
        worksheet.write_string_with_format(
            0,
            (fixed_headers.len() + i) as u16,
            &question.text,
            &header_format,
        )?;
    }

    // 题目 ID 到列号的映射
    let question_cols: HashMap<i64, u16> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| (q.id, (fixed_headers.len() + i) as u16))
        .collect();

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, &row.student_roll_number)?;
        worksheet.write_string(r, 1, &row.student_name)?;
        worksheet.write_string(r, 2, &row.course_code)?;
        worksheet.write_string(r, 3, &row.staff_name)?;
        worksheet.write_string(r, 4, row.submitted_at.format("%Y-%m-%d %H:%M:%S").to_string())?;

        for cell in &row.ratings {
            if let Some(col) = question_cols.get(&cell.question_id) {
                worksheet.write_number(r, *col, cell.rating as f64)?;
            }
        }
    }

    workbook.save_to_buffer()
}
