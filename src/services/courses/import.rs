//! 课程与教师批量导入服务
//!
//! 每行一个（课程, 教师）组合，课程按代码去重，教师按课程内姓名去重，
//! 重复导入同一份表格不会产生重复数据。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use calamine::{Reader, Xlsx};
use futures_util::StreamExt;
use std::io::Cursor;
use tracing::error;

use super::CourseService;
use crate::models::courses::responses::CourseImportResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate_magic_bytes;

const MAX_REPORTED_ERRORS: usize = 5;
const MAX_IMPORT_ROWS: usize = 2000;

enum ImportParseError {
    MissingColumn(String),
    ParseFailed(String),
    EmptyFile,
}

impl ImportParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            Self::ParseFailed(_) => ErrorCode::ImportFileParseFailed,
            Self::EmptyFile => ErrorCode::ImportFileDataInvalid,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MissingColumn(col) => format!("缺少必需列: {col}"),
            Self::ParseFailed(msg) => msg.clone(),
            Self::EmptyFile => "文件中没有数据".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct ImportRow {
    row_num: usize,
    course_code: String,
    course_name: String,
    staff_name: Option<String>,
}

pub async fn import_courses(
    service: &CourseService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (file_bytes, file_name) = match read_file_from_multipart(&mut payload).await {
        Ok(result) => result,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ImportFileParseFailed,
                format!("文件读取失败: {e}"),
            )));
        }
    };

    let extension = file_name.rsplit('.').next().unwrap_or("").to_lowercase();

    if !validate_magic_bytes(&file_bytes, &extension) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileParseFailed,
            "文件内容与扩展名不匹配",
        )));
    }

    let rows = if extension == "xlsx" {
        match parse_xlsx(&file_bytes) {
            Ok(rows) => rows,
            Err(e) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(e.error_code(), e.message())));
            }
        }
    } else {
        match parse_csv(&file_bytes) {
            Ok(rows) => rows,
            Err(e) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(e.error_code(), e.message())));
            }
        }
    };

    if rows.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            "文件中没有数据行",
        )));
    }

    if rows.len() > MAX_IMPORT_ROWS {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            format!("单次导入最多支持 {MAX_IMPORT_ROWS} 行"),
        )));
    }

    let mut courses_created = 0i64;
    let mut staff_created = 0i64;
    let mut skipped = 0i64;
    let mut errors: Vec<String> = Vec::new();

    for row in &rows {
        if row.course_code.is_empty() || row.course_name.is_empty() {
            errors.push(format!("第 {} 行: 课程代码和名称不能为空", row.row_num));
            continue;
        }

        let course = match storage
            .find_or_create_course(&row.course_code, &row.course_name)
            .await
        {
            Ok((course, true)) => {
                courses_created += 1;
                course
            }
            Ok((course, false)) => course,
            Err(e) => {
                error!("Failed to import course {}: {}", row.course_code, e);
                errors.push(format!("第 {} 行: 课程写入失败", row.row_num));
                continue;
            }
        };

        let Some(ref staff_name) = row.staff_name else {
            continue;
        };

        match storage.find_or_create_staff(course.id, staff_name).await {
            Ok((_, true)) => staff_created += 1,
            Ok((_, false)) => skipped += 1,
            Err(e) => {
                error!("Failed to import staff {}: {}", staff_name, e);
                errors.push(format!("第 {} 行: 教师写入失败", row.row_num));
            }
        }
    }

    let omitted_errors = errors.len().saturating_sub(MAX_REPORTED_ERRORS) as i64;
    errors.truncate(MAX_REPORTED_ERRORS);

    tracing::info!(
        "Course import finished: {} courses, {} staff created, {} skipped",
        courses_created,
        staff_created,
        skipped
    );

    let response = CourseImportResponse {
        courses_created,
        staff_created,
        skipped,
        errors,
        omitted_errors,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "导入完成")))
}

async fn read_file_from_multipart(payload: &mut Multipart) -> Result<(Vec<u8>, String), String> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("读取字段失败: {e}"))?;

        if field.name().map(|n| n == "file").unwrap_or(false) {
            if let Some(content_disposition) = field.content_disposition() {
                file_name = content_disposition
                    .get_filename()
                    .unwrap_or("upload.csv")
                    .to_string();
            }

            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| format!("读取数据失败: {e}"))?;
                file_bytes.extend_from_slice(&data);
            }
        }
    }

    if file_bytes.is_empty() {
        return Err("未找到文件字段".to_string());
    }

    Ok((file_bytes, file_name))
}

fn parse_csv(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let headers = rdr
        .headers()
        .map_err(|e| ImportParseError::ParseFailed(format!("读取表头失败: {e}")))?;
    let header_map: std::collections::HashMap<_, _> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    let code_idx = *header_map
        .get("course_code")
        .ok_or_else(|| ImportParseError::MissingColumn("course_code".to_string()))?;
    let name_idx = *header_map
        .get("course_name")
        .ok_or_else(|| ImportParseError::MissingColumn("course_name".to_string()))?;
    let staff_idx = header_map.get("staff_name").copied();

    let mut rows = Vec::new();

    for (row_num, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            ImportParseError::ParseFailed(format!("第 {} 行解析失败: {e}", row_num + 2))
        })?;

        let course_code = record.get(code_idx).unwrap_or("").trim().to_string();
        let course_name = record.get(name_idx).unwrap_or("").trim().to_string();
        let staff_name = staff_idx
            .and_then(|i| record.get(i))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        rows.push(ImportRow {
            row_num: row_num + 2,
            course_code,
            course_name,
            staff_name,
        });
    }

    Ok(rows)
}

fn parse_xlsx(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let cursor = Cursor::new(data);
    let mut workbook: Xlsx<_> = Xlsx::new(cursor)
        .map_err(|e| ImportParseError::ParseFailed(format!("打开 XLSX 失败: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| ImportParseError::ParseFailed("工作簿中没有工作表".to_string()))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ImportParseError::ParseFailed(format!("读取工作表失败: {e}")))?;

    let mut rows_iter = range.rows();

    let header_row = rows_iter.next().ok_or(ImportParseError::EmptyFile)?;
    let header_map: std::collections::HashMap<_, _> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| (cell.to_string().trim().to_lowercase(), i))
        .collect();

    let code_idx = *header_map
        .get("course_code")
        .ok_or_else(|| ImportParseError::MissingColumn("course_code".to_string()))?;
    let name_idx = *header_map
        .get("course_name")
        .ok_or_else(|| ImportParseError::MissingColumn("course_name".to_string()))?;
    let staff_idx = header_map.get("staff_name").copied();

    let mut rows = Vec::new();

    for (row_num, row) in rows_iter.enumerate() {
        let get_cell = |idx: usize| -> String {
            row.get(idx)
                .map(|c| c.to_string().trim().to_string())
                .unwrap_or_default()
        };

        let course_code = get_cell(code_idx);
        let course_name = get_cell(name_idx);
        let staff_name = staff_idx.map(get_cell).filter(|s| !s.is_empty());

        if course_code.is_empty() && course_name.is_empty() && staff_name.is_none() {
            continue;
        }

        rows.push(ImportRow {
            row_num: row_num + 2,
            course_code,
            course_name,
            staff_name,
        });
    }

    Ok(rows)
}
