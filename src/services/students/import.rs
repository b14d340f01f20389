//! 学生名单批量导入服务
//!
//! 支持 xlsx 与 csv，按学号幂等写入：已存在的学号更新姓名与邮箱，
//! 不覆盖已有密码；新学号使用配置的初始密码。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use calamine::{Reader, Xlsx};
use futures_util::StreamExt;
use std::io::Cursor;
use tracing::error;

use super::StudentService;
use crate::models::students::responses::StudentImportResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_roll_number};
use crate::utils::validate_magic_bytes;

/// 响应中最多展示的错误条数
const MAX_REPORTED_ERRORS: usize = 5;

/// 单次导入的最大行数
const MAX_IMPORT_ROWS: usize = 2000;

/// 导入解析错误
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

/// 导入行数据
#[derive(Debug, Clone)]
struct ImportRow {
    row_num: usize,
    roll_number: String,
    name: String,
    email: Option<String>,
}

/// 导入学生名单
pub async fn import_students(
    service: &StudentService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 读取文件内容
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

    // 扩展名与文件头必须一致，避免把二进制当文本解析
    if !validate_magic_bytes(&file_bytes, &extension) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileParseFailed,
            "文件内容与扩展名不匹配",
        )));
    }

    // 根据文件扩展名解析
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

    // 初始密码只哈希一次，逐行哈希太慢
    let default_password = config.students.default_password.clone();
    let default_hash =
        match tokio::task::spawn_blocking(move || hash_password(&default_password)).await {
            Ok(Ok(hash)) => hash,
            Ok(Err(e)) => {
                error!("Failed to hash default password: {}", e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(ErrorCode::InternalServerError, "导入失败"),
                ));
            }
            Err(e) => {
                error!("Password hashing task failed: {}", e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(ErrorCode::InternalServerError, "导入失败"),
                ));
            }
        };

    let mut created = 0i64;
    let mut updated = 0i64;
    let mut failed = 0i64;
    let mut errors: Vec<String> = Vec::new();

    for row in &rows {
        if let Err(msg) = validate_row(row) {
            failed += 1;
            errors.push(format!("第 {} 行: {msg}", row.row_num));
            continue;
        }

        match storage
            .upsert_student_by_roll(
                &row.roll_number,
                &row.name,
                row.email.as_deref(),
                &default_hash,
            )
            .await
        {
            Ok(true) => created += 1,
            Ok(false) => updated += 1,
            Err(e) => {
                failed += 1;
                error!("Failed to import student {}: {}", row.roll_number, e);
                errors.push(format!("第 {} 行: 写入失败", row.row_num));
            }
        }
    }

    let omitted_errors = errors.len().saturating_sub(MAX_REPORTED_ERRORS) as i64;
    errors.truncate(MAX_REPORTED_ERRORS);

    tracing::info!(
        "Student import finished: {} created, {} updated, {} failed",
        created,
        updated,
        failed
    );

    let response = StudentImportResponse {
        created,
        updated,
        failed,
        errors,
        omitted_errors,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "导入完成")))
}

fn validate_row(row: &ImportRow) -> Result<(), String> {
    validate_roll_number(&row.roll_number)?;
    if row.name.is_empty() {
        return Err("姓名不能为空".to_string());
    }
    if let Some(ref email) = row.email {
        validate_email(email).map_err(String::from)?;
    }
    Ok(())
}

async fn read_file_from_multipart(payload: &mut Multipart) -> Result<(Vec<u8>, String), String> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("读取字段失败: {e}"))?;

        if field.name().map(|n| n == "file").unwrap_or(false) {
            // 获取文件名
            if let Some(content_disposition) = field.content_disposition() {
                file_name = content_disposition
                    .get_filename()
                    .unwrap_or("upload.csv")
                    .to_string();
            }

            // 读取内容
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

    // 检查表头
    let headers = rdr
        .headers()
        .map_err(|e| ImportParseError::ParseFailed(format!("读取表头失败: {e}")))?;
    let header_map: std::collections::HashMap<_, _> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    // 必需列
    let roll_idx = *header_map
        .get("roll_number")
        .ok_or_else(|| ImportParseError::MissingColumn("roll_number".to_string()))?;
    let name_idx = *header_map
        .get("name")
        .ok_or_else(|| ImportParseError::MissingColumn("name".to_string()))?;
    let email_idx = header_map.get("email").copied();

    let mut rows = Vec::new();

    for (row_num, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            ImportParseError::ParseFailed(format!("第 {} 行解析失败: {e}", row_num + 2))
        })?;

        let roll_number = record.get(roll_idx).unwrap_or("").trim().to_string();
        let name = record.get(name_idx).unwrap_or("").trim().to_string();
        let email = email_idx
            .and_then(|i| record.get(i))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        rows.push(ImportRow {
            row_num: row_num + 2, // 1-based, skip header
            roll_number,
            name,
            email,
        });
    }

    Ok(rows)
}

fn parse_xlsx(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let cursor = Cursor::new(data);
    let mut workbook: Xlsx<_> = Xlsx::new(cursor)
        .map_err(|e| ImportParseError::ParseFailed(format!("打开 XLSX 失败: {e}")))?;

    // 获取第一个工作表
    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| ImportParseError::ParseFailed("工作簿中没有工作表".to_string()))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ImportParseError::ParseFailed(format!("读取工作表失败: {e}")))?;

    let mut rows_iter = range.rows();

    // 读取表头
    let header_row = rows_iter.next().ok_or(ImportParseError::EmptyFile)?;
    let header_map: std::collections::HashMap<_, _> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| (cell.to_string().trim().to_lowercase(), i))
        .collect();

    // 必需列
    let roll_idx = *header_map
        .get("roll_number")
        .ok_or_else(|| ImportParseError::MissingColumn("roll_number".to_string()))?;
    let name_idx = *header_map
        .get("name")
        .ok_or_else(|| ImportParseError::MissingColumn("name".to_string()))?;
    let email_idx = header_map.get("email").copied();

    let mut rows = Vec::new();

    for (row_num, row) in rows_iter.enumerate() {
        let get_cell = |idx: usize| -> String {
            row.get(idx)
                .map(|c| c.to_string().trim().to_string())
                .unwrap_or_default()
        };

        let roll_number = get_cell(roll_idx);
        let name = get_cell(name_idx);
        let email = email_idx.map(get_cell).filter(|s| !s.is_empty());

        // 跳过完全空白的行，xlsx 尾部经常带空行
        if roll_number.is_empty() && name.is_empty() {
            continue;
        }

        rows.push(ImportRow {
            row_num: row_num + 2, // 1-based, skip header
            roll_number,
            name,
            email,
        });
    }

    Ok(rows)
}
