/// 验证导入文件内容的魔术字节是否与扩展名匹配
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `extension` - 文件扩展名（包含点号，如 ".xlsx"）
///
/// # Returns
/// * `true` - 魔术字节匹配或该类型不需要验证
/// * `false` - 魔术字节不匹配
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        ".xls" => {
            // MS Office 旧格式 (OLE Compound Document)
            data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        }
        ".xlsx" => {
            // MS Office 新格式 (ZIP-based OOXML)
            data.starts_with(&[0x50, 0x4B, 0x03, 0x04])
        }
        // 文本格式 - 不检查魔术字节
        ".csv" | ".txt" => true,
        // 未知格式 - 默认拒绝
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xlsx_magic() {
        let zip_header = [0x50, 0x4B, 0x03, 0x04];
        assert!(validate_magic_bytes(&zip_header, ".xlsx"));
        assert!(validate_magic_bytes(&zip_header, ".XLSX"));
        assert!(!validate_magic_bytes(&zip_header, ".xls"));
    }

    #[test]
    fn test_csv_skips_check() {
        assert!(validate_magic_bytes(b"roll_number,name", ".csv"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], ".xlsx"));
        assert!(!validate_magic_bytes(&[], ".csv"));
    }

    #[test]
    fn test_unknown_extension() {
        let data = [0x00, 0x01, 0x02, 0x03];
        assert!(!validate_magic_bytes(&data, ".exe"));
    }
}
