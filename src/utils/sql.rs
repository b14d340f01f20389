/// 转义 LIKE 模式中的通配符
///
/// 用户输入作为模糊搜索关键字时，先转义 `%`、`_` 和转义符本身，
/// 再拼接通配符，避免用户输入改变匹配语义。
pub fn escape_like_pattern(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_wildcards() {
        assert_eq!(escape_like_pattern("50%_a"), "50\\%\\_a");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}
