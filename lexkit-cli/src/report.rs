//! CLI 格式化输出
//!
//! 扫描错误只带字符下标，这里换算成行列并打印源码上下文。

use lexkit_core::ScanError;

/// 错误行前后显示的上下文行数
const CONTEXT_LINES: usize = 2;

/// 字符下标换算为 1 起始的（行，列）
pub fn line_column(source: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for ch in source.chars().take(position) {
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// 打印错误并显示源代码上下文
pub fn print_scan_error(err: &ScanError, source: &str) {
    eprintln!("error: {}", err);
    let (line, column) = line_column(source, err.position());
    eprint!("{}", source_context(source, line, column));
}

/// 错误行及其上下文，错误列下方画 `^`
pub fn source_context(source: &str, error_line: usize, error_col: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    if error_line == 0 || error_line > lines.len() {
        return String::new();
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(lines.len());
    let width = end_line.to_string().len();

    let mut out = String::new();
    for (index, content) in lines.iter().enumerate().take(end_line).skip(start_line - 1) {
        let number = index + 1;
        out.push_str(&format!("{:>width$} | {}\n", number, content));
        if number == error_line {
            out.push_str(&format!(
                "{:width$} | {}^\n",
                "",
                " ".repeat(error_col.saturating_sub(1))
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_column() {
        let source = "ab\ncd\nef";
        assert_eq!(line_column(source, 0), (1, 1));
        assert_eq!(line_column(source, 4), (2, 2));
        assert_eq!(line_column(source, 6), (3, 1));
    }

    #[test]
    fn test_source_context_marks_column() {
        let source = "one\n[two\nthree";
        assert_eq!(
            source_context(source, 2, 3),
            "1 | one\n2 | [two\n  |   ^\n3 | three\n"
        );
    }

    #[test]
    fn test_out_of_range_line_prints_nothing() {
        assert_eq!(source_context("x", 5, 1), "");
    }
}
