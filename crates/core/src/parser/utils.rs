//! Text helpers shared by the pattern-discipline engines.

use crate::model::Position;
use std::path::Path;

/// Converts a byte offset into a 1-based line / 0-based column position by
/// counting newlines up to the offset. O(n) per call; the rule tables fire
/// rarely enough that an offset index is not worth maintaining.
pub fn line_col_at(text: &str, offset: usize) -> Position {
    let offset = offset.min(text.len());
    let prefix = &text[..offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = match prefix.rfind('\n') {
        Some(nl) => offset - nl - 1,
        None => offset,
    };
    Position::new(line, column)
}

/// Finds the line on which the block opened after `from` closes again.
///
/// Walks forward from `from`, looking for the first `{`. A `;` before any
/// opening brace means an expression-bodied or forward declaration; in that
/// case (and when no brace exists at all) the declaration's own line is
/// returned. Brace counting is raw text scanning, so braces inside strings
/// can skew the result; the approximation is acceptable per the contract
/// that `end` may equal `start`.
pub fn block_end_line(text: &str, from: usize) -> usize {
    let decl_line = line_col_at(text, from).line;
    let bytes = text.as_bytes();
    let mut i = from.min(bytes.len());

    // Locate the opening brace of the body.
    while i < bytes.len() {
        match bytes[i] {
            b'{' => break,
            b';' => return decl_line,
            _ => i += 1,
        }
    }
    if i >= bytes.len() {
        return decl_line;
    }

    let mut depth = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return line_col_at(text, i).line;
                }
            }
            _ => {}
        }
        i += 1;
    }
    decl_line
}

/// Collects the contiguous run of doc-comment lines immediately above
/// `line` (1-based). Prefixes are matched after trimming; the first
/// non-matching or blank line stops the scan.
pub fn preceding_doc_comment(text: &str, line: usize, prefixes: &[&str]) -> Option<String> {
    if line < 2 || prefixes.is_empty() {
        return None;
    }
    let lines: Vec<&str> = text.lines().collect();
    let mut collected: Vec<String> = Vec::new();
    let mut idx = line - 1; // index of the declaration line in `lines`

    while idx > 0 {
        idx -= 1;
        let trimmed = lines.get(idx)?.trim();
        if trimmed == "*/" {
            // Closing line of a block doc comment carries no content.
            continue;
        }
        let Some(prefix) = prefixes.iter().find(|p| trimmed.starts_with(**p)) else {
            break;
        };
        let body = trimmed[prefix.len()..].trim();
        // Strip a trailing block-comment close so `/** one-liner */` reads clean.
        let body = body.strip_suffix("*/").map(str::trim_end).unwrap_or(body);
        collected.push(body.to_string());
    }

    if collected.is_empty() {
        return None;
    }
    collected.reverse();
    let joined = collected.join("\n").trim().to_string();
    if joined.is_empty() { None } else { Some(joined) }
}

/// Strips generic parameter lists and trailing `where` constraint clauses:
/// `Map<K, V> where K: Ord` becomes `Map`.
pub fn strip_generics(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for ch in s.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    let out = match out.find(" where ") {
        Some(pos) => &out[..pos],
        None => &out[..],
    };
    out.trim().to_string()
}

/// Splits a comma-separated type list at nesting depth zero, trimming each
/// element and dropping empties.
pub fn split_type_list(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for ch in s.chars() {
        match ch {
            '<' | '(' | '[' => {
                depth += 1;
                current.push(ch);
            }
            '>' | ')' | ']' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                let item = current.trim();
                if !item.is_empty() {
                    parts.push(item.to_string());
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    let item = current.trim();
    if !item.is_empty() {
        parts.push(item.to_string());
    }
    parts
}

/// File stem used as the module-level relationship source.
pub fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Lowercased extension of a path, if any.
pub fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_newlines() {
        let text = "a\nbb\nccc";
        assert_eq!(line_col_at(text, 0), Position::new(1, 0));
        assert_eq!(line_col_at(text, 2), Position::new(2, 0));
        assert_eq!(line_col_at(text, 7), Position::new(3, 2));
    }

    #[test]
    fn block_end_tracks_nesting() {
        let text = "class A {\n  fn b() {\n  }\n}\nrest";
        assert_eq!(block_end_line(text, 0), 4);
        assert_eq!(block_end_line(text, text.find("fn").unwrap()), 3);
    }

    #[test]
    fn block_end_falls_back_for_expression_bodies() {
        let text = "int x() => 1;\nint y() { return 2; }";
        assert_eq!(block_end_line(text, 0), 1);
    }

    #[test]
    fn doc_comment_scan_stops_at_blank() {
        let text = "// unrelated\n\n/// First.\n/// Second.\nfn target() {}\n";
        let doc = preceding_doc_comment(text, 5, &["///"]).unwrap();
        assert_eq!(doc, "First.\nSecond.");
    }

    #[test]
    fn doc_comment_none_without_prefix_lines() {
        let text = "let x = 1;\nfn target() {}\n";
        assert!(preceding_doc_comment(text, 2, &["///"]).is_none());
    }

    #[test]
    fn strip_generics_removes_params_and_where() {
        assert_eq!(strip_generics("Map<String, List<T>>"), "Map");
        assert_eq!(strip_generics("Repo<T> where T: Clone"), "Repo");
        assert_eq!(strip_generics("Plain"), "Plain");
    }

    #[test]
    fn split_type_list_respects_depth() {
        assert_eq!(
            split_type_list("Base, Comparable<Map<K, V>>, Serializable"),
            vec!["Base", "Comparable<Map<K, V>>", "Serializable"]
        );
        assert!(split_type_list("  ").is_empty());
    }

    #[test]
    fn file_stem_drops_directories_and_extension() {
        assert_eq!(file_stem("src/util/math.py"), "math");
    }
}
