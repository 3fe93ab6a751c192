//! JSON parsing utilities for the plan service client.

use anyhow::Result;

/// Attempt to parse JSON and, on failure, include a contextual snippet of the
/// line where the error occurred along with the serde path and type mismatch.
pub fn parse_json_with_context<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    let jd = &mut serde_json::Deserializer::from_str(body);
    match serde_path_to_error::deserialize(jd) {
        Ok(value) => Ok(value),
        Err(err) => {
            let inner_err = err.inner();
            let (line, column) = (inner_err.line(), inner_err.column());
            let path = err.path().to_string();

            let msg = inner_err.to_string();
            let loc = format!(" at line {line} column {column}");
            let msg_without_loc = msg.strip_suffix(&loc).unwrap_or(&msg);

            let type_info = parse_type_mismatch(msg_without_loc);
            let snippet = build_error_snippet(body, line, column, 20);

            let mut final_err = String::new();
            if !path.is_empty() && path != "." {
                final_err.push_str(&format!("at path '{path}': "));
            }
            final_err.push_str(&format!("{type_info} (line {line} col {column})\n{snippet}"));

            Err(anyhow::anyhow!(final_err))
        }
    }
}

/// Turn "invalid type: null, expected a string" into "expected a string, got null".
///
/// Falls back to the original message when it has neither shape.
fn parse_type_mismatch(error_msg: &str) -> String {
    if let Some(invalid_start) = error_msg.find("invalid type: ") {
        let after_prefix = &error_msg[invalid_start + "invalid type: ".len()..];

        if let Some(comma_pos) = after_prefix.find(", expected ") {
            let actual_type = &after_prefix[..comma_pos];
            let expected_part = &after_prefix[comma_pos + ", expected ".len()..];
            let expected_type = expected_part
                .split(" at line ")
                .next()
                .unwrap_or(expected_part)
                .trim();

            return format!("expected {expected_type}, got {actual_type}");
        }
    }

    if error_msg.starts_with("expected ")
        && let Some(expected_part) = error_msg.split(" at line ").next()
    {
        return expected_part.to_string();
    }

    error_msg.to_string()
}

/// Excerpt of the offending line with a caret under the error column.
///
/// Responses carry Japanese text, so the window is widened to the nearest
/// char boundaries before slicing.
fn build_error_snippet(body: &str, line: usize, column: usize, context_len: usize) -> String {
    let target_line = body.lines().nth(line.saturating_sub(1)).unwrap_or("");
    if target_line.is_empty() {
        return "(empty line)".to_string();
    }

    let error_idx = column.saturating_sub(1).min(target_line.len());

    let half_len = context_len / 2;
    let mut start = error_idx.saturating_sub(half_len);
    while !target_line.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (error_idx + half_len).min(target_line.len());
    while !target_line.is_char_boundary(end) {
        end += 1;
    }

    let slice = &target_line[start..end];
    let indicator_pos = slice
        .char_indices()
        .take_while(|(i, _)| start + i < error_idx)
        .count();
    let indicator = " ".repeat(indicator_pos) + "^";

    format!("...{slice}...\n   {indicator}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::models::RawPlanResponse;

    #[test]
    fn test_parse_type_mismatch_invalid_type() {
        let msg = "invalid type: null, expected u8 at line 45 column 29";
        assert_eq!(parse_type_mismatch(msg), "expected u8, got null");
    }

    #[test]
    fn test_parse_type_mismatch_expected() {
        let msg = "expected value at line 1 column 1";
        assert_eq!(parse_type_mismatch(msg), "expected value");
    }

    #[test]
    fn missing_patterns_is_reported() {
        let result: Result<RawPlanResponse> = parse_json_with_context(r#"{"reasoning": "x"}"#);
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("missing field `patterns`"), "{err_msg}");
    }

    #[test]
    fn null_period_names_the_path() {
        let json = r#"{
            "patterns": [
                {
                    "name": "バランス型",
                    "courses": [
                        {"name": "線形代数", "credits": 2, "day": "月", "period": null}
                    ]
                }
            ],
            "reasoning": ""
        }"#;

        let result: Result<RawPlanResponse> = parse_json_with_context(json);
        let err_msg = result.unwrap_err().to_string();

        assert!(err_msg.contains("patterns[0].courses[0].period"), "{err_msg}");
        assert!(err_msg.contains("expected") && err_msg.contains("got"));
    }

    #[test]
    fn snippet_handles_multibyte_lines() {
        let body = r#"{"day": "水曜日の講義", "period": "三"}"#;
        let snippet = build_error_snippet(body, 1, 30, 20);
        assert!(snippet.starts_with("..."));
        assert!(snippet.contains('^'));
    }
}
