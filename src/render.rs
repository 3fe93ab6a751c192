//! Plain-text rendering of plan results.
//!
//! Headings are styled with `yansi`; grid cells are left unstyled so column
//! padding stays correct. Call `yansi::disable()` for uncoloured output.

use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use yansi::Paint;

use crate::planner::models::display_opaque;
use crate::preferences::{Period, Weekday};
use crate::timetable::{PlanResult, PlannedPattern, Timetable};

const CELL_WIDTH: usize = 16;
const PERIOD_COLUMN: &str = "時限";

pub fn render_result(result: &PlanResult) -> String {
    let mut out = String::new();
    if !result.reasoning.is_empty() {
        writeln!(out, "{}", "Reasoning".bold()).unwrap();
        writeln!(out, "{}\n", result.reasoning).unwrap();
    }
    if result.patterns.is_empty() {
        writeln!(out, "No plans were suggested.").unwrap();
    }
    for (idx, pattern) in result.patterns.iter().enumerate() {
        out.push_str(&render_pattern(idx + 1, pattern));
        out.push('\n');
    }
    out
}

pub fn render_pattern(number: usize, planned: &PlannedPattern) -> String {
    let pattern = &planned.pattern;
    let mut out = String::new();

    let title = format!("Plan {number}: {}", pattern.name);
    writeln!(out, "{}", title.as_str().bold().cyan()).unwrap();
    if !pattern.description.is_empty() {
        writeln!(out, "{}", pattern.description).unwrap();
    }
    writeln!(
        out,
        "Total credits: {} | Courses: {} | Workload: {} | Estimated GPA: {}",
        planned.total_credits,
        pattern.courses.len(),
        display_opaque(&pattern.expected_workload),
        display_opaque(&pattern.estimated_gpa),
    )
    .unwrap();

    writeln!(out, "\n{}", "Weekly timetable".bold()).unwrap();
    out.push_str(&render_timetable(&planned.timetable));

    writeln!(out, "\n{}", "Courses".bold()).unwrap();
    for course in &pattern.courses {
        let mut line = format!(
            "- {} [{}] {} credits, {}曜{}限",
            course.name,
            display_opaque(&course.id),
            course.credits,
            course.day,
            course.period
        );
        if !course.kind.is_empty() {
            write!(line, ", {}", course.kind).unwrap();
        }
        writeln!(out, "{line}").unwrap();
        if !course.reason.is_empty() {
            writeln!(out, "  {}", course.reason).unwrap();
        }
    }
    out
}

/// Period rows by weekday columns. Empty slots show `-`.
pub fn render_timetable(timetable: &Timetable) -> String {
    let mut out = String::new();

    let mut header = pad(PERIOD_COLUMN, 6);
    for day in Weekday::ALL {
        header.push_str("| ");
        header.push_str(&pad(day.label(), CELL_WIDTH));
    }
    writeln!(out, "{}", header.trim_end()).unwrap();
    writeln!(out, "{}", "-".repeat(6 + (CELL_WIDTH + 2) * Weekday::ALL.len())).unwrap();

    for period in Period::all() {
        let mut row = pad(&period.to_string(), 6);
        for day in Weekday::ALL {
            let text = match timetable.cell_at(day, period.get()) {
                Some(cell) => format!("{} ({})", cell.course, cell.credits),
                None => "-".to_owned(),
            };
            row.push_str("| ");
            row.push_str(&pad(&truncate(&text, CELL_WIDTH), CELL_WIDTH));
        }
        writeln!(out, "{}", row.trim_end()).unwrap();
    }
    out
}

/// Pads to `width` terminal columns; full-width characters count as two.
fn pad(text: &str, width: usize) -> String {
    format!("{text}{}", " ".repeat(width.saturating_sub(text.width())))
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut short = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        short.push(c);
    }
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::{TimetableCell, transform_body};

    fn cell(period: u8, course: &str, credits: u32) -> TimetableCell {
        TimetableCell {
            period,
            course: course.to_owned(),
            credits,
        }
    }

    #[test]
    fn grid_places_cells_by_day_and_period() {
        let mut timetable = Timetable::default();
        timetable.wed = vec![cell(1, "B", 2), cell(3, "A", 2)];

        let grid = render_timetable(&timetable);
        let lines: Vec<&str> = grid.lines().collect();
        // header, rule, six periods
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("時限"));
        let row1: Vec<&str> = lines[2].split('|').map(str::trim).collect();
        assert_eq!(row1, vec!["1", "-", "-", "B (2)", "-", "-"]);
        let row3: Vec<&str> = lines[4].split('|').map(str::trim).collect();
        assert_eq!(row3[3], "A (2)");
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("short", 16), "short");
        let long = truncate("Introduction to Computational Linguistics", 16);
        assert_eq!(long.chars().count(), 16);
        assert!(long.ends_with('…'));

        let wide = truncate("プログラミング基礎演習", 16);
        assert!(wide.width() <= 16);
        assert_eq!(wide, "プログラミング…");
    }

    /// Display column of every `|` in a line.
    fn separator_columns(line: &str) -> Vec<usize> {
        let mut column = 0;
        let mut found = Vec::new();
        for c in line.chars() {
            if c == '|' {
                found.push(column);
            }
            column += c.width().unwrap_or(0);
        }
        found
    }

    #[test]
    fn columns_line_up_with_full_width_names() {
        let mut timetable = Timetable::default();
        timetable.mon = vec![cell(1, "線形代数", 2)];
        timetable.tue = vec![cell(1, "Statistics", 2), cell(2, "情報理論と符号化の基礎", 2)];

        let grid = render_timetable(&timetable);
        let lines: Vec<&str> = grid.lines().collect();
        let header = separator_columns(lines[0]);
        assert_eq!(header.len(), 5);
        for line in &lines[2..] {
            assert_eq!(separator_columns(line), header, "{line}");
        }
    }

    #[test]
    fn result_lists_summary_and_courses() {
        let body = r#"{
            "patterns": [{
                "name": "バランス型",
                "description": "得意科目と必修のバランス",
                "courses": [
                    {"id": "MA201", "name": "線形代数", "credits": 2, "day": "月", "period": 1, "type": "必修", "reason": "基礎"},
                    {"id": "X1", "name": "土曜講座", "credits": 1, "day": "土", "period": 2, "type": "選択", "reason": ""}
                ],
                "expected_workload": "中",
                "estimated_gpa": 3.2
            }],
            "reasoning": "必修を優先しました"
        }"#;
        let result = transform_body(body).unwrap();
        let text = render_result(&result);

        assert!(text.contains("必修を優先しました"));
        assert!(text.contains("バランス型"));
        assert!(text.contains("Total credits: 2 | Courses: 2 | Workload: 中 | Estimated GPA: 3.2"));
        assert!(text.contains("- 線形代数 [MA201] 2 credits, 月曜1限, 必修"));
        assert!(text.contains("土曜講座"));
    }

    #[test]
    fn empty_result_says_so() {
        let result = PlanResult {
            patterns: vec![],
            reasoning: String::new(),
        };
        assert!(render_result(&result).contains("No plans were suggested."));
    }
}
