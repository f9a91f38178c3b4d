//! Output formatting for command results.
//!
//! Supports both human-readable terminal output and JSON for scripting.

use coursemind_core::catalog::CategoryMatch;
use coursemind_core::dataset::Course;
use coursemind_core::Strategy;
use serde::Serialize;

/// Maximum characters to show of a course summary
const SUMMARY_MAX_LEN: usize = 160;

/// JSON output for the hybrid strategy
#[derive(Serialize)]
pub struct JsonRecommendOutput<'a> {
    pub strategy: Strategy,
    pub user_id: &'a str,
    pub liked_course: &'a str,
    pub recommendations: &'a [String],
}

/// JSON output for the same-category strategy
#[derive(Serialize)]
pub struct JsonSimilarOutput<'a> {
    pub strategy: Strategy,
    pub liked_course: &'a str,
    pub recommendations: &'a [CategoryMatch],
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats hybrid recommendations as JSON.
pub fn format_recommend_json(user_id: &str, liked_course: &str, titles: &[String]) -> String {
    to_json(&JsonRecommendOutput {
        strategy: Strategy::Hybrid,
        user_id,
        liked_course,
        recommendations: titles,
    })
}

/// Formats hybrid recommendations for the terminal.
pub fn format_recommend_human(user_id: &str, liked_course: &str, titles: &[String]) -> String {
    if titles.is_empty() {
        return format!(
            "No recommendations for user {} who liked \"{}\"",
            user_id, liked_course
        );
    }

    let mut output = format!(
        "Recommended {} course{} for user {} (liked \"{}\"):\n\n",
        titles.len(),
        plural(titles.len()),
        user_id,
        liked_course
    );
    for (i, title) in titles.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, title));
    }
    output.trim_end().to_string()
}

/// Formats same-category matches as JSON.
pub fn format_similar_json(liked_course: &str, matches: &[CategoryMatch]) -> String {
    to_json(&JsonSimilarOutput {
        strategy: Strategy::Category,
        liked_course,
        recommendations: matches,
    })
}

/// Formats same-category matches for the terminal.
pub fn format_similar_human(liked_course: &str, matches: &[CategoryMatch]) -> String {
    if matches.is_empty() {
        return format!("No other courses found for \"{}\"", liked_course);
    }

    let mut output = format!(
        "Found {} course{} like \"{}\":\n\n",
        matches.len(),
        plural(matches.len()),
        liked_course
    );
    for (i, course) in matches.iter().enumerate() {
        output.push_str(&format!("{}. {} [{}] (id {})\n", i + 1, course.name, course.shortname, course.id));
        let summary = truncate_text(&course.summary, SUMMARY_MAX_LEN);
        if !summary.is_empty() {
            output.push_str(&format!("   {}\n", summary));
        }
    }
    output.trim_end().to_string()
}

/// Formats the dataset's course table as JSON.
pub fn format_courses_json(courses: &[Course]) -> String {
    to_json(&courses)
}

/// Formats the dataset's course table for the terminal.
pub fn format_courses_human(courses: &[Course]) -> String {
    if courses.is_empty() {
        return "Dataset contains no courses".to_string();
    }

    let mut output = format!("{} course{}:\n\n", courses.len(), plural(courses.len()));
    for course in courses {
        let mut details: Vec<&str> = Vec::new();
        if !course.difficulty.is_empty() {
            details.push(&course.difficulty);
        }
        if !course.certificate_type.is_empty() {
            details.push(&course.certificate_type);
        }
        if details.is_empty() {
            output.push_str(&format!("{:>6}  {}\n", course.item_id.as_u64(), course.title));
        } else {
            output.push_str(&format!(
                "{:>6}  {} ({})\n",
                course.item_id.as_u64(),
                course.title,
                details.join(", ")
            ));
        }
    }
    output.trim_end().to_string()
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Truncates text to at most `max_chars` characters, adding an ellipsis
/// at a word boundary if needed.
fn truncate_text(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let truncated = &text[..cut];
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &truncated[..last_space]),
        None => format!("{}...", truncated),
    }
}
