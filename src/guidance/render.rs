//! Turning a backend result into chat-bubble text

use crate::backend::GuidanceResult;

pub const NO_SHLOKA_TEXT: &str = "Sorry — I couldn't find a suitable shloka.";

pub const CONNECTION_ERROR_TEXT: &str = "Connection error — please check your backend.";

fn non_blank(field: Option<&String>) -> Option<&str> {
    field.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Start a new paragraph. The blank separator only goes between sections,
/// never at the top of the bubble.
fn push_paragraph(lines: &mut Vec<String>, text: String) {
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(text);
}

/// Render a result as: sanskrit, transliteration, blank line + meaning,
/// blank line + `Source (chapter[:verse])`. Missing sections are skipped.
/// A result with nothing to show renders as [`NO_SHLOKA_TEXT`].
pub fn render(result: &GuidanceResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(sanskrit) = non_blank(result.sanskrit.as_ref()) {
        lines.push(sanskrit.to_string());
    }
    if let Some(transliteration) = non_blank(result.transliteration.as_ref()) {
        lines.push(transliteration.to_string());
    }
    if let Some(meaning) = non_blank(result.meaning.as_ref()) {
        push_paragraph(&mut lines, meaning.to_string());
    }

    let chapter = non_blank(result.chapter.as_ref());
    let verse = non_blank(result.verse.as_ref());
    if chapter.is_some() || verse.is_some() {
        let verse = verse.map(|v| format!(":{v}")).unwrap_or_default();
        push_paragraph(
            &mut lines,
            format!("Source ({}{verse})", chapter.unwrap_or("?")),
        );
    }

    if lines.is_empty() {
        tracing::debug!("Backend result had no usable fields");
        return NO_SHLOKA_TEXT.to_string();
    }
    lines.join("\n")
}
