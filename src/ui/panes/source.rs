//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the Java snippet
//! being replayed with basic keyword highlighting and step indicators.
//!
//! # Features
//!
//! - Highlighting for Java keywords, types, numbers, `null` and comments
//! - Current step line highlighting with arrow indicator
//! - Lines that failed recognition shown in the error color
//! - Scroll state that keeps the current line at a fixed row while stepping
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character tokenizer to apply syntax
//! highlighting styles without requiring a full lexer.

use super::utils::pane_block;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Simple syntax highlighting for Java code
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_idx, c) = chars[i];

        // Handle line comments
        if c == '/' && chars.get(i + 1).is_some_and(|&(_, n)| n == '/') {
            if !current_word.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_word)));
            }
            spans.push(Span::styled(
                &line[byte_idx..],
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }

        // Handle non-alphanumeric (delimiters)
        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                let style = get_keyword_style(&current_word);
                spans.push(Span::styled(std::mem::take(&mut current_word), style));
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary), // Brackets
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = get_keyword_style(&current_word);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn get_keyword_style(word: &str) -> Style {
    match word {
        "int" | "long" | "short" | "byte" | "char" | "boolean" | "float" | "double" | "void"
        | "Node" | "String" => {
            Style::default().fg(DEFAULT_THEME.type_name) // Types
        }
        "class" | "new" | "public" | "private" | "protected" | "static" | "final" | "return"
        | "this" | "if" | "else" | "while" | "for" | "do" | "break" | "continue" => {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD) // Keywords
        }
        "null" | "true" | "false" => Style::default().fg(DEFAULT_THEME.number), // Constants
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg), // Variables/Identifiers
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    pub current_line: Option<usize>, // Zero-based line of the current step
    pub error_lines: &'a [usize],    // Zero-based lines that failed recognition
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = pane_block(" Source Code ", is_focused);

    let lines: Vec<&str> = data.source_code.split('\n').collect();
    let total_lines = lines.len();

    // Calculate visible range
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Get the target row, centering on first render and clamping to the visible area
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Calculate scroll offset to keep current line at target visual row
    if let Some(current) = data.current_line.filter(|&l| l < total_lines) {
        scroll_state.offset = current.saturating_sub(target_row);
    }
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let is_current = data.current_line == Some(idx);
            let is_error = data.error_lines.contains(&idx);
            let marker = if is_current { '▶' } else { ' ' };
            let line_num_str = format!("{}{:4} ", marker, idx + 1);

            let (num_style, content_base_style) = if is_error {
                // ERROR LINE: Red background with bold line number
                (
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                    Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::White) // White text on red for visibility
                        .add_modifier(Modifier::BOLD),
                )
            } else if is_current {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Style::default().bg(DEFAULT_THEME.current_line_bg),
                )
            } else {
                (
                    Style::default().fg(DEFAULT_THEME.comment), // Line numbers
                    Style::default(),
                )
            };

            let mut content_line = highlight_source_code(line);

            if is_error {
                // For error lines, override all styling with error style
                for span in &mut content_line.spans {
                    span.style = content_base_style;
                }
            } else if is_current {
                // For current line, just apply background
                for span in &mut content_line.spans {
                    span.style = span.style.patch(content_base_style);
                }
            }

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlight_preserves_text() {
        let src = "    Node a = new Node(-5); // first";
        assert_eq!(text_of(&highlight_source_code(src)), src);
    }

    #[test]
    fn test_keyword_styles() {
        assert_eq!(
            get_keyword_style("Node"),
            Style::default().fg(DEFAULT_THEME.type_name)
        );
        assert_eq!(
            get_keyword_style("null"),
            Style::default().fg(DEFAULT_THEME.number)
        );
        assert_eq!(get_keyword_style("head"), Style::default().fg(DEFAULT_THEME.fg));
    }
}
