//! Diagnostics pane rendering
//!
//! Shows what the current step did, why it had no effect when it was
//! skipped, and every line the recognizer could not understand.

use super::utils::{clamp_scroll, pane_block};
use crate::interpreter::engine::StepOutcome;
use crate::parser::ast::{ParseError, Step};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding},
    Frame,
};

/// Render the diagnostics pane
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    current: Option<(&Step, &StepOutcome)>,
    errors: &[ParseError],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Diagnostics ", is_focused).padding(Padding::new(1, 0, 0, 0));

    let mut all_items = Vec::new();

    match current {
        None => all_items.push(
            ListItem::new("Before the first step").style(Style::default().fg(DEFAULT_THEME.comment)),
        ),
        Some((step, outcome)) => {
            all_items.push(ListItem::new(Line::from(vec![
                Span::styled(
                    format!("line {}: ", step.line + 1),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(step.description(), Style::default().fg(DEFAULT_THEME.fg)),
            ])));
            if let Some(reason) = outcome.skip_reason() {
                all_items.push(
                    ListItem::new(format!("⚠ {}", reason))
                        .style(Style::default().fg(DEFAULT_THEME.secondary)),
                );
            }
        }
    }

    if !errors.is_empty() {
        all_items.push(ListItem::new(""));
        all_items.push(
            ListItem::new(format!("{} unrecognized line(s):", errors.len())).style(
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            ),
        );
        for err in errors {
            all_items.push(
                ListItem::new(err.to_string()).style(Style::default().fg(DEFAULT_THEME.error)),
            );
        }
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    *scroll_offset = clamp_scroll(*scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
