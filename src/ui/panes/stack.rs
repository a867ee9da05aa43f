//! Stack pane rendering
//!
//! One row per variable, in declaration order: the variable name, the
//! address it holds (or `null`) and the value of the node behind it. The
//! variable pointing at the node the last step touched is highlighted.

use super::utils::{clamp_scroll, pane_block};
use crate::snapshot::MemorySnapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    state: &MemorySnapshot,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Stack ", is_focused);

    let name_width = state
        .stack
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    let mut all_items = Vec::new();

    if state.stack.is_empty() {
        all_items.push(
            ListItem::new("(no variables)").style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    }

    for (name, addr) in state.stack.iter() {
        let is_touched = addr.is_some() && addr == state.last_touched;
        let name_style = if is_touched {
            Style::default()
                .fg(DEFAULT_THEME.touched)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };

        let mut spans = vec![
            Span::styled(format!(" {:<width$}", name, width = name_width), name_style),
            Span::styled(" → ", Style::default().fg(DEFAULT_THEME.comment)),
        ];

        match addr {
            Some(addr) => {
                spans.push(Span::styled(
                    addr.to_string(),
                    Style::default().fg(DEFAULT_THEME.primary),
                ));
                if let Some(node) = state.heap.get(addr) {
                    spans.push(Span::styled(
                        format!("  [{}]", node.value),
                        Style::default().fg(DEFAULT_THEME.number),
                    ));
                }
            }
            None => spans.push(Span::styled(
                "null",
                Style::default().fg(DEFAULT_THEME.number),
            )),
        }

        all_items.push(ListItem::new(Line::from(spans)));
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
