//! Heap pane rendering
//!
//! Nodes are drawn as chains produced by [`heap_layout`]: the inferred head's
//! list first, then other variable-rooted lists, then stale nodes no
//! variable can reach any more. Under each chain, every node that has
//! variables pointing at it lists them.
//!
//! ```text
//! [1] → [2] → [3] → null
//!   0x1000 ← head, first
//!   0x1020 ← tail
//! [4] → [5] → ↺ 0x1030
//! ```

use super::utils::{clamp_scroll, pane_block};
use crate::interpreter::chain::{heap_layout, variables_at, ChainLink};
use crate::snapshot::MemorySnapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

fn arrow() -> Span<'static> {
    Span::styled(" → ", Style::default().fg(DEFAULT_THEME.comment))
}

/// Build the display lines for the heap
pub(crate) fn heap_lines(state: &MemorySnapshot) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if state.heap.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no nodes)",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
        return lines;
    }

    for (i, chain) in heap_layout(state).iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }

        let mut spans = vec![Span::raw(" ")];
        for (j, link) in chain.iter().enumerate() {
            if j > 0 {
                spans.push(arrow());
            }
            match *link {
                ChainLink::Node(addr) => {
                    let value = state.heap.get(addr).map(|n| n.value).unwrap_or_default();
                    let style = if state.last_touched == Some(addr) {
                        Style::default()
                            .fg(DEFAULT_THEME.touched)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(DEFAULT_THEME.number)
                    };
                    spans.push(Span::styled(format!("[{}]", value), style));
                }
                ChainLink::Cycle(addr) => spans.push(Span::styled(
                    format!("↺ {}", addr),
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                )),
                ChainLink::Joins(addr) => spans.push(Span::styled(
                    format!("⤷ {}", addr),
                    Style::default().fg(DEFAULT_THEME.secondary),
                )),
            }
        }

        // A chain ending on a node continues to that node's `next`, which is null
        if let Some(ChainLink::Node(_)) = chain.last() {
            spans.push(arrow());
            spans.push(Span::styled("null", Style::default().fg(DEFAULT_THEME.comment)));
        }

        let is_stale = chain
            .first()
            .is_some_and(|link| variables_at(&state.stack, link.address()).is_empty());
        if is_stale {
            spans.push(Span::styled(
                "  (unreachable)",
                Style::default().fg(DEFAULT_THEME.comment),
            ));
        }

        lines.push(Line::from(spans));

        for link in chain {
            if let ChainLink::Node(addr) = *link {
                let names = variables_at(&state.stack, addr);
                if names.is_empty() {
                    continue;
                }
                lines.push(Line::from(vec![
                    Span::styled(format!("   {}", addr), Style::default().fg(DEFAULT_THEME.primary)),
                    Span::styled(" ← ", Style::default().fg(DEFAULT_THEME.comment)),
                    Span::styled(names.join(", "), Style::default().fg(DEFAULT_THEME.fg)),
                ]));
            }
        }
    }

    lines
}

/// Render the heap pane
pub fn render_heap_pane(
    frame: &mut Frame,
    area: Rect,
    state: &MemorySnapshot,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Heap ", is_focused);

    let all_items: Vec<ListItem> = heap_lines(state).into_iter().map(ListItem::new).collect();

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::engine::replay;
    use crate::parser::recognize;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_straight_list_with_aliases() {
        let steps = recognize("Node a = new Node(1);\nNode b = new Node(2);\na.next = b;\nNode c = a;").steps;
        let text = plain(&heap_lines(&replay(&steps, 3)));

        assert_eq!(
            text,
            vec![
                " [1] → [2] → null".to_string(),
                "   0x1000 ← a, c".to_string(),
                "   0x1010 ← b".to_string(),
            ]
        );
    }

    #[test]
    fn test_cycle_and_stale_nodes() {
        let source = "Node a = new Node(1);\nNode b = new Node(2);\na.next = b;\nb.next = a;\nNode c = new Node(3);\nc = a;";
        let steps = recognize(source).steps;
        let text = plain(&heap_lines(&replay(&steps, 5)));

        assert_eq!(text[0], " [1] → [2] → ↺ 0x1000");
        assert!(text.contains(&" [3] → null  (unreachable)".to_string()));
    }

    #[test]
    fn test_empty_heap() {
        let text = plain(&heap_lines(&MemorySnapshot::empty()));
        assert_eq!(text, vec!["(no nodes)".to_string()]);
    }
}
