//! AST outline pane

use crate::parser::ast::Program;
use crate::parser::FrontendError;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

/// Split an outline row into indentation, node name and the rest.
fn outline_line(row: &str) -> Line<'static> {
    let trimmed = row.trim_start();
    let indent = &row[..row.len() - trimmed.len()];
    let name_end = trimmed
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(trimmed.len());
    let (name, rest) = trimmed.split_at(name_end);

    let is_node = name.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    let name_style = if is_node {
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD)
    } else if matches!(name, "if" | "elseif" | "else") {
        Style::default().fg(DEFAULT_THEME.keyword)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };

    Line::from(vec![
        Span::raw(indent.to_string()),
        Span::styled(name.to_string(), name_style),
        Span::styled(rest.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

/// Render the AST pane, or the front-end error when there is no tree
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    program: Option<&Program>,
    error: Option<&FrontendError>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    let program = match program {
        Some(program) => program,
        None => {
            let message = error
                .map(ToString::to_string)
                .unwrap_or_else(|| "(no program)".to_string());
            let paragraph = Paragraph::new(message)
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.error))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let outline = program.to_string();
    let rows: Vec<&str> = outline.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if rows.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(rows.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|row| ListItem::new(outline_line(row)))
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
