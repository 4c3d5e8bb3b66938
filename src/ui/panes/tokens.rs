//! Token stream pane: one table row per token

use crate::parser::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

fn kind_style(kind: TokenKind) -> Style {
    let color = match kind {
        TokenKind::DtChar
        | TokenKind::DtInt
        | TokenKind::DtFloat
        | TokenKind::DtString
        | TokenKind::DtBool => DEFAULT_THEME.type_name,
        TokenKind::LitStr | TokenKind::LitChar => DEFAULT_THEME.string,
        TokenKind::LitInt | TokenKind::LitFloat | TokenKind::LitTrue | TokenKind::LitFalse => {
            DEFAULT_THEME.number
        }
        TokenKind::Keyword => DEFAULT_THEME.macro_keyword,
        TokenKind::ReservedWord => DEFAULT_THEME.keyword,
        _ => DEFAULT_THEME.fg,
    };
    Style::default().fg(color)
}

/// Render the token table pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Borders (2) and the header row (1)
    let visible_height = area.height.saturating_sub(3).max(1) as usize;

    if tokens.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(tokens.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let rows: Vec<Row> = tokens
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|token| {
            Row::new(vec![
                Cell::from(token.kind.name()).style(kind_style(token.kind)),
                Cell::from(token.text().to_string()),
                Cell::from(format!("{}:{}", token.location.line, token.location.column))
                    .style(Style::default().fg(DEFAULT_THEME.comment)),
            ])
        })
        .collect();

    let header = Row::new(vec!["Token type", "Token value", "Line:Col"]).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Length(14),
        Constraint::Min(12),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
