use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::app::{InputMode, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Items pane
            Constraint::Length(8), // Detail pane
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_items_pane(frame, app, chunks[0]);
    render_detail_pane(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_items_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let items: Vec<ListItem> = app
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let date = item
                .posted_at()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "          ".to_string());
            let content = format!("{} {:>6}kr  {}", date, item.price, item.description);

            let style = if i == app.item_index {
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let title = if app.is_loading {
        " Items (loading...) ".to_string()
    } else {
        format!(" Items ({}) ", app.items.len())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let list = List::new(items).block(block);
    frame.render_stateful_widget(list, area, &mut app.item_list_state);
}

fn render_detail_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let lines = match app.selected_item() {
        Some(item) => {
            let date = item
                .posted_at()
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            vec![
                Line::from(vec![
                    Span::styled(
                        item.description.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("  {}kr", item.price)),
                ]),
                Line::from(format!("Seller: {} / {}", item.seller_email, item.seller_phone)),
                Line::from(format!("Posted: {}", date)),
                Line::from(format!(
                    "Picture: {}",
                    item.picture_url.as_deref().unwrap_or("(none)")
                )),
                Line::from(format!("Id: {}", item.id)),
            ]
        }
        None => vec![Line::from("No item selected")],
    };

    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let (text, style) = match app.input_mode {
        InputMode::Search => (
            format!("Search: {}_", app.input_buffer),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::MaxPrice => (
            format!("Max price: {}_", app.input_buffer),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Normal => {
            if let Some((_, description)) = &app.pending_delete {
                (
                    format!("Delete \"{}\"? (y/n)", description),
                    Style::default().fg(Color::Red),
                )
            } else if !app.error_message.is_empty() {
                (
                    format!("Error: {}", app.error_message),
                    Style::default().fg(Color::Red),
                )
            } else if let Some(message) = &app.status_message {
                (message.clone(), Style::default().fg(Color::Green))
            } else {
                (
                    "j/k move  p/P price  t/T date  / search  m max  x reset  d delete  R refresh  o picture  q quit"
                        .to_string(),
                    Style::default().fg(Color::DarkGray),
                )
            }
        }
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
