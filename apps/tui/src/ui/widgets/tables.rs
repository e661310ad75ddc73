use crate::app::App;
use covid_core::format::format_thousands;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{
    Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
};
use ratatui::Frame;

/// Rows that fit under the header inside a bordered block.
pub const fn visible_rows(area_height: u16) -> usize {
    area_height.saturating_sub(3) as usize
}

pub fn render_country_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Live Cases by Country ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let countries = &app.view.table;
    if countries.is_empty() {
        let paragraph = Paragraph::new("No countries loaded")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Country"),
        Cell::from(TextLine::from("Cases").alignment(Alignment::Right)),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let selected = app.view.selection.code();
    let max_rows = visible_rows(area.height);

    let rows = countries
        .iter()
        .enumerate()
        .skip(app.table_offset)
        .take(max_rows)
        .map(|(rank, country)| {
            let style = if country.selection_code().eq_ignore_ascii_case(selected) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(format!("{}", rank + 1)),
                Cell::from(country.country.clone()),
                Cell::from(
                    TextLine::from(format_thousands(country.counts.cases))
                        .alignment(Alignment::Right),
                ),
            ])
            .style(style)
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(13),
        ],
    )
    .header(header)
    .block(block)
    .column_spacing(1);

    f.render_widget(table, area);

    let mut scrollbar_state = ScrollbarState::new(countries.len())
        .position(app.table_offset)
        .viewport_content_length(max_rows);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_style(Style::default().fg(Color::Cyan));
    let scroll_area = Rect {
        x: area.x,
        y: area.y.saturating_add(2),
        width: area.width,
        height: area.height.saturating_sub(3),
    };
    f.render_stateful_widget(scrollbar, scroll_area, &mut scrollbar_state);
}
