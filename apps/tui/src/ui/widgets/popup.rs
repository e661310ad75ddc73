use crate::app::App;
use covid_core::WORLDWIDE;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}

pub fn render_country_selector(app: &App, f: &mut Frame<'_>) {
    let area = centered_rect(50, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Select country ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [input_area, _, list_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    let input = Paragraph::new(TextLine::from(vec![
        Span::styled("> ", Style::default().fg(Color::Yellow)),
        Span::raw(app.selector.query.clone()),
        Span::styled("_", Style::default().fg(Color::Gray)),
    ]));
    f.render_widget(input, input_area);

    let entries = app.selector.entries(&app.view.options);
    if entries.is_empty() {
        let paragraph = Paragraph::new("No matching country").style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, list_area);
        return;
    }

    let items: Vec<ListItem<'_>> = entries
        .iter()
        .map(|entry| {
            if entry.code == WORLDWIDE {
                ListItem::new(entry.label)
            } else {
                ListItem::new(format!("{} ({})", entry.label, entry.code))
            }
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selector.index));
    f.render_stateful_widget(list, list_area, &mut state);
}

pub fn render_help_popup(f: &mut Frame<'_>) {
    let area = centered_rect(50, 60, f.area());
    f.render_widget(Clear, area);

    let keys = [
        ("Tab / Left / Right", "cycle category"),
        ("1 2 3 / c r d", "cases, recovered, deaths"),
        ("/ or s", "choose country"),
        ("w", "back to worldwide"),
        ("Up / Down / PgUp / PgDn", "scroll table"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];

    let lines: Vec<TextLine<'_>> = keys
        .iter()
        .map(|(key, action)| {
            TextLine::from(vec![
                Span::styled(
                    format!("{key:<24}"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}
