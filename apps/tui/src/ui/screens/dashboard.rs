use crate::app::App;
use crate::ui::format_updated;
use crate::ui::widgets::charts::render_history_chart;
use crate::ui::widgets::info_box::render_info_box;
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::tables::render_country_table;
use covid_core::StatsSnapshot;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, BRAILLE_SIX};

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and selection
            Constraint::Length(4), // Info cards
            Constraint::Min(8),    // Map, table and graph
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_header(app, f, main_layout[0]);
    render_info_cards(app, f, main_layout[1]);
    render_body(app, f, main_layout[2]);
    render_shortcuts(f, main_layout[3]);
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" COVID-19 Tracker ")
        .title_style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner);

    let mut spans = vec![
        Span::styled("Showing ", Style::default().fg(Color::Gray)),
        Span::styled(
            app.view.selection_label().to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    let updated = format_updated(app.view.snapshot.as_ref().and_then(StatsSnapshot::updated));
    if let Some(updated) = updated {
        spans.push(Span::styled(
            format!("  updated {updated}"),
            Style::default().fg(Color::Gray),
        ));
    }
    f.render_widget(Paragraph::new(TextLine::from(spans)), chunks[0]);

    if app.loading.any() {
        let throbber = Throbber::default()
            .label("Loading...")
            .style(Style::default().fg(Color::Gray))
            .throbber_style(Style::default().fg(Color::Red))
            .throbber_set(BRAILLE_SIX);
        let mut state = app.throbber_state.clone();
        f.render_stateful_widget(throbber, chunks[1], &mut state);
    } else {
        let hint = Paragraph::new(Span::styled(
            "? for help",
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Right);
        f.render_widget(hint, chunks[1]);
    }
}

fn render_info_cards(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (card, chunk) in app.view.info_cards().iter().zip(chunks.iter()) {
        render_info_box(card, f, *chunk);
    }
}

fn render_body(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_map(app, f, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);

    render_country_table(app, f, right[0]);
    render_history_chart(app, f, right[1]);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::Gray);
    let line = TextLine::from(vec![
        Span::styled("Tab", key),
        Span::styled(" category  ", text),
        Span::styled("/", key),
        Span::styled(" country  ", text),
        Span::styled("w", key),
        Span::styled(" worldwide  ", text),
        Span::styled("↑↓", key),
        Span::styled(" scroll  ", text),
        Span::styled("q", key),
        Span::styled(" quit", text),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
