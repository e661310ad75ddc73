mod fetch;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use covid_core::api::{decode, decode_snapshot, DEFAULT_BASE_URL, DEFAULT_HISTORY_DAYS};
use covid_core::format::{format_thousands, pretty_print_stat};
use covid_core::history::{HistoricalTimeline, Plot};
use covid_core::{
    ApplyOutcome, CasesType, CountryStat, Endpoint, FetchRequest, InfoCard, Selection,
    StatsSnapshot, ViewState,
};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Circle, Map, MapResolution},
        Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Table,
    },
    Frame, Terminal,
};
use ratzilla::event::KeyCode;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen_futures::spawn_local;

use crate::fetch::{fetch_text, log_error};

const TABLE_ROWS: usize = 18;

#[derive(Default)]
struct WebState {
    view: ViewState,
    history: Option<HistoricalTimeline>,
    row_offset: usize,
}

type SharedState = Rc<RefCell<WebState>>;

fn main() -> io::Result<()> {
    let state = SharedState::default();

    let initial = state.borrow_mut().view.select_country(Selection::Worldwide);
    spawn_local(load_snapshot(state.clone(), initial));
    spawn_local(load_countries(state.clone()));
    spawn_local(load_history(state.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = state.clone();
        move |event| {
            let request = handle_key(&mut state.borrow_mut(), event.code);
            if let Some(request) = request {
                spawn_local(load_snapshot(state.clone(), request));
            }
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let block = Block::default()
            .title("COVID-19 Tracker")
            .title_style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        render_dashboard(&state.borrow(), f, inner);
    });

    Ok(())
}

/// Applies a key press and returns the snapshot request it triggers, if any.
fn handle_key(state: &mut WebState, code: KeyCode) -> Option<FetchRequest> {
    match code {
        KeyCode::Char(c @ '1'..='3') => {
            let index = (c as usize) - ('1' as usize);
            if let Some(cases_type) = CasesType::from_index(index) {
                state.view.select_cases_type(cases_type);
            }
            None
        }
        KeyCode::Char('w') => Some(state.view.select_country(Selection::Worldwide)),
        KeyCode::Left => cycle_country(state, false),
        KeyCode::Right => cycle_country(state, true),
        KeyCode::Up => {
            state.row_offset = state.row_offset.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            let last = state.view.table.len().saturating_sub(1);
            state.row_offset = (state.row_offset + 1).min(last);
            None
        }
        _ => None,
    }
}

/// Steps through worldwide followed by every country option, wrapping.
fn cycle_country(state: &mut WebState, forward: bool) -> Option<FetchRequest> {
    let count = state.view.options.len() + 1;
    if count == 1 {
        return None;
    }
    let current = state.view.selected_option_index().map_or(0, |index| index + 1);
    let next = if forward {
        (current + 1) % count
    } else {
        (current + count - 1) % count
    };
    let selection = match next {
        0 => Selection::Worldwide,
        n => state.view.options[n - 1].selection(),
    };
    Some(state.view.select_country(selection))
}

async fn load_snapshot(state: SharedState, request: FetchRequest) {
    let url = request.endpoint.url(DEFAULT_BASE_URL);
    let result = fetch_text(&url)
        .await
        .and_then(|body| decode_snapshot(&request.selection, body.as_bytes()));

    match result {
        Ok(snapshot) => {
            let outcome = state
                .borrow_mut()
                .view
                .apply_snapshot(request.generation, snapshot);
            if outcome == ApplyOutcome::Stale {
                web_sys::console::log_1(
                    &format!("dropped stale response for {}", request.selection.code()).into(),
                );
            }
        }
        Err(error) => log_error("Failed to load stats", &error),
    }
}

async fn load_countries(state: SharedState) {
    let url = Endpoint::Countries.url(DEFAULT_BASE_URL);
    let result = fetch_text(&url)
        .await
        .and_then(|body| decode::<Vec<CountryStat>>(body.as_bytes()));

    match result {
        Ok(countries) => {
            let reset = {
                let mut state = state.borrow_mut();
                state.row_offset = 0;
                state.view.apply_countries(countries)
            };
            if let Some(request) = reset {
                spawn_local(load_snapshot(state, request));
            }
        }
        Err(error) => log_error("Failed to load countries", &error),
    }
}

async fn load_history(state: SharedState) {
    let url = Endpoint::Historical {
        last_days: DEFAULT_HISTORY_DAYS,
    }
    .url(DEFAULT_BASE_URL);
    let result = fetch_text(&url)
        .await
        .and_then(|body| decode::<HistoricalTimeline>(body.as_bytes()));

    match result {
        Ok(history) => state.borrow_mut().history = Some(history),
        Err(error) => log_error("Failed to load history", &error),
    }
}

fn cases_color(cases_type: CasesType) -> Color {
    let (r, g, b) = cases_type.style().rgb;
    Color::Rgb(r, g, b)
}

fn render_dashboard(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(state, f, main_layout[0]);
    render_cards(&state.view.info_cards(), f, main_layout[1]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(main_layout[2]);

    render_map(&state.view, f, content[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(content[1]);

    render_table(state, f, right[0]);
    render_graph(state, f, right[1]);

    render_footer(f, main_layout[3]);
}

fn render_header(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![
        Span::styled("Showing ", Style::default().fg(Color::Gray)),
        Span::styled(
            state.view.selection_label().to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if state.view.snapshot.is_none() {
        spans.push(Span::styled(
            "  loading...",
            Style::default().fg(Color::Gray),
        ));
    }
    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn render_cards(cards: &[InfoCard; 3], f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (card, chunk) in cards.iter().zip(chunks.iter()) {
        let color = cases_color(card.cases_type);
        let border_style = if card.active {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .title(format!("{} [{}]", card.title, card.cases_type.index() + 1))
            .borders(Borders::ALL)
            .border_style(border_style);
        let lines = vec![
            TextLine::from(Span::styled(
                card.today.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(
                format!("{} Total", card.total),
                Style::default().fg(Color::Gray),
            )),
        ];
        f.render_widget(Paragraph::new(Text::from(lines)).block(block), *chunk);
    }
}

fn render_map(view: &ViewState, f: &mut Frame<'_>, area: Rect) {
    let viewport = view.viewport;
    let bubbles = view.bubbles();
    let marker = view.snapshot.as_ref().and_then(StatsSnapshot::coordinates);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(format!("Map ({})", view.cases_type.as_str()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .marker(Marker::Braille)
        .x_bounds(viewport.x_bounds())
        .y_bounds(viewport.y_bounds())
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for bubble in &bubbles {
                let (r, g, b) = bubble.rgb;
                ctx.draw(&Circle {
                    x: bubble.center.lng,
                    y: bubble.center.lat,
                    radius: bubble.drawn_radius(&viewport),
                    color: Color::Rgb(r, g, b),
                });
            }
            if let Some((lat, lng)) = marker {
                ctx.print(lng, lat, Span::styled("◆", Style::default().fg(Color::White)));
            }
        });

    f.render_widget(canvas, area);
}

fn render_table(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Live Cases by Country")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let countries = &state.view.table;
    if countries.is_empty() {
        let paragraph = Paragraph::new("No countries loaded")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Country"),
        Cell::from(TextLine::from("Cases").alignment(Alignment::Right)),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let selected = state.view.selection.code();
    let max_rows = TABLE_ROWS.min(area.height.saturating_sub(3) as usize);
    let rows = countries
        .iter()
        .skip(state.row_offset)
        .take(max_rows)
        .map(|country| {
            let style = if country.selection_code().eq_ignore_ascii_case(selected) {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(country.country.clone()),
                Cell::from(
                    TextLine::from(format_thousands(country.counts.cases))
                        .alignment(Alignment::Right),
                ),
            ])
            .style(style)
        });

    let table = Table::new(rows, [Constraint::Min(14), Constraint::Length(13)])
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);

    let mut scrollbar_state = ScrollbarState::new(countries.len())
        .position(state.row_offset)
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

fn render_graph(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let cases_type = state.view.cases_type;
    let block = Block::default()
        .title(state.view.graph_title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let series = state
        .history
        .as_ref()
        .map(|history| history.new_per_day(cases_type))
        .unwrap_or_default();

    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        let paragraph = Paragraph::new("No history yet")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    };

    let plot = Plot::new(&series);

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(cases_color(cases_type)))
        .data(&plot.points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .legend_position(None)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, plot.x_max()])
                .labels([
                    Span::raw(first.date.format("%b %d").to_string()),
                    Span::raw(last.date.format("%b %d").to_string()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, plot.y_bound()])
                .labels([Span::raw("0"), Span::raw(pretty_print_stat(Some(plot.y_max)))]),
        );
    f.render_widget(chart, area);
}

fn render_footer(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::Gray);
    let line = TextLine::from(vec![
        Span::styled("1-3", key),
        Span::styled(" category  ", text),
        Span::styled("Left/Right", key),
        Span::styled(" country  ", text),
        Span::styled("w", key),
        Span::styled(" worldwide  ", text),
        Span::styled("Up/Down", key),
        Span::styled(" scroll", text),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
