use crate::app::App;
use crate::ui::widgets::cases_color;
use covid_core::format::pretty_print_stat;
use covid_core::history::Plot;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

/// Line graph of new values per day for the selected category.
pub fn render_history_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    let cases_type = app.view.cases_type;
    let block = Block::default()
        .title(format!(" {} ", app.view.graph_title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let series = app
        .history
        .as_ref()
        .map(|history| history.new_per_day(cases_type))
        .unwrap_or_default();

    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        let message = if app.history.is_none() {
            "Waiting for history..."
        } else {
            "No history available"
        };
        let paragraph = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    };

    let plot = Plot::new(&series);
    let max_value = plot.y_max;
    let middle = &series[series.len() / 2];

    let x_labels = [first, middle, last]
        .map(|point| Span::raw(point.date.format("%b %d").to_string()));
    let y_labels = [
        Span::raw("0"),
        Span::raw(pretty_print_stat(Some(max_value / 2))),
        Span::raw(pretty_print_stat(Some(max_value))),
    ];

    let dataset = Dataset::default()
        .name(cases_type.as_str())
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
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, plot.y_bound()])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}
