use crate::app::App;
use crate::ui::widgets::rgb;
use covid_core::StatsSnapshot;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Map, MapResolution};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

/// World map with one bubble per country, sized and coloured by the
/// selected category and framed by the current viewport.
pub fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    let view = &app.view;
    let viewport = view.viewport;
    let bubbles = view.bubbles();
    let marker = view.snapshot.as_ref().and_then(StatsSnapshot::coordinates);

    let block = Block::default()
        .title(format!(
            " {} - {} ",
            view.selection_label(),
            view.cases_type.as_str()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let canvas = Canvas::default()
        .block(block)
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
                ctx.draw(&Circle {
                    x: bubble.center.lng,
                    y: bubble.center.lat,
                    radius: bubble.drawn_radius(&viewport),
                    color: rgb(bubble.rgb),
                });
            }

            if let Some((lat, lng)) = marker {
                ctx.print(
                    lng,
                    lat,
                    Span::styled(
                        "◆",
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}
