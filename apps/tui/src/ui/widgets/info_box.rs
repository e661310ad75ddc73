use crate::ui::widgets::cases_color;
use covid_core::InfoCard;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

pub fn render_info_box(card: &InfoCard, f: &mut Frame<'_>, area: Rect) {
    let color = cases_color(card.cases_type);

    let (border_type, border_style) = if card.active {
        (
            BorderType::Thick,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    } else {
        (BorderType::Plain, Style::default().fg(Color::Gray))
    };

    let block = Block::default()
        .title(format!(" {} [{}] ", card.title, card.cases_type.index() + 1))
        .borders(Borders::ALL)
        .border_type(border_type)
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

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}
