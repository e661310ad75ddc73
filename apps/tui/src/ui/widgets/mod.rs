pub mod charts;
pub mod info_box;
pub mod map;
pub mod popup;
pub mod tables;

use covid_core::CasesType;
use ratatui::style::Color;

pub const fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

pub const fn cases_color(cases_type: CasesType) -> Color {
    rgb(cases_type.style().rgb)
}
