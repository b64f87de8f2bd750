//! Static hero markup: the backdrop behind the snow and the text in front.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use shrine_snow::hsl_to_rgb;

pub const HEADING: &str = "Winter at the Shrine";
pub const TAGLINE: &str = "Experience the serenity of a snowy Japanese shrine";
pub const BUTTON: &str = "Explore Now";

/// Button fill.
const BUTTON_RED: Color = Color::Rgb(220, 38, 38);

/// Lacquer red of the gate.
const GATE_RED: Color = Color::Rgb(120, 22, 18);

/// Night sky fading into a snowfield, with a shrine gate on the horizon.
#[derive(Debug, Default, Clone, Copy)]
pub struct Backdrop;

impl Backdrop {
    /// Row where the sky meets the snow.
    fn horizon(area: Rect) -> u16 {
        area.y + (u32::from(area.height) * 2 / 3) as u16
    }

    fn sky_color(progress: f32) -> Color {
        // Deep indigo at the top, hazy blue towards the horizon.
        hsl_to_rgb(225.0 - progress * 10.0, 0.45, 0.07 + progress * 0.2)
    }

    fn snow_color(progress: f32) -> Color {
        hsl_to_rgb(210.0, 0.2, 0.62 + progress * 0.2)
    }

    fn render_gate(area: Rect, horizon: u16, buf: &mut Buffer) {
        let width = (area.width / 3).clamp(12, 48);
        let height = (area.height / 3).clamp(5, 14);
        if area.width < width + 4 || horizon < area.y + height {
            return;
        }

        let left = area.x + (area.width - width) / 2;
        let top = horizon - height;
        let style = Style::new().bg(GATE_RED);

        // Kasagi overhangs the pillars; nuki sits two rows below it.
        let kasagi = Rect::new(left - 2, top, width + 4, 1);
        let nuki = Rect::new(left, top + 2, width, 1);
        let pillar_left = Rect::new(left + 2, top + 1, 2, height - 1);
        let pillar_right = Rect::new(left + width - 4, top + 1, 2, height - 1);
        for part in [kasagi, nuki, pillar_left, pillar_right] {
            buf.set_style(part.intersection(area), style);
        }
    }
}

impl Widget for Backdrop {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }

        let horizon = Self::horizon(area);
        for y in area.top()..area.bottom() {
            let color = if y < horizon {
                Self::sky_color((y - area.y) as f32 / (horizon - area.y).max(1) as f32)
            } else {
                Self::snow_color((y - horizon) as f32 / (area.bottom() - horizon).max(1) as f32)
            };
            buf.set_style(Rect::new(area.x, y, area.width, 1), Style::new().bg(color));
        }
        Self::render_gate(area, horizon, buf);
    }
}

/// Heading, tagline, button and key help, centred over everything else.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeroText;

impl Widget for HeroText {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Tagline
            Constraint::Length(2), // Spacing
            Constraint::Length(1), // Button
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);

        Paragraph::new(Line::from(HEADING.bold().white()))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(Line::from(TAGLINE.white()))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        let button = Span::styled(
            format!("  {BUTTON}  "),
            Style::new().bold().fg(Color::White).bg(BUTTON_RED),
        );
        Paragraph::new(Line::from(button))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        Line::from(vec![
            "q".bold().white(),
            " quit  ".gray(),
            "move the mouse".bold().white(),
            " to part the snow".gray(),
        ])
        .centered()
        .render(chunks[7], buf);
    }
}
