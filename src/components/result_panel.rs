use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::view::WeatherView;

pub struct ResultPanel;

pub struct ResultPanelProps<'a> {
    pub view: &'a WeatherView,
}

/// Height cap for the large temperature (terminus font)
const TEMP_CAP: u16 = 6;

impl Component<Action> for ResultPanel {
    type Props<'a> = ResultPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let view = props.view;
        let chunks = Layout::vertical([
            Constraint::Length(1),        // City, country
            Constraint::Length(1),        // Date
            Constraint::Length(1),        // Spacer
            Constraint::Max(TEMP_CAP),    // Temperature
            Constraint::Length(1),        // Icon + description
            Constraint::Length(1),        // Spacer
            Constraint::Length(4),        // Details
        ])
        .flex(Flex::Center)
        .split(area);

        let city = Line::from(vec![Span::styled(
            view.location.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )])
        .centered();
        frame.render_widget(Paragraph::new(city), chunks[0]);

        let date = Line::from(vec![Span::styled(
            view.date.clone(),
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(date), chunks[1]);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_gradient(view.celsius));
        frame.render_widget(ArtBox::new(&renderer, &view.temperature), chunks[3]);

        let condition = Line::from(vec![
            Span::raw(format!("{} ", view.icon.glyph())),
            Span::styled(view.description.clone(), Style::default().fg(Color::Gray)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(condition), chunks[4]);

        render_details(frame, chunks[6], view);
    }
}

fn render_details(frame: &mut Frame, area: Rect, view: &WeatherView) {
    let columns = Layout::horizontal([Constraint::Length(24), Constraint::Length(24)])
        .flex(Flex::Center)
        .spacing(2)
        .split(area);

    let left = [
        ("Feels like", &view.feels_like),
        ("Humidity", &view.humidity),
        ("Wind", &view.wind),
        ("Pressure", &view.pressure),
    ];
    let right = [
        ("Visibility", &view.visibility),
        ("Sunrise", &view.sunrise),
        ("Sunset", &view.sunset),
    ];

    frame.render_widget(Paragraph::new(detail_lines(&left)), columns[0]);
    frame.render_widget(Paragraph::new(detail_lines(&right)), columns[1]);
}

fn detail_lines(rows: &[(&str, &String)]) -> Vec<Line<'static>> {
    rows.iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<12}"), Style::default().fg(Color::DarkGray)),
                Span::styled((*value).clone(), Style::default().fg(Color::White)),
            ])
        })
        .collect()
}

fn temperature_gradient(celsius: f64) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (
            ArtColor::rgb(150, 200, 255),
            ArtColor::rgb(200, 230, 255),
        ),
        t if t < 15.0 => (
            ArtColor::rgb(100, 180, 255),
            ArtColor::rgb(150, 220, 200),
        ),
        t if t < 25.0 => (
            ArtColor::rgb(100, 200, 150),
            ArtColor::rgb(255, 220, 100),
        ),
        t if t < 35.0 => (
            ArtColor::rgb(255, 180, 80),
            ArtColor::rgb(255, 120, 80),
        ),
        _ => (
            ArtColor::rgb(255, 100, 80),
            ArtColor::rgb(255, 60, 60),
        ),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
