use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Shown while a request is in flight
pub struct LoadingPanel;

pub struct LoadingPanelProps<'a> {
    pub spinner: &'a str,
}

impl Component<Action> for LoadingPanel {
    type Props<'a> = LoadingPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .split(area);

        let line = Line::from(vec![
            Span::styled(props.spinner.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled(
                " Fetching weather data...",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .centered();
        frame.render_widget(Paragraph::new(line), chunks[0]);
    }
}

/// Shows one error sentence
pub struct ErrorPanel;

pub struct ErrorPanelProps<'a> {
    pub message: &'a str,
}

impl Component<Action> for ErrorPanel {
    type Props<'a> = ErrorPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // icon
            Constraint::Length(1), // "Error"
            Constraint::Length(1), // message
        ])
        .flex(Flex::Center)
        .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(ERROR_ICON).centered()),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(
                Line::from(vec![Span::styled(
                    "Error",
                    Style::default().fg(Color::Red).bold(),
                )])
                .centered(),
            ),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(
                Line::from(vec![Span::styled(
                    props.message.to_string(),
                    Style::default().fg(Color::Rgb(200, 100, 100)),
                )])
                .centered(),
            ),
            chunks[2],
        );
    }
}

/// Nothing searched yet, or the last error timed out
pub struct IdlePanel;

impl Component<Action> for IdlePanel {
    type Props<'a> = ();

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .split(area);

        let hint = Line::from(vec![
            Span::styled("Type a city and press ", Style::default().fg(Color::DarkGray)),
            Span::styled("enter", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" to see its weather", Style::default().fg(Color::DarkGray)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(hint), chunks[0]);
    }
}
