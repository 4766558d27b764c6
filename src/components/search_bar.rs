use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::state::{ButtonLabel, Focus, SearchButton};

const PLACEHOLDER: &str = "Enter a city name...";

/// Width of the search button including its border
pub const BUTTON_WIDTH: u16 = 16;

/// Text input plus the search button
pub struct SearchBar {
    input: TextInput,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub focus: Focus,
    pub button: SearchButton,
    pub spinner: &'a str,
    pub is_focused: bool,
    // Action constructors
    pub on_query_change: fn(String) -> Action,
    pub on_query_submit: fn(String) -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    fn button_label(button: SearchButton, spinner: &str) -> String {
        match button.label {
            ButtonLabel::Search => "Search".to_string(),
            ButtonLabel::Loading => format!("{spinner} Loading"),
        }
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Tab | KeyCode::BackTab => return vec![Action::UiFocusNext],
            KeyCode::Enter => {
                if !props.button.enabled {
                    return Vec::new();
                }
                return vec![(props.on_query_submit)(props.query.to_string())];
            }
            _ => {}
        }

        match props.focus {
            Focus::Button => match key.code {
                KeyCode::Char(' ') if props.button.enabled => {
                    vec![(props.on_query_submit)(props.query.to_string())]
                }
                _ => Vec::new(),
            },
            // All other keys go to the input
            Focus::Input => {
                let input_props = TextInputProps {
                    value: props.query,
                    placeholder: PLACEHOLDER,
                    is_focused: props.is_focused && props.focus == Focus::Input,
                    style: TextInputStyle {
                        base: BaseStyle {
                            border: None,
                            padding: Padding::new(1, 0, 1, 0),
                            bg: None,
                            fg: None,
                        },
                        placeholder_style: None,
                        cursor_style: None,
                    },
                    on_change: props.on_query_change,
                    on_submit: props.on_query_submit,
                    on_cursor_move: Some(|_| Action::Render),
                };
                self.input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::horizontal([
            Constraint::Min(10),              // Input
            Constraint::Length(1),            // Gap
            Constraint::Length(BUTTON_WIDTH), // Button
        ])
        .split(area);

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused && props.focus == Focus::Input,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::all(1),
                    bg: Some(Color::Rgb(50, 50, 60)),
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_query_change,
            on_submit: props.on_query_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, chunks[0], input_props);

        let button_focused = props.is_focused && props.focus == Focus::Button;
        let border_style = if button_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let label_style = if props.button.enabled {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let button = Paragraph::new(Line::styled(
            Self::button_label(props.button, props.spinner),
            label_style,
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(button, chunks[2]);
    }
}
