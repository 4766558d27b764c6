use chrono::{DateTime, FixedOffset};
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, ErrorPanel, ErrorPanelProps, IdlePanel, LoadingPanel, LoadingPanelProps,
    ResultPanel, ResultPanelProps, SearchBar, SearchBarProps,
};
use crate::action::Action;
use crate::state::{AppState, Panel};
use crate::view::WeatherView;

/// Props for WeatherWidget - read-only view of state
pub struct WeatherWidgetProps<'a> {
    pub state: &'a AppState,
    /// Render time; the date line and clock times use its offset
    pub now: DateTime<FixedOffset>,
    pub is_focused: bool,
}

/// Search bar above whichever panel is active
#[derive(Default)]
pub struct WeatherWidget {
    search: SearchBar,
}

impl WeatherWidget {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_props<'a>(state: &'a AppState, is_focused: bool) -> SearchBarProps<'a> {
        SearchBarProps {
            query: &state.query,
            focus: state.focus,
            button: state.button,
            spinner: state.spinner_frame(),
            is_focused,
            on_query_change: Action::SearchInputChange,
            on_query_submit: Action::SearchSubmit,
        }
    }
}

impl Component<Action> for WeatherWidget {
    type Props<'a> = WeatherWidgetProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let search_props = Self::search_props(props.state, true);
        self.search
            .handle_event(event, search_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherWidgetProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Search bar
            Constraint::Min(1),    // Active panel
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let search_props = Self::search_props(props.state, props.is_focused);
        self.search.render(frame, chunks[0], search_props);

        match &props.state.panel {
            Panel::Idle => IdlePanel.render(frame, chunks[1], ()),
            Panel::Loading => LoadingPanel.render(
                frame,
                chunks[1],
                LoadingPanelProps {
                    spinner: props.state.spinner_frame(),
                },
            ),
            Panel::Result(reading) => {
                let view = WeatherView::project(reading, &props.now);
                ResultPanel.render(frame, chunks[1], ResultPanelProps { view: &view });
            }
            Panel::Error { message, .. } => {
                ErrorPanel.render(frame, chunks[1], ErrorPanelProps { message })
            }
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("tab", "focus"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
