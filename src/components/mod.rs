pub mod result_panel;
pub mod search_bar;
pub mod status_panels;
pub mod weather_widget;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use result_panel::{ResultPanel, ResultPanelProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use status_panels::{
    ERROR_ICON, ErrorPanel, ErrorPanelProps, IdlePanel, LoadingPanel, LoadingPanelProps,
};
pub use weather_widget::{WeatherWidget, WeatherWidgetProps};
