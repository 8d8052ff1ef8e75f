use ratatui::style::Modifier;
use ratatui::style::Style;

#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub danger: Style,
    pub trigger: Style,
    pub trigger_focused: Style,
    pub overlay: Style,
    pub border: Style,
    pub group_header: Style,
    pub highlighted: Style,
    pub selected: Style,
    pub disabled: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            danger: Style::default().red(),
            trigger: Style::default(),
            trigger_focused: Style::default().cyan(),
            overlay: Style::default(),
            border: Style::default().dark_gray(),
            group_header: Style::default().dark_gray().add_modifier(Modifier::BOLD),
            highlighted: Style::default().add_modifier(Modifier::REVERSED),
            selected: Style::default().cyan().add_modifier(Modifier::BOLD),
            disabled: Style::default().dark_gray().add_modifier(Modifier::DIM),
        }
    }
}
