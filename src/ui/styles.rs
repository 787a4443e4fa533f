use ratatui::style::{Color, Modifier, Style};

pub struct CardStyles {
    pub title: Style,
    pub step: Style,
    pub current_step: Style,
    pub done_step: Style,
    pub ingredient: Style,
    pub crossed_off: Style,
    pub cursor: Style,
    pub timer: Style,
    pub timer_alert: Style,
    pub success: Style,
    pub gauge: Style,
    pub hint: Style,
    pub flash: Style,
}

impl Default for CardStyles {
    fn default() -> Self {
        Self {
            title: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            step: Style::default(),
            current_step: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            done_step: Style::default().add_modifier(Modifier::DIM),
            ingredient: Style::default(),
            crossed_off: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::CROSSED_OUT | Modifier::DIM),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            timer: Style::default().add_modifier(Modifier::BOLD),
            timer_alert: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            gauge: Style::default().fg(Color::Cyan),
            hint: Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
            flash: Style::default().add_modifier(Modifier::RAPID_BLINK | Modifier::REVERSED),
        }
    }
}
