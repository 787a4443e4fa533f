pub mod modern;
pub mod pipe;
pub mod print;
pub mod render;
pub mod styles;
pub mod view;

pub use view::CardView;

/// Collapsible content blocks of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Ingredients,
    Instructions,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Ingredients, Section::Instructions];

    pub fn name(self) -> &'static str {
        match self {
            Section::Ingredients => "ingredients",
            Section::Instructions => "instructions",
        }
    }

    /// Label of the toggle affordance for the given visibility.
    pub fn toggle_label(self, visible: bool) -> &'static str {
        match (self, visible) {
            (Section::Ingredients, true) => "Hide Ingredients",
            (Section::Ingredients, false) => "Show Ingredients",
            (Section::Instructions, true) => "Hide Instructions",
            (Section::Instructions, false) => "Show Instructions",
        }
    }
}

/// Which controls the card offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Controls {
    /// Only "Start Cooking".
    #[default]
    Start,
    /// Advance/finish plus reset.
    Cooking,
    /// Only reset.
    Finished,
}

/// The display surface the controller drives.
///
/// Cosmetic hooks default to no-ops so a host that cannot render them
/// simply ignores them.
pub trait Presenter {
    fn reveal_section(&mut self, section: Section);
    fn hide_section(&mut self, section: Section);
    fn section_visible(&self, section: Section) -> bool;

    /// Mark `step` as the current one, clearing any previous highlight, and bring it into view.
    fn highlight_step(&mut self, step: usize);
    fn clear_highlights(&mut self);

    fn set_progress(&mut self, percent: f64, text: &str);
    fn show_completion(&mut self, message: &str);
    fn clear_completion(&mut self);

    fn set_timer_text(&mut self, text: &str);
    fn set_timer_alert(&mut self);
    fn clear_timer_alert(&mut self);
    fn set_timer_visible(&mut self, visible: bool);

    fn set_controls(&mut self, controls: Controls);
    fn set_advance_label(&mut self, label: &str);

    /// "Time's up" notification.
    fn announce_completion(&mut self);

    fn clear_ingredients(&mut self);

    fn flash_timer(&mut self) {}
    fn celebrate(&mut self) {}
    fn move_cursor(&mut self, _delta: isize) {}
    fn cross_off_selected(&mut self) {}
    fn print(&mut self) {}
}
