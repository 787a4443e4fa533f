//! In-memory view model of the recipe card.
//!
//! `CardView` is what the controller paints into; the TUI renders it and
//! tests inspect it directly.

use crate::recipe::Recipe;
use crate::state::NEXT_LABEL;
use crate::ui::{Controls, Presenter, Section, print};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const TIMES_UP_MESSAGE: &str = "Cooking time complete! Your recipe is ready!";
/// Stagger between items of a freshly revealed section.
pub const ITEM_STAGGER: Duration = Duration::from_millis(100);
pub const CELEBRATION: Duration = Duration::from_millis(800);
pub const EXPIRY_FLASH: Duration = Duration::from_millis(1000);

#[derive(Debug, Default, Clone)]
struct SectionState {
    visible: bool,
    revealed_at: Option<Instant>,
}

#[derive(Debug)]
pub struct CardView {
    recipe: Recipe,
    ingredients: SectionState,
    instructions: SectionState,
    highlighted: Option<usize>,
    progress_percent: f64,
    progress_text: String,
    completion: Option<String>,
    timer_text: String,
    timer_alert: bool,
    timer_visible: bool,
    flash_at: Option<Instant>,
    celebrate_at: Option<Instant>,
    controls: Controls,
    advance_label: String,
    crossed: Vec<bool>,
    cursor: usize,
    notification: Option<String>,
    announcements: usize,
    print_to: Option<PathBuf>,
    last_print: Option<String>,
    status: Option<String>,
}

impl CardView {
    pub fn new(recipe: Recipe, print_to: Option<PathBuf>) -> Self {
        let crossed = vec![false; recipe.ingredients.len()];
        Self {
            recipe,
            ingredients: SectionState::default(),
            instructions: SectionState::default(),
            highlighted: None,
            progress_percent: 0.0,
            progress_text: String::new(),
            completion: None,
            timer_text: String::new(),
            timer_alert: false,
            timer_visible: false,
            flash_at: None,
            celebrate_at: None,
            controls: Controls::Start,
            advance_label: NEXT_LABEL.to_string(),
            crossed,
            cursor: 0,
            notification: None,
            announcements: 0,
            print_to,
            last_print: None,
            status: None,
        }
    }

    fn slot(&self, section: Section) -> &SectionState {
        match section {
            Section::Ingredients => &self.ingredients,
            Section::Instructions => &self.instructions,
        }
    }

    fn slot_mut(&mut self, section: Section) -> &mut SectionState {
        match section {
            Section::Ingredients => &mut self.ingredients,
            Section::Instructions => &mut self.instructions,
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn toggle_label(&self, section: Section) -> &'static str {
        section.toggle_label(self.slot(section).visible)
    }

    /// Number of items of `section` whose entrance animation has begun at `now`.
    pub fn revealed_items(&self, section: Section, now: Instant) -> usize {
        let total = match section {
            Section::Ingredients => self.recipe.ingredients.len(),
            Section::Instructions => self.recipe.steps.len(),
        };
        let slot = self.slot(section);
        if !slot.visible {
            return 0;
        }
        match slot.revealed_at {
            Some(at) => {
                let elapsed = now.saturating_duration_since(at).as_millis();
                let started = (elapsed / ITEM_STAGGER.as_millis()) as usize + 1;
                started.min(total)
            }
            None => total,
        }
    }

    /// Earliest instant at which a running animation changes what is drawn.
    pub fn next_frame(&self, now: Instant) -> Option<Instant> {
        let mut next: Option<Instant> = None;
        let mut consider = |at: Instant| {
            if at > now {
                next = Some(next.map_or(at, |n| n.min(at)));
            }
        };
        for section in Section::ALL {
            if let Some(at) = self.slot(section).revealed_at {
                let shown = self.revealed_items(section, now) as u32;
                consider(at + ITEM_STAGGER * shown);
            }
        }
        if let Some(at) = self.celebrate_at {
            consider(at + CELEBRATION);
        }
        if let Some(at) = self.flash_at {
            consider(at + EXPIRY_FLASH);
        }
        next
    }

    pub fn celebrating(&self, now: Instant) -> bool {
        self.celebrate_at
            .is_some_and(|at| now.saturating_duration_since(at) < CELEBRATION)
    }

    pub fn flashing(&self, now: Instant) -> bool {
        self.flash_at
            .is_some_and(|at| now.saturating_duration_since(at) < EXPIRY_FLASH)
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn progress_text(&self) -> &str {
        &self.progress_text
    }

    pub fn completion(&self) -> Option<&str> {
        self.completion.as_deref()
    }

    pub fn timer_text(&self) -> &str {
        &self.timer_text
    }

    pub fn timer_alert(&self) -> bool {
        self.timer_alert
    }

    pub fn timer_visible(&self) -> bool {
        self.timer_visible
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn advance_label(&self) -> &str {
        &self.advance_label
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_crossed_off(&self, index: usize) -> bool {
        self.crossed.get(index).copied().unwrap_or(false)
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn announcements(&self) -> usize {
        self.announcements
    }

    pub fn last_print(&self) -> Option<&str> {
        self.last_print.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl Presenter for CardView {
    fn reveal_section(&mut self, section: Section) {
        let slot = self.slot_mut(section);
        if slot.visible {
            return;
        }
        slot.visible = true;
        slot.revealed_at = Some(Instant::now());
    }

    fn hide_section(&mut self, section: Section) {
        let slot = self.slot_mut(section);
        slot.visible = false;
        slot.revealed_at = None;
    }

    fn section_visible(&self, section: Section) -> bool {
        self.slot(section).visible
    }

    fn highlight_step(&mut self, step: usize) {
        // Unknown step numbers clear the highlight and mark nothing.
        self.highlighted = self.recipe.step(step).map(|_| step);
    }

    fn clear_highlights(&mut self) {
        self.highlighted = None;
    }

    fn set_progress(&mut self, percent: f64, text: &str) {
        self.progress_percent = percent.clamp(0.0, 100.0);
        self.progress_text = text.to_string();
    }

    fn show_completion(&mut self, message: &str) {
        self.completion = Some(message.to_string());
    }

    fn clear_completion(&mut self) {
        self.completion = None;
        self.celebrate_at = None;
    }

    fn set_timer_text(&mut self, text: &str) {
        self.timer_text = text.to_string();
    }

    fn set_timer_alert(&mut self) {
        self.timer_alert = true;
    }

    fn clear_timer_alert(&mut self) {
        self.timer_alert = false;
        self.flash_at = None;
    }

    fn set_timer_visible(&mut self, visible: bool) {
        self.timer_visible = visible;
    }

    fn set_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }

    fn set_advance_label(&mut self, label: &str) {
        self.advance_label = label.to_string();
    }

    fn announce_completion(&mut self) {
        self.announcements += 1;
        self.notification = Some(TIMES_UP_MESSAGE.to_string());
    }

    fn clear_ingredients(&mut self) {
        self.crossed.iter_mut().for_each(|c| *c = false);
    }

    fn flash_timer(&mut self) {
        self.flash_at = Some(Instant::now());
    }

    fn celebrate(&mut self) {
        self.celebrate_at = Some(Instant::now());
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.crossed.is_empty() || !self.ingredients.visible {
            return;
        }
        let last = self.crossed.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    fn cross_off_selected(&mut self) {
        if !self.ingredients.visible {
            return;
        }
        if let Some(c) = self.crossed.get_mut(self.cursor) {
            *c = !*c;
        }
    }

    fn print(&mut self) {
        let text = print::render_card(&self.recipe, &self.crossed);
        self.status = match &self.print_to {
            Some(path) => match std::fs::write(path, &text) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "Printed recipe card");
                    Some(format!("Printed to {}", path.display()))
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to print recipe card");
                    Some(format!("Print failed: {}", e))
                }
            },
            None => Some("Print preview ready".to_string()),
        };
        self.last_print = Some(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::default_recipe;

    fn view() -> CardView {
        CardView::new(default_recipe(), None)
    }

    #[test]
    fn reveal_staggers_items() {
        let mut v = view();
        v.reveal_section(Section::Instructions);
        let at = v.instructions.revealed_at.unwrap();
        assert_eq!(v.revealed_items(Section::Instructions, at), 1);
        assert_eq!(
            v.revealed_items(Section::Instructions, at + Duration::from_millis(250)),
            3
        );
        assert_eq!(v.revealed_items(Section::Instructions, at + Duration::from_secs(5)), 6);
        assert_eq!(v.next_frame(at), Some(at + ITEM_STAGGER));
        assert_eq!(v.next_frame(at + Duration::from_secs(5)), None);
    }

    #[test]
    fn revealing_twice_keeps_animation_anchor() {
        let mut v = view();
        v.reveal_section(Section::Ingredients);
        let first = v.ingredients.revealed_at;
        v.reveal_section(Section::Ingredients);
        assert_eq!(v.ingredients.revealed_at, first);
    }

    #[test]
    fn hidden_section_shows_no_items() {
        let v = view();
        assert_eq!(v.revealed_items(Section::Ingredients, Instant::now()), 0);
    }

    #[test]
    fn highlight_ignores_unknown_steps() {
        let mut v = view();
        v.highlight_step(2);
        assert_eq!(v.highlighted(), Some(2));
        v.highlight_step(42);
        assert_eq!(v.highlighted(), None);
    }

    #[test]
    fn cursor_and_cross_off_need_visible_ingredients() {
        let mut v = view();
        v.move_cursor(1);
        v.cross_off_selected();
        assert_eq!(v.cursor(), 0);
        assert!(!v.is_crossed_off(0));

        v.reveal_section(Section::Ingredients);
        v.move_cursor(-1);
        assert_eq!(v.cursor(), 0);
        v.move_cursor(2);
        v.cross_off_selected();
        assert!(v.is_crossed_off(2));
        v.cross_off_selected();
        assert!(!v.is_crossed_off(2));

        v.move_cursor(100);
        assert_eq!(v.cursor(), 8);
    }

    #[test]
    fn clear_ingredients_unstrikes_everything() {
        let mut v = view();
        v.reveal_section(Section::Ingredients);
        v.cross_off_selected();
        v.move_cursor(1);
        v.cross_off_selected();
        v.clear_ingredients();
        assert!((0..9).all(|i| !v.is_crossed_off(i)));
    }

    #[test]
    fn announcement_sets_notification() {
        let mut v = view();
        v.announce_completion();
        assert_eq!(v.notification(), Some(TIMES_UP_MESSAGE));
        v.dismiss_notification();
        assert_eq!(v.notification(), None);
        assert_eq!(v.announcements(), 1);
    }

    #[test]
    fn print_without_target_keeps_preview() {
        let mut v = view();
        v.print();
        assert!(v.last_print().unwrap().contains("Creamy Garlic Mushroom Pasta"));
        assert_eq!(v.status(), Some("Print preview ready"));
    }

    #[test]
    fn print_writes_to_target() {
        let path = std::env::temp_dir().join(format!("recipe-cook-print-{}.txt", std::process::id()));
        let mut v = CardView::new(default_recipe(), Some(path.clone()));
        v.print();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(Some(written.as_str()), v.last_print());
        let _ = std::fs::remove_file(&path);
    }
}
