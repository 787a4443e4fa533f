use crate::controller::RecipeController;
use crate::event::{Action, Event, action_for_command};
use crate::recipe::Recipe;
use crate::state::CookingSession;
use crate::timer::Scheduler;
use crate::ui::{Controls, Presenter, Section, print};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Line-oriented presenter: every visible change becomes one stdout line,
/// so the card can be driven and observed from scripts.
pub struct PipePresenter<W: Write> {
    out: W,
    recipe: Recipe,
    visible: [bool; 2],
    last_timer: Option<String>,
    last_progress: Option<String>,
}

impl<W: Write> PipePresenter<W> {
    pub fn new(recipe: Recipe, out: W) -> Self {
        Self {
            out,
            recipe,
            visible: [false; 2],
            last_timer: None,
            last_progress: None,
        }
    }

    fn emit(&mut self, line: &str) {
        // A closed stdout is not something the card can do anything about.
        let _ = writeln!(self.out, "{}", line);
        let _ = self.out.flush();
    }

    fn index(section: Section) -> usize {
        match section {
            Section::Ingredients => 0,
            Section::Instructions => 1,
        }
    }
}

impl<W: Write> Presenter for PipePresenter<W> {
    fn reveal_section(&mut self, section: Section) {
        if std::mem::replace(&mut self.visible[Self::index(section)], true) {
            return;
        }
        self.emit(&format!("[{}]", section.toggle_label(true)));
        match section {
            Section::Ingredients => {
                let items: Vec<String> = self.recipe.ingredients.iter().map(|i| format!("  - {}", i)).collect();
                for item in items {
                    self.emit(&item);
                }
            }
            Section::Instructions => {
                let items: Vec<String> = self
                    .recipe
                    .steps
                    .iter()
                    .enumerate()
                    .map(|(i, s)| format!("  {}. {}", i + 1, s.title))
                    .collect();
                for item in items {
                    self.emit(&item);
                }
            }
        }
    }

    fn hide_section(&mut self, section: Section) {
        if std::mem::replace(&mut self.visible[Self::index(section)], false) {
            self.emit(&format!("[{}]", section.toggle_label(false)));
        }
    }

    fn section_visible(&self, section: Section) -> bool {
        self.visible[Self::index(section)]
    }

    fn highlight_step(&mut self, step: usize) {
        let Some(s) = self.recipe.step(step) else {
            return;
        };
        let line = format!("step {}: {} - {}", step, s.title, s.text);
        self.emit(&line);
    }

    fn clear_highlights(&mut self) {}

    fn set_progress(&mut self, percent: f64, text: &str) {
        let line = format!(
            "progress [{}] {:.0}% {}",
            crate::text_utils::progress_bar(percent, 20),
            percent,
            text
        );
        if self.last_progress.as_deref() != Some(line.as_str()) {
            self.emit(&line);
            self.last_progress = Some(line);
        }
    }

    fn show_completion(&mut self, message: &str) {
        self.emit(&format!("done: {}", message));
    }

    fn clear_completion(&mut self) {}

    fn set_timer_text(&mut self, text: &str) {
        if self.last_timer.as_deref() != Some(text) {
            self.emit(&format!("timer {}", text));
            self.last_timer = Some(text.to_string());
        }
    }

    fn set_timer_alert(&mut self) {
        self.emit("timer expired");
    }

    fn clear_timer_alert(&mut self) {}

    fn set_timer_visible(&mut self, _visible: bool) {}

    fn set_controls(&mut self, controls: Controls) {
        let line = match controls {
            Controls::Start => "controls: start",
            Controls::Cooking => "controls: next, reset",
            Controls::Finished => "controls: reset",
        };
        self.emit(line);
    }

    fn set_advance_label(&mut self, label: &str) {
        self.emit(&format!("next is now \"{}\"", label));
    }

    fn announce_completion(&mut self) {
        self.emit(&format!("alert: {}", crate::ui::view::TIMES_UP_MESSAGE));
    }

    // Pipe mode has no ingredient cursor, so nothing is ever crossed off.
    fn clear_ingredients(&mut self) {}

    fn print(&mut self) {
        let text = print::render_card(&self.recipe, &[]);
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }
}

/// Pipe mode: commands on stdin, display changes on stdout.
pub async fn display_card_pipe(
    recipe: Recipe,
    cfg: crate::Config,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (timer_tx, mut timer_rx) = mpsc::channel(32);
    let scheduler = Scheduler::new(timer_tx, cfg.second());
    let session = CookingSession::for_recipe(&recipe);
    let presenter = PipePresenter::new(recipe, std::io::stdout());
    let mut controller = RecipeController::new(session, presenter, scheduler);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // stdin closed
                    break;
                };
                match action_for_command(&line) {
                    Some(Action::Quit) => break,
                    Some(action) => controller.handle_event(Event::Action(action)),
                    None => tracing::debug!(command = %line.trim(), "unknown command"),
                }
            }
            Some(event) = timer_rx.recv() => controller.handle_event(event),
        }
    }
    Ok(())
}
