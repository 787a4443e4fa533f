// controller.rs: Binds a cooking session to its presenter and timers

use crate::event::{Action, Event};
use crate::state::{CookingSession, Effect, StepProgress};
use crate::timer::{Scheduler, TaskHandle};
use crate::ui::{Presenter, Section};
use std::time::Duration;
use tracing::debug;

/// Delay between the timer reaching zero and the "time's up" notification.
pub const ANNOUNCE_DELAY: Duration = Duration::from_millis(500);
/// How long sections stay expanded after a print.
pub const PRINT_RESTORE_DELAY: Duration = Duration::from_millis(1000);

/// The single live tick source and the generation its ticks carry.
#[derive(Debug)]
struct TickRegistration {
    generation: u64,
    _handle: TaskHandle,
}

/// A scheduled "time's up" notification. Only `Event::Announce` carrying
/// the same generation may deliver it.
#[derive(Debug)]
struct PendingAnnouncement {
    generation: u64,
    _handle: TaskHandle,
}

#[derive(Debug)]
struct PendingRestore {
    generation: u64,
    was_visible: Vec<(Section, bool)>,
    _handle: TaskHandle,
}

pub struct RecipeController<P: Presenter> {
    session: CookingSession,
    presenter: P,
    scheduler: Scheduler,
    ticker: Option<TickRegistration>,
    generation: u64,
    /// Generation counter for one-shot events (announcements, print restores).
    scheduled: u64,
    announcement: Option<PendingAnnouncement>,
    restore: Option<PendingRestore>,
}

impl<P: Presenter> RecipeController<P> {
    /// Takes ownership of the session and paints the initial card.
    pub fn new(session: CookingSession, presenter: P, scheduler: Scheduler) -> Self {
        let mut controller = Self {
            session,
            presenter,
            scheduler,
            ticker: None,
            generation: 0,
            scheduled: 0,
            announcement: None,
            restore: None,
        };
        let effects = controller.session.refresh();
        controller.apply(effects);
        controller
    }

    pub fn session(&self) -> &CookingSession {
        &self.session
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Whether a tick source is currently registered.
    pub fn ticker_armed(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Action(action) => self.dispatch(action),
            Event::Tick(generation) => self.on_tick(generation),
            Event::Announce(generation) => self.on_announce(generation),
            Event::RestoreSections(generation) => self.restore_sections(generation),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Primary => match self.session.step_progress() {
                StepProgress::Idle => self.start(),
                StepProgress::InProgress(_) => self.advance(),
                StepProgress::Completed => {}
            },
            Action::Start => self.start(),
            Action::Advance => self.advance(),
            Action::Reset => {
                if self.session.reset_available() {
                    self.reset();
                }
            }
            Action::ToggleSection(section) => self.toggle_section(section),
            Action::CursorUp => self.presenter.move_cursor(-1),
            Action::CursorDown => self.presenter.move_cursor(1),
            Action::CrossOff => self.presenter.cross_off_selected(),
            Action::Print => self.print(),
            Action::Quit => {}
        }
    }

    pub fn start(&mut self) {
        let effects = self.session.start();
        self.apply(effects);
    }

    pub fn advance(&mut self) {
        let effects = self.session.advance();
        self.apply(effects);
    }

    pub fn reset(&mut self) {
        let effects = self.session.reset();
        self.apply(effects);
    }

    pub fn start_timer(&mut self) {
        let effects = self.session.start_timer();
        self.apply(effects);
    }

    pub fn stop_timer(&mut self) {
        let effects = self.session.stop_timer();
        self.apply(effects);
    }

    pub fn toggle_section(&mut self, section: Section) {
        debug!(section = section.name(), "section toggled");
        if self.presenter.section_visible(section) {
            self.presenter.hide_section(section);
        } else {
            self.presenter.reveal_section(section);
        }
    }

    fn on_tick(&mut self, generation: u64) {
        // Ticks queued by a source that has since been cancelled are stale.
        match &self.ticker {
            Some(reg) if reg.generation == generation => {}
            _ => {
                debug!(generation, "stale tick dropped");
                return;
            }
        }
        let effects = self.session.tick();
        self.apply(effects);
    }

    fn next_scheduled(&mut self) -> u64 {
        self.scheduled += 1;
        self.scheduled
    }

    fn on_announce(&mut self, generation: u64) {
        match &self.announcement {
            Some(pending) if pending.generation == generation => {}
            _ => {
                debug!(generation, "stale announcement dropped");
                return;
            }
        }
        self.announcement = None;
        self.presenter.announce_completion();
    }

    /// Expand everything, print, and schedule putting the sections back.
    fn print(&mut self) {
        let was_visible = match self.restore.take() {
            // Still inside a previous print window: keep the original layout.
            Some(pending) => pending.was_visible,
            None => Section::ALL
                .iter()
                .map(|&s| (s, self.presenter.section_visible(s)))
                .collect(),
        };
        for section in Section::ALL {
            self.presenter.reveal_section(section);
        }
        self.presenter.print();
        let generation = self.next_scheduled();
        let handle = self
            .scheduler
            .after(PRINT_RESTORE_DELAY, Event::RestoreSections(generation));
        self.restore = Some(PendingRestore {
            generation,
            was_visible,
            _handle: handle,
        });
    }

    fn restore_sections(&mut self, generation: u64) {
        // A restore sent just before a newer print must not close its window.
        let pending = match self.restore.take() {
            Some(pending) if pending.generation == generation => pending,
            other => {
                debug!(generation, "stale restore dropped");
                self.restore = other;
                return;
            }
        };
        for (section, visible) in pending.was_visible {
            if !visible {
                self.presenter.hide_section(section);
            }
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ArmTicker => {
                    if self.ticker.is_none() {
                        self.generation += 1;
                        debug!(generation = self.generation, "tick source armed");
                        self.ticker = Some(TickRegistration {
                            generation: self.generation,
                            _handle: self.scheduler.every_second(self.generation),
                        });
                    }
                }
                Effect::CancelTicker => {
                    if let Some(reg) = self.ticker.take() {
                        debug!(generation = reg.generation, "tick source cancelled");
                    }
                }
                Effect::AnnounceCompletion => {
                    let generation = self.next_scheduled();
                    self.announcement = Some(PendingAnnouncement {
                        generation,
                        _handle: self.scheduler.after(ANNOUNCE_DELAY, Event::Announce(generation)),
                    });
                }
                Effect::WithdrawAnnouncement => self.announcement = None,
                Effect::RevealSection(section) => {
                    if !self.presenter.section_visible(section) {
                        self.presenter.reveal_section(section);
                    }
                }
                Effect::HighlightStep(step) => self.presenter.highlight_step(step),
                Effect::ClearHighlights => self.presenter.clear_highlights(),
                Effect::SetProgress(p) => self.presenter.set_progress(p.percent, &p.text),
                Effect::ShowCompletion(message) => self.presenter.show_completion(message),
                Effect::ClearCompletion => self.presenter.clear_completion(),
                Effect::SetTimerText(text) => self.presenter.set_timer_text(&text),
                Effect::SetTimerAlert => self.presenter.set_timer_alert(),
                Effect::ClearTimerAlert => self.presenter.clear_timer_alert(),
                Effect::ShowTimer => self.presenter.set_timer_visible(true),
                Effect::HideTimer => self.presenter.set_timer_visible(false),
                Effect::ExpiryFlash => self.presenter.flash_timer(),
                Effect::Celebrate => self.presenter.celebrate(),
                Effect::RelabelAdvance(label) => self.presenter.set_advance_label(label),
                Effect::ShowControls(controls) => self.presenter.set_controls(controls),
                Effect::ClearIngredients => self.presenter.clear_ingredients(),
            }
        }
        debug_assert_eq!(self.ticker.is_some(), self.session.timer_running());
    }
}
