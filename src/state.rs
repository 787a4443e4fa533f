// state.rs: Cooking session state machine
//
// Transitions mutate the session and return the display commands they
// produced. Nothing in here touches a terminal or a runtime.

use crate::recipe::Recipe;
use crate::timer::format_clock;
use crate::ui::{Controls, Section};
use tracing::{debug, info};

pub const NEXT_LABEL: &str = "Next Step";
pub const FINISH_LABEL: &str = "Finish";
pub const COMPLETION_MESSAGE: &str = "Recipe completed! Enjoy your meal!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepProgress {
    Idle,
    InProgress(usize),
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Stopped,
    Running,
    Expired,
}

/// Progress indicator contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub percent: f64,
    pub text: String,
}

/// A display or scheduling command emitted by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RevealSection(Section),
    HighlightStep(usize),
    ClearHighlights,
    SetProgress(Progress),
    ShowCompletion(&'static str),
    ClearCompletion,
    SetTimerText(String),
    SetTimerAlert,
    ClearTimerAlert,
    ShowTimer,
    HideTimer,
    ExpiryFlash,
    /// Deliver the "time's up" notification after a short delay.
    AnnounceCompletion,
    /// Drop a notification that has not been delivered yet.
    WithdrawAnnouncement,
    Celebrate,
    RelabelAdvance(&'static str),
    ShowControls(Controls),
    ClearIngredients,
    /// Register the repeating one-second tick source.
    ArmTicker,
    /// Release the tick source.
    CancelTicker,
}

/// Cooking progress and countdown for one recipe card.
#[derive(Debug, Clone, PartialEq)]
pub struct CookingSession {
    progress: StepProgress,
    timer: TimerPhase,
    total_steps: usize,
    remaining_seconds: u32,
    total_time_seconds: u32,
}

impl CookingSession {
    pub fn new(total_steps: usize, total_time_seconds: u32) -> Self {
        Self {
            progress: StepProgress::Idle,
            timer: TimerPhase::Stopped,
            total_steps: total_steps.max(1),
            remaining_seconds: total_time_seconds,
            total_time_seconds,
        }
    }

    pub fn for_recipe(recipe: &Recipe) -> Self {
        Self::new(recipe.total_steps(), recipe.total_time_seconds())
    }

    pub fn step_progress(&self) -> StepProgress {
        self.progress
    }

    pub fn timer_phase(&self) -> TimerPhase {
        self.timer
    }

    pub fn timer_running(&self) -> bool {
        self.timer == TimerPhase::Running
    }

    /// 0 before starting, `total_steps` once completed.
    pub fn current_step(&self) -> usize {
        match self.progress {
            StepProgress::Idle => 0,
            StepProgress::InProgress(k) => k,
            StepProgress::Completed => self.total_steps,
        }
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn total_time_seconds(&self) -> u32 {
        self.total_time_seconds
    }

    pub fn controls(&self) -> Controls {
        match self.progress {
            StepProgress::Idle => Controls::Start,
            StepProgress::InProgress(_) => Controls::Cooking,
            StepProgress::Completed => Controls::Finished,
        }
    }

    pub fn reset_available(&self) -> bool {
        self.progress != StepProgress::Idle
    }

    pub fn timer_text(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    pub fn progress(&self) -> Progress {
        let step = self.current_step();
        let percent = step as f64 / self.total_steps as f64 * 100.0;
        let text = match self.progress {
            StepProgress::Idle => "Ready to start".to_string(),
            StepProgress::Completed => "Recipe completed!".to_string(),
            StepProgress::InProgress(k) => format!("Step {} of {}", k, self.total_steps),
        };
        Progress { percent, text }
    }

    /// Effects that paint the whole card from scratch.
    pub fn refresh(&self) -> Vec<Effect> {
        let mut effects = vec![
            Effect::SetTimerText(self.timer_text()),
            Effect::ShowControls(self.controls()),
            Effect::SetProgress(self.progress()),
        ];
        if let StepProgress::InProgress(k) = self.progress {
            effects.push(Effect::HighlightStep(k));
        }
        effects
    }

    /// Begin cooking. Does nothing once cooking has started.
    pub fn start(&mut self) -> Vec<Effect> {
        if self.progress != StepProgress::Idle {
            debug!(progress = ?self.progress, "start ignored");
            return Vec::new();
        }
        let mut effects = vec![
            Effect::RevealSection(Section::Instructions),
            Effect::ShowControls(Controls::Cooking),
            Effect::ShowTimer,
        ];
        effects.extend(self.start_timer());
        self.progress = StepProgress::InProgress(1);
        debug!(total_steps = self.total_steps, "cooking started");
        effects.push(Effect::HighlightStep(1));
        effects.push(Effect::SetProgress(self.progress()));
        if self.total_steps == 1 {
            effects.push(Effect::RelabelAdvance(FINISH_LABEL));
        }
        effects
    }

    /// Move to the next step, or finish when on the last one.
    pub fn advance(&mut self) -> Vec<Effect> {
        let StepProgress::InProgress(k) = self.progress else {
            debug!(progress = ?self.progress, "advance ignored");
            return Vec::new();
        };
        if k < self.total_steps {
            let next = k + 1;
            self.progress = StepProgress::InProgress(next);
            debug!(step = next, "advanced");
            let mut effects = vec![
                Effect::HighlightStep(next),
                Effect::SetProgress(self.progress()),
            ];
            if next == self.total_steps {
                effects.push(Effect::RelabelAdvance(FINISH_LABEL));
            }
            return effects;
        }

        self.progress = StepProgress::Completed;
        let mut effects = self.stop_timer();
        info!(remaining = self.remaining_seconds, "recipe completed");
        effects.push(Effect::ShowCompletion(COMPLETION_MESSAGE));
        effects.push(Effect::ShowControls(Controls::Finished));
        effects.push(Effect::Celebrate);
        effects
    }

    /// Return to the untouched card. Allowed from any state.
    pub fn reset(&mut self) -> Vec<Effect> {
        let mut effects = self.stop_timer();
        self.progress = StepProgress::Idle;
        self.timer = TimerPhase::Stopped;
        self.remaining_seconds = self.total_time_seconds;
        debug!("session reset");
        effects.extend([
            Effect::WithdrawAnnouncement,
            Effect::SetTimerText(self.timer_text()),
            Effect::ClearTimerAlert,
            Effect::HideTimer,
            Effect::ClearHighlights,
            Effect::ClearCompletion,
            Effect::RelabelAdvance(NEXT_LABEL),
            Effect::ShowControls(Controls::Start),
            Effect::ClearIngredients,
            Effect::SetProgress(self.progress()),
        ]);
        effects
    }

    /// Start the countdown. A running or expired timer is left alone.
    pub fn start_timer(&mut self) -> Vec<Effect> {
        if self.timer != TimerPhase::Stopped {
            debug!(timer = ?self.timer, "start_timer ignored");
            return Vec::new();
        }
        self.timer = TimerPhase::Running;
        debug!(remaining = self.remaining_seconds, "timer started");
        vec![Effect::ArmTicker]
    }

    /// Stop the countdown. Idempotent; an expired timer stays expired.
    pub fn stop_timer(&mut self) -> Vec<Effect> {
        if self.timer != TimerPhase::Running {
            return Vec::new();
        }
        self.timer = TimerPhase::Stopped;
        debug!(remaining = self.remaining_seconds, "timer stopped");
        vec![Effect::CancelTicker]
    }

    /// One simulated second elapsed. Ignored unless the timer is running.
    pub fn tick(&mut self) -> Vec<Effect> {
        if self.timer != TimerPhase::Running {
            return Vec::new();
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return vec![Effect::SetTimerText(self.timer_text())];
        }

        self.timer = TimerPhase::Expired;
        info!("cooking time is up");
        vec![
            Effect::CancelTicker,
            Effect::SetTimerText(format_clock(0)),
            Effect::SetTimerAlert,
            Effect::ExpiryFlash,
            Effect::AnnounceCompletion,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CookingSession {
        CookingSession::new(6, 1620)
    }

    fn progress_text(effects: &[Effect]) -> Option<String> {
        effects.iter().rev().find_map(|e| match e {
            Effect::SetProgress(p) => Some(p.text.clone()),
            _ => None,
        })
    }

    #[test]
    fn new_session_is_idle_and_stopped() {
        let s = session();
        assert_eq!(s.step_progress(), StepProgress::Idle);
        assert_eq!(s.timer_phase(), TimerPhase::Stopped);
        assert_eq!(s.current_step(), 0);
        assert_eq!(s.remaining_seconds(), 1620);
        assert_eq!(s.progress().text, "Ready to start");
        assert_eq!(s.progress().percent, 0.0);
        assert_eq!(s.timer_text(), "27:00");
    }

    #[test]
    fn start_enters_step_one_and_arms_timer() {
        let mut s = session();
        let effects = s.start();
        assert_eq!(s.step_progress(), StepProgress::InProgress(1));
        assert!(s.timer_running());
        assert_eq!(s.remaining_seconds(), 1620);
        assert_eq!(effects[0], Effect::RevealSection(Section::Instructions));
        assert_eq!(effects.iter().filter(|e| **e == Effect::ArmTicker).count(), 1);
        assert!(effects.contains(&Effect::HighlightStep(1)));
        assert!(effects.contains(&Effect::ShowTimer));
        assert_eq!(progress_text(&effects).as_deref(), Some("Step 1 of 6"));
    }

    #[test]
    fn start_twice_is_a_no_op() {
        let mut s = session();
        s.start();
        s.advance();
        assert!(s.start().is_empty());
        assert_eq!(s.step_progress(), StepProgress::InProgress(2));
    }

    #[test]
    fn advance_walks_every_step() {
        let mut s = session();
        s.start();
        for k in 1..6 {
            let effects = s.advance();
            assert_eq!(s.step_progress(), StepProgress::InProgress(k + 1));
            assert!(effects.contains(&Effect::HighlightStep(k + 1)));
            let expected = 100.0 * (k + 1) as f64 / 6.0;
            assert!((s.progress().percent - expected).abs() < 1e-9);
            assert_eq!(
                effects.contains(&Effect::RelabelAdvance(FINISH_LABEL)),
                k + 1 == 6
            );
        }
        assert_eq!(s.progress().text, "Step 6 of 6");
        assert_eq!(s.progress().percent, 100.0);
    }

    #[test]
    fn advance_from_last_step_completes_and_stops_timer() {
        let mut s = session();
        s.start();
        for _ in 0..5 {
            s.advance();
        }
        let effects = s.advance();
        assert_eq!(s.step_progress(), StepProgress::Completed);
        assert!(!s.timer_running());
        assert_eq!(s.timer_phase(), TimerPhase::Stopped);
        assert_eq!(effects[0], Effect::CancelTicker);
        assert!(effects.contains(&Effect::ShowCompletion(COMPLETION_MESSAGE)));
        assert!(effects.contains(&Effect::ShowControls(Controls::Finished)));
        assert!(effects.contains(&Effect::Celebrate));
        assert_eq!(s.progress().text, "Recipe completed!");
        assert!(s.advance().is_empty());
    }

    #[test]
    fn advance_before_start_is_ignored() {
        let mut s = session();
        assert!(s.advance().is_empty());
        assert_eq!(s.step_progress(), StepProgress::Idle);
    }

    #[test]
    fn completing_after_expiry_keeps_timer_expired() {
        let mut s = CookingSession::new(1, 2);
        s.start();
        s.tick();
        s.tick();
        assert_eq!(s.timer_phase(), TimerPhase::Expired);
        let effects = s.advance();
        assert!(!effects.contains(&Effect::CancelTicker));
        assert_eq!(s.timer_phase(), TimerPhase::Expired);
        assert!(!s.timer_running());
    }

    #[test]
    fn reset_restores_initial_state_from_anywhere() {
        let mut s = session();
        s.start();
        s.advance();
        for _ in 0..30 {
            s.tick();
        }
        let effects = s.reset();
        assert_eq!(effects[0], Effect::CancelTicker);
        assert_eq!(s.current_step(), 0);
        assert_eq!(s.remaining_seconds(), 1620);
        assert!(!s.timer_running());
        assert_eq!(s, session());
        assert_eq!(progress_text(&effects).as_deref(), Some("Ready to start"));
        assert!(effects.contains(&Effect::SetTimerText("27:00".into())));
        assert!(effects.contains(&Effect::RelabelAdvance(NEXT_LABEL)));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut s = session();
        s.start();
        s.reset();
        let snapshot = s.clone();
        let second = s.reset();
        assert_eq!(s, snapshot);
        assert!(!second.contains(&Effect::CancelTicker));
    }

    #[test]
    fn reset_clears_expired_timer() {
        let mut s = CookingSession::new(6, 1);
        s.start();
        s.tick();
        assert_eq!(s.timer_phase(), TimerPhase::Expired);
        s.reset();
        assert_eq!(s.timer_phase(), TimerPhase::Stopped);
        assert_eq!(s.remaining_seconds(), 1);
    }

    #[test]
    fn start_timer_while_running_does_not_rearm() {
        let mut s = session();
        assert_eq!(s.start_timer(), vec![Effect::ArmTicker]);
        assert!(s.start_timer().is_empty());
        assert!(s.timer_running());
    }

    #[test]
    fn stop_timer_is_idempotent() {
        let mut s = session();
        s.start_timer();
        assert_eq!(s.stop_timer(), vec![Effect::CancelTicker]);
        assert!(s.stop_timer().is_empty());
        assert_eq!(s.timer_phase(), TimerPhase::Stopped);
    }

    #[test]
    fn tick_counts_down_one_second_at_a_time() {
        let mut s = session();
        s.start();
        let effects = s.tick();
        assert_eq!(s.remaining_seconds(), 1619);
        assert_eq!(effects, vec![Effect::SetTimerText("26:59".into())]);
        s.tick();
        assert_eq!(s.remaining_seconds(), 1618);
    }

    #[test]
    fn ticks_while_stopped_are_ignored() {
        let mut s = session();
        assert!(s.tick().is_empty());
        s.start();
        s.stop_timer();
        assert!(s.tick().is_empty());
        assert_eq!(s.remaining_seconds(), 1620);
    }

    #[test]
    fn full_countdown_expires_exactly_once() {
        let mut s = session();
        s.start();
        let mut announcements = 0;
        let mut last_text = String::new();
        for _ in 0..1620 {
            for effect in s.tick() {
                match effect {
                    Effect::AnnounceCompletion => announcements += 1,
                    Effect::SetTimerText(t) => last_text = t,
                    _ => {}
                }
            }
        }
        assert_eq!(s.remaining_seconds(), 0);
        assert_eq!(s.timer_phase(), TimerPhase::Expired);
        assert_eq!(last_text, "00:00");
        assert_eq!(announcements, 1);

        assert!(s.tick().is_empty());
        assert_eq!(s.remaining_seconds(), 0);
    }

    #[test]
    fn expired_timer_cannot_be_restarted_without_reset() {
        let mut s = CookingSession::new(3, 1);
        s.start();
        s.tick();
        assert!(s.start_timer().is_empty());
        assert_eq!(s.timer_phase(), TimerPhase::Expired);
    }

    #[test]
    fn single_step_recipe_offers_finish_immediately() {
        let mut s = CookingSession::new(1, 60);
        let effects = s.start();
        assert!(effects.contains(&Effect::RelabelAdvance(FINISH_LABEL)));
        s.advance();
        assert_eq!(s.step_progress(), StepProgress::Completed);
    }
}
