//! Full-screen TUI mode for the recipe card.
//!
//! The event loop uses `tokio::select!` to handle:
//! - User keyboard input (Enter/Space, R, i, s, x, Ctrl+P, q)
//! - Timer events (countdown ticks, delayed notification, print restore)
//! - Animation wakeups while a section is fading in or a flourish is playing

use crate::controller::RecipeController;
use crate::event::{Action, Event, action_for_key};
use crate::recipe::Recipe;
use crate::state::CookingSession;
use crate::timer::Scheduler;
use crate::ui::CardView;
use crate::ui::render::draw_card;
use crate::ui::styles::CardStyles;
use crossterm::{
    event::Event as TermEvent,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::pin::Pin;
use std::thread;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::time::Sleep;

/// Run the interactive card until the user quits.
pub async fn display_card_modern(
    recipe: Recipe,
    cfg: crate::Config,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (timer_tx, mut timer_rx) = mpsc::channel(32);
    let scheduler = Scheduler::new(timer_tx, cfg.second());
    let session = CookingSession::for_recipe(&recipe);
    let view = CardView::new(recipe, cfg.print_to.clone());
    let mut controller = RecipeController::new(session, view, scheduler);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let styles = CardStyles::default();

    // Dedicated OS thread polls crossterm and forwards events to the async
    // side; it exits once the receiver is gone.
    let (key_tx, mut key_rx) = mpsc::channel(32);
    thread::spawn(move || {
        loop {
            match crossterm::event::poll(std::time::Duration::from_millis(100)) {
                Ok(true) => {
                    if let Ok(ev) = crossterm::event::read()
                        && key_tx.blocking_send(ev).is_err()
                    {
                        break;
                    }
                }
                Ok(false) => {
                    if key_tx.is_closed() {
                        break;
                    }
                }
                Err(_) => std::thread::sleep(std::time::Duration::from_millis(100)),
            }
        }
    });

    let result = run_loop(
        &mut terminal,
        &mut controller,
        &styles,
        &mut key_rx,
        &mut timer_rx,
    )
    .await;

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    result
}

async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut RecipeController<CardView>,
    styles: &CardStyles,
    key_rx: &mut mpsc::Receiver<TermEvent>,
    timer_rx: &mut mpsc::Receiver<Event>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut next_frame: Option<Pin<Box<Sleep>>> = None;
    redraw_and_reschedule(terminal, controller, styles, &mut next_frame)?;

    loop {
        tokio::select! {
            biased;

            maybe_event = key_rx.recv() => {
                let Some(event) = maybe_event else {
                    // Input thread gone -> nothing more can happen
                    break;
                };
                if process_terminal_event(event, controller) {
                    break;
                }
            }

            maybe_timer = timer_rx.recv() => {
                if let Some(event) = maybe_timer {
                    controller.handle_event(event);
                }
            }

            _ = async {
                if let Some(s) = &mut next_frame {
                    s.as_mut().await;
                } else {
                    futures_util::future::pending::<()>().await;
                }
            } => {}
        }
        redraw_and_reschedule(terminal, controller, styles, &mut next_frame)?;
    }
    Ok(())
}

/// Returns true when the user asked to quit.
fn process_terminal_event(event: TermEvent, controller: &mut RecipeController<CardView>) -> bool {
    let TermEvent::Key(key) = event else {
        return false;
    };
    let Some(action) = action_for_key(key) else {
        return false;
    };
    if action == Action::Quit {
        return true;
    }
    // Any key acknowledges an open notification first.
    if controller.presenter().notification().is_some() {
        controller.presenter_mut().dismiss_notification();
        return false;
    }
    controller.handle_event(Event::Action(action));
    false
}

/// Draw the card and schedule the next animation frame, if one is needed.
fn redraw_and_reschedule<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    controller: &RecipeController<CardView>,
    styles: &CardStyles,
    next_frame: &mut Option<Pin<Box<Sleep>>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let now = Instant::now();
    let view = controller.presenter();
    draw_card(terminal, view, styles, now)?;
    *next_frame = view.next_frame(now).map(|at| {
        let when = tokio::time::Instant::from_std(at);
        Box::pin(tokio::time::sleep_until(when))
    });
    Ok(())
}
