//! Drawing the card with ratatui.

use crate::text_utils::{pad_centered, wrap_text};
use crate::ui::styles::CardStyles;
use crate::ui::{CardView, Controls, Section};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Gauge, Paragraph};
use std::error::Error;
use std::time::Instant;

/// Card body lines plus the row of the highlighted step, if any.
pub struct BodyLines {
    pub lines: Vec<Line<'static>>,
    pub focus: Option<usize>,
}

/// Build the collapsible sections as styled lines wrapped to `width`.
pub fn body_lines(view: &CardView, styles: &CardStyles, width: usize, now: Instant) -> BodyLines {
    let mut lines = Vec::new();
    let mut focus = None;
    let text_width = width.saturating_sub(6).max(10);

    lines.push(section_header(view, Section::Ingredients, 'i', styles));
    for (i, item) in view
        .recipe()
        .ingredients
        .iter()
        .take(view.revealed_items(Section::Ingredients, now))
        .enumerate()
    {
        let mut style = if view.is_crossed_off(i) {
            styles.crossed_off
        } else {
            styles.ingredient
        };
        if i == view.cursor() {
            style = style.patch(styles.cursor);
        }
        lines.push(Line::from(vec![
            Span::raw("  • "),
            Span::styled(item.clone(), style),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(section_header(view, Section::Instructions, 's', styles));
    let highlighted = view.highlighted();
    for (i, step) in view
        .recipe()
        .steps
        .iter()
        .take(view.revealed_items(Section::Instructions, now))
        .enumerate()
    {
        let number = i + 1;
        let (marker, style) = match highlighted {
            Some(h) if h == number => ("▶ ", styles.current_step),
            Some(h) if number < h => ("✓ ", styles.done_step),
            _ => ("  ", styles.step),
        };
        if highlighted == Some(number) {
            focus = Some(lines.len());
        }
        lines.push(Line::from(Span::styled(
            format!("{}{}. {}", marker, number, step.title),
            style,
        )));
        for wrapped in wrap_text(&step.text, text_width) {
            lines.push(Line::from(Span::styled(format!("     {}", wrapped), style)));
        }
    }

    BodyLines { lines, focus }
}

fn section_header(view: &CardView, section: Section, key: char, styles: &CardStyles) -> Line<'static> {
    let title = match section {
        Section::Ingredients => "Ingredients",
        Section::Instructions => "Instructions",
    };
    Line::from(vec![
        Span::styled(title.to_string(), styles.title),
        Span::styled(format!("  [{}] {}", key, view.toggle_label(section)), styles.hint),
    ])
}

/// Key hints for the controls currently on offer.
pub fn control_hints(view: &CardView) -> String {
    let primary = match view.controls() {
        Controls::Start => "[Enter] Start Cooking".to_string(),
        Controls::Cooking => format!("[Enter] {}  [R] Reset", view.advance_label()),
        Controls::Finished => "[R] Reset".to_string(),
    };
    format!("{}  [Ctrl+P] Print  [q] Quit", primary)
}

/// First visible row so that `focus` sits in the middle of `height` rows.
pub fn scroll_offset(focus: Option<usize>, total: usize, height: usize) -> usize {
    let Some(focus) = focus else {
        return 0;
    };
    let max = total.saturating_sub(height);
    focus.saturating_sub(height / 2).min(max)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn draw_card<B: Backend>(
    terminal: &mut Terminal<B>,
    view: &CardView,
    styles: &CardStyles,
    now: Instant,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    terminal.draw(|f| {
        let area = f.area();
        let [header, gauge_area, body_area, hints_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let title_style = if view.celebrating(now) {
            styles.flash.patch(styles.success)
        } else {
            styles.title
        };
        let mut header_spans = vec![Span::styled(view.recipe().title.clone(), title_style)];
        if view.timer_visible() {
            let timer_style = if view.flashing(now) {
                styles.timer_alert.patch(styles.flash)
            } else if view.timer_alert() {
                styles.timer_alert
            } else {
                styles.timer
            };
            header_spans.push(Span::raw("   ⏱ "));
            header_spans.push(Span::styled(view.timer_text().to_string(), timer_style));
        }
        f.render_widget(
            Paragraph::new(Line::from(header_spans))
                .alignment(Alignment::Center)
                .block(Block::bordered()),
            header,
        );

        let (label, label_style) = match view.completion() {
            Some(message) => (format!("🎉 {}", message), styles.success),
            None => (view.progress_text().to_string(), styles.timer),
        };
        f.render_widget(
            Gauge::default()
                .block(Block::bordered().title(" Progress "))
                .gauge_style(styles.gauge)
                .ratio(view.progress_percent() / 100.0)
                .label(Span::styled(label, label_style)),
            gauge_area,
        );

        let inner_width = body_area.width.saturating_sub(2) as usize;
        let inner_height = body_area.height.saturating_sub(2) as usize;
        let body = body_lines(view, styles, inner_width, now);
        let offset = scroll_offset(body.focus, body.lines.len(), inner_height);
        f.render_widget(
            Paragraph::new(body.lines)
                .block(Block::bordered())
                .scroll((offset as u16, 0)),
            body_area,
        );

        let hints = match view.status() {
            Some(status) => format!("{}  |  {}", control_hints(view), status),
            None => control_hints(view),
        };
        f.render_widget(
            Paragraph::new(Span::styled(
                pad_centered(&hints, hints_area.width as usize),
                styles.hint,
            )),
            hints_area,
        );

        if let Some(message) = view.notification() {
            let popup = centered(area, message.chars().count() as u16 + 8, 5);
            f.render_widget(Clear, popup);
            f.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(message.to_string(), styles.timer_alert)),
                    Line::from(Span::styled("press any key", styles.hint)),
                ])
                .alignment(Alignment::Center)
                .block(Block::bordered().title(" Time's up ")),
                popup,
            );
        }
    })?;
    Ok(())
}
