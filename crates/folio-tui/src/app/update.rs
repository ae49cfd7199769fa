use std::time::Instant;

use ratatui::layout::Position;

use folio_core::{SubmitDecision, TransportError};

use super::{App, FOOTER_ROWS, FormField, InputMode};
use crate::action::Action;
use crate::tui_event::{BackendCommand, BackendEvent};

const BACKEND_GONE: &str = "Contact service is not running.";

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        self.update_at(action, Instant::now())
    }

    /// [`App::update`] with an explicit clock, so timers can be driven in tests.
    pub fn update_at(&mut self, action: Action, now: Instant) -> bool {
        if action.is_activity() {
            self.surface.report_activity(now);
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit | Action::TextInput('q') => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack => {
                    self.confirm_quit = false;
                }
                Action::Tick => self.on_tick(now),
                Action::Resize(w, h) => self.resize(w, h, now),
                _ => {}
            }
            return false;
        }

        if self.show_help {
            match action {
                Action::Quit => {
                    self.confirm_quit = true;
                }
                Action::ToggleHelp | Action::NavigateBack => {
                    self.show_help = false;
                }
                Action::Tick => self.on_tick(now),
                Action::Resize(w, h) => self.resize(w, h, now),
                _ => {}
            }
            return false;
        }

        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::Tick => self.on_tick(now),
            Action::Resize(w, h) => self.resize(w, h, now),
            Action::ClickAt(x, y) => self.click_at(x, y, now),
            Action::ActivateAffordance => self.activate_affordance(now),
            Action::ScrollDown => self.scroll_by(1, now),
            Action::ScrollUp => self.scroll_by(-1, now),
            Action::PageDown => self.scroll_by(self.page_step(), now),
            Action::PageUp => self.scroll_by(-self.page_step(), now),
            Action::GoTop => self.scroll_to(0, now),
            Action::GoBottom => self.scroll_to(self.viewport.max_offset(), now),
            Action::FocusForm => {
                self.input_mode = InputMode::Form;
                self.focus = FormField::Name;
                self.viewport.scroll_target = Some(self.viewport.max_offset());
            }
            Action::NavigateBack => {
                self.input_mode = InputMode::Browse;
            }
            Action::ToggleHelp => {
                self.show_help = true;
            }
            Action::NextField => {
                self.focus = self.focus.next();
            }
            Action::PrevField => {
                self.focus = self.focus.prev();
            }
            Action::TextInput(ch) => {
                if self.input_mode == InputMode::Form {
                    self.focus.value_mut(self.surface.form_mut()).push(ch);
                }
            }
            Action::Backspace => {
                if self.input_mode == InputMode::Form {
                    self.focus.value_mut(self.surface.form_mut()).pop();
                }
            }
            Action::Confirm => {
                if self.focus == FormField::Message {
                    self.submit();
                } else {
                    self.focus = self.focus.next();
                }
            }
            Action::Submit => self.submit(),
            Action::PointerMoved | Action::None => {}
        }

        self.should_quit
    }

    /// Handle an event from the backend.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::SubmissionFinished(outcome) => {
                let status = self.surface.finish_submission(outcome);
                tracing::info!(status = ?status, "contact submission finished");
            }
        }
    }

    fn on_tick(&mut self, now: Instant) {
        self.tick = self.tick.wrapping_add(1);
        self.animate_scroll(now);
        if self.surface.tick(now) {
            tracing::debug!(glyph = ?self.surface.glyph(), "scroll affordance shown");
        }
    }

    /// Step an in-progress smooth scroll a quarter of the remaining distance.
    fn animate_scroll(&mut self, now: Instant) {
        let Some(target) = self.viewport.scroll_target else {
            return;
        };
        let target = target.min(self.viewport.max_offset());
        let current = self.viewport.offset;
        if current == target {
            self.viewport.scroll_target = None;
            return;
        }

        let step = (current.abs_diff(target) / 4).max(1);
        self.viewport.offset = if target > current {
            current + step
        } else {
            current - step
        };
        self.surface.report_scroll(self.viewport.metrics(), now);
        if self.viewport.offset == target {
            self.viewport.scroll_target = None;
        }
    }

    fn activate_affordance(&mut self, now: Instant) {
        // A hidden affordance has no effect.
        if !self.surface.idle_visible() {
            return;
        }
        let metrics = self.viewport.metrics();
        let action = self.surface.activate_affordance(metrics, now);
        self.viewport.scroll_target = Some(action.target(metrics));
    }

    fn page_step(&self) -> i64 {
        i64::from(self.viewport.height.saturating_sub(1).max(1))
    }

    fn scroll_by(&mut self, delta: i64, now: Instant) {
        let target = (i64::from(self.viewport.offset) + delta).max(0);
        self.scroll_to(u32::try_from(target).unwrap_or(u32::MAX), now);
    }

    /// Jump to `offset` (clamped), cancelling any smooth scroll. The tracker
    /// only hears about it when the position actually moved.
    fn scroll_to(&mut self, offset: u32, now: Instant) {
        self.viewport.scroll_target = None;
        let offset = offset.min(self.viewport.max_offset());
        if offset != self.viewport.offset {
            self.viewport.offset = offset;
            self.surface.report_scroll(self.viewport.metrics(), now);
        }
    }

    pub(super) fn resize(&mut self, width: u16, height: u16, now: Instant) {
        self.viewport.width = width;
        self.viewport.height = u32::from(height.saturating_sub(FOOTER_ROWS));
        self.viewport.document_height = crate::view::page::document_height(&self.theme, width);

        let max = self.viewport.max_offset();
        if let Some(target) = self.viewport.scroll_target.as_mut() {
            *target = (*target).min(max);
        }
        if self.viewport.offset > max {
            self.viewport.offset = max;
            self.surface.report_scroll(self.viewport.metrics(), now);
        } else {
            // Reflow can move the bottom without moving the offset.
            self.surface.report_geometry(self.viewport.metrics());
        }
    }

    fn click_at(&mut self, x: u16, y: u16, now: Instant) {
        let pos = Position::new(x, y);

        if self.last_affordance_area.is_some_and(|r| r.contains(pos)) {
            self.activate_affordance(now);
            return;
        }

        if self.last_send_area.is_some_and(|r| r.contains(pos)) {
            self.submit();
            return;
        }

        let hit = self
            .last_field_areas
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|(field, _)| *field);
        match hit {
            Some(field) => {
                self.input_mode = InputMode::Form;
                self.focus = field;
            }
            None => {
                self.input_mode = InputMode::Browse;
            }
        }
    }

    /// Run the submission pipeline and hand an accepted payload to the backend.
    fn submit(&mut self) {
        let payload = match self.surface.submit_contact_form() {
            SubmitDecision::Dispatch(payload) => payload,
            SubmitDecision::Ignored | SubmitDecision::Dropped | SubmitDecision::Rejected => {
                return;
            }
        };

        let endpoint = self.surface.endpoint().to_string();
        let sent = self
            .backend_cmd_tx
            .as_ref()
            .is_some_and(|tx| tx.send(BackendCommand::Submit { endpoint, payload }).is_ok());

        if !sent {
            tracing::error!("contact submission could not reach the backend");
            self.surface
                .finish_submission(Err(TransportError::Other(BACKEND_GONE.to_string())));
        }
    }
}
