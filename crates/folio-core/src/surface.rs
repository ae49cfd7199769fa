//! The single state container the rendering surface owns.
//!
//! Observables: [`Surface::idle_visible`], [`Surface::at_bottom`],
//! [`Surface::submission`]. Everything else changes only through the intent
//! methods.

use std::time::Instant;

use crate::Config;
use crate::affordance::{Glyph, ScrollAction, plan_activation};
use crate::contact::transport::{TransportError, TransportResponse};
use crate::contact::{ContactForm, ContactPipeline, SubmissionStatus, SubmitDecision};
use crate::idle::IdleMonitor;
use crate::scroll::{ScrollMetrics, ScrollTracker};

pub struct Surface {
    idle: IdleMonitor,
    scroll: ScrollTracker,
    contact: ContactPipeline,
    form: ContactForm,
}

impl Surface {
    /// Build the container at load: idle monitoring armed, bottom flag computed.
    pub fn new(config: &Config, metrics: ScrollMetrics, now: Instant) -> Self {
        Self {
            idle: IdleMonitor::start(config.idle_timeout, now),
            scroll: ScrollTracker::new(config.scroll_tolerance, metrics),
            contact: ContactPipeline::from_config(config),
            form: ContactForm::default(),
        }
    }

    pub fn idle_visible(&self) -> bool {
        self.idle.is_visible()
    }

    pub fn at_bottom(&self) -> bool {
        self.scroll.at_bottom()
    }

    pub fn submission(&self) -> &SubmissionStatus {
        self.contact.status()
    }

    pub fn glyph(&self) -> Glyph {
        Glyph::for_position(self.scroll.at_bottom())
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Form inputs are edited in place by the surface.
    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn endpoint(&self) -> &str {
        self.contact.endpoint()
    }

    // ── intents ─────────────────────────────────────────────────────

    pub fn report_activity(&mut self, now: Instant) {
        self.idle.report_activity(now);
    }

    /// A scroll is an activity signal too; the signal lands before the
    /// bottom flag is recomputed.
    pub fn report_scroll(&mut self, metrics: ScrollMetrics, now: Instant) {
        self.idle.report_activity(now);
        self.scroll.update(metrics);
    }

    /// Re-run the bottom check after the page geometry changed without a
    /// scroll (viewport resized, document reflowed). Not an activity signal.
    pub fn report_geometry(&mut self, metrics: ScrollMetrics) {
        self.scroll.update(metrics);
    }

    /// Advance timers. Returns `true` when the affordance just appeared.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.idle.poll(now)
    }

    /// Dismiss the affordance, then decide where to scroll.
    pub fn activate_affordance(&mut self, metrics: ScrollMetrics, now: Instant) -> ScrollAction {
        self.idle.dismiss(now);
        let action = plan_activation(self.scroll.at_bottom(), metrics);
        tracing::debug!(?action, "affordance activated");
        action
    }

    pub fn submit_contact_form(&mut self) -> SubmitDecision {
        self.contact.begin(&self.form)
    }

    pub fn finish_submission(
        &mut self,
        outcome: Result<TransportResponse, TransportError>,
    ) -> &SubmissionStatus {
        self.contact.finish(outcome, &mut self.form)
    }

    /// Cancel the idle timer before the surface goes away.
    pub fn teardown(&mut self) {
        self.idle.teardown();
    }
}
