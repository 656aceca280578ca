use crate::{
    context::PresentationContext,
    donations::DonationProvider,
    localization::{Language, fl},
    settings::SettingsProvider,
    sound::AlertSound,
};
use log::info;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracker_common::{
    settings::{BorderStyle, DisplaySettings, Theme},
    snapshot::DonationSnapshot,
    tracker::RequestTarget,
};

/// The mutually exclusive rendering outcome for a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Error(String),
    Info,
    Blank,
}

/// The single authority over what is on screen, the fetch cadence, and the
/// presentation side effects.
///
/// `tick` runs once per frame: it drives the polling interval, reconciles
/// settings and donation updates, and re-evaluates the orientation guard.
/// `view` then derives the frame's rendering outcome.
pub struct PollingController {
    settings: SettingsProvider,
    donations: DonationProvider,
    ctx: Box<dyn PresentationContext>,
    sound: Arc<dyn AlertSound>,
    poll_period: Duration,
    last_poll: Option<Instant>,
    settings_error: Option<String>,
    portrait: bool,
    last_donation_count: Option<u64>,
    donation_signals: u64,
}

impl PollingController {
    pub fn new(
        settings: SettingsProvider,
        donations: DonationProvider,
        ctx: Box<dyn PresentationContext>,
        sound: Arc<dyn AlertSound>,
        poll_period: Duration,
    ) -> Self {
        Self {
            settings,
            donations,
            ctx,
            sound,
            poll_period,
            last_poll: None,
            settings_error: None,
            portrait: false,
            last_donation_count: None,
            donation_signals: 0,
        }
    }

    pub fn tick(&mut self, now: Instant, viewport: (f32, f32)) {
        // Interval driver: a single timing slot, re-armed on every fire.
        // Fires on the very first tick so startup does not wait a full
        // period.
        if self
            .last_poll
            .is_none_or(|last| now.saturating_duration_since(last) >= self.poll_period)
        {
            self.last_poll = Some(now);
            self.donations.refresh();
        }

        if self.settings.poll() {
            self.reconcile_settings();
        }

        if self.donations.poll() {
            self.reconcile_donations();
        }

        // Orientation guard, evaluated every frame including the first.
        self.portrait = viewport.1 > viewport.0;
    }

    fn reconcile_settings(&mut self) {
        if let Some(error) = self.settings.error() {
            self.settings_error = Some(error.to_string());
            return;
        }
        let Some(settings) = self.settings.data() else {
            return;
        };
        self.settings_error = None;

        let lang = Language::from_code(&settings.lang);
        if self.ctx.language() != lang {
            self.ctx.set_language(lang);
        }
        self.sound.set_volume(settings.volume());
        self.ctx.set_theme(settings.theme());
        self.ctx.set_border(settings.border_style());

        if let Some(target) = RequestTarget::from_settings(settings) {
            self.donations.set_request_target(target);
        }
    }

    fn reconcile_donations(&mut self) {
        if let Some(snapshot) = self.donations.data() {
            if let Some(previous) = self.last_donation_count {
                if snapshot.num_donations > previous {
                    // Hook point for a future celebratory effect.
                    info!(
                        "New donation received! Count went from {previous} to {}",
                        snapshot.num_donations
                    );
                    self.donation_signals += 1;
                }
            }
            self.last_donation_count = Some(snapshot.num_donations);
        }
    }

    /// The final arbiter: portrait error beats everything, a settings error
    /// beats the info view, and without settings data there is nothing to
    /// draw at all.
    pub fn view(&self) -> ViewState {
        if self.portrait {
            return ViewState::Error(fl!("portrait-not-allowed"));
        }
        if let Some(message) = &self.settings_error {
            return ViewState::Error(message.clone());
        }
        if self.settings.data().is_some() {
            return ViewState::Info;
        }
        ViewState::Blank
    }

    pub fn theme(&self) -> Theme {
        self.ctx.theme()
    }

    pub fn border(&self) -> BorderStyle {
        self.ctx.border()
    }

    pub fn settings_data(&self) -> Option<&DisplaySettings> {
        self.settings.data()
    }

    pub fn donation_data(&self) -> Option<&DonationSnapshot> {
        self.donations.data()
    }

    /// Data-fetch problems never force the error view; they surface as a
    /// notice inside the info view while the stale totals stay up.
    pub fn fetch_notice(&self) -> Option<String> {
        self.donations
            .error()
            .map(|error| fl!("fetch-stale-notice", error = error))
    }

    /// How many donation-count increases have been observed so far.
    pub fn donation_signals(&self) -> u64 {
        self.donation_signals
    }
}
