use super::{Interpolate, PageRenderer, Palette, draw_centered, fit_text, format_money};
use crate::localization::fl;
use coarsetime::Instant;
use macroquad::prelude::*;
use tracker_common::{settings::DisplaySettings, snapshot::DonationSnapshot};

const NAME_SIZE: u16 = 56;
const EVENT_SIZE: u16 = 28;
const RAISED_SIZE: u16 = 40;
const COUNT_SIZE: u16 = 30;
const NOTICE_SIZE: u16 = 22;
const WAITING_SIZE: u16 = 36;

const BAR_HEIGHT: f32 = 18f32;
const FILL_ANIMATION_SECS: f32 = 0.6;

impl PageRenderer {
    /// Donation totals for the tracked participant or team. Drawn whenever
    /// settings are healthy; falls back to a waiting notice until the first
    /// snapshot lands.
    pub fn info_view(
        &mut self,
        snapshot: Option<&DonationSnapshot>,
        settings: &DisplaySettings,
        notice: Option<&str>,
        palette: &Palette,
    ) {
        let (w, h) = (screen_width(), screen_height());

        let Some(snapshot) = snapshot else {
            draw_centered(&fl!("waiting-data"), h * 0.45, WAITING_SIZE, palette.muted);
            if let Some(id) = settings
                .participant_id
                .as_deref()
                .or(settings.team_id.as_deref())
            {
                draw_centered(id, h * 0.45 + 48f32, EVENT_SIZE, palette.muted);
            }
            return;
        };

        // Re-arm the fill animation whenever the displayed totals move.
        if self.last_total != Some(snapshot.num_donations) {
            self.last_total = Some(snapshot.num_donations);
            self.animation_register = Instant::now();
        }

        let (x_off, name) = fit_text(w * 0.8, &snapshot.display_name, NAME_SIZE);
        draw_text_ex(
            &name,
            w * 0.1 + x_off,
            h * 0.32,
            TextParams {
                font_size: NAME_SIZE,
                color: palette.foreground,
                ..Default::default()
            },
        );

        if let Some(event) = &snapshot.event_name {
            draw_centered(
                &fl!("supporting", event = event.as_str()),
                h * 0.32 + 42f32,
                EVENT_SIZE,
                palette.muted,
            );
        }

        let raised = format_money(snapshot.sum_donations);
        let goal = format_money(snapshot.fundraising_goal);
        let raised_line = if snapshot.fundraising_goal > 0.0 {
            fl!(
                "raised-of-goal",
                raised = raised.as_str(),
                goal = goal.as_str()
            )
        } else {
            fl!("raised-total", raised = raised.as_str())
        };
        draw_centered(&raised_line, h * 0.5, RAISED_SIZE, palette.foreground);

        let progress = (Instant::now()
            .duration_since(self.animation_register)
            .as_f64() as f32
            / FILL_ANIMATION_SECS)
            .min(1f32);
        let fill = (0f32, snapshot.goal_fraction()).interpolate_linear(progress);
        let bar_w = w * 0.5;
        let bar_x = (w - bar_w) / 2f32;
        let bar_y = h * 0.55;
        let track = Color::new(palette.muted.r, palette.muted.g, palette.muted.b, 0.25);
        draw_rectangle(bar_x, bar_y, bar_w, BAR_HEIGHT, track);
        draw_rectangle(bar_x, bar_y, bar_w * fill, BAR_HEIGHT, palette.accent);

        draw_centered(
            &fl!("donation-count", count = snapshot.num_donations),
            bar_y + BAR_HEIGHT + 38f32,
            COUNT_SIZE,
            palette.foreground,
        );

        if let Some(notice) = notice {
            draw_centered(notice, h - 36f32, NOTICE_SIZE, palette.notice);
        }
    }
}
