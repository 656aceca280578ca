use crate::config::RuntimeMode;
use log::debug;
use macroquad::input::{KeyCode, is_key_pressed};
use std::f32::consts::TAU;
use std::sync::Arc;
use web_audio_api::{
    AudioBuffer,
    context::{AudioContext, AudioContextOptions, BaseAudioContext},
    node::{AudioNode, AudioScheduledSourceNode, GainNode},
};

pub const SAMPLE_RATE: f32 = 44100.0;

const CHIME_LEN_SECS: f32 = 0.9;
const CHIME_SPLIT_SECS: f32 = 0.35;

/// Playback interface the controller and the debug trigger talk to, so
/// tests can substitute a fake without an audio device.
pub trait AlertSound: Send + Sync {
    fn set_volume(&self, volume: f32);
    fn play(&self);
}

/// Plays the alert chime through a gain node that carries the operator's
/// configured volume. The sample is synthesized once at startup, so no audio
/// asset ships with the binary.
pub struct AlertSounder {
    context: AudioContext,
    buffer: AudioBuffer,
    gain: GainNode,
}

impl AlertSounder {
    pub fn new() -> Self {
        let opts = AudioContextOptions {
            sample_rate: Some(SAMPLE_RATE),
            ..AudioContextOptions::default()
        };

        let context = AudioContext::new(opts);
        debug!("Audio context created with sink {:?}", context.sink_id());

        let samples = chime_samples();
        let mut buffer = context.create_buffer(1, samples.len(), SAMPLE_RATE);
        buffer.copy_to_channel(&samples, 0);

        let gain = context.create_gain();
        gain.connect(&context.destination());

        Self {
            context,
            buffer,
            gain,
        }
    }
}

impl AlertSound for AlertSounder {
    fn set_volume(&self, volume: f32) {
        self.gain.gain().set_value(volume);
    }

    fn play(&self) {
        let mut source = self.context.create_buffer_source();
        source.set_buffer(self.buffer.clone());
        source.connect(&self.gain);
        source.start();
    }
}

/// A two-tone chime (E6 then B6) with a squared decay envelope.
fn chime_samples() -> Vec<f32> {
    let total = (SAMPLE_RATE * CHIME_LEN_SECS) as usize;
    (0..total)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            let freq = if t < CHIME_SPLIT_SECS { 1318.5 } else { 1975.5 };
            let envelope = (1.0 - t / CHIME_LEN_SECS).powi(2);
            (t * freq * TAU).sin() * envelope * 0.4
        })
        .collect()
}

/// Development aid: plays the alert chime on a keystroke so the sound and
/// volume can be checked without waiting for a real donation.
pub trait AlertTrigger {
    fn poll(&mut self);
}

pub struct NullAlertTrigger;

impl AlertTrigger for NullAlertTrigger {
    fn poll(&mut self) {}
}

pub struct KeyboardAlertTrigger {
    sound: Arc<dyn AlertSound>,
}

impl AlertTrigger for KeyboardAlertTrigger {
    fn poll(&mut self) {
        if is_key_pressed(KeyCode::S) {
            debug!("Alert sound triggered from the keyboard");
            self.sound.play();
        }
    }
}

/// Selects the trigger strategy once at startup; production deployments get
/// the inert strategy instead of a runtime conditional in the frame loop.
pub fn trigger_for_mode(mode: RuntimeMode, sound: Arc<dyn AlertSound>) -> Box<dyn AlertTrigger> {
    if mode.debug_aids_enabled() {
        Box::new(KeyboardAlertTrigger { sound })
    } else {
        Box::new(NullAlertTrigger)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_chime_shape() {
        let samples = chime_samples();
        assert_eq!(samples.len(), (SAMPLE_RATE * CHIME_LEN_SECS) as usize);
        assert!(samples.iter().all(|s| s.abs() <= 0.4));
        // The decay envelope ends near silence.
        assert!(samples.last().unwrap().abs() < 0.001);
    }
}
