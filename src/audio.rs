//! Audio cues for the Flap / Score / Hit simulation events.
//!
//! Tones are synthesized in memory so no sound assets ship with the
//! binary. When no output device is available the player degrades to a
//! silent no-op and the simulation is unaffected.

use log::warn;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::game_state::GameEvent;

const SAMPLE_RATE: u32 = 44_100;
const VOLUME: f32 = 0.12;

pub struct AudioPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioPlayer {
    /// Open the default output device. Returns None when no device is
    /// available, with a single startup warning.
    pub fn new() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Self {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                warn!("audio disabled, no output device: {}", e);
                None
            }
        }
    }

    /// Play the cue for a simulation event. Fire-and-forget: the sink is
    /// detached so playback outlives this call.
    pub fn play(&self, event: GameEvent) {
        let samples = render_notes(cue_notes(event));
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach();
        }
    }
}

/// (frequency Hz, duration s) note sequence for each cue.
fn cue_notes(event: GameEvent) -> &'static [(f32, f32)] {
    match event {
        GameEvent::Flap => &[(660.0, 0.06)],
        GameEvent::Score => &[(523.0, 0.08), (784.0, 0.10)],
        GameEvent::Hit => &[(220.0, 0.12), (110.0, 0.18)],
    }
}

/// Render a note sequence as mono sine samples with a linear fade-out
/// per note.
fn render_notes(notes: &[(f32, f32)]) -> Vec<f32> {
    let mut samples = Vec::new();
    for &(freq, duration) in notes {
        let count = (SAMPLE_RATE as f32 * duration) as usize;
        for i in 0..count {
            let t = i as f32 / SAMPLE_RATE as f32;
            let envelope = 1.0 - i as f32 / count as f32;
            samples.push((t * freq * std::f32::consts::TAU).sin() * VOLUME * envelope);
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cue_renders_samples() {
        for event in [GameEvent::Flap, GameEvent::Score, GameEvent::Hit] {
            let samples = render_notes(cue_notes(event));
            assert!(!samples.is_empty());
        }
    }

    #[test]
    fn test_samples_stay_within_volume_bounds() {
        let samples = render_notes(cue_notes(GameEvent::Hit));
        assert!(samples.iter().all(|s| s.abs() <= VOLUME));
    }

    #[test]
    fn test_notes_fade_to_silence() {
        let samples = render_notes(cue_notes(GameEvent::Score));
        let last = samples[samples.len() - 1];
        assert!(last.abs() < 0.01);
    }
}
