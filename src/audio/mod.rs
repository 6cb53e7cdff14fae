// SPDX-License-Identifier: MPL-2.0
//! Acknowledgement chime.
//!
//! The chime is synthesised once per output configuration: a handful of
//! bell-like partials with an exponential decay. Playback goes through
//! [`ChimePlayer`], which never interrupts a chime that is still ringing.

mod output;

pub use output::ChimePlayer;

use std::f32::consts::TAU;

/// Length of one chime.
pub const CHIME_SECONDS: f32 = 0.9;

/// Notes of the arpeggio (Hz) and their onset in seconds.
const NOTES: [(f32, f32); 3] = [(1046.5, 0.0), (1318.5, 0.08), (1568.0, 0.16)];

/// Renders a mono chime at `sample_rate`, peak-normalised to 1.0.
#[must_use]
pub fn synthesize(sample_rate: u32) -> Vec<f32> {
    let rate = sample_rate.max(1) as f32;
    let len = (CHIME_SECONDS * rate) as usize;
    let mut samples = vec![0.0_f32; len];

    for (freq, onset) in NOTES {
        let start = (onset * rate) as usize;
        for (i, sample) in samples.iter_mut().enumerate().skip(start) {
            let t = (i - start) as f32 / rate;
            let envelope = (-t * 6.0).exp() * (t * 400.0).min(1.0);
            // Slightly inharmonic overtone gives the glassy tone.
            let tone = (TAU * freq * t).sin() + 0.3 * (TAU * freq * 2.76 * t).sin();
            *sample += tone * envelope;
        }
    }

    let peak = samples.iter().fold(0.0_f32, |max, s| max.max(s.abs()));
    if peak > 0.0 {
        samples.iter_mut().for_each(|s| *s /= peak);
    }
    samples
}

/// Duplicates a mono signal across `channels`, scaled by `volume`.
#[must_use]
pub fn interleave(mono: &[f32], channels: u16, volume: f32) -> Vec<f32> {
    let channels = usize::from(channels.max(1));
    let mut out = Vec::with_capacity(mono.len() * channels);
    for sample in mono {
        out.extend(std::iter::repeat_n(sample * volume, channels));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn chime_has_expected_length() {
        assert_eq!(synthesize(48_000).len(), (CHIME_SECONDS * 48_000.0) as usize);
    }

    #[test]
    fn chime_is_normalised() {
        let samples = synthesize(44_100);
        let peak = samples.iter().fold(0.0_f32, |max, s| max.max(s.abs()));
        assert_abs_diff_eq!(peak, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn chime_decays() {
        let samples = synthesize(8_000);
        let head: f32 = samples[..800].iter().map(|s| s.abs()).sum();
        let tail: f32 = samples[samples.len() - 800..].iter().map(|s| s.abs()).sum();
        assert!(tail < head / 10.0);
    }

    #[test]
    fn interleave_repeats_per_channel() {
        let out = interleave(&[1.0, -0.5], 2, 0.5);
        assert_eq!(out, vec![0.5, 0.5, -0.25, -0.25]);
    }
}
