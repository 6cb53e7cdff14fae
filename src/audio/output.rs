// SPDX-License-Identifier: MPL-2.0
//! Chime playback through the default output device using cpal.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// Plays the acknowledgement chime.
///
/// The stream stays open for the life of the player and outputs silence
/// between chimes. A chime is queued only when the previous one has fully
/// drained, so rapid clicks never stack.
pub struct ChimePlayer {
    /// Pre-rendered interleaved chime for the device's format.
    chime: Arc<Vec<f32>>,
    /// Read position of the stream callback.
    cursor: Arc<Mutex<Cursor>>,
    sample_rate: u32,
    channels: u16,
    _stream: cpal::Stream,
}

impl std::fmt::Debug for ChimePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChimePlayer")
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

impl ChimePlayer {
    /// Opens the default output device and renders the chime at `volume`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Audio`] if no device is available or the stream
    /// cannot be built or started.
    pub fn new(volume: f32) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Audio(format!("Failed to get audio config: {e}")))?;

        let sample_rate = supported_config.sample_rate().0;
        let channels = supported_config.channels();

        let mono = super::synthesize(sample_rate);
        let chime = Arc::new(super::interleave(&mono, channels, volume.clamp(0.0, 1.0)));
        let cursor = Arc::new(Mutex::new(Cursor::default()));

        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &supported_config.into(), Arc::clone(&cursor))?
            }
            cpal::SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &supported_config.into(), Arc::clone(&cursor))?
            }
            cpal::SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &supported_config.into(), Arc::clone(&cursor))?
            }
            _ => return Err(Error::Audio("Unsupported audio sample format".to_string())),
        };

        stream
            .play()
            .map_err(|e| Error::Audio(format!("Failed to start audio stream: {e}")))?;

        log::debug!("Chime output ready: {sample_rate} Hz, {channels} channel(s)");

        Ok(Self {
            chime,
            cursor,
            sample_rate,
            channels,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        cursor: Arc<Mutex<Cursor>>,
    ) -> Result<cpal::Stream> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let Ok(mut cursor) = cursor.lock() else {
                        data.iter_mut().for_each(|s| *s = T::from_sample(0.0f32));
                        return;
                    };

                    for sample in data.iter_mut() {
                        // Just under 1.0: i16 conversion overflows at exactly 1.0.
                        let value = cursor.next_sample().clamp(-1.0, 0.999_999_9);
                        *sample = T::from_sample(value);
                    }
                },
                |err| log::debug!("Chime stream error: {err}"),
                None,
            )
            .map_err(|e| Error::Audio(format!("Failed to build audio stream: {e}")))
    }

    /// Starts the chime unless one is still playing.
    ///
    /// Returns `true` if a new chime was queued.
    pub fn play(&self) -> bool {
        match self.cursor.lock() {
            Ok(mut cursor) => cursor.start(&self.chime),
            Err(_) => {
                log::debug!("Chime buffer poisoned; skipping");
                false
            }
        }
    }

    /// True while a chime is still draining.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.cursor.lock().map(|cursor| cursor.is_playing()).unwrap_or(false)
    }
}

/// Position in the chime being played; silence once it runs out.
#[derive(Debug, Default)]
struct Cursor {
    samples: Option<Arc<Vec<f32>>>,
    position: usize,
}

impl Cursor {
    /// Rewinds onto `chime` unless a chime is still playing.
    fn start(&mut self, chime: &Arc<Vec<f32>>) -> bool {
        if self.is_playing() {
            return false;
        }
        self.samples = Some(Arc::clone(chime));
        self.position = 0;
        true
    }

    fn is_playing(&self) -> bool {
        self.samples
            .as_ref()
            .is_some_and(|samples| self.position < samples.len())
    }

    fn next_sample(&mut self) -> f32 {
        let value = self
            .samples
            .as_ref()
            .and_then(|samples| samples.get(self.position).copied());
        match value {
            Some(value) => {
                self.position += 1;
                value
            }
            None => {
                self.samples = None;
                0.0
            }
        }
    }
}
