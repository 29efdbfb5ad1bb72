//! Optional sound cues.
//!
//! Audio is a capability that may be absent: availability is computed once
//! at startup, and every playback call is a no-op when it is. A missing
//! output device, a missing cue file, or a decode failure disables the
//! affected cue for the session without surfacing an error; playback never
//! blocks or fails a state transition.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::log;

const AMBIENT_FILE: &str = "background_music.mp3";
const SPIN_FILE: &str = "rolling_sound.mp3";
const PICK_FILE: &str = "select_sound.mp3";

const AMBIENT_VOLUME: f32 = 0.3;
const SPIN_VOLUME: f32 = 0.5;
const PICK_VOLUME: f32 = 0.7;

#[derive(Default)]
pub struct Audio {
    inner: Option<Backend>,
}

struct Backend {
    // Dropping the stream kills every sink attached to it.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    _ambient: Option<Sink>,
    spin_cue: Option<Vec<u8>>,
    pick_cue: Option<Vec<u8>>,
    spin_sink: Option<Sink>,
}

impl Audio {
    /// Probe the output device and load the cue files from `dir`. Never
    /// fails; a disabled `Audio` is returned when anything is unavailable.
    pub fn init(dir: &Path) -> Self {
        let Ok((stream, handle)) = OutputStream::try_default() else {
            log::log("No audio output device, sound disabled");
            return Self { inner: None };
        };

        let ambient_cue = read_cue(dir, AMBIENT_FILE);
        let spin_cue = read_cue(dir, SPIN_FILE);
        let pick_cue = read_cue(dir, PICK_FILE);

        // The ambient loop starts immediately and runs for the session.
        let ambient = ambient_cue.and_then(|bytes| {
            let sink = Sink::try_new(&handle).ok()?;
            let source = Decoder::new(Cursor::new(bytes)).ok()?;
            sink.set_volume(AMBIENT_VOLUME);
            sink.append(source.repeat_infinite());
            Some(sink)
        });

        Self {
            inner: Some(Backend {
                _stream: stream,
                handle,
                _ambient: ambient,
                spin_cue,
                pick_cue,
                spin_sink: None,
            }),
        }
    }

    pub fn enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Start the looping spin cue. Replaces any loop already playing.
    pub fn start_spin_loop(&mut self) {
        let Some(backend) = self.inner.as_mut() else {
            return;
        };
        if let Some(sink) = backend.spin_sink.take() {
            sink.stop();
        }
        let Some(bytes) = backend.spin_cue.clone() else {
            return;
        };
        let Ok(sink) = Sink::try_new(&backend.handle) else {
            return;
        };
        let Ok(source) = Decoder::new(Cursor::new(bytes)) else {
            return;
        };
        sink.set_volume(SPIN_VOLUME);
        sink.append(source.repeat_infinite());
        backend.spin_sink = Some(sink);
    }

    /// Stop the spin loop if one is playing.
    pub fn stop_spin_loop(&mut self) {
        if let Some(backend) = self.inner.as_mut() {
            if let Some(sink) = backend.spin_sink.take() {
                sink.stop();
            }
        }
    }

    /// Fire the one-shot pick-confirmation cue.
    pub fn play_pick(&self) {
        let Some(backend) = self.inner.as_ref() else {
            return;
        };
        let Some(bytes) = backend.pick_cue.clone() else {
            return;
        };
        let Ok(sink) = Sink::try_new(&backend.handle) else {
            return;
        };
        let Ok(source) = Decoder::new(Cursor::new(bytes)) else {
            return;
        };
        sink.set_volume(PICK_VOLUME);
        sink.append(source);
        sink.detach();
    }
}

fn read_cue(dir: &Path, file: &str) -> Option<Vec<u8>> {
    let path = dir.join(file);
    match fs::read(&path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::log(&format!("Sound cue {} unavailable: {}", path.display(), e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_audio_calls_are_noops() {
        let mut audio = Audio::default();
        assert!(!audio.enabled());

        // None of these may panic or block without a backend.
        audio.start_spin_loop();
        audio.stop_spin_loop();
        audio.play_pick();
    }
}
