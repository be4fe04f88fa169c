use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};

/// Plays the chime for a completed task.
pub struct Chime {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl Chime {
    /// Returns `None` when no output device is available.
    pub fn new() -> Option<Self> {
        let (stream, stream_handle) = OutputStream::try_default().ok()?;
        Some(Self {
            _stream: stream,
            stream_handle,
        })
    }

    pub fn play(&self) {
        match Sink::try_new(&self.stream_handle) {
            Ok(sink) => {
                // Rising two-tone: 660 Hz then 990 Hz
                let low = SineWave::new(660.0)
                    .take_duration(Duration::from_millis(90))
                    .amplify(0.25);
                let gap = SineWave::new(0.0)
                    .take_duration(Duration::from_millis(30))
                    .amplify(0.0);
                let high = SineWave::new(990.0)
                    .take_duration(Duration::from_millis(140))
                    .amplify(0.25);

                sink.append(low);
                sink.append(gap);
                sink.append(high);

                // Plays on rodio's thread without blocking the event loop
                sink.detach();
            }
            Err(e) => tracing::warn!(error = %e, "could not create audio sink"),
        }
    }
}
