use std::{
    fs::File,
    io::BufReader,
    path::Path,
    time::Duration,
};

use rodio::{
    Decoder,
    OutputStream,
    OutputStreamHandle,
    Sink,
    Source,
};

/// Advance delay used when a clip is missing or its duration is unknown.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(1500);

/// Fixed cue played on a wrong guess.
pub const WRONG_CUE: &str = "assets/wrong.wav";

/// Fire-and-forget clip playback. A missing audio device, clip or codec is
/// never fatal: feedback just goes silent.
pub struct AudioPlayer {
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Self { _stream: Some(stream), handle: Some(handle) },
            Err(e) => {
                eprintln!("No audio output available: {}. Continuing without sound.", e);
                Self { _stream: None, handle: None }
            }
        }
    }

    /// Plays a clip on a detached sink and reports its duration when the
    /// decoder knows it. The sink releases itself on natural completion.
    pub fn play(&self, path: &Path) -> Option<Duration> {
        let handle = self.handle.as_ref()?;

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Could not open audio clip {}: {}", path.display(), e);
                return None;
            }
        };
        let decoder = match Decoder::new(BufReader::new(file)) {
            Ok(decoder) => decoder,
            Err(e) => {
                eprintln!("Could not decode audio clip {}: {}", path.display(), e);
                return None;
            }
        };
        let duration = decoder.total_duration();

        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(e) => {
                eprintln!("Could not start playback for {}: {}", path.display(), e);
                return None;
            }
        };
        sink.append(decoder);
        sink.detach();
        duration
    }

    pub fn play_wrong_cue(&self) {
        let _ = self.play(Path::new(WRONG_CUE));
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}
