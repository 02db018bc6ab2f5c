/// Best-effort sound through the default output device.
///
/// Sounds are read and decoded once at load time so a broken file is
/// caught (and logged) before play starts.  Playback is fire-and-forget:
/// one-shots are handed to the mixer and forgotten, the music loop lives
/// in a `Sink` until the next session replaces it.  With no output device
/// every call is silently skipped.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use log::{debug, info, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

/// An encoded sound (WAV or MP3) that decoded cleanly at load time.
#[derive(Clone, Debug)]
pub struct Sound {
    pub path: PathBuf,
    bytes: Arc<[u8]>,
}

impl Sound {
    /// A fresh decoder over the in-memory file.
    pub fn decoder(&self) -> anyhow::Result<Decoder<Cursor<Arc<[u8]>>>> {
        Decoder::new(Cursor::new(Arc::clone(&self.bytes)))
            .with_context(|| format!("cannot decode {}", self.path.display()))
    }
}

impl PartialEq for Sound {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

/// Returns `None` (and logs why) when the file is missing, empty or not
/// a format the decoder understands.
pub fn load_sound(path: &Path) -> Option<Sound> {
    match try_load_sound(path) {
        Ok(sound) => {
            debug!("loaded sound {}", path.display());
            Some(sound)
        }
        Err(e) => {
            warn!("sound disabled: {:#}", e);
            None
        }
    }
}

fn try_load_sound(path: &Path) -> anyhow::Result<Sound> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    if bytes.is_empty() {
        bail!("{} is empty", path.display());
    }
    let sound = Sound {
        path: path.to_path_buf(),
        bytes: bytes.into(),
    };
    sound.decoder()?;
    Ok(sound)
}

/// The first of `candidates` that exists and decodes.
pub fn load_first(candidates: &[PathBuf]) -> Option<Sound> {
    let found = candidates
        .iter()
        .filter(|p| p.exists())
        .find_map(|p| load_sound(p));
    if found.is_none() {
        warn!("no playable file among {:?}", candidates);
    }
    found
}

struct Output {
    // Dropping the stream closes the device.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

pub struct Audio {
    output: Option<Output>,
    music: Option<Sink>,
}

impl Audio {
    /// Open the default output device, or fall back to silence.
    pub fn open() -> Self {
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                info!("audio output opened");
                Audio {
                    output: Some(Output {
                        _stream: stream,
                        handle,
                    }),
                    music: None,
                }
            }
            Err(e) => {
                warn!("no audio output, playing silently: {}", e);
                Self::silent()
            }
        }
    }

    pub fn silent() -> Self {
        Audio {
            output: None,
            music: None,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.output.is_none()
    }

    pub fn is_music_playing(&self) -> bool {
        self.music.as_ref().map_or(false, |sink| !sink.empty())
    }

    /// Play a one-shot sound.  `None` is silence.
    pub fn play(&mut self, sound: Option<&Sound>) {
        let (Some(sound), Some(out)) = (sound, self.output.as_ref()) else {
            return;
        };
        let played = sound
            .decoder()
            .and_then(|d| out.handle.play_raw(d.convert_samples()).context("output refused sound"));
        if let Err(e) = played {
            warn!("could not play {}: {:#}", sound.path.display(), e);
        }
    }

    /// Replace whatever music is playing with an endless loop of `music`.
    pub fn start_music(&mut self, music: Option<&Sound>) {
        self.music = None;
        let (Some(music), Some(out)) = (music, self.output.as_ref()) else {
            return;
        };
        match loop_on(out, music) {
            Ok(sink) => {
                info!("music started: {}", music.path.display());
                self.music = Some(sink);
            }
            Err(e) => warn!("background music unavailable: {:#}", e),
        }
    }
}

fn loop_on(out: &Output, music: &Sound) -> anyhow::Result<Sink> {
    let sink = Sink::try_new(&out.handle).context("cannot open music channel")?;
    sink.append(music.decoder()?.repeat_infinite());
    Ok(sink)
}
