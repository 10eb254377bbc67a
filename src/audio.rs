use rodio::{
    Decoder, OutputStream, OutputStreamHandle, Sink, Source,
    source::{Buffered, SineWave},
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::config::AudioConfig;

/// Sound effects the simulation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A projectile was fired
    Hit,
    /// A projectile struck an enemy
    Explosion,
}

/// Fire-and-forget sound output. Implementations must never block the caller.
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Collects requested effects instead of playing them (headless runs, tests).
impl SoundSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

type Sample = Buffered<Decoder<BufReader<File>>>;

/// What gets played for an effect: the decoded file, or a synthesized blip when the file is missing
enum Clip {
    Sample(Sample),
    Tone { frequency: f32, duration: Duration },
}

/// Audio manager for playing sound effects
pub struct AudioManager {
    /// Keeps the output device open; None when no device could be opened
    output: Option<(OutputStream, OutputStreamHandle)>,
    hit: Clip,
    explosion: Clip,
    volume: f32,
}

impl AudioManager {
    /// Open the default output device and pre-load the effect files.
    ///
    /// Never fails: without a device the manager stays silent, and a file that
    /// cannot be decoded is replaced by a short tone.
    pub fn new(config: &AudioConfig) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                log::warn!("Failed to initialize audio, continuing without sound: {err}");
                None
            }
        };

        Self {
            output,
            hit: load_clip(&config.hit_sound, 880.0),
            explosion: load_clip(&config.explosion_sound, 110.0),
            volume: config.volume.clamp(0.0, 1.0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }
}

impl SoundSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        let clip = match effect {
            SoundEffect::Hit => &self.hit,
            SoundEffect::Explosion => &self.explosion,
        };

        // Playback errors are dropped so a sound problem can't stall a frame
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                match clip {
                    // Buffered sources clone cheaply, they share the decoded samples
                    Clip::Sample(sample) => sink.append(sample.clone()),
                    Clip::Tone {
                        frequency,
                        duration,
                    } => sink.append(
                        SineWave::new(*frequency)
                            .take_duration(*duration)
                            .amplify(0.25),
                    ),
                }
                sink.detach();
            }
            Err(err) => log::debug!("Dropped {effect:?} sound: {err}"),
        }
    }
}

fn load_clip(path: &Path, fallback_frequency: f32) -> Clip {
    let decoded = File::open(path)
        .map_err(|err| err.to_string())
        .and_then(|file| Decoder::new(BufReader::new(file)).map_err(|err| err.to_string()));

    match decoded {
        Ok(source) => Clip::Sample(source.buffered()),
        Err(err) => {
            log::warn!(
                "Could not load {}, using a synthesized tone: {err}",
                path.display()
            );
            Clip::Tone {
                frequency: fallback_frequency,
                duration: Duration::from_millis(80),
            }
        }
    }
}
