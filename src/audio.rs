//! Audio cues
//!
//! The simulation never plays sound. It emits [`GameEvent`]s; this module maps
//! them to cues and hands those to whatever [`AudioSink`] the host provides.

use crate::sim::GameEvent;

/// Sound effect / music cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Actor flapped
    Flap,
    /// Obstacle cleared
    Score,
    /// Level up
    LevelUp,
    /// Previous best beaten
    HighScore,
    /// Run ended
    GameOver,
    /// Start background music
    MusicStart,
    /// Stop background music
    MusicStop,
}

impl AudioCue {
    /// Cue for an event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(AudioCue::Flap),
            GameEvent::Scored { .. } => Some(AudioCue::Score),
            GameEvent::LevelUp { .. } => Some(AudioCue::LevelUp),
            GameEvent::NewHighScore { .. } => Some(AudioCue::HighScore),
            GameEvent::GameOver { .. } => Some(AudioCue::GameOver),
            GameEvent::MusicStart => Some(AudioCue::MusicStart),
            GameEvent::MusicStop => Some(AudioCue::MusicStop),
            GameEvent::Started
            | GameEvent::ObstacleSpawned
            | GameEvent::BonusTargetActive
            | GameEvent::Reset => None,
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, AudioCue::MusicStart | AudioCue::MusicStop)
    }
}

/// Something that can play cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue, volume: f32);
}

/// Volume and mute state shared by all sinks
#[derive(Debug, Clone)]
pub struct Mixer {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective volume for a cue
    pub fn effective_volume(&self, cue: AudioCue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if cue.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Route events to a sink. Silent cues are dropped, except music stop,
    /// which always goes through so a muted host can still stop playback.
    pub fn dispatch<S: AudioSink + ?Sized>(&self, events: &[GameEvent], sink: &mut S) -> usize {
        let mut played = 0;
        for cue in events.iter().filter_map(AudioCue::from_event) {
            let vol = self.effective_volume(cue);
            if vol <= 0.0 && cue != AudioCue::MusicStop {
                continue;
            }
            sink.play(cue, vol);
            played += 1;
        }
        played
    }
}

/// Sink that writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        log::debug!("audio: {:?} @ {:.2}", cue, volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TerminalCause;

    #[derive(Default)]
    struct Recorder(Vec<(AudioCue, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: AudioCue, volume: f32) {
            self.0.push((cue, volume));
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(AudioCue::from_event(&GameEvent::Flapped), Some(AudioCue::Flap));
        assert_eq!(AudioCue::from_event(&GameEvent::ObstacleSpawned), None);
        assert_eq!(
            AudioCue::from_event(&GameEvent::GameOver {
                final_score: 3,
                cause: TerminalCause::Ground
            }),
            Some(AudioCue::GameOver)
        );
    }

    #[test]
    fn test_dispatch_volumes() {
        let mixer = Mixer::new();
        let mut sink = Recorder::default();
        let played = mixer.dispatch(
            &[GameEvent::MusicStart, GameEvent::Flapped, GameEvent::Reset],
            &mut sink,
        );
        assert_eq!(played, 2);
        assert_eq!(sink.0[0].0, AudioCue::MusicStart);
        assert!((sink.0[0].1 - 0.56).abs() < 1e-6);
        assert!((sink.0[1].1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_muted_still_stops_music() {
        let mut mixer = Mixer::new();
        mixer.set_muted(true);
        let mut sink = Recorder::default();
        mixer.dispatch(&[GameEvent::Flapped, GameEvent::MusicStop], &mut sink);
        assert_eq!(sink.0, vec![(AudioCue::MusicStop, 0.0)]);
    }
}
