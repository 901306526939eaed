use std::collections::HashMap;
use web_sys::HtmlAudioElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    PlayerShot,
    EnemyShot,
    Hit,
    Explosion,
}

impl AudioCue {
    const ALL: [AudioCue; 4] =
        [AudioCue::PlayerShot, AudioCue::EnemyShot, AudioCue::Hit, AudioCue::Explosion];

    fn src(&self) -> &'static str {
        match self {
            AudioCue::PlayerShot => "assets/sound/bullet01.mp3",
            AudioCue::EnemyShot => "assets/sound/bullet02.mp3",
            AudioCue::Hit => "assets/sound/explosion_hit.mp3",
            AudioCue::Explosion => "assets/sound/explosion_big.flac",
        }
    }

    fn volume(&self) -> f64 {
        match self {
            AudioCue::PlayerShot => 0.8,
            AudioCue::EnemyShot => 0.3,
            _ => 1.0,
        }
    }
}

/// Fire-and-forget sound effects.
pub trait Audio {
    fn play(&mut self, cue: AudioCue);
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
}

const MUSIC_SRC: &str = "assets/music/bensound-scifi.mp3";
const MUSIC_VOLUME: f64 = 0.5;

/// Background loop. Starts on the first unmute; afterwards it is only
/// muted in place.
#[derive(Debug, Default)]
pub struct Soundtrack {
    started: bool,
}

impl Soundtrack {
    /// Returns true when the track has to be started now.
    pub fn on_mute_change(&mut self, muted: bool) -> bool {
        if muted || self.started {
            return false;
        }
        self.started = true;
        true
    }
}

/// One `<audio>` element per cue plus the looping music track. Starts
/// muted until the player interacts.
pub struct HtmlAudio {
    elements: HashMap<AudioCue, HtmlAudioElement>,
    music: Option<HtmlAudioElement>,
    soundtrack: Soundtrack,
    muted: bool,
}

impl HtmlAudio {
    pub fn new() -> Self {
        let mut elements = HashMap::new();
        for cue in AudioCue::ALL {
            if let Ok(el) = HtmlAudioElement::new_with_src(cue.src()) {
                el.set_volume(cue.volume());
                elements.insert(cue, el);
            }
        }
        let music = HtmlAudioElement::new_with_src(MUSIC_SRC).ok();
        if let Some(el) = &music {
            el.set_loop(true);
            el.set_volume(MUSIC_VOLUME);
            el.set_muted(true);
        }
        Self { elements, music, soundtrack: Soundtrack::default(), muted: true }
    }
}

impl Audio for HtmlAudio {
    fn play(&mut self, cue: AudioCue) {
        if self.muted {
            return;
        }
        if let Some(el) = self.elements.get(&cue) {
            el.set_current_time(0.0);
            // Autoplay rejections are not worth surfacing
            let _ = el.play();
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        for el in self.elements.values().chain(self.music.iter()) {
            el.set_muted(muted);
        }
        if self.soundtrack.on_mute_change(muted) {
            if let Some(music) = &self.music {
                let _ = music.play();
            }
        }
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(test)]
pub mod recording {
    use super::*;

    #[derive(Default)]
    pub struct RecordingAudio {
        pub played: Vec<AudioCue>,
        pub muted: bool,
    }

    impl RecordingAudio {
        pub fn count(&self, cue: AudioCue) -> usize {
            self.played.iter().filter(|c| **c == cue).count()
        }
    }

    impl Audio for RecordingAudio {
        fn play(&mut self, cue: AudioCue) {
            self.played.push(cue);
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn is_muted(&self) -> bool {
            self.muted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Soundtrack;

    #[test]
    fn music_starts_once_on_first_unmute() {
        let mut track = Soundtrack::default();
        assert!(!track.on_mute_change(true));
        assert!(track.on_mute_change(false));
        // later toggles only mute the running loop
        assert!(!track.on_mute_change(true));
        assert!(!track.on_mute_change(false));
    }
}
