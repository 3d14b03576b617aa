//! Sound cue seam
//!
//! Audio playback lives outside this crate; narration only needs to
//! fire a cue and, when the backend knows it, read the cue's length
//! to pace the text scroll. The trait keeps the seam narrow enough
//! that tests can substitute a recording stub.

use serde::{Deserialize, Serialize};

/// Identifier of a voice-over / effect cue in the audio bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundCue(pub u32);

pub trait AudioBackend {
    /// Start playing the cue. Fire-and-forget.
    fn play_cue(&mut self, cue: SoundCue);

    /// Length of the cue in audio frames, if the backend knows it.
    /// `None` makes narration fall back to its line-count estimate.
    fn duration_frames(&self, cue: SoundCue) -> Option<u32>;
}

/// Backend used when sound is disabled or unavailable: plays
/// nothing, knows no durations.
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn play_cue(&mut self, _cue: SoundCue) {}

    fn duration_frames(&self, _cue: SoundCue) -> Option<u32> {
        None
    }
}
