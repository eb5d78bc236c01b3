//! Animation modes and the frame counter embedded in every fighter.
//!
//! The frame counter is simulation state: it gates when an attack connects and
//! when a death animation is finished. Rendering only reads it.

use serde::{Deserialize, Serialize};

/// Behavioral/animation state of a fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationMode {
    Idle,
    Run,
    Jump,
    Fall,
    Attack,
    TakeHit,
    Death,
}

impl AnimationMode {
    pub const COUNT: usize = 7;

    pub fn all() -> [AnimationMode; Self::COUNT] {
        [
            AnimationMode::Idle,
            AnimationMode::Run,
            AnimationMode::Jump,
            AnimationMode::Fall,
            AnimationMode::Attack,
            AnimationMode::TakeHit,
            AnimationMode::Death,
        ]
    }

    /// Slot of this mode in an [`AnimationTable`]
    pub fn index(self) -> usize {
        match self {
            AnimationMode::Idle => 0,
            AnimationMode::Run => 1,
            AnimationMode::Jump => 2,
            AnimationMode::Fall => 3,
            AnimationMode::Attack => 4,
            AnimationMode::TakeHit => 5,
            AnimationMode::Death => 6,
        }
    }

    /// Modes whose animation must play to the last frame before another switch is accepted.
    pub fn locks_until_finished(self) -> bool {
        matches!(
            self,
            AnimationMode::Attack | AnimationMode::TakeHit | AnimationMode::Death
        )
    }
}

/// Sprite-sheet metadata for one mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Number of frames in the sheet
    pub frames_max: u32,
    /// Width of a single frame at base scale
    pub frame_width: f32,
}

/// One clip per [`AnimationMode`], indexed by [`AnimationMode::index`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTable {
    clips: [AnimationClip; AnimationMode::COUNT],
}

impl AnimationTable {
    pub fn new(clips: [AnimationClip; AnimationMode::COUNT]) -> Self {
        Self { clips }
    }

    pub fn clip(&self, mode: AnimationMode) -> &AnimationClip {
        &self.clips[mode.index()]
    }
}

/// Current mode plus frame bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    mode: AnimationMode,
    frame_index: u32,
    frame_tick_counter: u64,
    frames_max: u32,
    frame_hold_ticks: u32,
}

impl Animator {
    pub fn new(mode: AnimationMode, frames_max: u32, frame_hold_ticks: u32) -> Self {
        Self {
            mode,
            frame_index: 0,
            frame_tick_counter: 0,
            frames_max: frames_max.max(1),
            frame_hold_ticks: frame_hold_ticks.max(1),
        }
    }

    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn frames_max(&self) -> u32 {
        self.frames_max
    }

    /// True once the last frame of the current clip is on screen.
    pub fn on_last_frame(&self) -> bool {
        self.frame_index + 1 >= self.frames_max
    }

    /// Count one tick; every `frame_hold_ticks` ticks step to the next frame, wrapping to 0.
    pub fn advance(&mut self) {
        self.frame_tick_counter += 1;
        if self.frame_tick_counter % u64::from(self.frame_hold_ticks) == 0 {
            self.frame_index = (self.frame_index + 1) % self.frames_max;
        }
    }

    /// Start a new clip from its first frame.
    pub fn play(&mut self, mode: AnimationMode, frames_max: u32) {
        self.mode = mode;
        self.frames_max = frames_max.max(1);
        self.frame_index = 0;
    }
}
