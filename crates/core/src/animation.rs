//! Animation collaborator - visual tweening of piece transitions
//!
//! The session commits logical piece state immediately and asks the animator
//! to tween the visuals. Gameplay transitions that must wait for the visuals
//! (settling after a hard drop, releasing the command queue) run when
//! [`Animator::update`] reports that playback finished.

use crate::types::{Axis, Cube, Direction};

/// What a track animates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Translate by a displacement
    Move(Cube),
    /// Quarter-turn around a world axis
    Rotate { axis: Axis, direction: Direction },
}

/// Descriptor of one visual transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub kind: TrackKind,
    /// Seconds
    pub duration: f32,
}

impl Track {
    pub fn movement(offset: Cube, duration: f32) -> Self {
        Self {
            kind: TrackKind::Move(offset),
            duration,
        }
    }

    pub fn rotation(axis: Axis, direction: Direction, duration: f32) -> Self {
        Self {
            kind: TrackKind::Rotate { axis, direction },
            duration,
        }
    }
}

/// Drives visual transitions for the active piece.
///
/// Implementations are owned by the application shell and injected into the
/// session.
pub trait Animator {
    /// Duration used for new tracks, in seconds
    fn duration(&self) -> f32;

    /// Start playing `track` alongside anything already playing
    fn play(&mut self, track: Track);

    /// Advance playback by `delta` seconds.
    ///
    /// Returns true exactly when the last playing track finished during this
    /// call (the "finished" notification).
    fn update(&mut self, delta: f32) -> bool;

    fn is_playing(&self) -> bool;

    /// Drop every track without a finished notification
    fn cancel(&mut self);
}

/// Animator without visuals: every track completes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantAnimator;

impl Animator for InstantAnimator {
    fn duration(&self) -> f32 {
        0.0
    }

    fn play(&mut self, _track: Track) {}

    fn update(&mut self, _delta: f32) -> bool {
        false
    }

    fn is_playing(&self) -> bool {
        false
    }

    fn cancel(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Playing {
    track: Track,
    elapsed: f32,
}

impl Playing {
    fn done(&self) -> bool {
        self.elapsed >= self.track.duration
    }
}

/// Time-based animator playing tracks in parallel
#[derive(Debug, Clone, PartialEq)]
pub struct TweenAnimator {
    duration: f32,
    playing: Vec<Playing>,
}

impl TweenAnimator {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            playing: Vec::new(),
        }
    }

    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
    }

    /// Tracks still playing
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.playing.iter().map(|p| &p.track)
    }

    /// Progress of the slowest playing track, `0.0..=1.0` (1.0 when idle)
    pub fn progress(&self) -> f32 {
        self.playing
            .iter()
            .map(|p| {
                if p.track.duration <= 0.0 {
                    1.0
                } else {
                    (p.elapsed / p.track.duration).min(1.0)
                }
            })
            .fold(1.0, f32::min)
    }
}

impl Default for TweenAnimator {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_ANIMATION_DURATION)
    }
}

impl Animator for TweenAnimator {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn play(&mut self, track: Track) {
        self.playing.push(Playing {
            track,
            elapsed: 0.0,
        });
    }

    fn update(&mut self, delta: f32) -> bool {
        if self.playing.is_empty() {
            return false;
        }
        for p in &mut self.playing {
            p.elapsed += delta;
        }
        self.playing.retain(|p| !p.done());
        self.playing.is_empty()
    }

    fn is_playing(&self) -> bool {
        !self.playing.is_empty()
    }

    fn cancel(&mut self) {
        self.playing.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_animator_never_plays() {
        let mut animator = InstantAnimator;
        animator.play(Track::movement(Cube::LEFT, 1.0));
        assert!(!animator.is_playing());
        assert!(!animator.update(1.0));
    }

    #[test]
    fn test_tween_finishes_after_duration() {
        let mut animator = TweenAnimator::new(0.5);
        animator.play(Track::movement(Cube::DOWN, animator.duration()));
        assert!(animator.is_playing());

        assert!(!animator.update(0.25));
        assert_eq!(animator.progress(), 0.5);
        assert!(animator.update(0.25));
        assert!(!animator.is_playing());

        // The notification is delivered once.
        assert!(!animator.update(0.25));
    }

    #[test]
    fn test_parallel_tracks_finish_together() {
        let mut animator = TweenAnimator::new(0.5);
        animator.play(Track::movement(Cube::LEFT, 0.5));
        animator.play(Track::rotation(Axis::Y, Direction::Clockwise, 1.0));

        assert!(!animator.update(0.75));
        assert_eq!(animator.tracks().count(), 1);
        assert!(animator.update(0.5));
    }

    #[test]
    fn test_zero_duration_track_finishes_on_next_update() {
        let mut animator = TweenAnimator::new(0.0);
        animator.play(Track::movement(Cube::RIGHT, 0.0));
        assert!(animator.is_playing());
        assert!(animator.update(0.0));
    }

    #[test]
    fn test_cancel() {
        let mut animator = TweenAnimator::new(1.0);
        animator.play(Track::movement(Cube::RIGHT, 1.0));
        animator.cancel();
        assert!(!animator.is_playing());
        assert_eq!(animator.progress(), 1.0);
    }
}
