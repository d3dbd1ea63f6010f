use std::time::Duration;

use super::color::rgb_from_hex;
use super::constants::{
    GLOBE_SPIN_PER_FRAME, PHASE_TWO_DELAY_MS, PHASE_TWO_GLOBE_COLOR, RING_SPIN_PER_FRAME,
    STARS_SPIN_PER_FRAME,
};
use super::scene::{Material, MeshHandle, Scene};

// Animation Driver: per-frame rotation of globe, ring and starfield, with a
// one-way switch to the second phase after a fixed delay.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationPhase {
    One,
    Two,
}

#[derive(Clone, Debug)]
pub struct AnimationDriver {
    globe: MeshHandle,
    ring: MeshHandle,
    stars: MeshHandle,
    phase: AnimationPhase,
    delay: Duration,
    frames: u64,
}

impl AnimationDriver {
    pub fn new(globe: MeshHandle, ring: MeshHandle, stars: MeshHandle) -> Self {
        Self::with_delay(
            globe,
            ring,
            stars,
            Duration::from_millis(PHASE_TWO_DELAY_MS as u64),
        )
    }

    pub fn with_delay(
        globe: MeshHandle,
        ring: MeshHandle,
        stars: MeshHandle,
        delay: Duration,
    ) -> Self {
        Self {
            globe,
            ring,
            stars,
            phase: AnimationPhase::One,
            delay,
            frames: 0,
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// True while still in the first phase once `elapsed` has reached the
    /// delay.
    pub fn is_due(&self, elapsed: Duration) -> bool {
        self.phase == AnimationPhase::One && elapsed >= self.delay
    }

    /// How long after `elapsed` the switch should fire, counting from the
    /// same start as `elapsed`. `None` once the second phase is running.
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        match self.phase {
            AnimationPhase::Two => None,
            AnimationPhase::One if self.is_due(elapsed) => Some(Duration::ZERO),
            AnimationPhase::One => Some(self.delay - elapsed),
        }
    }

    /// One frame of rotation. The starfield only turns during the first phase.
    pub fn step(&mut self, scene: &mut Scene) {
        if let Some(n) = scene.node_mut(self.globe) {
            n.transform.rotation.y += GLOBE_SPIN_PER_FRAME;
        }
        if let Some(n) = scene.node_mut(self.ring) {
            n.transform.rotation.z += RING_SPIN_PER_FRAME;
        }
        if self.phase == AnimationPhase::One {
            if let Some(n) = scene.node_mut(self.stars) {
                n.transform.rotation.y += STARS_SPIN_PER_FRAME;
            }
        }
        self.frames += 1;
    }

    /// Swap the globe to the flat solid-color material and enter the second
    /// phase. Returns false if the transition already happened.
    pub fn enter_phase_two(&mut self, scene: &mut Scene) -> bool {
        if self.phase == AnimationPhase::Two {
            return false;
        }
        if let Some(n) = scene.node_mut(self.globe) {
            n.material = Material::basic(rgb_from_hex(PHASE_TWO_GLOBE_COLOR));
        }
        self.phase = AnimationPhase::Two;
        log::info!("[phase] entering phase two after {} frames", self.frames);
        true
    }
}
