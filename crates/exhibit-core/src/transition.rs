//! Per-frame camera easing toward a target pose.
//!
//! Each step closes a fixed fraction of the remaining gap, which reads as an
//! ease-out. Once both the position distance and the orientation angle drop
//! below their epsilons the pose snaps to the target and the step reports
//! [`StepOutcome::Arrived`]; further steps are idle until a new target is set.

use crate::constants::{ARRIVAL_ANGLE_EPSILON, ARRIVAL_EPSILON, REFERENCE_FPS, TRANSITION_FACTOR};
use glam::{Quat, Vec3};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionState {
    pub current_position: Vec3,
    pub current_orientation: Quat,
    pub target_position: Vec3,
    pub target_orientation: Quat,
}

impl TransitionState {
    pub fn at_rest(position: Vec3, orientation: Quat) -> Self {
        Self {
            current_position: position,
            current_orientation: orientation,
            target_position: position,
            target_orientation: orientation,
        }
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.current_position.distance(self.target_position)
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.current_orientation
            .angle_between(self.target_orientation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Still approaching the target.
    Moving,
    /// Reached the target on this step.
    Arrived,
    /// Nothing to do: already at the target.
    Idle,
}

#[derive(Clone, Debug)]
pub struct TransitionDriver {
    state: TransitionState,
    factor: f32,
    settled: bool,
}

impl TransitionDriver {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self::with_factor(position, orientation, TRANSITION_FACTOR)
    }

    /// `factor` is clamped to (0, 1]; 1 jumps to the target in a single step.
    pub fn with_factor(position: Vec3, orientation: Quat, factor: f32) -> Self {
        Self {
            state: TransitionState::at_rest(position, orientation.normalize()),
            factor: sanitize_factor(factor),
            settled: true,
        }
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn set_factor(&mut self, factor: f32) {
        self.factor = sanitize_factor(factor);
    }

    /// Replaces any pending target; the camera continues from where it is.
    pub fn set_target(&mut self, position: Vec3, orientation: Quat) {
        self.state.target_position = position;
        self.state.target_orientation = orientation.normalize();
        self.settled = self.within_epsilon();
        if self.settled {
            self.snap();
        }
    }

    /// Places the camera on the target immediately.
    pub fn jump_to(&mut self, position: Vec3, orientation: Quat) {
        self.state = TransitionState::at_rest(position, orientation.normalize());
        self.settled = true;
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// One reference frame's worth of easing.
    pub fn step(&mut self) -> StepOutcome {
        self.advance(self.factor)
    }

    /// Easing scaled to the elapsed time so the approach speed does not
    /// depend on the display refresh rate.
    pub fn step_dt(&mut self, dt: Duration) -> StepOutcome {
        let frames = dt.as_secs_f32() * REFERENCE_FPS;
        if frames <= 0.0 {
            return if self.settled {
                StepOutcome::Idle
            } else {
                StepOutcome::Moving
            };
        }
        let alpha = 1.0 - (1.0 - self.factor).powf(frames);
        self.advance(sanitize_factor(alpha))
    }

    fn advance(&mut self, t: f32) -> StepOutcome {
        if self.settled {
            return StepOutcome::Idle;
        }
        let s = &mut self.state;
        s.current_position = s.current_position.lerp(s.target_position, t);
        s.current_orientation = s
            .current_orientation
            .slerp(s.target_orientation, t)
            .normalize();
        if self.within_epsilon() {
            self.snap();
            self.settled = true;
            StepOutcome::Arrived
        } else {
            StepOutcome::Moving
        }
    }

    fn within_epsilon(&self) -> bool {
        self.state.distance() <= ARRIVAL_EPSILON && self.state.angle() <= ARRIVAL_ANGLE_EPSILON
    }

    fn snap(&mut self) {
        self.state.current_position = self.state.target_position;
        self.state.current_orientation = self.state.target_orientation;
    }
}

#[inline]
fn sanitize_factor(factor: f32) -> f32 {
    if factor.is_finite() && factor > 0.0 {
        factor.min(1.0)
    } else {
        TRANSITION_FACTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_one_arrives_in_a_single_step() {
        let mut d = TransitionDriver::with_factor(Vec3::ZERO, Quat::IDENTITY, 1.0);
        d.set_target(Vec3::new(3.0, 0.0, 0.0), Quat::from_rotation_y(1.0));
        assert_eq!(d.step(), StepOutcome::Arrived);
        assert_eq!(d.state().current_position, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(d.step(), StepOutcome::Idle);
    }

    #[test]
    fn invalid_factor_falls_back_to_default() {
        let d = TransitionDriver::with_factor(Vec3::ZERO, Quat::IDENTITY, f32::NAN);
        assert_eq!(d.factor(), TRANSITION_FACTOR);
        let d = TransitionDriver::with_factor(Vec3::ZERO, Quat::IDENTITY, -2.0);
        assert_eq!(d.factor(), TRANSITION_FACTOR);
    }

    #[test]
    fn zero_dt_does_not_move() {
        let mut d = TransitionDriver::new(Vec3::ZERO, Quat::IDENTITY);
        d.set_target(Vec3::X * 5.0, Quat::IDENTITY);
        let before = *d.state();
        assert_eq!(d.step_dt(Duration::ZERO), StepOutcome::Moving);
        assert_eq!(*d.state(), before);
    }

    #[test]
    fn one_reference_frame_of_dt_matches_a_plain_step() {
        let mut a = TransitionDriver::new(Vec3::ZERO, Quat::IDENTITY);
        let mut b = a.clone();
        a.set_target(Vec3::new(0.0, 0.0, -8.0), Quat::IDENTITY);
        b.set_target(Vec3::new(0.0, 0.0, -8.0), Quat::IDENTITY);
        a.step();
        b.step_dt(Duration::from_secs_f32(1.0 / REFERENCE_FPS));
        let diff = a.state().current_position - b.state().current_position;
        assert!(diff.length() < 1e-4);
    }
}
