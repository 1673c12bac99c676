//! Impact-driven door.
//!
//! The [`Door`] component holds the door configuration and its state machine:
//!
//! ```text
//! Closed --impact/open--> Opening --tween done--> Open
//!   ^                                               |
//!   +---- tween done <-- Closing <--impact/close/timer
//! ```
//!
//! The component only decides; the door observers in
//! [`crate::systems::door`] start the [`TweenPose`](super::tween::TweenPose),
//! arm or cancel the auto-close [`Timer`](super::timer::Timer) and emit
//! events. A transition can only start from a resting state, so a door never
//! flips between open and closed mid-animation.

use bevy_ecs::prelude::{Component, Entity};
use glam::{Quat, Vec3};

use super::transform::Transform3D;

/// Signal name of the auto-close [`Timer`](super::timer::Timer) on a door.
pub const DOOR_AUTOCLOSE_SIGNAL: &str = "door_autoclose";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// How the open pose is derived from the closed pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DoorMotion {
    /// Rotate around the vertical axis.
    Rotate { angle_degrees: f32 },
    /// Move along `direction` (normalized on use).
    Slide { direction: Vec3, distance: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorAction {
    Open,
    Close,
}

/// What a door does with an impact of a given force.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImpactResponse {
    TooWeak,
    /// Strong enough, but the door is animating or may not close.
    Ignored,
    Start(DoorAction),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorCommand {
    Open,
    Close,
    Toggle,
}

#[derive(Component, Clone, Debug)]
pub struct Door {
    pub motion: DoorMotion,
    /// Transitions per second; one transition lasts `1 / open_speed` seconds.
    pub open_speed: f32,
    pub minimum_force: f32,
    /// Ball impacts always carry at least `minimum_force + 1`.
    pub assist_impacts: bool,
    pub can_close: bool,
    pub close_delay: f32,
    pub detection_radius: f32,
    pub open_sound: Option<String>,
    pub close_sound: Option<String>,
    pub hit_effect: bool,
    state: DoorState,
    closed_pose: Option<Transform3D>,
}

impl Door {
    pub fn new(motion: DoorMotion) -> Self {
        Door {
            motion,
            open_speed: 2.0,
            minimum_force: 5.0,
            assist_impacts: true,
            can_close: true,
            close_delay: 5.0,
            detection_radius: 5.0,
            open_sound: None,
            close_sound: None,
            hit_effect: false,
            state: DoorState::Closed,
            closed_pose: None,
        }
    }

    pub fn rotating(angle_degrees: f32) -> Self {
        Self::new(DoorMotion::Rotate { angle_degrees })
    }

    pub fn sliding(direction: Vec3, distance: f32) -> Self {
        Self::new(DoorMotion::Slide {
            direction,
            distance,
        })
    }

    pub fn with_minimum_force(mut self, force: f32) -> Self {
        self.minimum_force = force;
        self
    }

    pub fn with_open_speed(mut self, speed: f32) -> Self {
        self.open_speed = speed;
        self
    }

    pub fn with_close_delay(mut self, can_close: bool, delay: f32) -> Self {
        self.can_close = can_close;
        self.close_delay = delay;
        self
    }

    pub fn with_sounds(mut self, open: Option<String>, close: Option<String>) -> Self {
        self.open_sound = open;
        self.close_sound = close;
        self
    }

    pub fn with_hit_effect(mut self, enabled: bool) -> Self {
        self.hit_effect = enabled;
        self
    }

    /// Anchor the closed pose explicitly. Otherwise it is taken from the
    /// transform at the first transition.
    pub fn with_closed_pose(mut self, pose: Transform3D) -> Self {
        self.closed_pose = Some(pose);
        self
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, DoorState::Opening | DoorState::Closing)
    }

    pub fn closed_pose(&self) -> Option<Transform3D> {
        self.closed_pose
    }

    /// Force credited to a ball impact with the given speed.
    pub fn impact_force(&self, speed: f32) -> f32 {
        if self.assist_impacts {
            speed.max(self.minimum_force + 1.0)
        } else {
            speed
        }
    }

    pub fn response_to_impact(&self, force: f32) -> ImpactResponse {
        if force < self.minimum_force {
            return ImpactResponse::TooWeak;
        }
        match self.state {
            DoorState::Closed => ImpactResponse::Start(DoorAction::Open),
            DoorState::Open if self.can_close => ImpactResponse::Start(DoorAction::Close),
            _ => ImpactResponse::Ignored,
        }
    }

    /// Action for an external command. `Close` ignores `can_close`.
    pub fn action_for_command(&self, command: DoorCommand) -> Option<DoorAction> {
        match (command, self.state) {
            (DoorCommand::Open | DoorCommand::Toggle, DoorState::Closed) => Some(DoorAction::Open),
            (DoorCommand::Close | DoorCommand::Toggle, DoorState::Open) => Some(DoorAction::Close),
            _ => None,
        }
    }

    pub fn animation_duration(&self) -> f32 {
        if self.open_speed > 0.0 {
            1.0 / self.open_speed
        } else {
            0.0
        }
    }

    pub fn arms_auto_close(&self) -> bool {
        self.can_close && self.close_delay > 0.0
    }

    /// Open pose derived from a closed pose.
    pub fn open_pose(&self, closed: &Transform3D) -> Transform3D {
        match self.motion {
            DoorMotion::Rotate { angle_degrees } => Transform3D {
                translation: closed.translation,
                rotation: closed.rotation * Quat::from_rotation_y(angle_degrees.to_radians()),
            },
            DoorMotion::Slide {
                direction,
                distance,
            } => Transform3D {
                translation: closed.translation + direction.normalize_or_zero() * distance,
                rotation: closed.rotation,
            },
        }
    }

    /// Start a transition from `current`. Returns the (from, to) poses, or
    /// `None` when the door is animating or already in the requested state.
    pub fn begin(
        &mut self,
        action: DoorAction,
        current: &Transform3D,
    ) -> Option<(Transform3D, Transform3D)> {
        match (action, self.state) {
            (DoorAction::Open, DoorState::Closed) => {
                let closed = *self.closed_pose.get_or_insert(*current);
                self.state = DoorState::Opening;
                Some((*current, self.open_pose(&closed)))
            }
            (DoorAction::Close, DoorState::Open) => {
                let closed = self.closed_pose.unwrap_or(*current);
                self.state = DoorState::Closing;
                Some((*current, closed))
            }
            _ => None,
        }
    }

    /// Complete the running transition and return the resting state.
    pub fn finish(&mut self) -> DoorState {
        self.state = match self.state {
            DoorState::Opening => DoorState::Open,
            DoorState::Closing => DoorState::Closed,
            other => other,
        };
        self.state
    }
}

/// Short-lived marker spawned where a door was hit.
#[derive(Component, Clone, Copy, Debug)]
pub struct HitEffect {
    pub door: Entity,
}

/// Detection volume child of a door. Balls entering it count as impacts.
#[derive(Component, Clone, Copy, Debug)]
pub struct DoorDetector {
    pub door: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_impact_never_starts_transition() {
        let door = Door::rotating(90.0).with_minimum_force(5.0);
        assert_eq!(door.response_to_impact(4.9), ImpactResponse::TooWeak);
        assert_eq!(
            door.response_to_impact(5.0),
            ImpactResponse::Start(DoorAction::Open)
        );
    }

    #[test]
    fn no_transition_while_animating() {
        let mut door = Door::rotating(90.0);
        let pose = Transform3D::default();
        assert!(door.begin(DoorAction::Open, &pose).is_some());
        assert!(door.is_animating());
        assert_eq!(door.response_to_impact(100.0), ImpactResponse::Ignored);
        assert!(door.begin(DoorAction::Close, &pose).is_none());
        assert!(door.begin(DoorAction::Open, &pose).is_none());
        assert_eq!(door.action_for_command(DoorCommand::Toggle), None);
        assert_eq!(door.finish(), DoorState::Open);
        assert!(door.is_open());
    }

    #[test]
    fn open_door_closes_only_when_allowed() {
        let mut door = Door::rotating(90.0).with_close_delay(false, 5.0);
        door.begin(DoorAction::Open, &Transform3D::default());
        door.finish();
        assert_eq!(door.response_to_impact(10.0), ImpactResponse::Ignored);
        assert!(!door.arms_auto_close());
        assert_eq!(
            door.action_for_command(DoorCommand::Close),
            Some(DoorAction::Close)
        );
    }

    #[test]
    fn rotate_and_slide_poses() {
        let closed = Transform3D::from_xyz(1.0, 0.0, 2.0);
        let rotating = Door::rotating(90.0);
        let open = rotating.open_pose(&closed);
        assert_eq!(open.translation, closed.translation);
        assert!(open.forward().abs_diff_eq(Vec3::X, 1e-5));

        let sliding = Door::sliding(Vec3::new(2.0, 0.0, 0.0), 3.0);
        let open = sliding.open_pose(&closed);
        assert!(open.translation.abs_diff_eq(Vec3::new(4.0, 0.0, 2.0), 1e-5));
        assert_eq!(open.rotation, closed.rotation);
    }

    #[test]
    fn closing_returns_to_anchored_pose() {
        let closed = Transform3D::from_xyz(0.0, 1.5, 8.0);
        let mut door = Door::rotating(90.0);
        let (_, open) = door.begin(DoorAction::Open, &closed).unwrap();
        door.finish();
        let (from, to) = door.begin(DoorAction::Close, &open).unwrap();
        assert_eq!(from, open);
        assert_eq!(to, closed);
    }

    #[test]
    fn assisted_force_clears_threshold() {
        let door = Door::rotating(90.0).with_minimum_force(5.0);
        assert_eq!(door.impact_force(0.5), 6.0);
        assert_eq!(door.impact_force(12.0), 12.0);
        assert_eq!(door.animation_duration(), 0.5);
    }
}
