//! Scripted input driver for the headless binary.
//!
//! The [`Autopilot`] resource holds a queue of [`AutopilotStep`]s that
//! [`crate::systems::autopilot::autopilot_system`] turns into
//! [`InputState`](crate::resources::input::InputState) writes, one frame at a
//! time, exactly as a host would from real devices. Waiting steps give up
//! after a timeout so a broken run ends instead of spinning forever.
//!
//! [`Autopilot::playthrough`] builds the full demo: walk through the forest
//! tunnel, solve the button puzzle (optionally pressing a few wrong buttons
//! first), throw the crystal at the exit and walk out.

use bevy_ecs::prelude::Resource;
use glam::Vec3;
use std::collections::VecDeque;

use crate::resources::escaperoom::EscapeStage;

const DEFAULT_STEP_TIMEOUT: f32 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub enum AutopilotStep {
    /// Wait until the named scene is loaded.
    WaitForScene(String),
    /// Walk until horizontally within `tolerance` of `target`.
    WalkTo { target: Vec3, tolerance: f32 },
    /// Keep the pointer ray on the named scene object.
    Aim(String),
    PointerDown,
    PointerUp,
    /// Press the back action for one frame.
    ToggleCursor,
    Wait(f32),
    /// Wait until the named door is fully open.
    WaitForDoorOpen(String),
    WaitForStage(EscapeStage),
}

#[derive(Resource, Debug, Clone)]
pub struct Autopilot {
    steps: VecDeque<AutopilotStep>,
    /// Seconds spent on the current step.
    pub step_elapsed: f32,
    pub step_timeout: f32,
    /// Object the pointer is aimed at.
    pub aim: Option<String>,
    pub pointer_down: bool,
    pub back_pressed: bool,
    failure: Option<String>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Autopilot {
            steps: VecDeque::new(),
            step_elapsed: 0.0,
            step_timeout: DEFAULT_STEP_TIMEOUT,
            aim: None,
            pointer_down: false,
            back_pressed: false,
            failure: None,
        }
    }
}

impl Autopilot {
    pub fn new(steps: impl IntoIterator<Item = AutopilotStep>) -> Self {
        Autopilot {
            steps: steps.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn current(&self) -> Option<&AutopilotStep> {
        self.steps.front()
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// Done with the current step.
    pub fn advance(&mut self) {
        self.steps.pop_front();
        self.step_elapsed = 0.0;
    }

    /// Abort the run.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.failure = Some(reason.into());
        self.steps.clear();
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn succeeded(&self) -> bool {
        self.is_finished() && self.failure.is_none()
    }

    /// Steps that aim at `object` and click it.
    pub fn click(object: &str) -> [AutopilotStep; 3] {
        [
            AutopilotStep::Aim(object.to_string()),
            AutopilotStep::PointerDown,
            AutopilotStep::PointerUp,
        ]
    }

    /// Full demo run over the built-in scenes.
    ///
    /// `buttons` pairs each sequence id with its scene object name, in the
    /// expected order. Each fumble presses the first button followed by a
    /// random wrong one, which resets the puzzle.
    pub fn playthrough(buttons: &[(&str, &str)], fumbles: u32, rng: &mut fastrand::Rng) -> Self {
        let mut steps = vec![
            AutopilotStep::WaitForScene("forest".into()),
            AutopilotStep::WalkTo {
                // inside the tunnel trigger, short of the tunnel itself
                target: Vec3::new(0.0, 0.0, 10.5),
                tolerance: 0.3,
            },
            AutopilotStep::WaitForScene("escape_room".into()),
            AutopilotStep::WaitForStage(EscapeStage::ButtonPuzzleInProgress),
            AutopilotStep::ToggleCursor,
        ];

        if buttons.len() > 2 {
            for _ in 0..fumbles {
                let (_, first) = buttons[0];
                let (_, wrong) = buttons[rng.usize(2..buttons.len())];
                steps.extend(Self::click(first));
                steps.extend(Self::click(wrong));
                // per-button cooldown before the first button works again
                steps.push(AutopilotStep::Wait(1.1));
            }
        }
        for (_, object) in buttons {
            steps.extend(Self::click(object));
        }

        steps.extend([
            AutopilotStep::WaitForStage(EscapeStage::CrystalAvailable),
            AutopilotStep::Aim("crystal".into()),
            AutopilotStep::PointerDown,
            AutopilotStep::Wait(0.3),
            AutopilotStep::PointerUp,
            AutopilotStep::WaitForStage(EscapeStage::DoorHit),
            AutopilotStep::WaitForDoorOpen("exit_door".into()),
            AutopilotStep::WalkTo {
                target: Vec3::new(0.0, 0.0, 6.9),
                tolerance: 0.2,
            },
            AutopilotStep::WaitForStage(EscapeStage::Escaped),
        ]);
        Autopilot::new(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTONS: [(&str, &str); 4] = [
        ("Lucy", "button_red"),
        ("Edmund", "button_blue"),
        ("Susan", "button_green"),
        ("Peter", "button_yellow"),
    ];

    #[test]
    fn fumbles_add_wrong_presses() {
        let mut rng = fastrand::Rng::with_seed(7);
        let clean = Autopilot::playthrough(&BUTTONS, 0, &mut rng);
        let fumbled = Autopilot::playthrough(&BUTTONS, 2, &mut rng);
        // two clicks and a wait per fumble
        assert_eq!(fumbled.remaining(), clean.remaining() + 2 * 7);
    }

    #[test]
    fn wrong_press_is_never_the_second_button() {
        for seed in 0..20 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let pilot = Autopilot::playthrough(&BUTTONS, 1, &mut rng);
            let aims: Vec<&AutopilotStep> = pilot
                .steps
                .iter()
                .filter(|s| matches!(s, AutopilotStep::Aim(_)))
                .collect();
            assert_eq!(aims[0], &AutopilotStep::Aim("button_red".into()));
            assert_ne!(aims[1], &AutopilotStep::Aim("button_blue".into()));
            assert_ne!(aims[1], &AutopilotStep::Aim("button_red".into()));
        }
    }

    #[test]
    fn fail_clears_queue() {
        let mut pilot = Autopilot::new([AutopilotStep::Wait(1.0)]);
        pilot.fail("timed out");
        assert!(pilot.is_finished());
        assert!(!pilot.succeeded());
        assert_eq!(pilot.failure(), Some("timed out"));
    }
}
