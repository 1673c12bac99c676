//! Button-order puzzle.
//!
//! [`ButtonSequence`] is plain data (it lives inside the
//! [`EscapeRoom`](crate::resources::escaperoom::EscapeRoom) resource);
//! [`PuzzleButton`] tags the button entities with their identifier and the
//! color they return to when progress resets.

use bevy_ecs::prelude::Component;

use super::material::Color;

/// Result of feeding one press to a [`ButtonSequence`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// Correct press; `next` is the identifier expected now.
    Advanced { next: String },
    /// Correct press that finished the sequence.
    Completed,
    /// Wrong press; progress is back to zero.
    Reset,
    /// The sequence was already complete.
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonSequence {
    expected: Vec<String>,
    index: usize,
}

impl ButtonSequence {
    pub fn new<I, S>(expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ButtonSequence {
            expected: expected.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }

    pub fn expected(&self) -> &[String] {
        &self.expected
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.expected.len()
    }

    pub fn next_expected(&self) -> Option<&str> {
        self.expected.get(self.index).map(String::as_str)
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn press(&mut self, id: &str) -> PressOutcome {
        let Some(expected) = self.next_expected() else {
            return PressOutcome::Ignored;
        };
        if expected != id {
            self.index = 0;
            return PressOutcome::Reset;
        }
        self.index += 1;
        match self.next_expected() {
            Some(next) => PressOutcome::Advanced {
                next: next.to_string(),
            },
            None => PressOutcome::Completed,
        }
    }

    /// "Lucy → Edmund → Susan → Peter"
    pub fn order_hint(&self) -> String {
        self.expected.join(" → ")
    }
}

impl Default for ButtonSequence {
    fn default() -> Self {
        ButtonSequence::new(["Lucy", "Edmund", "Susan", "Peter"])
    }
}

#[derive(Component, Clone, Debug)]
pub struct PuzzleButton {
    pub id: String,
    pub base_color: Color,
}

impl PuzzleButton {
    pub fn new(id: impl Into<String>, base_color: Color) -> Self {
        PuzzleButton {
            id: id.into(),
            base_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_presses_advance_index() {
        let mut seq = ButtonSequence::default();
        let mut last = seq.index();
        for id in ["Lucy", "Edmund", "Susan"] {
            assert!(matches!(seq.press(id), PressOutcome::Advanced { .. }));
            assert!(seq.index() > last);
            last = seq.index();
        }
        assert_eq!(seq.press("Peter"), PressOutcome::Completed);
        assert!(seq.is_complete());
        assert_eq!(seq.press("Lucy"), PressOutcome::Ignored);
    }

    #[test]
    fn any_mismatch_resets_to_zero() {
        let mut seq = ButtonSequence::default();
        assert_eq!(
            seq.press("Lucy"),
            PressOutcome::Advanced {
                next: "Edmund".into()
            }
        );
        seq.press("Edmund");
        assert_eq!(seq.press("Peter"), PressOutcome::Reset);
        assert_eq!(seq.index(), 0);
        assert_eq!(seq.press("Edmund"), PressOutcome::Reset);
        assert_eq!(seq.next_expected(), Some("Lucy"));
    }

    #[test]
    fn hint_lists_order() {
        let seq = ButtonSequence::new(["a", "b"]);
        assert_eq!(seq.order_hint(), "a → b");
    }
}
