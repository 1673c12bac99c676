use bevy_ecs::prelude::Component;

/// Tag component naming the group an entity belongs to ("player", "crystal", "door"...).
///
/// Gameplay rules match on substrings of the name, so a group such as
/// `"crystal_ball"` counts both as a crystal and as a ball.
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Group(String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Group(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match against the group name.
    pub fn contains(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(&needle.to_lowercase())
    }

    /// True if the name contains any of `needles`.
    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.contains(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_match_ignores_case() {
        let g = Group::new("Crystal_Ball");
        assert!(g.contains("crystal"));
        assert!(g.contains_any(&["door", "ball"]));
        assert!(!g.contains_any(&["door", "gate"]));
        assert_eq!(g.name(), "Crystal_Ball");
    }
}
