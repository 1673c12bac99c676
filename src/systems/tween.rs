//! Tween animation system.
//!
//! [`tween_pose_system`] moves entities with a
//! [`TweenPose`](crate::components::tween::TweenPose) toward the target pose,
//! reading delta time from [`WorldTime`](crate::resources::worldtime::WorldTime).
//! On the last step the exact target pose is written, the tween removed and a
//! [`TweenFinishedEvent`] triggered.

use crate::components::transform::Transform3D;
use crate::components::tween::{Easing, TweenPose};
use crate::events::tween::TweenFinishedEvent;
use crate::resources::worldtime::WorldTime;
use bevy_ecs::prelude::*;

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub(crate) fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
    }
}

/// Animate entity poses based on [`TweenPose`] components.
pub fn tween_pose_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Transform3D, &mut TweenPose)>,
    mut commands: Commands,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut transform, mut tw) in query.iter_mut() {
        if !tw.playing {
            continue;
        }
        tw.time += dt;
        let progress = tw.progress();
        if progress >= 1.0 {
            *transform = tw.to;
            tw.playing = false;
            commands.entity(entity).remove::<TweenPose>();
            commands.trigger(TweenFinishedEvent { entity });
        } else {
            *transform = tw.from.lerp(&tw.to, ease(tw.easing, progress));
        }
    }
}
