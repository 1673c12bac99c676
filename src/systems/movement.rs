//! Kinematic integration of [`RigidBody`] velocities.
use bevy_ecs::prelude::*;

use crate::components::rigidbody::RigidBody;
use crate::components::transform::Transform3D;
use crate::resources::worldtime::WorldTime;

/// Integrate forces, friction and speed cap into velocity, then velocity into
/// the transform. Frozen bodies are skipped entirely.
pub fn movement(mut query: Query<(&mut Transform3D, &mut RigidBody)>, time: Res<WorldTime>) {
    let dt = time.delta;
    for (mut transform, mut rb) in query.iter_mut() {
        if rb.frozen {
            continue;
        }
        let acceleration = rb.total_acceleration();
        rb.velocity += acceleration * dt;
        if rb.friction > 0.0 {
            let damping = (1.0 - rb.friction * dt).max(0.0);
            rb.velocity *= damping;
        }
        if let Some(max) = rb.max_speed {
            rb.velocity = rb.velocity.clamp_length_max(max);
        }
        transform.translation += rb.velocity * dt;
    }
}
