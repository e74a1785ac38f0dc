//! First-person camera following the player.
//!
//! The camera transform is copied from the player's [`CameraPose`] every
//! frame. It never feeds back into the simulation.

use bevy::prelude::*;

use crate::player::{CameraPose, Player};

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 60.0;

/// Far clip distance, past the starfield shell.
pub const FAR_PLANE: f32 = 40_000.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing the player camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, follow_player.run_if(resource_exists::<Player>));
    }
}

/// Spawn the main camera with a perspective projection.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: 0.1,
            far: FAR_PLANE,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, -1300.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Render transform for a camera pose.
pub fn pose_transform(pose: &CameraPose) -> Transform {
    Transform::from_translation(pose.position.as_vec3()).looking_at(pose.target.as_vec3(), pose.up.as_vec3())
}

fn follow_player(player: Res<Player>, mut camera: Query<&mut Transform, With<MainCamera>>) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };
    *transform = pose_transform(&player.camera);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::DVec3;

    #[test]
    fn test_pose_transform_looks_at_target() {
        let player = Player::default();
        let transform = pose_transform(&player.camera);

        // Bevy cameras look down their local -Z
        let forward = transform.forward();
        assert!((forward.z - 1.0).abs() < 1e-5);
        assert!((transform.translation.z + 1300.0).abs() < 1e-3);
    }

    #[test]
    fn test_pose_transform_keeps_up() {
        let pose = CameraPose {
            position: DVec3::ZERO,
            target: DVec3::NEG_Z,
            up: DVec3::X,
        };
        let transform = pose_transform(&pose);
        assert!((transform.up().x - 1.0).abs() < 1e-5);
    }
}
