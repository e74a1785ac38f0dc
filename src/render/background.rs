//! Starfield and lighting.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Distance of the starfield shell from the origin.
pub const STARFIELD_RADIUS: f32 = 30_000.0;

const STAR_COUNT: usize = 800;

/// The sky is the same every run, only the system changes.
const SKY_SEED: u64 = 0x5ba2e;

/// Starfield and the star's light.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_sky, spawn_star_light));
    }
}

/// Uniform random direction on the unit sphere.
fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len_sq = v.length_squared();
        // rejection sampling inside the unit ball keeps the distribution uniform
        if len_sq > 1e-4 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Scatter distant unlit points over a shell around the system.
fn spawn_sky(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let dot = meshes.add(Sphere::new(15.0));
    let glow = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.9, 1.0),
        unlit: true,
        ..default()
    });

    let mut rng = StdRng::seed_from_u64(SKY_SEED);
    let bundles: Vec<_> = (0..STAR_COUNT)
        .map(|_| {
            let size = rng.gen_range(0.4..1.6);
            (
                Mesh3d(dot.clone()),
                MeshMaterial3d(glow.clone()),
                Transform::from_translation(random_direction(&mut rng) * STARFIELD_RADIUS)
                    .with_scale(Vec3::splat(size)),
            )
        })
        .collect();
    commands.spawn_batch(bundles);

    debug!("Sky: {} stars at radius {}", STAR_COUNT, STARFIELD_RADIUS);
}

/// The star is the only light source.
fn spawn_star_light(mut commands: Commands) {
    commands.spawn((
        PointLight {
            intensity: 5.0e9,
            range: 10_000.0,
            radius: 250.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
    ));
}
