//! Body and wormhole meshes.
//!
//! Every body of the current [`StarSystem`] gets a unit sphere mesh whose
//! transform is copied from the body each frame. When the session resets,
//! the old meshes are despawned and a new set is spawned.

use bevy::prelude::*;

use crate::body::{Appearance, BodyId, BodyKind};
use crate::session::SessionState;
use crate::system::StarSystem;

/// Component linking a mesh to its body.
#[derive(Component)]
pub struct BodyVisual {
    pub id: BodyId,
}

/// Marker for the wormhole mesh.
#[derive(Component)]
pub struct WormholeVisual;

/// Plugin providing body meshes.
pub struct BodyMeshPlugin;

impl Plugin for BodyMeshPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (respawn_body_meshes, sync_body_transforms)
                .chain()
                .run_if(resource_exists::<StarSystem>),
        );
    }
}

/// Base color for a body: the star glows, planets show their mid surface layer.
pub fn body_color(appearance: &Appearance) -> Color {
    match appearance.kind {
        BodyKind::Star => Color::srgb(1.0, 0.8, 0.3),
        BodyKind::Planet | BodyKind::Moon => {
            let [r, g, b, _] = appearance.palette[2];
            Color::srgb_u8(r, g, b)
        }
    }
}

/// Spawn meshes for the current system once per run.
fn respawn_body_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    system: Res<StarSystem>,
    session: Option<Res<SessionState>>,
    existing: Query<Entity, Or<(With<BodyVisual>, With<WormholeVisual>)>>,
    mut spawned_run: Local<Option<u32>>,
) {
    let run = session.map_or(0, |s| s.run);
    if *spawned_run == Some(run) {
        return;
    }

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    // Unit sphere; size comes from the body transform
    let mesh = meshes.add(Sphere::new(1.0));

    for (id, body) in system.iter() {
        let color = body_color(body.appearance());
        let material = materials.add(StandardMaterial {
            base_color: color,
            emissive: if body.kind() == BodyKind::Star {
                color.to_linear() * 4.0
            } else {
                LinearRgba::BLACK
            },
            unlit: body.kind() == BodyKind::Star,
            ..default()
        });

        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_matrix(body.transform().as_mat4()),
            BodyVisual { id },
        ));
    }

    if let Some(wormhole) = system.wormhole() {
        let material = materials.add(StandardMaterial {
            base_color: Color::srgba(0.5, 0.2, 1.0, 0.6),
            emissive: LinearRgba::rgb(0.8, 0.3, 2.0),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_matrix(wormhole.transform().as_mat4()),
            WormholeVisual,
        ));
    }

    info!("Spawned meshes for {} bodies", system.len());
    *spawned_run = Some(run);
}

/// Sync mesh transforms from the simulated bodies.
fn sync_body_transforms(system: Res<StarSystem>, mut query: Query<(&mut Transform, &BodyVisual)>) {
    for (mut transform, visual) in query.iter_mut() {
        if let Some(body) = system.body(visual.id) {
            *transform = Transform::from_matrix(body.transform().as_mat4());
        }
    }
}
