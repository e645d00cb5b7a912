//! Optional cubemap background behind the scene

use anyhow::{Result, anyhow, bail};
use bevy::asset::LoadState;
use bevy::core_pipeline::Skybox;
use bevy::prelude::*;
use bevy::render::render_resource::{TextureViewDescriptor, TextureViewDimension};

use crate::camera::MainCamera;
use crate::config::DisplaySettings;

const CUBE_FACES: u32 = 6;

/// Skybox image being loaded; absent when no skybox is configured.
#[derive(Resource)]
pub struct Cubemap {
    pub is_loaded: bool,
    pub image_handle: Handle<Image>,
}

pub fn load_skybox(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    display: Res<DisplaySettings>,
) {
    let Some(path) = display.skybox.as_deref() else {
        return;
    };
    info!("Loading skybox {}", path);
    commands.insert_resource(Cubemap {
        is_loaded: false,
        image_handle: asset_server.load(path.to_string()),
    });
}

/// Once the image is in, reshape it into a cube view and hang it on the camera.
pub fn attach_skybox(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
    display: Res<DisplaySettings>,
    cubemap: Option<ResMut<Cubemap>>,
    camera_query: Query<Entity, (With<MainCamera>, Without<Skybox>)>,
) {
    let Some(mut cubemap) = cubemap else {
        return;
    };
    if cubemap.is_loaded {
        return;
    }

    match asset_server.get_load_state(cubemap.image_handle.id()) {
        Some(LoadState::Loaded) => {}
        Some(LoadState::Failed(err)) => {
            warn!("Failed to load skybox image: {}", err);
            cubemap.is_loaded = true;
            return;
        }
        _ => return,
    }

    let Some(mut image) = images.get_mut(&cubemap.image_handle) else {
        return;
    };
    if let Err(err) = prepare_cubemap(&mut image) {
        warn!("Skybox image is not a cubemap: {}", err);
        cubemap.is_loaded = true;
        return;
    }

    let Ok(camera) = camera_query.single() else {
        return;
    };
    commands.entity(camera).insert(Skybox {
        image: cubemap.image_handle.clone(),
        brightness: display.skybox_brightness,
        ..default()
    });
    cubemap.is_loaded = true;
}

/// Reinterpret six vertically stacked square faces as a cube texture.
/// Images that already have layers are left alone.
pub fn prepare_cubemap(image: &mut Image) -> Result<()> {
    if image.texture_descriptor.array_layer_count() != 1 {
        return Ok(());
    }
    if image.height() != image.width() * CUBE_FACES {
        bail!(
            "expected six stacked square faces, got {}x{}",
            image.width(),
            image.height()
        );
    }
    image
        .reinterpret_stacked_2d_as_array(CUBE_FACES)
        .map_err(|err| anyhow!("{}", err))?;
    image.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    Ok(())
}
