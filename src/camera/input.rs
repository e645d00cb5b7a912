//! Keyboard and mouse mapping onto the camera rig and simulation clock

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

use crate::camera::rig::{CameraRig, DragMode, ViewPreset};
use crate::orbital::{SimulationClock, SolarSystem};

/// Pixels of smooth scrolling counted as one wheel notch
const PIXELS_PER_LINE: f32 = 100.0;

const KEY_ZOOM_IN: f32 = 0.9;
const KEY_ZOOM_OUT: f32 = 1.1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Alt,
    Shift,
}

/// Modifier chords that select a body by name.
pub const BODY_SHORTCUTS: &[(Modifier, KeyCode, &str)] = &[
    (Modifier::Alt, KeyCode::KeyS, "Sun"),
    (Modifier::Alt, KeyCode::KeyM, "Mercury"),
    (Modifier::Alt, KeyCode::KeyV, "Venus"),
    (Modifier::Alt, KeyCode::KeyT, "Earth"),
    (Modifier::Shift, KeyCode::KeyM, "Mars"),
    (Modifier::Alt, KeyCode::KeyJ, "Jupiter"),
    (Modifier::Shift, KeyCode::KeyS, "Saturn"),
    (Modifier::Alt, KeyCode::KeyU, "Uranus"),
    (Modifier::Alt, KeyCode::KeyN, "Neptune"),
    (Modifier::Shift, KeyCode::KeyN, "Pluto"),
];

const PRESET_KEYS: &[(KeyCode, ViewPreset)] = &[
    (KeyCode::KeyH, ViewPreset::Top),
    (KeyCode::KeyB, ViewPreset::Bottom),
    (KeyCode::KeyG, ViewPreset::Left),
    (KeyCode::KeyD, ViewPreset::Right),
    (KeyCode::KeyF, ViewPreset::Front),
    (KeyCode::KeyR, ViewPreset::Back),
];

/// Body name bound to `key` under `modifier`, if any.
pub fn shortcut_target(modifier: Modifier, key: KeyCode) -> Option<&'static str> {
    BODY_SHORTCUTS
        .iter()
        .find(|(m, k, _)| *m == modifier && *k == key)
        .map(|(_, _, name)| *name)
}

fn preset_for(key: KeyCode) -> Option<ViewPreset> {
    PRESET_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, preset)| *preset)
}

fn held_modifier(keys: &ButtonInput<KeyCode>) -> Option<Modifier> {
    if keys.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]) {
        Some(Modifier::Alt)
    } else if keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        Some(Modifier::Shift)
    } else {
        None
    }
}

/// Wheel notches in a frame's accumulated scroll, positive away from the user.
pub fn scroll_steps(unit: MouseScrollUnit, delta_y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => delta_y,
        MouseScrollUnit::Pixel => delta_y / PIXELS_PER_LINE,
    }
}

/// Left drag rotates, right drag pans, the wheel zooms.
pub fn mouse_camera_input(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mut rig: ResMut<CameraRig>,
) {
    if motion.delta != Vec2::ZERO {
        if buttons.pressed(MouseButton::Left) {
            rig.apply_manual_delta(DragMode::Rotate, motion.delta);
        } else if buttons.pressed(MouseButton::Right) {
            rig.apply_manual_delta(DragMode::Pan, motion.delta);
        }
    }

    let steps = scroll_steps(scroll.unit, scroll.delta.y);
    if steps != 0.0 {
        rig.zoom(steps);
    }
}

/// Zoom keys, view presets and body shortcuts. One step per key press.
pub fn keyboard_camera_input(
    keys: Res<ButtonInput<KeyCode>>,
    system: Res<SolarSystem>,
    mut rig: ResMut<CameraRig>,
) {
    if keys.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        rig.zoom_by_factor(KEY_ZOOM_IN);
    }
    if keys.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        rig.zoom_by_factor(KEY_ZOOM_OUT);
    }

    let modifier = held_modifier(&keys);
    for &key in keys.get_just_pressed() {
        if let Some(name) = modifier.and_then(|m| shortcut_target(m, key)) {
            let Some(id) = system.find(name) else {
                warn!("No body named {} in the loaded system", name);
                continue;
            };
            if let Some(target) = system.track_target(id) {
                info!("Tracking {}", name);
                rig.select_target(id, &target);
            }
        } else if modifier != Some(Modifier::Alt)
            && let Some(preset) = preset_for(key)
        {
            info!("View preset {:?}", preset);
            rig.apply_preset(preset);
        }
    }
}

/// P toggles pause, Q quits.
pub fn app_control_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut clock: ResMut<SimulationClock>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::KeyP) {
        clock.toggle_pause();
        info!(
            "Simulation {}",
            if clock.is_paused() { "paused" } else { "resumed" }
        );
    }
    if keys.just_pressed(KeyCode::KeyQ) {
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::rig::CameraMode;
    use crate::config::{BodyConfig, CameraSettings};
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_every_shortcut_names_a_default_body() {
        let config = BodyConfig::default();
        let mut names = vec![config.name.as_str()];
        names.extend(config.satellites.iter().map(|p| p.name.as_str()));
        for (_, _, name) in BODY_SHORTCUTS {
            assert!(names.contains(name), "{name} missing from default table");
        }
    }

    #[test]
    fn test_shortcuts_are_unambiguous() {
        let chords: HashSet<_> = BODY_SHORTCUTS.iter().map(|(m, k, _)| (*m, *k)).collect();
        assert_eq!(chords.len(), BODY_SHORTCUTS.len());
    }

    #[test]
    fn test_modifier_selects_between_bodies() {
        assert_eq!(shortcut_target(Modifier::Alt, KeyCode::KeyM), Some("Mercury"));
        assert_eq!(shortcut_target(Modifier::Shift, KeyCode::KeyM), Some("Mars"));
        assert_eq!(shortcut_target(Modifier::Alt, KeyCode::KeyS), Some("Sun"));
        assert_eq!(shortcut_target(Modifier::Shift, KeyCode::KeyS), Some("Saturn"));
        assert_eq!(shortcut_target(Modifier::Shift, KeyCode::KeyT), None);
    }

    #[test]
    fn test_preset_keys() {
        assert_eq!(preset_for(KeyCode::KeyH), Some(ViewPreset::Top));
        assert_eq!(preset_for(KeyCode::KeyR), Some(ViewPreset::Back));
        assert_eq!(preset_for(KeyCode::KeyP), None);
    }

    fn keyboard_app() -> App {
        let mut rng = StdRng::seed_from_u64(3);
        let system = SolarSystem::from_config(&BodyConfig::default(), &mut rng).unwrap();
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(system)
            .insert_resource(CameraRig::new(CameraSettings::default()).unwrap())
            .add_systems(Update, keyboard_camera_input);
        app
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        for &key in keys {
            input.press(key);
        }
    }

    // Frame boundary: keys stay held but are no longer just pressed
    fn next_frame(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
        app.update();
    }

    #[test]
    fn test_held_zoom_key_steps_once() {
        let mut app = keyboard_app();
        press(&mut app, &[KeyCode::Equal]);
        app.update();
        for _ in 0..9 {
            next_frame(&mut app);
        }
        let distance = app.world().resource::<CameraRig>().distance();
        assert_abs_diff_eq!(distance, 80.0 * 0.9, epsilon = 1e-4);

        press(&mut app, &[KeyCode::Minus]);
        app.update();
        next_frame(&mut app);
        let distance = app.world().resource::<CameraRig>().distance();
        assert_abs_diff_eq!(distance, 80.0 * 0.9 * 1.1, epsilon = 1e-4);
    }

    #[test]
    fn test_presets_apply_with_shift_but_not_alt() {
        let mut app = keyboard_app();
        press(&mut app, &[KeyCode::AltLeft, KeyCode::KeyH]);
        app.update();
        assert_abs_diff_eq!(app.world().resource::<CameraRig>().height(), 5.0);

        let mut app = keyboard_app();
        press(&mut app, &[KeyCode::ShiftLeft, KeyCode::KeyH]);
        app.update();
        let rig = app.world().resource::<CameraRig>();
        assert_abs_diff_eq!(rig.height(), 50.0);
        assert_abs_diff_eq!(rig.distance(), 30.0);
    }

    #[test]
    fn test_shortcut_starts_tracking() {
        let mut app = keyboard_app();
        press(&mut app, &[KeyCode::ShiftLeft, KeyCode::KeyM]);
        app.update();

        let mars = app.world().resource::<SolarSystem>().find("Mars").unwrap();
        assert_eq!(
            app.world().resource::<CameraRig>().mode(),
            CameraMode::Tracking(mars)
        );
    }

    #[test]
    fn test_scroll_units() {
        assert_eq!(scroll_steps(MouseScrollUnit::Line, 2.0), 2.0);
        assert_eq!(scroll_steps(MouseScrollUnit::Pixel, 50.0), 0.5);
    }
}
