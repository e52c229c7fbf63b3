//! Held-key bindings for camera movement and rotation

use std::collections::HashSet;

use egui::{Key, Modifiers};
use shared::{Control, MoveDirection, RotationPlane};

/// Клавиша → действие, пока клавиша зажата
pub const BINDINGS: [(Key, Control); 22] = [
    (Key::W, Control::movement(MoveDirection::Forward)),
    (Key::S, Control::movement(MoveDirection::Back)),
    (Key::A, Control::movement(MoveDirection::Left)),
    (Key::D, Control::movement(MoveDirection::Right)),
    (Key::Space, Control::movement(MoveDirection::Up)),
    (Key::C, Control::movement(MoveDirection::Down)),
    (Key::R, Control::movement(MoveDirection::Ana)),
    (Key::F, Control::movement(MoveDirection::Kata)),
    // Положительный угол xz поворачивает взгляд влево
    (Key::ArrowLeft, Control::rotation(RotationPlane::Xz, true)),
    (Key::ArrowRight, Control::rotation(RotationPlane::Xz, false)),
    (Key::ArrowUp, Control::rotation(RotationPlane::Yz, true)),
    (Key::ArrowDown, Control::rotation(RotationPlane::Yz, false)),
    (Key::Q, Control::rotation(RotationPlane::Xy, true)),
    (Key::E, Control::rotation(RotationPlane::Xy, false)),
    (Key::Insert, Control::rotation(RotationPlane::Xa, true)),
    (Key::Delete, Control::rotation(RotationPlane::Xa, false)),
    (Key::Home, Control::rotation(RotationPlane::Ya, true)),
    (Key::End, Control::rotation(RotationPlane::Ya, false)),
    (Key::PageUp, Control::rotation(RotationPlane::Za, true)),
    (Key::PageDown, Control::rotation(RotationPlane::Za, false)),
    // Дубли для клавиатур без блока Insert/Home/PageUp
    (Key::Z, Control::rotation(RotationPlane::Xa, true)),
    (Key::X, Control::rotation(RotationPlane::Xa, false)),
];

/// Controls for the keys currently held; Ctrl also moves down
pub fn held_controls(keys_down: &HashSet<Key>, modifiers: Modifiers) -> Vec<Control> {
    let mut controls: Vec<Control> = Vec::new();
    for (key, control) in BINDINGS {
        if keys_down.contains(&key) && !controls.contains(&control) {
            controls.push(control);
        }
    }

    let down = Control::movement(MoveDirection::Down);
    if modifiers.ctrl && !controls.contains(&down) {
        controls.push(down);
    }
    controls
}

/// Human-readable key list for the help panel
pub fn describe(control: Control) -> String {
    BINDINGS
        .iter()
        .filter(|(_, c)| *c == control)
        .map(|(key, _)| key.name())
        .collect::<Vec<_>>()
        .join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_map_to_controls() {
        let keys: HashSet<Key> = [Key::W, Key::R, Key::PageDown].into_iter().collect();
        let controls = held_controls(&keys, Modifiers::NONE);
        assert_eq!(
            controls,
            vec![
                Control::movement(MoveDirection::Forward),
                Control::movement(MoveDirection::Ana),
                Control::rotation(RotationPlane::Za, false),
            ]
        );
    }

    #[test]
    fn test_ctrl_moves_down_once() {
        let keys: HashSet<Key> = [Key::C].into_iter().collect();
        let controls = held_controls(&keys, Modifiers::CTRL);
        assert_eq!(controls, vec![Control::movement(MoveDirection::Down)]);
    }

    #[test]
    fn test_duplicate_bindings_do_not_double_speed() {
        let keys: HashSet<Key> = [Key::Insert, Key::Z].into_iter().collect();
        assert_eq!(held_controls(&keys, Modifiers::NONE).len(), 1);
    }

    #[test]
    fn test_every_plane_has_both_directions() {
        for plane in RotationPlane::ALL {
            for positive in [true, false] {
                assert!(
                    !describe(Control::rotation(plane, positive)).is_empty(),
                    "{plane:?} {positive}"
                );
            }
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(Control::rotation(RotationPlane::Xa, true)), "Insert / Z");
        assert_eq!(describe(Control::movement(MoveDirection::Forward)), "W");
    }
}
