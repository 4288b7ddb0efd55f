use crate::services::InputSource;

/// Abstract controls the craft responds to; hosts bind them to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Thrust,
    RotateLeft,
    RotateRight,
    SkipLevel,
    ToggleCollisions,
}

/// Input snapshot for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Edge-triggered: true only on the frame the key went down.
    pub skip_level: bool,
    /// Edge-triggered: true only on the frame the key went down.
    pub toggle_collisions: bool,
}

impl InputState {
    pub fn poll(source: &(impl InputSource + ?Sized)) -> Self {
        Self {
            thrust: source.is_held(Control::Thrust),
            rotate_left: source.is_held(Control::RotateLeft),
            rotate_right: source.is_held(Control::RotateRight),
            skip_level: source.is_pressed_this_frame(Control::SkipLevel),
            toggle_collisions: source.is_pressed_this_frame(Control::ToggleCollisions),
        }
    }

    /// Signed rotation direction; left wins when both are held.
    pub fn rotation(&self) -> f32 {
        if self.rotate_left {
            1.0
        } else if self.rotate_right {
            -1.0
        } else {
            0.0
        }
    }
}
