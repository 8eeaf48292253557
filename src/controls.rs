use sdl2::keyboard::{KeyboardState, Scancode};

/// Key bindings, by physical key position.
pub const QUIT: Scancode = Scancode::Escape;
pub const ROTATE_LEFT: Scancode = Scancode::Q;
pub const ROTATE_RIGHT: Scancode = Scancode::E;
pub const MOVE_LEFT: Scancode = Scancode::A;
pub const MOVE_RIGHT: Scancode = Scancode::D;
pub const MOVE_UP: Scancode = Scancode::W;
pub const MOVE_DOWN: Scancode = Scancode::S;

/// What the held keys ask for this frame. Opposing keys cancel out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub quit: bool,
    /// -1 turns left, 1 turns right.
    pub rotate: i32,
    pub move_x: i32,
    pub move_y: i32,
}

impl Controls {
    pub fn from_pressed(pressed: impl Fn(Scancode) -> bool) -> Self {
        let axis = |neg: Scancode, pos: Scancode| pressed(pos) as i32 - pressed(neg) as i32;
        Self {
            quit: pressed(QUIT),
            rotate: axis(ROTATE_LEFT, ROTATE_RIGHT),
            move_x: axis(MOVE_LEFT, MOVE_RIGHT),
            move_y: axis(MOVE_DOWN, MOVE_UP),
        }
    }

    pub fn from_keyboard(state: &KeyboardState) -> Self {
        Self::from_pressed(|scancode| state.is_scancode_pressed(scancode))
    }

    pub fn is_moving(&self) -> bool {
        self.move_x != 0 || self.move_y != 0
    }
}
