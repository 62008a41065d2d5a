/// Player control inputs for a single frame.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Controls {
    /// Move left while held.
    pub left: bool,
    /// Move right while held.
    pub right: bool,
    /// Jump. Only meaningful on the frame the key goes down.
    pub jump: bool,
}

/// The way the player is looking.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Controls {
    /// Is the key for `direction` held?
    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}
