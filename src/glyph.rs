use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    Straight,
    Left,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Joint {
    pub turn: Turn,
    pub chars: [char; 3],
}

const H: char = '─';
const V: char = '│';
const SP: char = ' ';

const fn joint(turn: Turn, chars: [char; 3]) -> Option<Joint> {
    Some(Joint { turn, chars })
}

// Indexed [current][previous] in `Direction` declaration order. Reversals
// cannot happen and stay empty.
const JOINTS: [[Option<Joint>; 4]; 4] = [
    // now Up, was Up / Down / Left / Right
    [
        joint(Turn::Straight, [SP, V, SP]),
        None,
        joint(Turn::Right, [SP, '└', H]),
        joint(Turn::Left, [H, '┘', SP]),
    ],
    // now Down
    [
        None,
        joint(Turn::Straight, [SP, V, SP]),
        joint(Turn::Left, [SP, '┌', H]),
        joint(Turn::Right, [H, '┐', SP]),
    ],
    // now Left
    [
        joint(Turn::Left, [H, '┐', SP]),
        joint(Turn::Right, [H, '┘', SP]),
        joint(Turn::Straight, [H, H, H]),
        None,
    ],
    // now Right
    [
        joint(Turn::Right, [SP, '┌', H]),
        joint(Turn::Left, [SP, '└', H]),
        None,
        joint(Turn::Straight, [H, H, H]),
    ],
];

/// Body joint left behind at the old head when a snake heading `previous`
/// moves on heading `current`.
pub fn joint_for(current: Direction, previous: Direction) -> Option<Joint> {
    JOINTS[current.index()][previous.index()]
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HeadGlyph {
    Normal,
    Dead,
    Waiting,
    Ready,
    Countdown(u8),
}

impl HeadGlyph {
    pub fn as_char(self) -> char {
        match self {
            HeadGlyph::Normal => '@',
            HeadGlyph::Dead => 'X',
            HeadGlyph::Waiting => '?',
            HeadGlyph::Ready => '!',
            HeadGlyph::Countdown(n) => (b'0' + n % 10) as char,
        }
    }
}

pub const FOOD: char = '◆';
