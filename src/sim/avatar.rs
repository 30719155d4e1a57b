//! The player avatar: movement, facing, hyper mode and poses

use glam::{IVec2, Vec2};

use super::bounds::{Bounds, Rect};
use super::tick::KeyState;
use crate::consts::*;
use crate::vector_to_heading;

/// One of the eight directions the avatar can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::Right,
        Facing::UpRight,
        Facing::Up,
        Facing::UpLeft,
        Facing::Left,
        Facing::DownLeft,
        Facing::Down,
        Facing::DownRight,
    ];

    /// Facing for a net movement delta; `None` when there is no movement
    pub fn from_delta(delta: IVec2) -> Option<Self> {
        match (delta.x.signum(), delta.y.signum()) {
            (1, 0) => Some(Facing::Right),
            (1, -1) => Some(Facing::UpRight),
            (0, -1) => Some(Facing::Up),
            (-1, -1) => Some(Facing::UpLeft),
            (-1, 0) => Some(Facing::Left),
            (-1, 1) => Some(Facing::DownLeft),
            (0, 1) => Some(Facing::Down),
            (1, 1) => Some(Facing::DownRight),
            _ => None,
        }
    }

    /// Grid delta (screen coordinates, y down)
    pub fn delta(self) -> IVec2 {
        match self {
            Facing::Right => IVec2::new(1, 0),
            Facing::UpRight => IVec2::new(1, -1),
            Facing::Up => IVec2::new(0, -1),
            Facing::UpLeft => IVec2::new(-1, -1),
            Facing::Left => IVec2::new(-1, 0),
            Facing::DownLeft => IVec2::new(-1, 1),
            Facing::Down => IVec2::new(0, 1),
            Facing::DownRight => IVec2::new(1, 1),
        }
    }

    /// Delta as a float vector (diagonals are not normalized)
    pub fn vector(self) -> Vec2 {
        self.delta().as_vec2()
    }

    /// Heading in degrees (0 = right, 90 = up)
    pub fn heading(self) -> f32 {
        vector_to_heading(self.vector())
    }
}

/// Hyper mode makes the avatar shrug off bombs for a while
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarMode {
    Normal,
    Hyper { remaining: u32 },
}

/// Visual pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarPose {
    /// Regular image for the current facing
    Facing,
    /// Celebrating an enemy kill
    Joy { remaining: u32 },
    /// Hit by a bomb
    Defeat,
}

#[derive(Debug, Clone)]
pub struct Avatar {
    pub rect: Rect,
    pub facing: Facing,
    pub speed: f32,
    pub mode: AvatarMode,
    pub pose: AvatarPose,
}

impl Avatar {
    pub fn new(center: Vec2) -> Self {
        Self {
            rect: Rect::new(center, AVATAR_SIZE),
            facing: Facing::Right,
            speed: AVATAR_SPEED,
            mode: AvatarMode::Normal,
            pose: AvatarPose::Facing,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center
    }

    #[inline]
    pub fn is_hyper(&self) -> bool {
        matches!(self.mode, AvatarMode::Hyper { .. })
    }

    /// Net movement requested by the held keys
    pub fn movement_delta(keys: &KeyState) -> IVec2 {
        let mut delta = IVec2::ZERO;
        if keys.up {
            delta.y -= 1;
        }
        if keys.down {
            delta.y += 1;
        }
        if keys.left {
            delta.x -= 1;
        }
        if keys.right {
            delta.x += 1;
        }
        delta
    }

    /// Advance one tick from the key snapshot: move, then count down hyper
    /// mode and the joy pose.
    ///
    /// Movement is all-or-nothing: if the moved rect leaves the field on
    /// either axis, the rect is restored exactly as it was.
    pub fn update(&mut self, keys: &KeyState, bounds: &Bounds) {
        let delta = Self::movement_delta(keys);
        let before = self.rect;
        self.rect.translate(delta.as_vec2() * self.speed);
        if !bounds.contains(&self.rect) {
            self.rect = before;
        }
        if let Some(facing) = Facing::from_delta(delta) {
            self.facing = facing;
        }

        if let AvatarMode::Hyper { remaining } = &mut self.mode {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.mode = AvatarMode::Normal;
                log::debug!("Hyper mode expired");
            }
        }

        if let AvatarPose::Joy { remaining } = &mut self.pose {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.pose = AvatarPose::Facing;
            }
        }
    }

    /// Enter hyper mode with a full countdown. Entering again while hyper
    /// restarts the countdown.
    pub fn enter_hyper(&mut self) {
        self.mode = AvatarMode::Hyper {
            remaining: HYPER_TICKS,
        };
    }

    /// Show the joy pose (enemy shot down)
    pub fn cheer(&mut self) {
        if self.pose != AvatarPose::Defeat {
            self.pose = AvatarPose::Joy {
                remaining: JOY_TICKS,
            };
        }
    }

    /// Show the defeat pose (game over)
    pub fn defeat(&mut self) {
        self.pose = AvatarPose::Defeat;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn keys(up: bool, down: bool, left: bool, right: bool) -> KeyState {
        KeyState {
            up,
            down,
            left,
            right,
            hyper: false,
        }
    }

    #[test]
    fn test_facing_from_delta_covers_all_eight() {
        for facing in Facing::ALL {
            assert_eq!(Facing::from_delta(facing.delta()), Some(facing));
        }
        assert_eq!(Facing::from_delta(IVec2::ZERO), None);
    }

    #[test]
    fn test_diagonal_movement() {
        let bounds = Bounds::default();
        let mut avatar = Avatar::new(Vec2::new(500.0, 300.0));

        avatar.update(&keys(true, false, false, true), &bounds);
        assert_eq!(avatar.center(), Vec2::new(510.0, 290.0));
        assert_eq!(avatar.facing, Facing::UpRight);
    }

    #[test]
    fn test_opposing_keys_keep_facing() {
        let bounds = Bounds::default();
        let mut avatar = Avatar::new(Vec2::new(500.0, 300.0));
        avatar.facing = Facing::Down;

        avatar.update(&keys(false, false, true, true), &bounds);
        assert_eq!(avatar.center(), Vec2::new(500.0, 300.0));
        assert_eq!(avatar.facing, Facing::Down);
    }

    #[test]
    fn test_blocked_move_reverts_both_axes() {
        let bounds = Bounds::default();
        // Flush against the top edge; moving up-right must not slide right
        let start = Vec2::new(500.0, AVATAR_SIZE.y / 2.0);
        let mut avatar = Avatar::new(start);

        avatar.update(&keys(true, false, false, true), &bounds);
        assert_eq!(avatar.center(), start);
        // Facing still follows the requested direction
        assert_eq!(avatar.facing, Facing::UpRight);
    }

    #[test]
    fn test_hyper_countdown_includes_entry_tick() {
        let bounds = Bounds::default();
        let mut avatar = Avatar::new(Vec2::new(500.0, 300.0));
        avatar.enter_hyper();

        let idle = KeyState::default();
        for _ in 0..(HYPER_TICKS - 1) {
            avatar.update(&idle, &bounds);
        }
        assert_eq!(avatar.mode, AvatarMode::Hyper { remaining: 1 });
        avatar.update(&idle, &bounds);
        assert_eq!(avatar.mode, AvatarMode::Normal);
    }

    #[test]
    fn test_reentering_hyper_restarts_countdown() {
        let bounds = Bounds::default();
        let mut avatar = Avatar::new(Vec2::new(500.0, 300.0));
        avatar.enter_hyper();
        for _ in 0..10 {
            avatar.update(&KeyState::default(), &bounds);
        }
        avatar.enter_hyper();
        assert_eq!(
            avatar.mode,
            AvatarMode::Hyper {
                remaining: HYPER_TICKS
            }
        );
    }

    #[test]
    fn test_rejected_move_restores_exact_position() {
        let bounds = Bounds::default();
        // Ten pixels up would cross the top edge; adding them back in f32
        // would not land on the same value
        let start = Vec2::new(30.0, AVATAR_SIZE.y / 2.0 + 0.8207634);
        let mut avatar = Avatar::new(start);
        let before = avatar.rect;

        avatar.update(&keys(true, false, false, false), &bounds);
        assert_eq!(avatar.rect, before);
        assert_eq!(avatar.facing, Facing::Up);
    }

    #[test]
    fn test_joy_pose_fades() {
        let bounds = Bounds::default();
        let mut avatar = Avatar::new(Vec2::new(500.0, 300.0));
        avatar.cheer();
        for _ in 0..JOY_TICKS {
            avatar.update(&KeyState::default(), &bounds);
        }
        assert_eq!(avatar.pose, AvatarPose::Facing);
    }

    proptest! {
        #[test]
        fn prop_position_in_bounds_or_unchanged(
            x in 0.0f32..1100.0,
            y in 0.0f32..650.0,
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..60),
        ) {
            let bounds = Bounds::default();
                let mut avatar = Avatar::new(Vec2::new(x, y));
            for (up, down, left, right) in moves {
                let before = avatar.rect;
                avatar.update(&keys(up, down, left, right), &bounds);
                prop_assert!(bounds.contains(&avatar.rect) || avatar.rect == before);
            }
        }
    }
}
