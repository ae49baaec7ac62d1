//! Experience and leveling
//!
//! The player's experience pool and the level-up threshold curve.

/// Experience needed for level 2.
pub const XP_BASE: i32 = 200;

/// Experience required to reach `level + 1` from the start of the game.
/// Quadratic curve: `XP_BASE + XP_BASE * 3/2 * (level^2 - 1)`.
pub fn xp_for_next_level(level: i32) -> i32 {
    XP_BASE + XP_BASE * 3 * (level * level - 1) / 2
}

/// Experience state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experience {
    pub xp: i32,
    pub level: i32,
    pub next_level_xp: i32,
}

impl Experience {
    pub fn new() -> Self {
        Self {
            xp: 0,
            level: 1,
            next_level_xp: xp_for_next_level(1),
        }
    }

    /// Add experience and return how many levels were gained. The
    /// threshold can be crossed several times by one large award.
    pub fn add(&mut self, amount: i32) -> u32 {
        self.xp += amount;
        let mut levels = 0;
        while self.xp >= self.next_level_xp {
            self.level += 1;
            self.next_level_xp = xp_for_next_level(self.level);
            levels += 1;
        }
        levels
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_curve() {
        assert_eq!(xp_for_next_level(1), 200);
        assert_eq!(xp_for_next_level(2), 1100);
        assert_eq!(xp_for_next_level(3), 2600);
    }

    #[test]
    fn single_level_up() {
        let mut exp = Experience::new();
        assert_eq!(exp.add(150), 0);
        assert_eq!(exp.level, 1);
        assert_eq!(exp.add(50), 1);
        assert_eq!(exp.level, 2);
        assert_eq!(exp.next_level_xp, 1100);
    }

    #[test]
    fn one_award_can_cross_several_thresholds() {
        let mut exp = Experience::new();
        assert_eq!(exp.add(1200), 2);
        assert_eq!(exp.level, 3);
    }
}
