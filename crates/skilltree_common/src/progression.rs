//! XP and level progression math.
//!
//! Levels start at 1. Advancing from level L to L+1 costs `100 * L` XP,
//! consumed cumulatively: 100 to reach level 2, then 200 more for level 3,
//! then 300 more, and so on. Rank is a coarse label over the level.
//!
//! Everything here is a total function: bad input is clamped, never rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an XP total sits on the level curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Current level, starts at 1.
    pub level: u32,
    /// XP earned past the current level's threshold. Always `< xp_to_next`.
    pub xp_into_level: u64,
    /// XP cost to advance from the current level to the next (`100 * level`).
    pub xp_to_next: u64,
}

/// Map a cumulative XP total onto the level curve.
///
/// An exact threshold belongs to the next level: `progress(100)` is level 2
/// with 0 XP into it, not level 1 at 100/100.
pub fn progress(total_xp: u64) -> Progress {
    let mut level: u32 = 1;
    let mut xp_needed: u64 = 100;
    let mut remaining = total_xp;

    while remaining >= xp_needed {
        remaining -= xp_needed;
        level += 1;
        xp_needed += 100;
    }

    Progress {
        level,
        xp_into_level: remaining,
        xp_to_next: xp_needed,
    }
}

/// Like [`progress`], for totals read from storage as signed integers.
/// Negative input clamps to 0.
pub fn progress_signed(total_xp: i64) -> Progress {
    progress(total_xp.max(0) as u64)
}

/// Coarse rank label derived from level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Novice,
    Intermediate,
    Advanced,
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Novice => "Novice",
            Rank::Intermediate => "Intermediate",
            Rank::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Levels 1-2 are Novice, 3-4 Intermediate, 5 and up Advanced.
pub fn rank_for_level(level: u32) -> Rank {
    if level >= 5 {
        Rank::Advanced
    } else if level >= 3 {
        Rank::Intermediate
    } else {
        Rank::Novice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_at_zero_xp() {
        let p = progress(0);
        assert_eq!((p.level, p.xp_into_level, p.xp_to_next), (1, 0, 100));
    }

    #[test]
    fn test_exact_thresholds_belong_to_next_level() {
        let cases = [
            (100, (2, 0, 200)),
            (300, (3, 0, 300)),
            (600, (4, 0, 400)),
            (1000, (5, 0, 500)),
        ];
        for (xp, expected) in cases {
            let p = progress(xp);
            assert_eq!(
                (p.level, p.xp_into_level, p.xp_to_next),
                expected,
                "total_xp = {xp}"
            );
        }
    }

    #[test]
    fn test_partial_progress_inside_a_level() {
        let p = progress(150);
        assert_eq!((p.level, p.xp_into_level, p.xp_to_next), (2, 50, 200));

        let p = progress(99);
        assert_eq!((p.level, p.xp_into_level, p.xp_to_next), (1, 99, 100));
    }

    #[test]
    fn test_level_is_monotonic_in_xp() {
        let mut last_level = 0;
        for xp in 0..=5000 {
            let p = progress(xp);
            assert!(p.level >= last_level, "level dropped at xp {xp}");
            last_level = p.level;
        }
    }

    #[test]
    fn test_remainder_is_bounded() {
        for xp in (0..=20_000).step_by(37) {
            let p = progress(xp);
            assert!(
                p.xp_into_level < p.xp_to_next,
                "remainder overflow at xp {xp}: {p:?}"
            );
            assert_eq!(p.xp_to_next, 100 * p.level as u64);
        }
    }

    #[test]
    fn test_negative_totals_clamp_to_zero() {
        assert_eq!(progress_signed(-500), progress(0));
        assert_eq!(progress_signed(0), progress(0));
        assert_eq!(progress_signed(250), progress(250));
    }

    #[test]
    fn test_rank_mapping() {
        assert_eq!(rank_for_level(1), Rank::Novice);
        assert_eq!(rank_for_level(2), Rank::Novice);
        assert_eq!(rank_for_level(3), Rank::Intermediate);
        assert_eq!(rank_for_level(4), Rank::Intermediate);
        for level in 5..=10 {
            assert_eq!(rank_for_level(level), Rank::Advanced);
        }
    }
}
