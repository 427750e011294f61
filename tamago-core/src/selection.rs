//! Animation selection
//!
//! Maps a life-cycle [`Stats`] snapshot to what the animation player should
//! show. The life-cycle task evaluates this every tick and hands the result
//! to the animation task; re-sending an unchanged selection is harmless.

use crate::animation::{AnimationId, Icon, IconSet};
use crate::config::AnimationConfig;
use crate::lifecycle::{Evolution, Stats, StatusFlag};

/// What the animation player should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Selection {
    pub animation: AnimationId,
    /// Refresh interval in milliseconds
    pub rate_ms: u16,
    pub icons: IconSet,
}

/// Decide the animation, rate and icons for `stats`
pub fn select_for(stats: &Stats, config: &AnimationConfig) -> Selection {
    let hatching = stats.evolution == Evolution::Babytchi
        && stats.time_in_evolution_s() < config.hatch_duration_s;

    let animation = if hatching {
        AnimationId::HatchEgg
    } else {
        stats.evolution.idle_animation()
    };

    let rate_ms = if stats.evolution.is_dead() {
        config.ghost_rate_ms
    } else {
        config.default_rate_ms
    };

    let mut icons = IconSet::empty();
    icons.set(Icon::Poo, stats.has(StatusFlag::HasPooped));
    icons.set(Icon::Skull, stats.has(StatusFlag::IsSick));
    icons.set(Icon::Sleep, stats.has(StatusFlag::IsSleeping));

    Selection {
        animation,
        rate_ms,
        icons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_per_evolution() {
        let config = AnimationConfig::default();
        let stats = Stats {
            evolution: Evolution::Ginjirotchi,
            age_s: 20_000,
            evolved_at_s: 18_300,
            ..Stats::default()
        };
        let selection = select_for(&stats, &config);
        assert_eq!(selection.animation, AnimationId::IdleGinjirotchi);
        assert_eq!(selection.rate_ms, 500);
        assert!(selection.icons.is_empty());
    }

    #[test]
    fn test_hatch_window() {
        let config = AnimationConfig::default();
        let mut stats = Stats {
            evolution: Evolution::Babytchi,
            age_s: 300,
            evolved_at_s: 300,
            ..Stats::default()
        };
        assert_eq!(select_for(&stats, &config).animation, AnimationId::HatchEgg);

        stats.age_s = 301;
        assert_eq!(select_for(&stats, &config).animation, AnimationId::HatchEgg);

        stats.age_s = 302;
        assert_eq!(
            select_for(&stats, &config).animation,
            AnimationId::IdleBabytchi
        );
    }

    #[test]
    fn test_ghost_rate() {
        let config = AnimationConfig::default();
        let stats = Stats {
            evolution: Evolution::Obaketchi,
            ..Stats::default()
        };
        let selection = select_for(&stats, &config);
        assert_eq!(selection.animation, AnimationId::IdleObaketchi);
        assert_eq!(selection.rate_ms, 750);
    }

    #[test]
    fn test_flags_to_icons() {
        let config = AnimationConfig::default();
        let mut stats = Stats::default();
        stats.set(StatusFlag::HasPooped, true);
        stats.set(StatusFlag::IsSleeping, true);
        stats.set(StatusFlag::IsTired, true);

        let icons = select_for(&stats, &config).icons;
        assert!(icons.contains(Icon::Poo));
        assert!(icons.contains(Icon::Sleep));
        assert!(!icons.contains(Icon::Skull));
    }
}
