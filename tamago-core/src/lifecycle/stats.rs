//! Pet statistics

use serde::{Deserialize, Serialize};

use crate::animation::AnimationId;

/// Evolution line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Evolution {
    #[default]
    Egg,
    Babytchi,
    Marutchi,
    Tamatchi,
    Kuchitamatchi,
    Mametchi,
    Ginjirotchi,
    Maskutchi,
    Kuchipatchi,
    Nyorotchi,
    Tarakotchi,
    Oyajitchi,
    /// The pet has died
    Obaketchi,
}

/// Growth stage of an evolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    Egg,
    Baby,
    Child,
    Teen,
    Adult,
    Special,
    Dead,
}

impl Evolution {
    pub fn stage(self) -> Stage {
        use Evolution::*;
        match self {
            Egg => Stage::Egg,
            Babytchi => Stage::Baby,
            Marutchi => Stage::Child,
            Tamatchi | Kuchitamatchi => Stage::Teen,
            Mametchi | Ginjirotchi | Maskutchi | Kuchipatchi | Nyorotchi | Tarakotchi => {
                Stage::Adult
            }
            Oyajitchi => Stage::Special,
            Obaketchi => Stage::Dead,
        }
    }

    pub fn is_dead(self) -> bool {
        self == Evolution::Obaketchi
    }

    /// Idle loop shown for this evolution
    pub fn idle_animation(self) -> AnimationId {
        use Evolution::*;
        match self {
            Egg => AnimationId::IdleEgg,
            Babytchi => AnimationId::IdleBabytchi,
            Marutchi => AnimationId::IdleMarutchi,
            Tamatchi => AnimationId::IdleTamatchi,
            Kuchitamatchi => AnimationId::IdleKuchitamatchi,
            Mametchi => AnimationId::IdleMametchi,
            Ginjirotchi => AnimationId::IdleGinjirotchi,
            Maskutchi => AnimationId::IdleMaskutchi,
            Kuchipatchi => AnimationId::IdleKuchipatchi,
            Nyorotchi => AnimationId::IdleNyorotchi,
            Tarakotchi => AnimationId::IdleTarakotchi,
            Oyajitchi => AnimationId::IdleOyajitchi,
            Obaketchi => AnimationId::IdleObaketchi,
        }
    }
}

/// Status conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusFlag {
    HasPooped,
    IsSick,
    IsSleeping,
    IsTired,
}

impl StatusFlag {
    pub const ALL: [StatusFlag; 4] = [
        StatusFlag::HasPooped,
        StatusFlag::IsSick,
        StatusFlag::IsSleeping,
        StatusFlag::IsTired,
    ];

    /// Bit in [`Stats::flags`]
    pub fn bit(self) -> u16 {
        match self {
            StatusFlag::HasPooped => 1 << 0,
            StatusFlag::IsSick => 1 << 1,
            StatusFlag::IsSleeping => 1 << 2,
            StatusFlag::IsTired => 1 << 3,
        }
    }
}

/// Snapshot of the pet's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stats {
    pub evolution: Evolution,
    /// [`StatusFlag`] bit-field
    pub flags: u16,
    pub care_mistakes: u8,
    /// Care mistakes at the last evolution
    pub mistakes_at_evolve: u8,
    /// Age in seconds
    pub age_s: u32,
    /// Age at the last evolution
    pub evolved_at_s: u32,
    /// Last ambient temperature, 0.1°C
    pub ambient_x10: Option<i16>,
}

impl Stats {
    pub fn has(&self, flag: StatusFlag) -> bool {
        self.flags & flag.bit() != 0
    }

    pub fn set(&mut self, flag: StatusFlag, on: bool) {
        if on {
            self.flags |= flag.bit();
        } else {
            self.flags &= !flag.bit();
        }
    }

    /// Seconds since the last evolution
    pub fn time_in_evolution_s(&self) -> u32 {
        self.age_s.saturating_sub(self.evolved_at_s)
    }
}
