//! Playable characters and their passive modifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FIRE_COOLDOWN_TICKS, SLOW_FIRE_COOLDOWN_TICKS};

/// Selectable character archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharacterId {
    /// Double jump
    #[default]
    Entrepreneur,
    /// Floaty jumps (reduced gravity)
    Designer,
    /// Starts with the ranged attack, but fires slowly
    Programmer,
    /// Wide pickup radius
    SocialMedia,
    /// Faster run speed
    Manager,
}

pub const ALL_CHARACTERS: [CharacterId; 5] = [
    CharacterId::Entrepreneur,
    CharacterId::Designer,
    CharacterId::Programmer,
    CharacterId::SocialMedia,
    CharacterId::Manager,
];

#[derive(Debug, Error)]
#[error("unknown character `{0}` (expected one of: entrepreneur, designer, programmer, social-media, manager)")]
pub struct UnknownCharacter(String);

impl CharacterId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterId::Entrepreneur => "entrepreneur",
            CharacterId::Designer => "designer",
            CharacterId::Programmer => "programmer",
            CharacterId::SocialMedia => "social-media",
            CharacterId::Manager => "manager",
        }
    }

    /// Passive modifier set applied at spawn
    pub fn modifiers(&self) -> CharacterModifiers {
        let base = CharacterModifiers::default();
        match self {
            CharacterId::Entrepreneur => CharacterModifiers {
                can_double_jump: true,
                ..base
            },
            CharacterId::Designer => CharacterModifiers {
                gravity_multiplier: 0.65,
                ..base
            },
            CharacterId::Programmer => CharacterModifiers {
                starts_with_ranged: true,
                fire_cooldown_ticks: SLOW_FIRE_COOLDOWN_TICKS,
                ..base
            },
            CharacterId::SocialMedia => CharacterModifiers {
                collect_radius_multiplier: 2.0,
                ..base
            },
            CharacterId::Manager => CharacterModifiers {
                speed_multiplier: 1.25,
                ..base
            },
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterId {
    type Err = UnknownCharacter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entrepreneur" => Ok(CharacterId::Entrepreneur),
            "designer" => Ok(CharacterId::Designer),
            "programmer" => Ok(CharacterId::Programmer),
            "social-media" | "socialmedia" => Ok(CharacterId::SocialMedia),
            "manager" | "gestor" => Ok(CharacterId::Manager),
            _ => Err(UnknownCharacter(s.to_string())),
        }
    }
}

/// Per-character physics and pickup modifiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterModifiers {
    pub speed_multiplier: f32,
    pub gravity_multiplier: f32,
    pub jump_multiplier: f32,
    pub can_double_jump: bool,
    pub collect_radius_multiplier: f32,
    pub starts_with_ranged: bool,
    pub fire_cooldown_ticks: u32,
}

impl Default for CharacterModifiers {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            gravity_multiplier: 1.0,
            jump_multiplier: 1.0,
            can_double_jump: false,
            collect_radius_multiplier: 1.0,
            starts_with_ranged: false,
            fire_cooldown_ticks: FIRE_COOLDOWN_TICKS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_entrepreneur_double_jumps() {
        for id in ALL_CHARACTERS {
            assert_eq!(
                id.modifiers().can_double_jump,
                id == CharacterId::Entrepreneur,
                "{id}"
            );
        }
    }

    #[test]
    fn test_programmer_fires_slowly() {
        let m = CharacterId::Programmer.modifiers();
        assert!(m.starts_with_ranged);
        assert_eq!(m.fire_cooldown_ticks, 180);
        assert_eq!(CharacterId::Designer.modifiers().fire_cooldown_ticks, 60);
    }

    #[test]
    fn test_parse_round_trips_display() {
        for id in ALL_CHARACTERS {
            assert_eq!(id.to_string().parse::<CharacterId>().unwrap(), id);
        }
        assert_eq!("gestor".parse::<CharacterId>().unwrap(), CharacterId::Manager);
        assert!("wizard".parse::<CharacterId>().is_err());
    }
}
