//! Power-up collection and effects

use super::state::{EntityId, Player, PowerUp, PowerUpKind};
use crate::tuning::Tuning;

/// Collect every power-up within reach of the player's center and apply its
/// effect. Each power-up is collected at most once.
pub fn collect(power_ups: &mut [PowerUp], player: &mut Player, tuning: &Tuning) -> Vec<(EntityId, PowerUpKind)> {
    let reach = tuning.collect_radius * player.modifiers.collect_radius_multiplier + tuning.collect_margin;
    let center = player.center();

    let mut collected = Vec::new();
    for power_up in power_ups.iter_mut().filter(|p| !p.collected) {
        if power_up.center().distance(center) < reach {
            power_up.collected = true;
            apply(player, power_up.kind, tuning);
            collected.push((power_up.id, power_up.kind));
        }
    }
    collected
}

pub fn apply(player: &mut Player, kind: PowerUpKind, tuning: &Tuning) {
    match kind {
        // Refreshes rather than stacks
        PowerUpKind::SpeedBuff => player.speed_buff_ticks = tuning.buff_duration_ticks,
        PowerUpKind::RangedUnlock => player.ranged_unlocked = true,
        PowerUpKind::Progression => player.progression += 1,
        PowerUpKind::Currency => player.currency += 1,
    }
}

/// Count down the speed buff
#[inline]
pub fn tick_buffs(player: &mut Player) {
    player.speed_buff_ticks = player.speed_buff_ticks.saturating_sub(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::character::{CharacterId, CharacterModifiers};
    use crate::sim::state::EntityKind;
    use glam::Vec2;
    use proptest::prelude::*;

    fn power_up(seq: u32, kind: PowerUpKind, x: f32, y: f32) -> PowerUp {
        PowerUp {
            id: EntityId {
                kind: EntityKind::PowerUp,
                tick: 0,
                seq,
            },
            kind,
            pos: Vec2::new(x, y),
            collected: false,
        }
    }

    fn player_centered_at(center: Vec2, modifiers: CharacterModifiers) -> Player {
        let mut player = Player::spawn(modifiers, &Tuning::default());
        player.pos = center - player.size / 2.0;
        player
    }

    #[test]
    fn test_collected_at_twenty_pixels() {
        let tuning = Tuning::default();
        let mut items = vec![power_up(0, PowerUpKind::Currency, 200.0, 200.0)];
        let center = items[0].center() + Vec2::new(20.0, 0.0);
        let mut player = player_centered_at(center, CharacterModifiers::default());

        let got = collect(&mut items, &mut player, &tuning);
        assert_eq!(got, vec![(items[0].id, PowerUpKind::Currency)]);
        assert!(items[0].collected);
        assert_eq!(player.currency, 1);

        // At most once
        assert!(collect(&mut items, &mut player, &tuning).is_empty());
        assert_eq!(player.currency, 1);
    }

    #[test]
    fn test_out_of_reach() {
        let tuning = Tuning::default();
        let mut items = vec![power_up(0, PowerUpKind::Progression, 200.0, 200.0)];
        let center = items[0].center() + Vec2::new(52.0, 0.0);
        let mut player = player_centered_at(center, CharacterModifiers::default());
        assert!(collect(&mut items, &mut player, &tuning).is_empty());
        assert!(!items[0].collected);
    }

    #[test]
    fn test_radius_multiplier_extends_reach() {
        let tuning = Tuning::default();
        let mut items = vec![power_up(0, PowerUpKind::Progression, 200.0, 200.0)];
        let center = items[0].center() + Vec2::new(70.0, 0.0);
        let modifiers = CharacterId::SocialMedia.modifiers();
        let mut player = player_centered_at(center, modifiers);
        assert_eq!(collect(&mut items, &mut player, &tuning).len(), 1);
        assert_eq!(player.progression, 1);
    }

    #[test]
    fn test_effects() {
        let tuning = Tuning::default();
        let mut player = Player::spawn(CharacterModifiers::default(), &tuning);
        apply(&mut player, PowerUpKind::SpeedBuff, &tuning);
        assert_eq!(player.speed_buff_ticks, 300);
        apply(&mut player, PowerUpKind::RangedUnlock, &tuning);
        apply(&mut player, PowerUpKind::RangedUnlock, &tuning);
        assert!(player.ranged_unlocked);

        for _ in 0..299 {
            tick_buffs(&mut player);
        }
        assert!(player.speed_buffed());
        tick_buffs(&mut player);
        assert!(!player.speed_buffed());
        tick_buffs(&mut player);
        assert_eq!(player.speed_buff_ticks, 0);
    }

    proptest! {
        #[test]
        fn prop_collected_flags_are_monotonic(
            path in proptest::collection::vec((0.0f32..800.0, 0.0f32..600.0), 1..60),
        ) {
            let tuning = Tuning::default();
            let mut items: Vec<PowerUp> = (0..6)
                .map(|i| power_up(i, PowerUpKind::Currency, 120.0 * i as f32, 80.0 * i as f32))
                .collect();
            let mut player = Player::spawn(CharacterModifiers::default(), &tuning);
            let mut seen = vec![false; items.len()];
            let mut total = 0;

            for (x, y) in path {
                player.pos = Vec2::new(x, y);
                total += collect(&mut items, &mut player, &tuning).len();
                for (was, item) in seen.iter_mut().zip(&items) {
                    prop_assert!(!*was || item.collected);
                    *was = item.collected;
                }
            }
            prop_assert_eq!(player.currency as usize, total);
            prop_assert!(total <= items.len());
        }
    }
}
