use super::*;

use crate::host::update_modifiers;
use crate::types::{
    AbilityKind, BotBehavior, CameraFocus, DroneWeapon, Effect, Modifiers, Visibility, WeaponItem,
};

const MINION_WEAPONS: [WeaponItem; 4] = [
    WeaponItem::Bat,
    WeaponItem::Bottle,
    WeaponItem::Pipe,
    WeaponItem::Chair,
];

impl UjiriMode {
    pub(super) fn forget_stale_timpa_hits(&mut self, now_ms: u64) {
        let window = self.config.timpa_kill_window_ms;
        self.round
            .timpa_hits
            .retain(|_, hit_at| now_ms.saturating_sub(*hit_at) <= window);
    }

    /// A death inside Timpa's hit window counts as Timpa's kill.
    pub(super) fn credit_timpa_kill(&mut self, host: &mut dyn Host, victim: EntityId) {
        let Some(timpa) = self.live_bot(host, RosterBot::Timpa) else {
            return;
        };
        let Some(hit_at) = self.round.timpa_hits.get(&victim).copied() else {
            return;
        };
        if host.now_ms().saturating_sub(hit_at) > self.config.timpa_kill_window_ms {
            return;
        }
        self.round.timpa_hits.remove(&victim);
        host.set_strength_boost(timpa.id, self.config.timpa_boost_ms);
        self.events.push(ModeEvent::AbilityUsed {
            entity: timpa.id,
            ability: AbilityKind::StrengthBoost,
        });
    }

    pub(super) fn timpa_rage(&mut self, host: &mut dyn Host) {
        let Some(timpa) = self.live_bot(host, RosterBot::Timpa) else {
            return;
        };
        if timpa.modifiers.health_ratio() > self.config.timpa_low_health_ratio {
            return;
        }
        host.set_strength_boost(timpa.id, self.config.timpa_boost_ms);
        host.play_effect(Effect::Sparks, timpa.position);
    }

    pub(super) fn bichi_drones(&mut self, host: &mut dyn Host) {
        let Some(bichi) = self.live_bot(host, RosterBot::Bichi) else {
            return;
        };
        if !self.round.clocks.bichi.try_fire(host.now_ms()) {
            return;
        }
        for weapon in [DroneWeapon::MachineGun, DroneWeapon::Flamethrower] {
            if host
                .create_drone(bichi.position, weapon, bichi.team, Some(bichi.id))
                .is_none()
            {
                eprintln!("[ujiri] host refused a {weapon:?} drone for Bichi");
            }
        }
        host.play_effect(Effect::Sparks, bichi.position);
        self.events.push(ModeEvent::AbilityUsed {
            entity: bichi.id,
            ability: AbilityKind::DroneDeploy,
        });
    }

    pub(super) fn kokola_minions(&mut self, host: &mut dyn Host) {
        let Some(kokola) = self.live_bot(host, RosterBot::Kokola) else {
            return;
        };
        if !self.round.clocks.kokola.try_fire(host.now_ms()) {
            return;
        }
        host.play_effect(Effect::Sparks, kokola.position);
        let Some(minion) = host.create_player(kokola.position) else {
            return;
        };
        host.set_visibility(minion, Visibility::HIDDEN);
        host.set_camera_focus(minion, CameraFocus::Ignore);
        host.set_team(minion, kokola.team);
        host.set_bot_behavior(minion, BotBehavior::bot(AiType::BotD));
        host.set_modifiers(
            minion,
            &Modifiers {
                size: self.config.minion_size,
                melee_damage_dealt: self.config.minion_damage,
                projectile_damage_dealt: self.config.minion_damage,
                ..Modifiers::with_health(self.config.minion_health)
            },
        );
        if let Some(weapon) = self.round.rng.pick(&MINION_WEAPONS) {
            host.give_weapon(minion, *weapon);
        }
        self.events.push(ModeEvent::AbilityUsed {
            entity: kokola.id,
            ability: AbilityKind::MinionCall,
        });
    }

    /// Edur shrinks and speeds up as it loses health.
    pub(super) fn edur_scaling(&mut self, host: &mut dyn Host) {
        let Some(edur) = self.bot(RosterBot::Edur) else {
            return;
        };
        let base_size = self.round.edur_base_size;
        let min_size = self.config.edur_min_size;
        let max_speed = self.config.edur_max_speed;
        update_modifiers(host, edur, |mods| {
            let ratio = mods.health_ratio();
            let speed = 1.0 + (max_speed - 1.0) * (1.0 - ratio);
            mods.size = base_size * (min_size + (1.0 - min_size) * ratio);
            mods.run_speed = speed;
            mods.sprint_speed = speed;
        });
    }

    pub(super) fn xray_laser(&mut self, host: &mut dyn Host) {
        let Some(xray) = self.live_bot(host, RosterBot::Xray) else {
            return;
        };
        if !self.round.clocks.xray.try_fire(host.now_ms()) {
            return;
        }
        host.give_weapon(xray.id, WeaponItem::Lazer);
        self.events.push(ModeEvent::AbilityUsed {
            entity: xray.id,
            ability: AbilityKind::Laser,
        });
    }

    pub(super) fn pakhi_regen(&mut self, host: &mut dyn Host) {
        let Some(pakhi) = self.live_bot(host, RosterBot::Pakhi) else {
            return;
        };
        if !self.round.clocks.pakhi.try_fire(host.now_ms()) {
            return;
        }
        let mods = pakhi.modifiers;
        if mods.current_health >= mods.max_health as f32 {
            return;
        }
        let amount = self.config.pakhi_regen_amount;
        update_modifiers(host, pakhi.id, |mods| mods.heal(amount));
    }

    /// Whatever Pakhi loses goes to whoever dealt it.
    pub(super) fn pakhi_lifesteal(&mut self, host: &mut dyn Host, args: DamageArgs) {
        if self.live_bot(host, RosterBot::Pakhi).is_none() {
            return;
        }
        let Some(attacker) = args.source.and_then(|id| resolve_alive(host, id)) else {
            return;
        };
        let stolen = args.amount as i32;
        update_modifiers(host, attacker.id, |mods| mods.heal(stolen as f32));
        host.play_effect(Effect::Blood, attacker.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimHost, DRONE_TAG};
    use crate::ujiri::tests::started;

    fn roster_bot(host: &SimHost, mode: &UjiriMode, which: RosterBot) -> PlayerSnapshot {
        host.player(mode.bot(which).expect("spawned")).expect("present")
    }

    fn used(mode: &mut UjiriMode, ability: AbilityKind) -> usize {
        mode.drain_events()
            .into_iter()
            .filter(|event| {
                matches!(event, ModeEvent::AbilityUsed { ability: kind, .. } if *kind == ability)
            })
            .count()
    }

    #[test]
    fn timpa_kill_inside_the_window_grants_a_boost() {
        let (mut host, mut mode) = started(10, UjiriConfig::default());
        let timpa = mode.bot(RosterBot::Timpa).expect("timpa");
        let victim = host.players()[1].id;

        host.advance(&mut mode, 1_000);
        assert!(host.damage(&mut mode, victim, 100.0, Some(timpa)));
        assert_eq!(host.boost_until(timpa), 11_000);
        assert_eq!(used(&mut mode, AbilityKind::StrengthBoost), 1);
    }

    #[test]
    fn stale_timpa_hits_earn_nothing() {
        let (mut host, mut mode) = started(10, UjiriConfig::default());
        let timpa = mode.bot(RosterBot::Timpa).expect("timpa");
        let victim = host.players()[1].id;

        host.damage(&mut mode, victim, 10.0, Some(timpa));
        host.advance(&mut mode, 3_100);
        assert!(host.damage(&mut mode, victim, 90.0, None));
        assert_eq!(host.boost_until(timpa), 0);
        assert_eq!(used(&mut mode, AbilityKind::StrengthBoost), 0);
    }

    #[test]
    fn wounded_timpa_rages() {
        let (mut host, mut mode) = started(10, UjiriConfig::default());
        let timpa = roster_bot(&host, &mode, RosterBot::Timpa);
        host.set_health(timpa.id, 30.0);
        host.advance(&mut mode, 100);
        assert_eq!(host.boost_until(timpa.id), 10_100);
        assert!(host
            .effects()
            .contains(&(Effect::Sparks, timpa.position)));
    }

    #[test]
    fn bichi_deploys_two_owned_drones() {
        let (mut host, mut mode) = started(10, UjiriConfig::default());
        let bichi = mode.bot(RosterBot::Bichi).expect("bichi");
        host.advance(&mut mode, 12_900);
        assert!(host.objects_tagged(DRONE_TAG).is_empty());

        host.advance(&mut mode, 100);
        let drones: Vec<DroneWeapon> = host
            .objects_tagged(DRONE_TAG)
            .into_iter()
            .filter_map(|id| host.object(id).cloned())
            .inspect(|drone| {
                assert_eq!(drone.owner, Some(bichi));
                assert_eq!(drone.team, Team::Team1);
            })
            .filter_map(|drone| drone.drone)
            .collect();
        assert_eq!(drones, vec![DroneWeapon::MachineGun, DroneWeapon::Flamethrower]);
        assert_eq!(used(&mut mode, AbilityKind::DroneDeploy), 1);
    }

    #[test]
    fn kokola_calls_a_weak_armed_minion() {
        let (mut host, mut mode) = started(10, UjiriConfig::default());
        host.advance(&mut mode, 7_000);
        let players = host.players();
        assert_eq!(players.len(), 10);

        let minion = players.last().expect("minion");
        assert_eq!(minion.team, Team::Team1);
        assert_eq!(minion.visibility, Visibility::HIDDEN);
        assert_eq!(minion.behavior.ai, Some(AiType::BotD));
        assert_eq!(minion.modifiers.max_health, 15);
        assert_eq!(minion.modifiers.current_health, 15.0);
        let weapons = host.weapons(minion.id);
        assert_eq!(weapons.len(), 1);
        assert!(MINION_WEAPONS.contains(&weapons[0]));
        assert_eq!(used(&mut mode, AbilityKind::MinionCall), 1);
    }

    #[test]
    fn refused_minion_still_sparks() {
        let (mut host, mut mode) = started(10, UjiriConfig::default());
        let kokola = roster_bot(&host, &mode, RosterBot::Kokola);
        host.refuse_creation(true);
        host.advance(&mut mode, 7_000);
        assert_eq!(host.players().len(), 9);
        assert!(host
            .effects()
            .contains(&(Effect::Sparks, kokola.position)));
        assert_eq!(used(&mut mode, AbilityKind::MinionCall), 0);
    }

    #[test]
    fn edur_shrinks_and_speeds_up_when_hurt() {
        let (mut host, mut mode) = started(10, UjiriConfig::default());
        let edur = mode.bot(RosterBot::Edur).expect("edur");
        host.set_health(edur, 50.0);
        host.advance(&mut mode, 100);

        let mods = host.player(edur).expect("edur").modifiers;
        assert!((mods.size - 0.75).abs() < 1e-5);
        assert!((mods.run_speed - 1.75).abs() < 1e-5);
        assert!((mods.sprint_speed - 1.75).abs() < 1e-5);
    }

    #[test]
    fn xray_gets_a_fresh_laser_every_ten_seconds() {
        let (mut host, mut mode) = started(10, UjiriConfig::default());
        let xray = mode.bot(RosterBot::Xray).expect("xray");
        let lasers = |host: &SimHost| {
            host.weapons(xray)
                .into_iter()
                .filter(|weapon| *weapon == WeaponItem::Lazer)
                .count()
        };
        host.advance(&mut mode, 9_900);
        assert_eq!(lasers(&host), 1);
        host.advance(&mut mode, 100);
        assert_eq!(lasers(&host), 2);
    }

    #[test]
    fn pakhi_regenerates_and_feeds_its_attackers() {
        let (mut host, mut mode) = started(10, UjiriConfig::default());
        let pakhi = mode.bot(RosterBot::Pakhi).expect("pakhi");
        host.set_health(pakhi, 50.0);
        host.advance(&mut mode, 400);
        assert_eq!(host.player(pakhi).expect("pakhi").modifiers.current_health, 50.0);
        host.advance(&mut mode, 100);
        assert_eq!(host.player(pakhi).expect("pakhi").modifiers.current_health, 51.0);

        let attacker = host.players()[0].clone();
        host.set_health(attacker.id, 40.0);
        host.damage(&mut mode, pakhi, 25.5, Some(attacker.id));
        assert_eq!(
            host.player(attacker.id).expect("attacker").modifiers.current_health,
            65.0
        );
        assert!(host
            .effects()
            .contains(&(Effect::Blood, attacker.position)));
    }
}
