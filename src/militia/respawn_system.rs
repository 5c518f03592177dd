use super::*;

use crate::types::{BotBehavior, CameraFocus, Modifiers, PlayerSnapshot, Profile, UserHandle};

/// What a dead main player looked like, enough to put an equivalent body
/// back on the field later.
#[derive(Clone, Debug, PartialEq)]
pub struct RespawnRecord {
    pub original_id: EntityId,
    pub user: Option<UserHandle>,
    pub team: Team,
    pub profile: Option<Profile>,
    pub visibility: Visibility,
    pub camera: CameraFocus,
    pub modifiers: Modifiers,
    pub behavior: BotBehavior,
    pub guard_target: Option<EntityId>,
}

impl RespawnRecord {
    pub fn capture(player: &PlayerSnapshot) -> Self {
        Self {
            original_id: player.id,
            user: player.user,
            team: player.team,
            profile: player.profile.clone(),
            visibility: player.visibility,
            camera: player.camera,
            modifiers: player.modifiers,
            behavior: player.behavior,
            guard_target: player.guard_target,
        }
    }
}

/// Pending respawns in death order, at most one per original id.
#[derive(Clone, Debug, Default)]
pub struct RespawnQueue {
    records: Vec<RespawnRecord>,
}

impl RespawnQueue {
    /// Queues `record`, replacing an older one for the same player in place.
    pub fn enqueue(&mut self, record: RespawnRecord) {
        match self
            .records
            .iter_mut()
            .find(|queued| queued.original_id == record.original_id)
        {
            Some(queued) => *queued = record,
            None => self.records.push(record),
        }
    }

    pub fn get(&self, original_id: EntityId) -> Option<&RespawnRecord> {
        self.records
            .iter()
            .find(|record| record.original_id == original_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn take_all(&mut self) -> Vec<RespawnRecord> {
        std::mem::take(&mut self.records)
    }
}

impl MilitiaMode {
    pub(super) fn queue_respawn(&mut self, host: &mut dyn Host, id: EntityId) {
        if self.round.ended() || self.round.escorts.contains(id) {
            return;
        }
        let Some(player) = host.player(id) else {
            return;
        };
        if self.live_colonel(host, player.team).is_none() {
            return;
        }
        self.round.respawns.enqueue(RespawnRecord::capture(&player));
        self.events.push(ModeEvent::RespawnQueued {
            team: player.team,
            original_id: id,
        });
    }

    /// Drains the whole queue. Each record gets exactly one attempt; records
    /// whose colonel died in the meantime are dropped.
    pub(super) fn process_respawn_queue(&mut self, host: &mut dyn Host) {
        if self.round.ended() {
            return;
        }
        for record in self.round.respawns.take_all() {
            let Some(colonel) = self.live_colonel(host, record.team) else {
                self.events.push(ModeEvent::RespawnDropped {
                    team: record.team,
                    original_id: record.original_id,
                });
                continue;
            };
            let Some(id) = host.create_player(colonel.position) else {
                eprintln!(
                    "[militia] host refused to respawn {} for {:?}",
                    record.original_id, record.team
                );
                continue;
            };
            self.restore(host, id, &record);
            self.events.push(ModeEvent::Respawned {
                team: record.team,
                original_id: record.original_id,
                entity: id,
            });
        }
    }

    fn restore(&mut self, host: &mut dyn Host, id: EntityId, record: &RespawnRecord) {
        if let Some(profile) = &record.profile {
            host.set_profile(id, profile);
        }
        host.set_visibility(id, record.visibility);
        host.set_team(id, record.team);
        host.set_camera_focus(id, record.camera);
        let mut modifiers = record.modifiers;
        modifiers.restore_full_health();
        host.set_modifiers(id, &modifiers);
        host.set_user(id, record.user);
        host.set_bot_behavior(id, record.behavior);
        host.set_guard_target(id, record.guard_target);
        self.equip_loadout(host, id, false);
    }
}
