use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constants::{
    BEDWARS_GAME_OVER_DELAY_MS, BEDWARS_OBJECTIVE_HEALTH, BEDWARS_OBJECTIVE_TAG,
    BEDWARS_WINNER_CHECK_MS, GAME_OVER_COMMAND,
};
use crate::host::Host;
use crate::mode::GameMode;
use crate::scheduler::TimerRegistry;
use crate::types::{EntityId, ModeEvent, RoundOutcome, Team, TimerId, Vec2};

pub const INSTRUCTIONS: &str = "BEDWARS: Protect your team's TNT!";
pub const NO_NODES_MESSAGE: &str = "No suitable spawn points found!";
pub const TOO_FEW_TEAMS_MESSAGE: &str = "Need at least 2 teams to play Bedwars!";
pub const DRAW_MESSAGE: &str = "DRAW - All TNT destroyed!";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BedwarsConfig {
    pub objective_tag: String,
    pub objective_health: f32,
    pub winner_check_interval_ms: u64,
    pub game_over_delay_ms: u64,
}

impl Default for BedwarsConfig {
    fn default() -> Self {
        Self {
            objective_tag: BEDWARS_OBJECTIVE_TAG.to_string(),
            objective_health: BEDWARS_OBJECTIVE_HEALTH,
            winner_check_interval_ms: BEDWARS_WINNER_CHECK_MS,
            game_over_delay_ms: BEDWARS_GAME_OVER_DELAY_MS,
        }
    }
}

/// Upper half of the path nodes by height, sorted top first.
fn top_nodes(nodes: &[Vec2]) -> Vec<Vec2> {
    let mut sorted = nodes.to_vec();
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));
    sorted.truncate(nodes.len() / 2);
    sorted
}

/// Corner node for a team's objective. Team 1 and 2 take the outer corners,
/// team 3 and 4 the next node inwards when one exists.
pub fn objective_position(team: Team, nodes: &[Vec2]) -> Vec2 {
    let top = top_nodes(nodes);
    let mut left_to_right = top.clone();
    left_to_right.sort_by(|a, b| a.x.total_cmp(&b.x));
    let mut right_to_left = top.clone();
    right_to_left.sort_by(|a, b| b.x.total_cmp(&a.x));

    let picked = match team {
        Team::Team1 => left_to_right.first(),
        Team::Team2 => right_to_left.first(),
        Team::Team3 => left_to_right.get(1).or(left_to_right.first()),
        Team::Team4 => right_to_left.get(1).or(right_to_left.first()),
        Team::Independent => top.first(),
    };
    picked.copied().unwrap_or(Vec2::ZERO)
}

/// Teams defend a TNT objective; the last team with one standing wins.
pub struct BedwarsMode {
    config: BedwarsConfig,
    timers: TimerRegistry<BedwarsMode>,
    objectives: BTreeMap<Team, EntityId>,
    armed: bool,
    ended: bool,
    events: Vec<ModeEvent>,
}

impl BedwarsMode {
    pub fn new(config: BedwarsConfig) -> Self {
        Self {
            config,
            timers: TimerRegistry::new(),
            objectives: BTreeMap::new(),
            armed: false,
            ended: false,
            events: Vec::new(),
        }
    }

    pub fn objective(&self, team: Team) -> Option<EntityId> {
        self.objectives.get(&team).copied()
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Returns false when the map or the roster cannot host a match.
    fn spawn_objectives(&mut self, host: &mut dyn Host) -> bool {
        let nodes = host.path_nodes();
        if nodes.is_empty() {
            host.show_popup(NO_NODES_MESSAGE);
            return false;
        }
        let teams: BTreeSet<Team> = host
            .players()
            .iter()
            .map(|player| player.team)
            .filter(|team| team.is_playable())
            .collect();
        if teams.len() < 2 {
            host.show_popup(TOO_FEW_TEAMS_MESSAGE);
            return false;
        }

        for team in teams {
            let position = objective_position(team, &nodes);
            let Some(tnt) =
                host.create_object(&self.config.objective_tag, position, self.config.objective_health)
            else {
                eprintln!("[bedwars] host refused the objective for {}", team.label());
                continue;
            };
            self.objectives.insert(team, tnt);
            host.show_popup(&format!("{} TNT spawned!", team.label()));
            self.events.push(ModeEvent::ObjectiveSpawned { team, entity: tnt });
        }
        true
    }

    fn check_for_winner(&mut self, host: &mut dyn Host) {
        if !self.armed || self.ended {
            return;
        }
        let standing: Vec<Team> = self
            .objectives
            .iter()
            .filter(|(_, tnt)| host.object_alive(**tnt))
            .map(|(team, _)| *team)
            .collect();
        if standing.len() > 1 {
            return;
        }

        self.ended = true;
        let outcome = match standing.first() {
            Some(team) => {
                host.show_popup(&format!("{} WINS! Their TNT survived!", team.label()));
                RoundOutcome::Winner { team: *team }
            }
            None => {
                host.show_popup(DRAW_MESSAGE);
                RoundOutcome::Draw
            }
        };
        self.events.push(ModeEvent::RoundOver { outcome });
        self.timers.register_once(
            host,
            "TriggerGameOver",
            self.config.game_over_delay_ms,
            Self::trigger_game_over,
        );
    }

    fn trigger_game_over(&mut self, host: &mut dyn Host) {
        host.run_command(GAME_OVER_COMMAND);
    }
}

impl GameMode for BedwarsMode {
    fn name(&self) -> &'static str {
        "bedwars"
    }

    fn on_startup(&mut self, host: &mut dyn Host) {
        self.timers.cancel_all(host);
        self.objectives.clear();
        self.ended = false;
        self.armed = self.spawn_objectives(host);
        self.timers.register_repeating(
            host,
            "CheckForWinner",
            self.config.winner_check_interval_ms,
            Self::check_for_winner,
        );
        host.show_popup(INSTRUCTIONS);
    }

    fn on_timer(&mut self, timer: TimerId, name: &str, host: &mut dyn Host) -> bool {
        let Some(handler) = self.timers.resolve(timer, name) else {
            return false;
        };
        handler(self, host);
        true
    }

    fn drain_events(&mut self) -> Vec<ModeEvent> {
        std::mem::take(&mut self.events)
    }
}
