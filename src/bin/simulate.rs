use arena_modes::host::Host;
use arena_modes::militia::{MilitiaConfig, MilitiaMode};
use arena_modes::mode::GameMode;
use arena_modes::sim::SimHost;
use arena_modes::types::{EntityId, ModeEvent, RoundOutcome, Team, Vec2};
use chrono::{SecondsFormat, Utc};
use clap::Parser;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

const STEP_MS: u64 = 100;
const SKIRMISH_DAMAGE: f32 = 6.0;
/// How long the sim keeps running after the round ends, to catch late activity.
const AFTERMATH_MS: u64 = 10_000;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    single: bool,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    teams: Option<usize>,
    #[arg(long)]
    per_team: Option<usize>,
    #[arg(long)]
    humans: Option<usize>,
    #[arg(long)]
    minutes: Option<u32>,
    /// JSON file overriding the militia tuning.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    match_id: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Scenario {
    name: String,
    teams: usize,
    per_team: usize,
    humans: usize,
    minutes: u32,
    seed: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioResultLine {
    scenario: String,
    seed: u32,
    teams: usize,
    per_team: usize,
    humans: usize,
    minutes: u32,
    outcome: Option<RoundOutcome>,
    duration_ms: u64,
    colonels: usize,
    escorts: usize,
    specialists: usize,
    respawns: usize,
    respawns_dropped: usize,
    game_overs: usize,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct AnomalyRecord {
    #[serde(rename = "atMs")]
    at_ms: u64,
    message: String,
}

#[derive(Clone, Debug, Serialize)]
struct ScenarioRunResult {
    #[serde(flatten)]
    result: ScenarioResultLine,
    #[serde(rename = "anomalyRecords")]
    anomaly_records: Vec<AnomalyRecord>,
    finished_at_ms: u64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary {
    match_id: String,
    started_at_ms: u64,
    finished_at_ms: u64,
    scenario_count: usize,
    anomaly_count: usize,
    average_duration_ms: u64,
    outcome_counts: BTreeMap<String, usize>,
    scenarios: Vec<ScenarioResultLine>,
}

#[derive(Clone, Debug, Serialize)]
struct StructuredLogLine {
    timestamp: String,
    #[serde(rename = "timestampMs")]
    timestamp_ms: u64,
    level: String,
    event: String,
    #[serde(rename = "matchId")]
    match_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u32>,
    #[serde(rename = "atMs", skip_serializing_if = "Option::is_none")]
    at_ms: Option<u64>,
    details: Value,
}

/// Watches the militia event stream for rule violations.
#[derive(Debug, Default)]
struct EventAudit {
    colonels: BTreeMap<Team, EntityId>,
    ended_at_ms: Option<u64>,
    game_overs: usize,
}

impl EventAudit {
    fn observe(&mut self, event: &ModeEvent, host: &dyn Host) -> Option<String> {
        match event {
            ModeEvent::ColonelAssigned { team, entity } => {
                self.colonels.insert(*team, *entity);
                None
            }
            ModeEvent::EscortSpawned { team, tier, entity } => {
                let colonel = self.colonels.get(team)?;
                let alive = host.player(*colonel).is_some_and(|player| player.alive());
                (!alive).then(|| {
                    format!(
                        "{tier:?} escort {entity} spawned for {} with a dead colonel",
                        team.label()
                    )
                })
            }
            ModeEvent::Respawned { team, entity, .. } => self.ended_at_ms.map(|ended| {
                format!(
                    "respawn {entity} for {} after the round ended at {ended}ms",
                    team.label()
                )
            }),
            ModeEvent::RoundOver { .. } => {
                self.game_overs += 1;
                self.ended_at_ms = self.ended_at_ms.or(Some(host.now_ms()));
                (self.game_overs > 1).then(|| format!("game over fired {} times", self.game_overs))
            }
            _ => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let scenarios = resolve_scenarios(&cli);
    let run_started_at_ms = now_ms();
    let seed_hint = scenarios.first().map(|scenario| scenario.seed).unwrap_or(0);
    let match_id = cli
        .match_id
        .clone()
        .unwrap_or_else(|| default_match_id(seed_hint, run_started_at_ms));

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            emit_log(
                "error",
                "config_load_failed",
                &match_id,
                None,
                None,
                None,
                json!({ "error": error }),
            );
            std::process::exit(2);
        }
    };

    let mut has_anomaly = false;
    let mut scenario_results = Vec::new();
    let mut outcome_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_duration_ms = 0u64;
    let mut total_anomalies = 0usize;

    for scenario in scenarios {
        emit_log(
            "info",
            "scenario_started",
            &match_id,
            Some(&scenario.name),
            Some(scenario.seed),
            None,
            json!({
                "teams": scenario.teams,
                "perTeam": scenario.per_team,
                "humans": scenario.humans,
                "minutes": scenario.minutes,
            }),
        );
        let scenario_run = run_scenario(&scenario, &config);

        for anomaly in &scenario_run.anomaly_records {
            emit_log(
                "warn",
                "anomaly_detected",
                &match_id,
                Some(&scenario.name),
                Some(scenario.seed),
                Some(anomaly.at_ms),
                json!({
                    "message": anomaly.message,
                }),
            );
        }

        if !scenario_run.result.anomalies.is_empty() {
            has_anomaly = true;
        }
        total_anomalies += scenario_run.anomaly_records.len();
        total_duration_ms += scenario_run.result.duration_ms;
        *outcome_counts
            .entry(outcome_key(scenario_run.result.outcome))
            .or_insert(0) += 1;

        emit_log(
            "info",
            "scenario_finished",
            &match_id,
            Some(&scenario.name),
            Some(scenario.seed),
            Some(scenario_run.finished_at_ms),
            json!({
                "outcome": scenario_run.result.outcome,
                "durationMs": scenario_run.result.duration_ms,
                "escorts": scenario_run.result.escorts,
                "anomalyCount": scenario_run.anomaly_records.len(),
            }),
        );

        match serde_json::to_string(&scenario_run.result) {
            Ok(line) => println!("{line}"),
            Err(error) => eprintln!("[simulate] result line failed to serialize: {error}"),
        }
        scenario_results.push(scenario_run.result);
    }

    let run_finished_at_ms = now_ms();
    let summary = build_run_summary(
        match_id.clone(),
        run_started_at_ms,
        run_finished_at_ms,
        scenario_results,
        outcome_counts,
        total_anomalies,
        total_duration_ms,
    );

    let mut summary_out_written: Option<String> = None;
    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            emit_log(
                "error",
                "summary_write_failed",
                &match_id,
                None,
                None,
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
        summary_out_written = Some(path.to_string_lossy().to_string());
    }

    emit_log(
        "info",
        "run_finished",
        &match_id,
        None,
        None,
        None,
        json!({
            "scenarioCount": summary.scenario_count,
            "anomalyCount": summary.anomaly_count,
            "averageDurationMs": summary.average_duration_ms,
            "outcomeCounts": summary.outcome_counts,
            "summaryOut": summary_out_written,
        }),
    );

    if has_anomaly {
        std::process::exit(1);
    }
}

/// Teams sit along a row with a spawn marker at each end and a ladder of
/// path nodes across the middle.
fn build_host(scenario: &Scenario) -> SimHost {
    let width = 200.0 * scenario.teams.max(1) as f32;
    let spawn_points = vec![Vec2::new(0.0, 0.0), Vec2::new(width, 0.0)];
    let path_nodes = (0..8)
        .map(|index| Vec2::new(index as f32 * width / 7.0, (index % 3) as f32 * -40.0))
        .collect();
    let mut host = SimHost::new(scenario.seed).with_map(spawn_points, path_nodes);

    let mut placed = 0;
    for index in 0..scenario.teams {
        let team = Team::from_index(index + 1);
        for slot in 0..scenario.per_team {
            let bot = placed >= scenario.humans;
            let position = Vec2::new(index as f32 * 200.0, slot as f32 * 12.0);
            host.add_player(team, bot, position);
            placed += 1;
        }
    }
    host
}

fn run_scenario(scenario: &Scenario, config: &MilitiaConfig) -> ScenarioRunResult {
    let mut host = build_host(scenario);
    let mut mode = MilitiaMode::new(config.clone(), scenario.seed);
    host.start(&mut mode);

    let time_limit_ms = u64::from(scenario.minutes) * 60_000;
    let mut audit = EventAudit::default();
    let mut outcome = None;
    let mut colonels = 0;
    let mut escorts = 0;
    let mut specialists = 0;
    let mut respawns = 0;
    let mut respawns_dropped = 0;
    let mut anomalies = Vec::new();
    let mut anomaly_records = Vec::new();
    let mut anomaly_seen = HashSet::new();

    loop {
        host.advance(&mut mode, STEP_MS);
        for event in mode.drain_events() {
            if let Some(message) = audit.observe(&event, &host) {
                push_anomaly(
                    &mut anomalies,
                    &mut anomaly_records,
                    &mut anomaly_seen,
                    host.now(),
                    message,
                );
            }
            match event {
                ModeEvent::ColonelAssigned { .. } => colonels += 1,
                ModeEvent::EscortSpawned { .. } => escorts += 1,
                ModeEvent::SpecialistAssigned { .. } => specialists += 1,
                ModeEvent::Respawned { .. } => respawns += 1,
                ModeEvent::RespawnDropped { .. } => respawns_dropped += 1,
                ModeEvent::RoundOver { outcome: finished } => {
                    outcome = outcome.or(Some(finished));
                }
                _ => {}
            }
        }

        match audit.ended_at_ms {
            Some(ended) if host.now() >= ended + AFTERMATH_MS => break,
            Some(_) => {}
            None if host.now() >= time_limit_ms => break,
            None => {
                host.skirmish_step(&mut mode, SKIRMISH_DAMAGE);
            }
        }
    }

    let duration_ms = audit.ended_at_ms.unwrap_or(host.now());
    ScenarioRunResult {
        result: ScenarioResultLine {
            scenario: scenario.name.clone(),
            seed: scenario.seed,
            teams: scenario.teams,
            per_team: scenario.per_team,
            humans: scenario.humans,
            minutes: scenario.minutes,
            outcome,
            duration_ms,
            colonels,
            escorts,
            specialists,
            respawns,
            respawns_dropped,
            game_overs: audit.game_overs,
            anomalies,
        },
        anomaly_records,
        finished_at_ms: host.now(),
    }
}

fn resolve_scenarios(cli: &Cli) -> Vec<Scenario> {
    let seed = normalize_seed(cli.seed.unwrap_or_else(rand::random::<u64>));

    let custom = cli.single
        || cli.teams.is_some()
        || cli.per_team.is_some()
        || cli.humans.is_some()
        || cli.minutes.is_some();
    if custom {
        let teams = cli.teams.unwrap_or(2).clamp(2, 4);
        let per_team = cli.per_team.unwrap_or(3).clamp(1, 8);
        return vec![Scenario {
            name: format!("custom-{teams}x{per_team}"),
            teams,
            per_team,
            humans: cli.humans.unwrap_or(1).min(teams * per_team),
            minutes: cli.minutes.unwrap_or(3).clamp(1, 10),
            seed,
        }];
    }

    vec![
        Scenario {
            name: "duel-2x3".to_string(),
            teams: 2,
            per_team: 3,
            humans: 1,
            minutes: 3,
            seed,
        },
        Scenario {
            name: "brawl-4x4".to_string(),
            teams: 4,
            per_team: 4,
            humans: 2,
            minutes: 5,
            seed: normalize_seed(u64::from(seed) + 1),
        },
    ]
}

fn normalize_seed(seed: u64) -> u32 {
    seed as u32
}

fn load_config(path: Option<&Path>) -> Result<MilitiaConfig, String> {
    let Some(path) = path else {
        return Ok(MilitiaConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|error| format!("failed to read {}: {error}", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|error| format!("failed to parse {}: {error}", path.display()))
}

fn push_anomaly(
    anomalies: &mut Vec<String>,
    anomaly_records: &mut Vec<AnomalyRecord>,
    anomaly_seen: &mut HashSet<String>,
    at_ms: u64,
    message: String,
) {
    anomaly_records.push(AnomalyRecord {
        at_ms,
        message: message.clone(),
    });
    if anomaly_seen.insert(message.clone()) {
        anomalies.push(message);
    }
}

fn default_match_id(seed: u32, timestamp_ms: u64) -> String {
    format!("sim-{seed}-{timestamp_ms}")
}

fn build_run_summary(
    match_id: String,
    started_at_ms: u64,
    finished_at_ms: u64,
    scenarios: Vec<ScenarioResultLine>,
    outcome_counts: BTreeMap<String, usize>,
    anomaly_count: usize,
    total_duration_ms: u64,
) -> RunSummary {
    let scenario_count = scenarios.len();
    let average_duration_ms = if scenario_count == 0 {
        0
    } else {
        total_duration_ms / scenario_count as u64
    };
    RunSummary {
        match_id,
        started_at_ms,
        finished_at_ms,
        scenario_count,
        anomaly_count,
        average_duration_ms,
        outcome_counts,
        scenarios,
    }
}

fn emit_log(
    level: &str,
    event: &str,
    match_id: &str,
    scenario: Option<&str>,
    seed: Option<u32>,
    at_ms: Option<u64>,
    details: Value,
) {
    let now = Utc::now();
    let log_line = StructuredLogLine {
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        timestamp_ms: now.timestamp_millis().max(0) as u64,
        level: level.to_string(),
        event: event.to_string(),
        match_id: match_id.to_string(),
        scenario: scenario.map(|value| value.to_string()),
        seed,
        at_ms,
        details,
    };
    match serde_json::to_string(&log_line) {
        Ok(line) => eprintln!("{line}"),
        Err(error) => eprintln!("[simulate] log line failed to serialize: {error}"),
    }
}

fn outcome_key(outcome: Option<RoundOutcome>) -> String {
    match outcome {
        Some(RoundOutcome::Winner { .. }) => "winner",
        Some(RoundOutcome::Draw) => "draw",
        Some(RoundOutcome::Eliminated) => "eliminated",
        None => "timeout",
    }
    .to_string()
}

fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    std::fs::write(path, summary_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_modes::types::EscortTier;

    fn make_scenario_result(outcome: Option<RoundOutcome>, duration_ms: u64) -> ScenarioResultLine {
        ScenarioResultLine {
            scenario: "test".to_string(),
            seed: 42,
            teams: 2,
            per_team: 3,
            humans: 1,
            minutes: 1,
            outcome,
            duration_ms,
            colonels: 2,
            escorts: 0,
            specialists: 0,
            respawns: 0,
            respawns_dropped: 0,
            game_overs: 1,
            anomalies: Vec::new(),
        }
    }

    fn quick_scenario(seed: u32) -> Scenario {
        Scenario {
            name: "quick".to_string(),
            teams: 2,
            per_team: 2,
            humans: 1,
            minutes: 1,
            seed,
        }
    }

    #[test]
    fn default_match_id_contains_seed_and_timestamp() {
        assert_eq!(default_match_id(42, 123456789), "sim-42-123456789");
    }

    #[test]
    fn build_run_summary_calculates_average_duration() {
        let summary = build_run_summary(
            "sim-42-1".to_string(),
            1,
            2,
            vec![
                make_scenario_result(None, 60_000),
                make_scenario_result(Some(RoundOutcome::Eliminated), 90_000),
            ],
            BTreeMap::from([
                ("timeout".to_string(), 1usize),
                ("eliminated".to_string(), 1usize),
            ]),
            1,
            150_000,
        );
        assert_eq!(summary.average_duration_ms, 75_000);
        assert_eq!(summary.scenario_count, 2);
    }

    #[test]
    fn write_summary_returns_error_when_parent_does_not_exist() {
        let target = std::env::temp_dir()
            .join(format!("arena-modes-missing-{}", rand::random::<u64>()))
            .join("summary.json");
        let summary = build_run_summary(
            "sim-1-1".to_string(),
            1,
            2,
            vec![make_scenario_result(None, 60_000)],
            BTreeMap::from([("timeout".to_string(), 1usize)]),
            0,
            60_000,
        );
        assert!(write_summary(&target, &summary).is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let target = std::env::temp_dir()
            .join(format!("arena-modes-config-{}.json", rand::random::<u64>()));
        assert!(load_config(Some(&target)).is_err());
        assert_eq!(load_config(None), Ok(MilitiaConfig::default()));
    }

    #[test]
    fn push_anomaly_keeps_records_and_deduplicates_summary_messages() {
        let mut anomalies = Vec::new();
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        push_anomaly(&mut anomalies, &mut records, &mut seen, 10, "same".to_string());
        push_anomaly(&mut anomalies, &mut records, &mut seen, 11, "same".to_string());

        assert_eq!(anomalies.len(), 1);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].at_ms, 11);
    }

    #[test]
    fn audit_flags_escorts_for_dead_colonels() {
        let mut host = SimHost::new(1);
        let colonel = host.add_player(Team::Team1, true, Vec2::ZERO);
        let mut audit = EventAudit::default();
        let escort = ModeEvent::EscortSpawned {
            team: Team::Team1,
            tier: EscortTier::Rookie,
            entity: EntityId(99),
        };

        assert_eq!(audit.observe(&escort, &host), None);
        audit.observe(
            &ModeEvent::ColonelAssigned {
                team: Team::Team1,
                entity: colonel,
            },
            &host,
        );
        assert_eq!(audit.observe(&escort, &host), None);

        host.force_dead(colonel);
        assert!(audit.observe(&escort, &host).is_some());
    }

    #[test]
    fn audit_flags_repeat_game_overs_and_late_respawns() {
        let host = SimHost::new(1);
        let mut audit = EventAudit::default();
        let respawn = ModeEvent::Respawned {
            team: Team::Team2,
            original_id: EntityId(3),
            entity: EntityId(4),
        };
        let over = ModeEvent::RoundOver {
            outcome: RoundOutcome::Eliminated,
        };

        assert_eq!(audit.observe(&respawn, &host), None);
        assert_eq!(audit.observe(&over, &host), None);
        assert!(audit.observe(&respawn, &host).is_some());
        assert!(audit.observe(&over, &host).is_some());
        assert_eq!(audit.game_overs, 2);
    }

    #[test]
    fn custom_arguments_are_clamped_into_one_scenario() {
        let cli = Cli::parse_from([
            "simulate", "--seed", "7", "--teams", "9", "--per-team", "0", "--humans", "5",
        ]);
        let scenarios = resolve_scenarios(&cli);
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].teams, 4);
        assert_eq!(scenarios[0].per_team, 1);
        assert_eq!(scenarios[0].humans, 4);
        assert_eq!(scenarios[0].seed, 7);

        let defaults = resolve_scenarios(&Cli::parse_from(["simulate", "--seed", "7"]));
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults[1].seed, 8);
    }

    #[test]
    fn same_seed_replays_the_same_scenario() {
        let config = MilitiaConfig::default();
        let first = run_scenario(&quick_scenario(11), &config);
        let second = run_scenario(&quick_scenario(11), &config);
        assert_eq!(first.result, second.result);
        assert_eq!(first.result.colonels, 2);
        assert!(first.result.game_overs <= 1);
    }
}
