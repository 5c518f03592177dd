use std::cmp::Ordering;

use crate::host::Host;
use crate::rng::Rng;
use crate::types::{RoundOutcome, Team, Vec2};

/// Map corner a team falls back to when it has no live colonel, taken over
/// spawn markers and path nodes together. Screen y grows downward, so "top"
/// is the smallest y.
pub fn team_corner(host: &dyn Host, team: Team, rng: &mut Rng) -> Vec2 {
    let mut candidates = host.spawn_points();
    candidates.extend(host.path_nodes());
    if candidates.is_empty() {
        return Vec2::ZERO;
    }

    match team {
        Team::Team1 => corner(&candidates, true, false),
        Team::Team2 => corner(&candidates, false, true),
        Team::Team3 => corner(&candidates, false, false),
        Team::Team4 => corner(&candidates, true, true),
        Team::Independent => rng.pick(&candidates).copied().unwrap_or(Vec2::ZERO),
    }
}

fn corner(candidates: &[Vec2], rightmost: bool, bottommost: bool) -> Vec2 {
    let axis = |a: f32, b: f32, descending: bool| -> Ordering {
        if descending {
            b.total_cmp(&a)
        } else {
            a.total_cmp(&b)
        }
    };
    candidates
        .iter()
        .copied()
        .min_by(|a, b| axis(a.x, b.x, rightmost).then(axis(a.y, b.y, bottommost)))
        .unwrap_or(Vec2::ZERO)
}

pub fn outcome_message(outcome: RoundOutcome) -> String {
    match outcome {
        RoundOutcome::Eliminated => "GAME OVER - No colonels or humans left!".to_string(),
        RoundOutcome::Winner { team } => format!("{} WINS!", team.label()),
        RoundOutcome::Draw => "DRAW - No survivors!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimHost;

    #[test]
    fn corners_follow_team_rules() {
        let host = SimHost::new(1).with_map(
            vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)],
            vec![
                Vec2::new(100.0, -50.0),
                Vec2::new(0.0, 80.0),
                Vec2::new(0.0, -10.0),
                Vec2::new(100.0, 80.0),
            ],
        );
        let mut rng = Rng::new(1);
        assert_eq!(team_corner(&host, Team::Team1, &mut rng), Vec2::new(100.0, -50.0));
        assert_eq!(team_corner(&host, Team::Team2, &mut rng), Vec2::new(0.0, 80.0));
        assert_eq!(team_corner(&host, Team::Team3, &mut rng), Vec2::new(0.0, -10.0));
        assert_eq!(team_corner(&host, Team::Team4, &mut rng), Vec2::new(100.0, 80.0));
    }

    #[test]
    fn empty_map_falls_back_to_origin() {
        let host = SimHost::new(1);
        let mut rng = Rng::new(1);
        assert_eq!(team_corner(&host, Team::Team2, &mut rng), Vec2::ZERO);
    }

    #[test]
    fn outcome_messages_match_announcements() {
        assert_eq!(
            outcome_message(RoundOutcome::Winner { team: Team::Team1 }),
            "TEAM 1 WINS!"
        );
        assert_eq!(outcome_message(RoundOutcome::Draw), "DRAW - No survivors!");
        assert_eq!(
            outcome_message(RoundOutcome::Eliminated),
            "GAME OVER - No colonels or humans left!"
        );
    }
}
