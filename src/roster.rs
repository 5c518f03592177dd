use std::collections::BTreeSet;

use crate::host::Host;
use crate::types::{PlayerSnapshot, Team};

// Membership is recomputed from the host on every call. Teams change every tick.

/// Every entity on the team, dead bodies and escorts included.
pub fn team_size(host: &dyn Host, team: Team) -> usize {
    host.players()
        .iter()
        .filter(|player| player.team == team)
        .count()
}

/// Non-independent teams with at least one live member.
pub fn active_teams(host: &dyn Host) -> BTreeSet<Team> {
    host.players()
        .iter()
        .filter(|player| player.alive() && player.team.is_playable())
        .map(|player| player.team)
        .collect()
}

/// First live member of the team in host order.
pub fn first_member(host: &dyn Host, team: Team) -> Option<PlayerSnapshot> {
    host.players()
        .into_iter()
        .find(|player| player.team == team && player.alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimHost;
    use crate::types::Vec2;

    #[test]
    fn sizes_track_deaths_without_caching() {
        let mut host = SimHost::new(5);
        let a = host.add_player(Team::Team1, false, Vec2::ZERO);
        host.add_player(Team::Team1, true, Vec2::ZERO);
        host.add_player(Team::Team2, true, Vec2::ZERO);

        assert_eq!(team_size(&host, Team::Team1), 2);
        assert_eq!(first_member(&host, Team::Team1).map(|player| player.id), Some(a));

        host.force_dead(a);

        assert_eq!(team_size(&host, Team::Team1), 2);
        assert_ne!(first_member(&host, Team::Team1).map(|player| player.id), Some(a));
        assert_eq!(team_size(&host, Team::Team3), 0);
    }

    #[test]
    fn active_teams_skip_independent_and_wiped_teams() {
        let mut host = SimHost::new(5);
        host.add_player(Team::Independent, false, Vec2::ZERO);
        let lone = host.add_player(Team::Team3, true, Vec2::ZERO);
        host.add_player(Team::Team2, true, Vec2::ZERO);

        assert_eq!(
            active_teams(&host).into_iter().collect::<Vec<_>>(),
            vec![Team::Team2, Team::Team3]
        );

        host.force_dead(lone);
        assert_eq!(
            active_teams(&host).into_iter().collect::<Vec<_>>(),
            vec![Team::Team2]
        );
        assert!(first_member(&host, Team::Team3).is_none());
    }
}
