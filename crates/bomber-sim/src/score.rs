//! Running score, kept from the events of each tick.

use bomber_core::enums::ReleaseKind;
use bomber_core::events::SimEvent;
use bomber_core::state::ScoreView;

#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub manual_releases: u32,
    pub auto_releases: u32,
    pub ground_impacts: u32,
    pub target_strikes: u32,
    pub expired: u32,
}

impl ScoreState {
    pub fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::ProjectileReleased {
                kind: ReleaseKind::Manual,
                ..
            } => self.manual_releases += 1,
            SimEvent::ProjectileReleased {
                kind: ReleaseKind::Auto,
                ..
            } => self.auto_releases += 1,
            SimEvent::ProjectileGrounded { struck_target, .. } => {
                self.ground_impacts += 1;
                if *struck_target {
                    self.target_strikes += 1;
                }
            }
            SimEvent::ProjectileExpired { .. } => self.expired += 1,
            _ => {}
        }
    }

    pub fn record_all<'a>(&mut self, events: impl IntoIterator<Item = &'a SimEvent>) {
        for event in events {
            self.record(event);
        }
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            manual_releases: self.manual_releases,
            auto_releases: self.auto_releases,
            ground_impacts: self.ground_impacts,
            target_strikes: self.target_strikes,
            expired: self.expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use bomber_core::types::{EffectId, ProjectileId};

    use super::*;

    #[test]
    fn test_counts_by_event_kind() {
        let mut score = ScoreState::default();
        score.record_all(&[
            SimEvent::ProjectileReleased {
                id: ProjectileId(0),
                position: DVec2::new(400.0, 320.0),
                kind: ReleaseKind::Manual,
            },
            SimEvent::ProjectileReleased {
                id: ProjectileId(1),
                position: DVec2::new(400.0, 320.0),
                kind: ReleaseKind::Auto,
            },
            SimEvent::ProjectileGrounded {
                id: ProjectileId(0),
                effect_id: EffectId(0),
                position: DVec2::new(400.0, 600.0),
                struck_target: true,
            },
            SimEvent::ProjectileGrounded {
                id: ProjectileId(1),
                effect_id: EffectId(1),
                position: DVec2::new(400.0, 600.0),
                struck_target: false,
            },
            SimEvent::AutoFireDisarmed,
        ]);

        assert_eq!(
            score.view(),
            ScoreView {
                manual_releases: 1,
                auto_releases: 1,
                ground_impacts: 2,
                target_strikes: 1,
                expired: 0,
            }
        );
    }
}
