use serde::{Deserialize, Serialize};

use crate::BoxErr;

/// The slice of battle state the boss-action service sees. Doubles as the
/// request body of the boss-action endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSnapshot {
    pub hero_hp: i32,
    pub boss_hp: i32,
    pub gold: u32,
    pub shielded: bool,
}

/// Supplies the boss's spoken line for a turn. A failed fetch aborts the
/// boss half of the turn upstream, so implementations should just report
/// the error rather than invent a line.
pub trait BossBanter {
    fn taunt(&self, snapshot: &BattleSnapshot) -> Result<String, BoxErr>;
}

#[derive(Deserialize)]
struct BanterReply {
    message: String,
}

/// Fetches flavor text from an external inference endpoint.
pub struct HttpBanter {
    agent: ureq::Agent,
    url: String,
}

impl HttpBanter {
    pub fn new(url: String) -> Self {
        Self {
            agent: ureq::agent(),
            url,
        }
    }
}

impl BossBanter for HttpBanter {
    fn taunt(&self, snapshot: &BattleSnapshot) -> Result<String, BoxErr> {
        let reply: BanterReply = self
            .agent
            .post(&self.url)
            .send_json(snapshot)?
            .into_json()?;
        Ok(reply.message)
    }
}

/// Offline fallback with a fixed repertoire keyed off the battle state.
pub struct CannedBanter;

impl BossBanter for CannedBanter {
    fn taunt(&self, snapshot: &BattleSnapshot) -> Result<String, BoxErr> {
        let line = if snapshot.boss_hp <= 20 {
            "You think a few scratches scare El Jefe?"
        } else if snapshot.shielded {
            "Hiding behind a shell? Adorable."
        } else if snapshot.hero_hp <= 20 {
            "One more bite and you're salsa."
        } else if snapshot.gold >= 80 {
            "All that gold and still no taste."
        } else {
            "Is that all the heat you brought?"
        };
        Ok(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(hero_hp: i32, boss_hp: i32, gold: u32, shielded: bool) -> BattleSnapshot {
        BattleSnapshot {
            hero_hp,
            boss_hp,
            gold,
            shielded,
        }
    }

    #[test]
    fn test_canned_banter_never_fails() {
        let banter = CannedBanter;
        for hero_hp in [0, 20, 100] {
            for boss_hp in [1, 50, 100] {
                let line = banter.taunt(&snapshot(hero_hp, boss_hp, 50, false)).unwrap();
                assert!(!line.is_empty());
            }
        }
    }

    #[test]
    fn test_canned_banter_notices_the_shell() {
        let banter = CannedBanter;
        let line = banter.taunt(&snapshot(90, 90, 50, true)).unwrap();
        assert!(line.contains("shell"));
    }

    #[test]
    fn test_snapshot_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(snapshot(80, 65, 40, true)).unwrap();
        assert_eq!(json["heroHp"], 80);
        assert_eq!(json["bossHp"], 65);
        assert_eq!(json["gold"], 40);
        assert_eq!(json["shielded"], true);
    }
}
