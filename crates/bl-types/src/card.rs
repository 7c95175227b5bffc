//! Card model — troop and tactic cards, and the cards that can sit on a flag.
//!
//! Ordering is derived straight off declaration order: within an enum a
//! variant declared first sorts first, and within a variant its fields sort
//! left-to-right. Declaring `Troop` before `Tactic`, and `(color, value)` in
//! that field order, gives exactly the order that matters — troops order by
//! (color, value), any troop orders before any tactic, tactics order by
//! identity — for free, with no manual `Ord` impls needed.

use serde::{Deserialize, Serialize};

/// The six troop colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

/// All six colors, in their canonical order.
pub const ALL_COLORS: [Color; 6] = [
    Color::Red,
    Color::Orange,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Purple,
];

/// A troop card: one of 6 colors crossed with values 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TroopCard {
    pub color: Color,
    pub value: u8,
}

impl TroopCard {
    /// Build a troop card. Panics if `value` is outside 1..=10 — every
    /// caller in this crate constructs troop cards from the fixed 60-card
    /// Cartesian product, so an out-of-range value is a bug, not input.
    pub fn new(color: Color, value: u8) -> Self {
        assert!((1..=10).contains(&value), "troop value out of range: {value}");
        Self { color, value }
    }
}

/// The ten distinct tactic identities, partitioned into three disjoint kinds.
/// Exactly one copy of each identity exists in the tactic deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TacticIdentity {
    LeaderAlexander,
    LeaderDarius,
    CompanionCavalry,
    ShieldBearers,
    Fog,
    Mud,
    Scout,
    Redeploy,
    Deserter,
    Traitor,
}

/// All ten tactic identities, in their canonical order.
pub const ALL_TACTICS: [TacticIdentity; 10] = [
    TacticIdentity::LeaderAlexander,
    TacticIdentity::LeaderDarius,
    TacticIdentity::CompanionCavalry,
    TacticIdentity::ShieldBearers,
    TacticIdentity::Fog,
    TacticIdentity::Mud,
    TacticIdentity::Scout,
    TacticIdentity::Redeploy,
    TacticIdentity::Deserter,
    TacticIdentity::Traitor,
];

/// Which of the three disjoint partitions a tactic identity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Morale,
    Environment,
    Guile,
}

impl TacticIdentity {
    pub fn kind(self) -> Kind {
        match self {
            Self::LeaderAlexander
            | Self::LeaderDarius
            | Self::CompanionCavalry
            | Self::ShieldBearers => Kind::Morale,
            Self::Fog | Self::Mud => Kind::Environment,
            Self::Scout | Self::Redeploy | Self::Deserter | Self::Traitor => Kind::Guile,
        }
    }

    pub fn is_leader(self) -> bool {
        matches!(self, Self::LeaderAlexander | Self::LeaderDarius)
    }
}

/// A morale tactic identity — played onto a flag, counts toward a formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoraleIdentity {
    LeaderAlexander,
    LeaderDarius,
    CompanionCavalry,
    ShieldBearers,
}

impl MoraleIdentity {
    /// Fixed strength contribution: Leaders 10, Companion Cavalry 8, Shield
    /// Bearers 3.
    pub fn strength(self) -> u32 {
        match self {
            Self::LeaderAlexander | Self::LeaderDarius => 10,
            Self::CompanionCavalry => 8,
            Self::ShieldBearers => 3,
        }
    }

    pub fn identity(self) -> TacticIdentity {
        match self {
            Self::LeaderAlexander => TacticIdentity::LeaderAlexander,
            Self::LeaderDarius => TacticIdentity::LeaderDarius,
            Self::CompanionCavalry => TacticIdentity::CompanionCavalry,
            Self::ShieldBearers => TacticIdentity::ShieldBearers,
        }
    }

    pub fn is_leader(self) -> bool {
        matches!(self, Self::LeaderAlexander | Self::LeaderDarius)
    }
}

impl TryFrom<TacticIdentity> for MoraleIdentity {
    type Error = ();

    fn try_from(value: TacticIdentity) -> Result<Self, Self::Error> {
        match value {
            TacticIdentity::LeaderAlexander => Ok(Self::LeaderAlexander),
            TacticIdentity::LeaderDarius => Ok(Self::LeaderDarius),
            TacticIdentity::CompanionCavalry => Ok(Self::CompanionCavalry),
            TacticIdentity::ShieldBearers => Ok(Self::ShieldBearers),
            _ => Err(()),
        }
    }
}

/// An environment tactic identity — played onto a flag, modifies resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnvironmentIdentity {
    Fog,
    Mud,
}

impl EnvironmentIdentity {
    pub fn identity(self) -> TacticIdentity {
        match self {
            Self::Fog => TacticIdentity::Fog,
            Self::Mud => TacticIdentity::Mud,
        }
    }
}

impl TryFrom<TacticIdentity> for EnvironmentIdentity {
    type Error = ();

    fn try_from(value: TacticIdentity) -> Result<Self, Self::Error> {
        match value {
            TacticIdentity::Fog => Ok(Self::Fog),
            TacticIdentity::Mud => Ok(Self::Mud),
            _ => Err(()),
        }
    }
}

/// A guile tactic identity — played as a one-shot effect, never sits on a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GuileIdentity {
    Scout,
    Redeploy,
    Deserter,
    Traitor,
}

impl GuileIdentity {
    pub fn identity(self) -> TacticIdentity {
        match self {
            Self::Scout => TacticIdentity::Scout,
            Self::Redeploy => TacticIdentity::Redeploy,
            Self::Deserter => TacticIdentity::Deserter,
            Self::Traitor => TacticIdentity::Traitor,
        }
    }
}

impl TryFrom<TacticIdentity> for GuileIdentity {
    type Error = ();

    fn try_from(value: TacticIdentity) -> Result<Self, Self::Error> {
        match value {
            TacticIdentity::Scout => Ok(Self::Scout),
            TacticIdentity::Redeploy => Ok(Self::Redeploy),
            TacticIdentity::Deserter => Ok(Self::Deserter),
            TacticIdentity::Traitor => Ok(Self::Traitor),
            _ => Err(()),
        }
    }
}

/// Any card: a troop, or one of the ten tactic identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Card {
    Troop(TroopCard),
    Tactic(TacticIdentity),
}

/// A troop or morale card — the cards that count toward a flag's formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TroopOrMoraleCard {
    Troop(TroopCard),
    Morale(MoraleIdentity),
}

impl TroopOrMoraleCard {
    pub fn strength(self) -> u32 {
        match self {
            Self::Troop(t) => t.value as u32,
            Self::Morale(m) => m.strength(),
        }
    }

    pub fn as_troop(self) -> Option<TroopCard> {
        match self {
            Self::Troop(t) => Some(t),
            Self::Morale(_) => None,
        }
    }

    pub fn as_morale(self) -> Option<MoraleIdentity> {
        match self {
            Self::Morale(m) => Some(m),
            Self::Troop(_) => None,
        }
    }
}

/// The cards that can sit on a flag: committed troop/morale, or environment.
/// Guile cards never sit on a flag — they're one-shot effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayedCard {
    TroopOrMorale(TroopOrMoraleCard),
    Environment(EnvironmentIdentity),
}

impl From<TroopCard> for PlayedCard {
    fn from(t: TroopCard) -> Self {
        Self::TroopOrMorale(TroopOrMoraleCard::Troop(t))
    }
}

impl From<MoraleIdentity> for PlayedCard {
    fn from(m: MoraleIdentity) -> Self {
        Self::TroopOrMorale(TroopOrMoraleCard::Morale(m))
    }
}

impl From<EnvironmentIdentity> for PlayedCard {
    fn from(e: EnvironmentIdentity) -> Self {
        Self::Environment(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn troop_orders_before_tactic() {
        let troop = Card::Troop(TroopCard::new(Color::Purple, 10));
        let tactic = Card::Tactic(TacticIdentity::LeaderAlexander);
        assert!(troop < tactic);
    }

    #[test]
    fn troops_order_by_color_then_value() {
        let red_high = TroopCard::new(Color::Red, 10);
        let orange_low = TroopCard::new(Color::Orange, 1);
        assert!(red_high < orange_low);

        let red_low = TroopCard::new(Color::Red, 1);
        assert!(red_low < red_high);
    }

    #[test]
    fn kind_partitions_are_disjoint_and_exhaustive() {
        for &id in ALL_TACTICS.iter() {
            let kind = id.kind();
            match kind {
                Kind::Morale => assert!(MoraleIdentity::try_from(id).is_ok()),
                Kind::Environment => assert!(EnvironmentIdentity::try_from(id).is_ok()),
                Kind::Guile => assert!(GuileIdentity::try_from(id).is_ok()),
            }
        }
    }

    #[test]
    fn morale_strengths() {
        assert_eq!(MoraleIdentity::LeaderAlexander.strength(), 10);
        assert_eq!(MoraleIdentity::LeaderDarius.strength(), 10);
        assert_eq!(MoraleIdentity::CompanionCavalry.strength(), 8);
        assert_eq!(MoraleIdentity::ShieldBearers.strength(), 3);
    }

    #[test]
    fn troop_or_morale_orders_troop_before_morale() {
        let troop = TroopOrMoraleCard::Troop(TroopCard::new(Color::Purple, 10));
        let morale = TroopOrMoraleCard::Morale(MoraleIdentity::LeaderAlexander);
        assert!(troop < morale);
    }

    #[test]
    fn serde_roundtrip_card() {
        let card = Card::Tactic(TacticIdentity::Mud);
        let json = serde_json::to_string(&card).unwrap();
        let parsed: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, card);
    }

    #[test]
    fn serde_roundtrip_played_card() {
        let card = PlayedCard::from(TroopCard::new(Color::Blue, 7));
        let json = serde_json::to_string(&card).unwrap();
        let parsed: PlayedCard = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, card);
    }
}
