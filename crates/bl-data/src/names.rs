//! Human-readable display names for tactic identities, kept separate from
//! the catalog so a front end can localize without touching rules code.

use bl_types::TacticIdentity;

/// The display name shown for a tactic identity in its original game.
pub fn tactic_display_name(identity: TacticIdentity) -> &'static str {
    match identity {
        TacticIdentity::LeaderAlexander => "Alexander the Great",
        TacticIdentity::LeaderDarius => "Darius",
        TacticIdentity::CompanionCavalry => "Companion Cavalry",
        TacticIdentity::ShieldBearers => "Shield Bearers",
        TacticIdentity::Fog => "Fog",
        TacticIdentity::Mud => "Mud",
        TacticIdentity::Scout => "Scout",
        TacticIdentity::Redeploy => "Redeploy",
        TacticIdentity::Deserter => "Deserter",
        TacticIdentity::Traitor => "Traitor",
    }
}
