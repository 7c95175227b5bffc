//! A single flag: the two stacks of committed troop/morale cards facing off
//! across it, plus whatever environment tactics have been staked on it.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::card::{EnvironmentIdentity, TroopOrMoraleCard};
use crate::ids::Side;

/// Max cards either side can commit to a flag: 3 normally, 4 under Mud.
pub const MAX_STACK: usize = 4;
/// At most one Fog and one Mud can ever sit on a flag.
pub const MAX_ENVS: usize = 2;

fn side_index(side: Side) -> usize {
    match side {
        Side::A => 0,
        Side::B => 1,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    stacks: [ArrayVec<TroopOrMoraleCard, MAX_STACK>; 2],
    /// Environments are tracked per side — whoever played Fog or Mud here —
    /// even though their effect (`required_cards`, `formation_disabled`)
    /// applies to the flag as a whole regardless of who played them.
    envs: [ArrayVec<EnvironmentIdentity, MAX_ENVS>; 2],
    /// The side that most recently committed a card to either stack on this
    /// flag. The resolver breaks a tied formation in favor of whoever did
    /// *not* stack last.
    last_stacked: Option<Side>,
    claimed_by: Option<Side>,
}

impl Default for Flag {
    fn default() -> Self {
        Self {
            stacks: [ArrayVec::new(), ArrayVec::new()],
            envs: [ArrayVec::new(), ArrayVec::new()],
            last_stacked: None,
            claimed_by: None,
        }
    }
}

impl Flag {
    pub fn new() -> Self {
        Self::default()
    }

    fn any_env(&self, env: EnvironmentIdentity) -> bool {
        self.envs[0].contains(&env) || self.envs[1].contains(&env)
    }

    /// 3 cards normally, 4 if Mud has been played here by either side.
    pub fn required_cards(&self) -> usize {
        if self.any_env(EnvironmentIdentity::Mud) {
            4
        } else {
            3
        }
    }

    /// Fog disables the formation-type bonus; the flag resolves on raw
    /// strength alone. Applies regardless of which side played it.
    pub fn formation_disabled(&self) -> bool {
        self.any_env(EnvironmentIdentity::Fog)
    }

    pub fn stack(&self, side: Side) -> &[TroopOrMoraleCard] {
        &self.stacks[side_index(side)]
    }

    pub fn envs(&self, side: Side) -> &[EnvironmentIdentity] {
        &self.envs[side_index(side)]
    }

    pub fn last_stacked(&self) -> Option<Side> {
        self.last_stacked
    }

    pub fn claimed_by(&self) -> Option<Side> {
        self.claimed_by
    }

    pub fn is_resolved(&self) -> bool {
        self.claimed_by.is_some()
    }

    pub fn is_full(&self, side: Side) -> bool {
        self.stack(side).len() >= self.required_cards()
    }

    pub fn both_full(&self) -> bool {
        self.is_full(Side::A) && self.is_full(Side::B)
    }

    /// Commit a troop or morale card to `side`'s stack. Cards are kept
    /// sorted within a stack (their canonical `Ord`) so the stack's visual
    /// order never depends on play order.
    ///
    /// Panics if the flag is already claimed or the stack is full —
    /// legality is the player contract's job, not this type's.
    pub fn add_stack(&mut self, side: Side, card: TroopOrMoraleCard) {
        assert!(self.claimed_by.is_none(), "flag already claimed");
        let required = self.required_cards();
        let stack = &mut self.stacks[side_index(side)];
        assert!(stack.len() < required, "stack already at required count");
        stack.push(card);
        stack.sort_unstable();
        self.last_stacked = Some(side);
    }

    /// Find and remove the first card on `side`'s stack equal to `card`
    /// (Deserter discards an opponent's troop, Redeploy relocates one of
    /// your own). Returns `None` if no matching card is on the stack.
    pub fn remove_stack(&mut self, side: Side, card: TroopOrMoraleCard) -> Option<TroopOrMoraleCard> {
        assert!(self.claimed_by.is_none(), "flag already claimed");
        let stack = &mut self.stacks[side_index(side)];
        let position = stack.iter().position(|&c| c == card)?;
        Some(stack.remove(position))
    }

    /// Stake an environment tactic for `side`. Once played, an environment
    /// card can never be removed — Fog and Mud are permanent once claimed
    /// here.
    pub fn add_env(&mut self, side: Side, env: EnvironmentIdentity) {
        assert!(self.claimed_by.is_none(), "flag already claimed");
        assert!(!self.any_env(env), "environment already on this flag");
        self.envs[side_index(side)].push(env);
    }

    /// Claim the flag for `side`. Panics if already resolved.
    pub fn resolve(&mut self, side: Side) {
        assert!(self.claimed_by.is_none(), "flag already resolved");
        self.claimed_by = Some(side);
    }
}
