//! The player contract: the only way a driver is allowed to mutate a
//! [`GameState`] outside of `resolve`. Every move is validated here before
//! it touches a flag or a hand, so an illegal move never reaches the
//! assert-like contract violations in `bl_types` — it comes back as a
//! [`MoveError`] the driver can use to re-prompt.

use bl_types::{
    Card, EnvironmentIdentity, GameState, GuileIdentity, GuileOperation, MoraleIdentity, Side,
    TacticIdentity, TroopCard, TroopOrMoraleCard, NUM_FLAGS,
};
use thiserror::Error;

/// Which deck an end-of-turn draw, or a Scout draw, pulls from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckKind {
    Troops,
    Tactics,
}

/// One legal move kind. A driver builds one of these from a
/// player's intent and hands it to [`apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerMove {
    /// Commit a troop or morale card from hand onto one of your own flags.
    PlayTroopOrMorale { flag: usize, card: TroopOrMoraleCard },
    /// Stake an environment (Fog or Mud) onto a flag.
    PlayEnvironment { flag: usize, env: EnvironmentIdentity },
    /// Draw three cards split across the two decks, then return any two
    /// cards from hand to the tops of their respective decks.
    Scout { draw_troops: usize, draw_tactics: usize, return_cards: [Card; 2] },
    /// Move one of your own committed cards to another flag, or discard it.
    Redeploy { from_flag: usize, card: TroopOrMoraleCard, to_flag: Option<usize> },
    /// Discard an opponent's card from a flag.
    Deserter { flag: usize, card: TroopOrMoraleCard },
    /// Move an opponent's troop card onto one of your own flags.
    Traitor { from_flag: usize, card: TroopCard, to_flag: usize },
    /// End-of-turn (or standalone) draw from a single deck.
    Draw { from: DeckKind },
}

/// Why a move was rejected. These are re-prompt signals, not contract
/// violations — the driver should ask the player for a different move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("flag index out of range")]
    FlagOutOfRange,
    #[error("that flag is already resolved")]
    FlagResolved,
    #[error("that stack is already at its required count")]
    StackFull,
    #[error("that card is not in hand")]
    CardNotInHand,
    #[error("that card is not on that flag")]
    CardNotOnFlag,
    #[error("a side may hold at most one Leader at a time")]
    SecondLeader,
    #[error("that environment has already been played on this flag")]
    EnvironmentAlreadyPlayed,
    #[error("playing this guile card would put this side's tactic count more than one ahead of the opponent's")]
    GuileImbalance,
    #[error("scout must draw exactly three cards split across both decks")]
    ScoutDrawCountInvalid,
    #[error("redeploy must move the card to a different flag")]
    RedeployToSameFlag,
    #[error("that deck is empty")]
    DeckEmpty,
}

/// Apply one legal move to `state` on `side`'s behalf. On `Err`, `state` is
/// left exactly as it was passed in except where noted (`Scout`'s draws are
/// not rolled back if a later card can't be returned — see the note on
/// [`scout`]).
pub fn apply_move(state: &mut GameState, side: Side, mv: PlayerMove) -> Result<(), MoveError> {
    match mv {
        PlayerMove::PlayTroopOrMorale { flag, card } => play_troop_or_morale(state, side, flag, card),
        PlayerMove::PlayEnvironment { flag, env } => play_environment(state, side, flag, env),
        PlayerMove::Scout { draw_troops, draw_tactics, return_cards } => {
            scout(state, side, draw_troops, draw_tactics, return_cards)
        }
        PlayerMove::Redeploy { from_flag, card, to_flag } => redeploy(state, side, from_flag, card, to_flag),
        PlayerMove::Deserter { flag, card } => deserter(state, side, flag, card),
        PlayerMove::Traitor { from_flag, card, to_flag } => traitor(state, side, from_flag, card, to_flag),
        PlayerMove::Draw { from } => draw(state, side, from),
    }
}

fn play_troop_or_morale(
    state: &mut GameState,
    side: Side,
    flag_idx: usize,
    card: TroopOrMoraleCard,
) -> Result<(), MoveError> {
    let flag = flag_at(state, flag_idx)?;
    if flag.is_resolved() {
        return Err(MoveError::FlagResolved);
    }
    if flag.is_full(side) {
        return Err(MoveError::StackFull);
    }
    if card.as_morale().is_some_and(MoraleIdentity::is_leader) && leader_count(state, side) > 0 {
        return Err(MoveError::SecondLeader);
    }
    remove_from_hand(state, side, as_card(card))?;
    state.flag_mut(flag_idx).add_stack(side, card);
    Ok(())
}

fn play_environment(
    state: &mut GameState,
    side: Side,
    flag_idx: usize,
    env: EnvironmentIdentity,
) -> Result<(), MoveError> {
    let flag = flag_at(state, flag_idx)?;
    if flag.is_resolved() {
        return Err(MoveError::FlagResolved);
    }
    if flag.envs(Side::A).contains(&env) || flag.envs(Side::B).contains(&env) {
        return Err(MoveError::EnvironmentAlreadyPlayed);
    }
    remove_from_hand(state, side, Card::Tactic(env.identity()))?;
    state.flag_mut(flag_idx).add_env(side, env);
    Ok(())
}

/// Draws are applied to the hand (and the source decks emptied) before the
/// two returned cards are validated, so a `CardNotInHand` on a returned card
/// leaves the three newly-drawn cards in hand rather than rolling the whole
/// move back — a driver that built `return_cards` from the post-draw hand
/// never hits this.
fn scout(
    state: &mut GameState,
    side: Side,
    draw_troops: usize,
    draw_tactics: usize,
    return_cards: [Card; 2],
) -> Result<(), MoveError> {
    if draw_troops + draw_tactics != 3 {
        return Err(MoveError::ScoutDrawCountInvalid);
    }
    check_guile_balance(state, side)?;
    remove_from_hand(state, side, Card::Tactic(TacticIdentity::Scout))?;

    for _ in 0..draw_troops {
        let card = state.troops_deck.draw().map_err(|_| MoveError::DeckEmpty)?;
        state.hand_mut(side).push(Card::Troop(card));
    }
    for _ in 0..draw_tactics {
        let card = state.tactics_deck.draw().map_err(|_| MoveError::DeckEmpty)?;
        state.hand_mut(side).push(Card::Tactic(card));
    }
    for card in return_cards {
        remove_from_hand(state, side, card)?;
        match card {
            Card::Troop(t) => state.troops_deck.put_back(t),
            Card::Tactic(t) => state.tactics_deck.put_back(t),
        }
    }
    state.push_guile_log(side, GuileOperation { guile_card: GuileIdentity::Scout, discarded: None });
    Ok(())
}

fn redeploy(
    state: &mut GameState,
    side: Side,
    from_flag: usize,
    card: TroopOrMoraleCard,
    to_flag: Option<usize>,
) -> Result<(), MoveError> {
    let source = flag_at(state, from_flag)?;
    if source.is_resolved() {
        return Err(MoveError::FlagResolved);
    }
    if !source.stack(side).contains(&card) {
        return Err(MoveError::CardNotOnFlag);
    }
    if let Some(to_idx) = to_flag {
        if to_idx == from_flag {
            return Err(MoveError::RedeployToSameFlag);
        }
        let target = flag_at(state, to_idx)?;
        if target.is_resolved() {
            return Err(MoveError::FlagResolved);
        }
        if target.is_full(side) {
            return Err(MoveError::StackFull);
        }
    }
    check_guile_balance(state, side)?;
    remove_from_hand(state, side, Card::Tactic(TacticIdentity::Redeploy))?;

    let removed = state
        .flag_mut(from_flag)
        .remove_stack(side, card)
        .expect("presence validated above");
    let discarded = match to_flag {
        Some(to_idx) => {
            state.flag_mut(to_idx).add_stack(side, removed);
            None
        }
        None => Some(removed),
    };
    state.push_guile_log(side, GuileOperation { guile_card: GuileIdentity::Redeploy, discarded });
    Ok(())
}

fn deserter(state: &mut GameState, side: Side, flag_idx: usize, card: TroopOrMoraleCard) -> Result<(), MoveError> {
    let opponent = side.opposite();
    let flag = flag_at(state, flag_idx)?;
    if flag.is_resolved() {
        return Err(MoveError::FlagResolved);
    }
    if !flag.stack(opponent).contains(&card) {
        return Err(MoveError::CardNotOnFlag);
    }
    check_guile_balance(state, side)?;
    remove_from_hand(state, side, Card::Tactic(TacticIdentity::Deserter))?;

    let removed = state
        .flag_mut(flag_idx)
        .remove_stack(opponent, card)
        .expect("presence validated above");
    state.push_guile_log(side, GuileOperation { guile_card: GuileIdentity::Deserter, discarded: Some(removed) });
    Ok(())
}

fn traitor(
    state: &mut GameState,
    side: Side,
    from_flag: usize,
    card: TroopCard,
    to_flag: usize,
) -> Result<(), MoveError> {
    let opponent = side.opposite();
    let card = TroopOrMoraleCard::Troop(card);
    let source = flag_at(state, from_flag)?;
    if source.is_resolved() {
        return Err(MoveError::FlagResolved);
    }
    if !source.stack(opponent).contains(&card) {
        return Err(MoveError::CardNotOnFlag);
    }
    let target = flag_at(state, to_flag)?;
    if target.is_resolved() {
        return Err(MoveError::FlagResolved);
    }
    if target.is_full(side) {
        return Err(MoveError::StackFull);
    }
    check_guile_balance(state, side)?;
    remove_from_hand(state, side, Card::Tactic(TacticIdentity::Traitor))?;

    let removed = state
        .flag_mut(from_flag)
        .remove_stack(opponent, card)
        .expect("presence validated above");
    state.flag_mut(to_flag).add_stack(side, removed);
    state.push_guile_log(side, GuileOperation { guile_card: GuileIdentity::Traitor, discarded: None });
    Ok(())
}

fn draw(state: &mut GameState, side: Side, from: DeckKind) -> Result<(), MoveError> {
    match from {
        DeckKind::Troops => {
            let card = state.troops_deck.draw().map_err(|_| MoveError::DeckEmpty)?;
            state.hand_mut(side).push(Card::Troop(card));
        }
        DeckKind::Tactics => {
            let card = state.tactics_deck.draw().map_err(|_| MoveError::DeckEmpty)?;
            state.hand_mut(side).push(Card::Tactic(card));
        }
    }
    Ok(())
}

fn flag_at(state: &GameState, index: usize) -> Result<&bl_types::Flag, MoveError> {
    if index >= NUM_FLAGS {
        return Err(MoveError::FlagOutOfRange);
    }
    Ok(state.flag(index))
}

fn remove_from_hand(state: &mut GameState, side: Side, card: Card) -> Result<(), MoveError> {
    let hand = state.hand_mut(side);
    let position = hand.iter().position(|&c| c == card).ok_or(MoveError::CardNotInHand)?;
    hand.remove(position);
    Ok(())
}

fn as_card(card: TroopOrMoraleCard) -> Card {
    match card {
        TroopOrMoraleCard::Troop(t) => Card::Troop(t),
        TroopOrMoraleCard::Morale(m) => Card::Tactic(m.identity()),
    }
}

/// Leaders committed to any flag, plus any discarded via Deserter/Redeploy
/// but still recorded in the guile log — a Leader that's left the board
/// still counts against the one-Leader-at-a-time limit.
fn leader_count(state: &GameState, side: Side) -> usize {
    let on_flags: usize = state
        .flags
        .iter()
        .map(|f| f.stack(side).iter().filter(|c| c.as_morale().is_some_and(MoraleIdentity::is_leader)).count())
        .sum();
    let in_log: usize = state
        .guile_log(side)
        .iter()
        .filter(|op| op.discarded.and_then(TroopOrMoraleCard::as_morale).is_some_and(MoraleIdentity::is_leader))
        .count();
    on_flags + in_log
}

/// Tactic cards a side has committed: environments staked on any flag,
/// morale cards committed to any flag, and guile cards already logged.
fn tactic_count_on_side(state: &GameState, side: Side) -> usize {
    let committed: usize = state
        .flags
        .iter()
        .map(|f| f.envs(side).len() + f.stack(side).iter().filter(|c| c.as_morale().is_some()).count())
        .sum();
    committed + state.guile_log(side).len()
}

fn check_guile_balance(state: &GameState, side: Side) -> Result<(), MoveError> {
    let projected_own = tactic_count_on_side(state, side) + 1;
    let opponent = tactic_count_on_side(state, side.opposite());
    if projected_own > opponent + 1 {
        Err(MoveError::GuileImbalance)
    } else {
        Ok(())
    }
}
