//! Flag resolution: decide, for each unresolved flag, whether one side now
//! holds an unbeatable formation.
//!
//! The core trick is that "unbeatable" has to account for cards the side
//! hasn't played yet but still could — a 2-card wedge attempt with the third
//! card still in the used troop's own hand looks identical to one where that
//! third card has already been played elsewhere and is now impossible. Each
//! formation checker below returns `(strength, resolvable)`: `resolvable`
//! means the formation is already complete; otherwise `strength` is the
//! *best case* strength still reachable, used only to decide whether a
//! formation type still has life left before falling through to a weaker one.

use bl_types::{Color, Flag, GameState, MoraleIdentity, Side, TroopCard, TroopOrMoraleCard};

/// Re-evaluate every unresolved flag and claim whichever ones have become
/// decided. Call this after any move that changes a flag's stacks.
pub fn resolve(state: &mut GameState) {
    let used_cards = aggregate_used_troops(state);
    for flag in state.flags.iter_mut() {
        if flag.is_resolved() {
            continue;
        }
        if let Some(side) = check_resolvable_for_single_flag(flag, &used_cards) {
            flag.resolve(side);
        }
    }
}

/// Every troop card that's been committed to any flag, or discarded by a
/// guile tactic — cards no longer available to complete an in-progress
/// formation.
fn aggregate_used_troops(state: &GameState) -> Vec<TroopCard> {
    let mut cards = Vec::new();
    for flag in state.flags.iter() {
        for side in [Side::A, Side::B] {
            for card in flag.stack(side) {
                if let TroopOrMoraleCard::Troop(t) = card {
                    cards.push(*t);
                }
            }
        }
    }
    for side in [Side::A, Side::B] {
        for op in state.guile_log(side) {
            if let Some(t) = op.discarded.and_then(TroopOrMoraleCard::as_troop) {
                cards.push(t);
            }
        }
    }
    cards
}

type Resolver = fn(&[TroopOrMoraleCard], usize, &[TroopCard]) -> (u32, bool);

const FORMATION_RESOLVERS: [Resolver; 5] = [
    possible_maximum_strength_for_wedge,
    possible_maximum_strength_for_phalanx,
    possible_maximum_strength_for_battalion,
    possible_maximum_strength_for_skirmish,
    possible_maximum_strength_for_host,
];
const HOST_ONLY_RESOLVER: [Resolver; 1] = [possible_maximum_strength_for_host];

/// Walk formation types from strongest (Wedge) to weakest (Host). At each
/// type, a side is either already resolvable (formation complete) or has a
/// best-case strength still in play. The first type at which a verdict can
/// be reached wins; a type both sides have zero chance at falls through to
/// the next-weaker type.
fn check_resolvable_for_single_flag(flag: &Flag, used_cards: &[TroopCard]) -> Option<Side> {
    let n_cards = flag.required_cards();
    let resolvers: &[Resolver] = if flag.formation_disabled() {
        &HOST_ONLY_RESOLVER
    } else {
        &FORMATION_RESOLVERS
    };

    for resolver in resolvers {
        let a_cards = flag.stack(Side::A);
        let b_cards = flag.stack(Side::B);
        let (a_strength, a_resolvable) = resolver(a_cards, n_cards, used_cards);
        let (b_strength, b_resolvable) = resolver(b_cards, n_cards, used_cards);

        if a_resolvable && b_resolvable && a_strength == b_strength {
            // Tied formations go to whoever did not complete theirs last.
            return Some(if flag.last_stacked() == Some(Side::B) { Side::A } else { Side::B });
        }
        if a_resolvable && a_strength > b_strength {
            return Some(Side::A);
        }
        if b_resolvable && b_strength > a_strength {
            return Some(Side::B);
        }
        if a_strength > 0 || b_strength > 0 {
            // Still live at this formation type for at least one side —
            // don't fall through to a weaker formation yet.
            return None;
        }
    }
    None
}

fn check_same_color_in_stack(stack: &[TroopOrMoraleCard]) -> (bool, Option<Color>) {
    let mut color = None;
    for card in stack {
        if let TroopOrMoraleCard::Troop(t) = card {
            match color {
                Some(existing) if existing != t.color => return (false, None),
                _ => color = Some(t.color),
            }
        }
    }
    (true, color)
}

fn calculate_strength_of_stack(stack: &[TroopOrMoraleCard]) -> u32 {
    stack.iter().map(|c| c.strength()).sum()
}

/// The best strength obtainable by drawing `n_req` more cards of `color`
/// (or any color, if `None`) that aren't already accounted for in
/// `used_cards`. `None` if fewer than `n_req` such cards remain at all.
fn calculate_maximum_available_strength(
    n_req: usize,
    color: Option<Color>,
    used_cards: &[TroopCard],
) -> Option<u32> {
    assert!(n_req > 0);
    let mut remaining_per_value = [if color.is_some() { 1u32 } else { 6u32 }; 10];
    for c in used_cards {
        if let Some(col) = color {
            if c.color != col {
                continue;
            }
        }
        let idx = (c.value - 1) as usize;
        remaining_per_value[idx] = remaining_per_value[idx].saturating_sub(1);
    }

    let mut value = 0u32;
    let mut remaining_needed = n_req;
    for v in (1..=10u32).rev() {
        let idx = (v - 1) as usize;
        while remaining_per_value[idx] > 0 && remaining_needed > 0 {
            value += v;
            remaining_per_value[idx] -= 1;
            remaining_needed -= 1;
        }
        if remaining_needed == 0 {
            return Some(value);
        }
    }
    None
}

/// `(running sum, remaining values still needed)` for one consecutive-value
/// candidate window.
type CandTuple = (u32, Vec<u8>);

/// All length-`n_cards` consecutive-value windows within 1..=10, strongest
/// (highest values) first.
fn consecutive_candidate_windows(n_cards: usize) -> Vec<CandTuple> {
    let hi = 11 - n_cards as u32;
    (1..=hi)
        .rev()
        .map(|start| {
            let values: Vec<u8> = (start..start + n_cards as u32).map(|v| v as u8).collect();
            (values.iter().map(|&v| v as u32).sum(), values)
        })
        .collect()
}

fn check_candidate_list_by_troop(value: u8, tuple: CandTuple) -> Option<CandTuple> {
    let (sum, mut values) = tuple;
    let pos = values.iter().position(|&v| v == value)?;
    values.remove(pos);
    Some((sum, values))
}

fn check_candidate_tuple_by_card(card: &TroopOrMoraleCard, tuple: CandTuple) -> Vec<CandTuple> {
    match card {
        TroopOrMoraleCard::Troop(t) => check_candidate_list_by_troop(t.value, tuple).into_iter().collect(),
        TroopOrMoraleCard::Morale(MoraleIdentity::LeaderAlexander | MoraleIdentity::LeaderDarius) => {
            // Wildcard: satisfies any one of the remaining values, branching
            // the candidate once per choice of which value it covers.
            let (sum, values) = tuple;
            (0..values.len())
                .map(|i| {
                    let mut remaining = values.clone();
                    remaining.remove(i);
                    (sum, remaining)
                })
                .collect()
        }
        TroopOrMoraleCard::Morale(MoraleIdentity::CompanionCavalry) => {
            check_candidate_list_by_troop(8, tuple).into_iter().collect()
        }
        TroopOrMoraleCard::Morale(MoraleIdentity::ShieldBearers) => (1u8..=3)
            .filter_map(|v| check_candidate_list_by_troop(v, tuple.clone()))
            .collect(),
    }
}

fn filter_candidate_lists_by_card(card: &TroopOrMoraleCard, cand_tuples: Vec<CandTuple>) -> Vec<CandTuple> {
    cand_tuples
        .into_iter()
        .flat_map(|tuple| check_candidate_tuple_by_card(card, tuple))
        .collect()
}

/// Check whether `stacked` cards can form a consecutive run of `n_cards`
/// values (any color — the caller filters for same-color separately for
/// Wedge). Returns the fixed strength and completion flag once decided, or
/// the surviving candidate windows if the formation is still open.
fn check_consecutive_formation(
    stacked: &[TroopOrMoraleCard],
    n_cards: usize,
) -> (Option<u32>, bool, Vec<CandTuple>) {
    let mut cand_tuples = consecutive_candidate_windows(n_cards);
    for card in stacked {
        cand_tuples = filter_candidate_lists_by_card(card, cand_tuples);
        if cand_tuples.is_empty() {
            return (Some(0), false, Vec::new());
        }
    }
    let completed: Vec<u32> = cand_tuples
        .iter()
        .filter(|(_, remaining)| remaining.is_empty())
        .map(|(sum, _)| *sum)
        .collect();
    if !completed.is_empty() {
        debug_assert_eq!(stacked.len(), n_cards);
        return (Some(*completed.iter().max().unwrap()), true, cand_tuples);
    }
    debug_assert!(stacked.len() < n_cards);
    (None, false, cand_tuples)
}

/// Same color, consecutive values — the strongest formation.
fn possible_maximum_strength_for_wedge(
    stacked: &[TroopOrMoraleCard],
    n_cards: usize,
    used_cards: &[TroopCard],
) -> (u32, bool) {
    let (same_color, color) = check_same_color_in_stack(stacked);
    if !same_color {
        return (0, false);
    }
    let (strength, resolvable, mut cand_tuples) = check_consecutive_formation(stacked, n_cards);
    if let Some(s) = strength {
        return (s, resolvable);
    }
    if let Some(color) = color {
        for c in used_cards {
            if c.color != color {
                continue;
            }
            let value = c.value;
            cand_tuples.retain(|(_, values)| !values.contains(&value));
        }
    }
    if cand_tuples.is_empty() {
        return (0, false);
    }
    (cand_tuples.iter().map(|(s, _)| *s).max().unwrap(), false)
}

/// Same value, any color (or color-blind wildcards only).
fn possible_maximum_strength_for_phalanx(
    stacked: &[TroopOrMoraleCard],
    n_cards: usize,
    used_cards: &[TroopCard],
) -> (u32, bool) {
    let mut number: Option<u32> = None;
    let mut is_shield = false;
    for card in stacked {
        match card {
            TroopOrMoraleCard::Troop(t) => {
                let value = t.value as u32;
                if matches!(number, Some(n) if n != value) {
                    return (0, false);
                }
                number = Some(value);
            }
            TroopOrMoraleCard::Morale(MoraleIdentity::LeaderAlexander | MoraleIdentity::LeaderDarius) => {}
            TroopOrMoraleCard::Morale(MoraleIdentity::CompanionCavalry) => {
                if matches!(number, Some(n) if n != 8) {
                    return (0, false);
                }
                number = Some(8);
            }
            TroopOrMoraleCard::Morale(MoraleIdentity::ShieldBearers) => is_shield = true,
        }
    }

    let required = n_cards - stacked.len();
    if required == 0 {
        let number = number.expect("a full phalanx stack must have settled on a number");
        return (number * n_cards as u32, true);
    }

    let mut candidates: Vec<u32> = match number {
        Some(n) => vec![n],
        None if is_shield => (1..=3).collect(),
        None => (1..=10).collect(),
    };
    candidates.sort_unstable_by(|a, b| b.cmp(a));
    for n in candidates {
        let mut remain: i32 = 6;
        for c in used_cards {
            if c.value as u32 == n {
                remain -= 1;
            }
        }
        if remain > required as i32 {
            return (n * n_cards as u32, false);
        }
    }
    (0, false)
}

/// Same color, any values.
fn possible_maximum_strength_for_battalion(
    stacked: &[TroopOrMoraleCard],
    n_cards: usize,
    used_cards: &[TroopCard],
) -> (u32, bool) {
    let (same_color, color) = check_same_color_in_stack(stacked);
    if !same_color {
        return (0, false);
    }
    let required = n_cards - stacked.len();
    let cur_value = calculate_strength_of_stack(stacked);
    if required == 0 {
        return (cur_value, true);
    }
    let colors: Vec<Color> = match color {
        Some(c) => vec![c],
        None => bl_types::ALL_COLORS.to_vec(),
    };
    let max_available = colors
        .iter()
        .map(|&c| calculate_maximum_available_strength(required, Some(c), used_cards).unwrap_or(0))
        .max()
        .unwrap_or(0);
    if max_available == 0 {
        return (0, false);
    }
    (max_available + cur_value, false)
}

/// Consecutive values, any colors.
fn possible_maximum_strength_for_skirmish(
    stacked: &[TroopOrMoraleCard],
    n_cards: usize,
    used_cards: &[TroopCard],
) -> (u32, bool) {
    let (strength, resolvable, mut cand_tuples) = check_consecutive_formation(stacked, n_cards);
    if let Some(s) = strength {
        return (s, resolvable);
    }
    let mut remaining_per_value = [6i32; 10];
    for c in used_cards {
        remaining_per_value[(c.value - 1) as usize] -= 1;
    }
    for (i, &remain) in remaining_per_value.iter().enumerate() {
        if remain > 0 {
            continue;
        }
        let value = (i + 1) as u8;
        cand_tuples.retain(|(_, values)| !values.contains(&value));
    }
    if cand_tuples.is_empty() {
        return (0, false);
    }
    (cand_tuples.iter().map(|(s, _)| *s).max().unwrap(), false)
}

/// No formation at all — raw sum of values.
fn possible_maximum_strength_for_host(
    stacked: &[TroopOrMoraleCard],
    n_cards: usize,
    used_cards: &[TroopCard],
) -> (u32, bool) {
    let required = n_cards - stacked.len();
    let cur_value = calculate_strength_of_stack(stacked);
    if required == 0 {
        return (cur_value, true);
    }
    let max_available = calculate_maximum_available_strength(required, None, used_cards).unwrap_or(0);
    if max_available == 0 {
        return (0, false);
    }
    (max_available + cur_value, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bl_types::{Color, Deck, GameState, TacticIdentity, TroopCard};

    fn troop(color: Color, value: u8) -> TroopOrMoraleCard {
        TroopOrMoraleCard::Troop(TroopCard::new(color, value))
    }

    fn empty_state() -> GameState {
        GameState::new(Deck::new(Vec::<TroopCard>::new()), Deck::new(Vec::<TacticIdentity>::new()))
    }

    #[test]
    fn completed_wedge_beats_completed_host() {
        let mut state = empty_state();
        {
            let flag = state.flag_mut(0);
            flag.add_stack(Side::A, troop(Color::Red, 1));
            flag.add_stack(Side::A, troop(Color::Red, 2));
            flag.add_stack(Side::A, troop(Color::Red, 3));
            flag.add_stack(Side::B, troop(Color::Red, 8));
            flag.add_stack(Side::B, troop(Color::Blue, 9));
            flag.add_stack(Side::B, troop(Color::Green, 10));
        }
        resolve(&mut state);
        assert_eq!(state.flag(0).claimed_by(), Some(Side::A));
    }

    #[test]
    fn higher_host_sum_wins_when_neither_side_has_a_formation() {
        let mut state = empty_state();
        {
            let flag = state.flag_mut(0);
            // Neither hand is same-color, same-value, or a consecutive
            // run, so both fall all the way through to a raw Host sum.
            flag.add_stack(Side::A, troop(Color::Red, 9));
            flag.add_stack(Side::A, troop(Color::Blue, 1));
            flag.add_stack(Side::A, troop(Color::Green, 5));
            flag.add_stack(Side::B, troop(Color::Red, 2));
            flag.add_stack(Side::B, troop(Color::Blue, 3));
            flag.add_stack(Side::B, troop(Color::Green, 6));
        }
        resolve(&mut state);
        assert_eq!(state.flag(0).claimed_by(), Some(Side::A));
    }

    #[test]
    fn unfinished_flag_stays_unresolved() {
        let mut state = empty_state();
        state.flag_mut(0).add_stack(Side::A, troop(Color::Red, 10));
        resolve(&mut state);
        assert!(!state.flag(0).is_resolved());
    }

    #[test]
    fn fog_forces_host_comparison_even_with_a_wedge_shape() {
        let mut state = empty_state();
        {
            let flag = state.flag_mut(0);
            flag.add_env(Side::A, bl_types::EnvironmentIdentity::Fog);
            flag.add_stack(Side::A, troop(Color::Red, 1));
            flag.add_stack(Side::A, troop(Color::Red, 2));
            flag.add_stack(Side::A, troop(Color::Red, 3));
            flag.add_stack(Side::B, troop(Color::Red, 4));
            flag.add_stack(Side::B, troop(Color::Blue, 5));
            flag.add_stack(Side::B, troop(Color::Green, 1));
        }
        resolve(&mut state);
        // A sums to 6, B sums to 10 — under Fog, raw sum decides it.
        assert_eq!(state.flag(0).claimed_by(), Some(Side::B));
    }

    #[test]
    fn mud_requires_a_fourth_card_before_resolving() {
        let mut state = empty_state();
        {
            let flag = state.flag_mut(0);
            flag.add_env(Side::A, bl_types::EnvironmentIdentity::Mud);
            flag.add_stack(Side::A, troop(Color::Red, 10));
            flag.add_stack(Side::A, troop(Color::Red, 9));
            flag.add_stack(Side::A, troop(Color::Red, 8));
        }
        resolve(&mut state);
        assert!(!state.flag(0).is_resolved());
    }

    #[test]
    fn tie_goes_to_the_side_that_did_not_stack_last() {
        let mut state = empty_state();
        {
            let flag = state.flag_mut(0);
            flag.add_stack(Side::A, troop(Color::Red, 2));
            flag.add_stack(Side::A, troop(Color::Blue, 3));
            flag.add_stack(Side::B, troop(Color::Green, 1));
            flag.add_stack(Side::B, troop(Color::Purple, 4));
            // Both at sum 5 so far; B stacks last to complete the tie.
            flag.add_stack(Side::A, troop(Color::Yellow, 10));
            flag.add_stack(Side::B, troop(Color::Orange, 10));
        }
        resolve(&mut state);
        assert_eq!(state.flag(0).claimed_by(), Some(Side::A));
    }

    // End-to-end scenarios.

    #[test]
    fn s1_wedge_beats_phalanx() {
        let mut state = empty_state();
        {
            let flag = state.flag_mut(0);
            flag.add_stack(Side::A, troop(Color::Red, 3));
            flag.add_stack(Side::A, troop(Color::Red, 4));
            flag.add_stack(Side::A, troop(Color::Red, 2));
            flag.add_stack(Side::B, troop(Color::Blue, 8));
            flag.add_stack(Side::B, troop(Color::Green, 8));
            flag.add_stack(Side::B, troop(Color::Yellow, 8));
        }
        resolve(&mut state);
        assert_eq!(state.flag(0).claimed_by(), Some(Side::A));
    }

    #[test]
    fn s2_stronger_wedge_wins_outright() {
        let mut state = empty_state();
        {
            let flag = state.flag_mut(0);
            flag.add_stack(Side::A, troop(Color::Red, 3));
            flag.add_stack(Side::A, troop(Color::Red, 1));
            flag.add_stack(Side::A, troop(Color::Red, 2));
            flag.add_stack(Side::B, troop(Color::Blue, 8));
            flag.add_stack(Side::B, troop(Color::Blue, 9));
            flag.add_stack(Side::B, troop(Color::Blue, 10));
        }
        resolve(&mut state);
        assert_eq!(state.flag(0).claimed_by(), Some(Side::B));
    }

    #[test]
    fn s3_leader_wildcard_completes_the_stronger_wedge_window() {
        let mut state = empty_state();
        {
            let flag = state.flag_mut(0);
            flag.add_stack(Side::A, troop(Color::Red, 3));
            flag.add_stack(Side::A, troop(Color::Red, 4));
            flag.add_stack(Side::A, TroopOrMoraleCard::Morale(MoraleIdentity::LeaderAlexander));
            flag.add_stack(Side::B, troop(Color::Blue, 2));
            flag.add_stack(Side::B, troop(Color::Blue, 3));
            flag.add_stack(Side::B, troop(Color::Blue, 4));
        }
        resolve(&mut state);
        assert_eq!(state.flag(0).claimed_by(), Some(Side::A));
    }

    #[test]
    fn s4_equal_wedge_value_sets_go_to_whoever_did_not_stack_last() {
        let mut state = empty_state();
        {
            let flag = state.flag_mut(0);
            flag.add_stack(Side::B, troop(Color::Blue, 2));
            flag.add_stack(Side::B, troop(Color::Blue, 3));
            flag.add_stack(Side::B, troop(Color::Blue, 4));
            flag.add_stack(Side::A, troop(Color::Red, 3));
            flag.add_stack(Side::A, troop(Color::Red, 4));
            flag.add_stack(Side::A, troop(Color::Red, 2));
        }
        resolve(&mut state);
        assert_eq!(state.flag(0).last_stacked(), Some(Side::A));
        assert_eq!(state.flag(0).claimed_by(), Some(Side::B));
    }

    #[test]
    fn s5_equal_wedge_tempo_is_order_independent() {
        let mut state = empty_state();
        {
            let flag = state.flag_mut(0);
            flag.add_stack(Side::B, troop(Color::Blue, 2));
            flag.add_stack(Side::B, troop(Color::Blue, 3));
            flag.add_stack(Side::B, troop(Color::Blue, 4));
            flag.add_stack(Side::A, troop(Color::Red, 3));
            flag.add_stack(Side::A, troop(Color::Red, 4));
            flag.add_stack(Side::A, troop(Color::Red, 2));
        }
        resolve(&mut state);
        assert_eq!(state.flag(0).claimed_by(), Some(Side::B));
    }

    #[test]
    fn s6_wedge_collapses_to_a_battalion_comparison() {
        let mut state = empty_state();
        {
            let flag = state.flag_mut(0);
            flag.add_stack(Side::A, troop(Color::Red, 3));
            flag.add_stack(Side::A, troop(Color::Red, 4));
            flag.add_stack(Side::A, troop(Color::Red, 7));
            flag.add_stack(Side::B, troop(Color::Blue, 1));
            flag.add_stack(Side::B, troop(Color::Blue, 3));
            flag.add_stack(Side::B, troop(Color::Blue, 6));
        }
        resolve(&mut state);
        assert_eq!(state.flag(0).claimed_by(), Some(Side::A));
    }
}
