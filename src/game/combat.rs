//! Combat resolution for a 2v2 elimination round.
//!
//! Pure functions over seat arrays in canonical order (team 1 leader,
//! team 1 partner, team 2 leader, team 2 partner). The room actor owns
//! timing, defaults, and broadcasting; nothing here does I/O.

use super::types::{direct_opponent, partner, same_side, Move, SEATS};

/// Outcome of `a` against `b` from `a`'s perspective: 1 win, 0 tie, -1 loss.
/// Standard cyclic dominance: rock beats scissors, scissors beats paper,
/// paper beats rock.
pub fn beats(a: Move, b: Move) -> i8 {
    match (a as i8 - b as i8).rem_euclid(3) {
        0 => 0,
        1 => 1,
        _ => -1,
    }
}

/// Whether two living seats on opposite sides duel this round.
///
/// A seat always duels its direct opponent; responsibility expands to the
/// other opposing seat when either duelist's partner is dead, so a sole
/// survivor of a side must fight every living opponent.
fn must_duel(a: usize, b: usize, alive: &[bool; SEATS]) -> bool {
    direct_opponent(a) == b || !alive[partner(a)] || !alive[partner(b)]
}

/// Resolve one round: given per-seat alive flags and the four submitted
/// moves, return the updated alive flags.
///
/// A seat survives iff it loses none of its duels; wins and ties are never
/// eliminating, so a round may end with no eliminations at all. The caller
/// guarantees that neither side enters fully dead (team-wipe reset).
pub fn resolve_round(alive: [bool; SEATS], moves: [Move; SEATS]) -> [bool; SEATS] {
    let mut next = alive;
    for seat in 0..SEATS {
        if !alive[seat] {
            continue;
        }
        for opp in 0..SEATS {
            if same_side(seat, opp) || !alive[opp] || !must_duel(seat, opp, &alive) {
                continue;
            }
            if beats(moves[seat], moves[opp]) < 0 {
                next[seat] = false;
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use Move::{Paper, Rock, Scissors};

    const ALL_MOVES: [Move; 3] = [Rock, Paper, Scissors];

    #[test]
    fn test_beats_is_antisymmetric() {
        for a in ALL_MOVES {
            for b in ALL_MOVES {
                assert_eq!(beats(a, b), -beats(b, a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_beats_self_is_tie() {
        for m in ALL_MOVES {
            assert_eq!(beats(m, m), 0);
        }
    }

    #[test]
    fn test_beats_cycle() {
        assert_eq!(beats(Rock, Scissors), 1);
        assert_eq!(beats(Scissors, Paper), 1);
        assert_eq!(beats(Paper, Rock), 1);
    }

    #[test]
    fn test_all_alive_two_independent_duels() {
        // Seat 0 (rock) loses to seat 2 (paper); seat 1 (rock) beats seat 3
        // (scissors). Cross pairings do not duel.
        let alive = resolve_round([true; 4], [Rock, Rock, Paper, Scissors]);
        assert_eq!(alive, [false, true, true, false]);
    }

    #[test]
    fn test_all_alive_ties_keep_everyone() {
        let alive = resolve_round([true; 4], [Rock, Paper, Rock, Paper]);
        assert_eq!(alive, [true, true, true, true]);
    }

    #[test]
    fn test_dead_teammate_survivor_fights_both_opponents() {
        // Seat 0 dead: seat 1 (rock) must beat both seat 2 (scissors) and
        // seat 3 (scissors) to survive; it does, and both opponents die.
        let alive = resolve_round([false, true, true, true], [Rock, Rock, Scissors, Scissors]);
        assert_eq!(alive, [false, true, false, false]);
    }

    #[test]
    fn test_dead_teammate_survivor_dies_on_single_loss() {
        // Seat 1 (rock) beats seat 2 (scissors) but loses to seat 3 (paper):
        // one lost duel is enough to eliminate.
        let alive = resolve_round([false, true, true, true], [Rock, Rock, Scissors, Paper]);
        assert_eq!(alive, [false, false, false, true]);
    }

    #[test]
    fn test_dead_opponent_each_side_duels_survivor() {
        // Seat 3 dead: seat 2 (paper) fights both seat 0 (rock, loses) and
        // seat 1 (scissors, wins). Seat 2 dies to the scissors; seat 0 dies
        // to the paper; seat 1 survives its only duel.
        let alive = resolve_round([true, true, true, false], [Rock, Scissors, Paper, Rock]);
        assert_eq!(alive, [false, true, false, false]);
    }

    #[test]
    fn test_sole_survivors_single_duel() {
        // Only seats 0 and 3 remain: one duel, loser eliminated.
        let alive = resolve_round([true, false, false, true], [Scissors, Rock, Rock, Rock]);
        assert_eq!(alive, [false, false, false, true]);
    }

    #[test]
    fn test_sole_survivors_tie_keeps_both() {
        let alive = resolve_round([false, true, true, false], [Rock, Paper, Paper, Rock]);
        assert_eq!(alive, [false, true, true, false]);
    }

    #[test]
    fn test_winner_or_tier_never_eliminated() {
        for alive in [
            [true, true, true, true],
            [false, true, true, true],
            [true, true, false, true],
            [true, false, false, true],
        ] {
            for m0 in ALL_MOVES {
                for m2 in ALL_MOVES {
                    let moves = [m0, Rock, m2, Rock];
                    let next = resolve_round(alive, moves);
                    for seat in 0..SEATS {
                        if !alive[seat] {
                            assert!(!next[seat], "dead seats stay dead");
                            continue;
                        }
                        let lost_any = (0..SEATS).any(|opp| {
                            !same_side(seat, opp)
                                && alive[opp]
                                && must_duel(seat, opp, &alive)
                                && beats(moves[seat], moves[opp]) < 0
                        });
                        assert_eq!(next[seat], !lost_any, "seat {seat} alive {alive:?} moves {moves:?}");
                    }
                }
            }
        }
    }
}
