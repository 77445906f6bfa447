use isolation_core::{GameState, Player};

/// Scores a position for `player`; higher is better.
///
/// Let `own` be the liberties of `player`'s token and `opp` those of the
/// opponent's. When the two sets overlap, the score is the number of
/// contested cells: moving onto a contested cell removes an option from
/// the opponent, so positions that keep that threat alive are preferred
/// over raw mobility. With no overlap the score falls back to the size of
/// the player's own reachable set.
///
/// The score is a plain liberty count: non-negative and finite for every
/// state, with no lookahead and no mobility differential. Ties between
/// equally scored positions are the caller's to break. Terminal win/loss
/// values never come from here; the search takes those from the state's
/// utility directly.
pub fn liberty_steal_score(state: &GameState, player: Player) -> i32 {
    let own = state.liberty_set(state.location(player));
    let opp = state.liberty_set(state.location(player.opponent()));

    let shared = own.intersection(opp);
    // own - (opp - own); equivalent to own.
    let reachable = own.difference(opp.difference(own));

    if !shared.is_empty() {
        shared.count() as i32
    } else {
        reachable.count() as i32
    }
}
