use crate::player::Player;

/// One contested slice of the pot: a chip `amount` and the seats still
/// eligible to win it. Layers are built from distinct all-in levels among
/// non-mucked players, so a player who went all-in for less than the table
/// only contests the layers up to their own commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotLayer {
    pub amount: u32,
    pub contestants: Vec<usize>,
}

/// Partition every player's `committed` chips (folded players' money stays
/// in the pot, they just aren't contestants) into layers. Antes are posted
/// through [`Player::commit`] just like blinds, so they're already folded
/// into `committed` by the time this runs, so a player who can only afford
/// the ante still gets a proportional share of whichever layer their ante
/// bought into. Used both by the final resolver and, early, by the showdown
/// stage to determine who still has a pot share to contest (the "muck law").
#[must_use]
pub fn build_layers(players: &[Player]) -> Vec<PotLayer> {
    let mut levels: Vec<u32> = players
        .iter()
        .filter(|p| !p.mucked)
        .map(|p| p.committed)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut layers = Vec::new();
    let mut lo = 0u32;
    for hi in levels {
        if hi == lo {
            continue;
        }
        let amount: u32 = players
            .iter()
            .map(|p| p.committed.min(hi) - p.committed.min(lo))
            .sum();
        let contestants: Vec<usize> = players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.mucked && p.committed >= hi)
            .map(|(i, _)| i)
            .collect();
        if amount > 0 {
            layers.push(PotLayer { amount, contestants });
        }
        lo = hi;
    }

    layers
}

/// Split `amount` evenly across `winners`, giving any odd remainder to the
/// first of `winners` seated left of `button_idx`.
#[must_use]
pub fn split_with_odd_chip(amount: u32, winners: &[usize], num_seats: usize, button_idx: usize) -> Vec<(usize, u32)> {
    debug_assert!(!winners.is_empty());
    let share = amount / winners.len() as u32;
    let remainder = amount % winners.len() as u32;

    let mut awards: Vec<(usize, u32)> = winners.iter().map(|&w| (w, share)).collect();
    if remainder > 0 {
        let first_left_of_button = (1..=num_seats)
            .map(|offset| (button_idx + offset) % num_seats)
            .find(|seat| winners.contains(seat))
            .expect("winners is non-empty so some seat is left of the button");
        if let Some(entry) = awards.iter_mut().find(|(seat, _)| *seat == first_left_of_button) {
            entry.1 += remainder;
        }
    }
    awards
}
