//! Energy pool and the deck/discard/hand triad.
//!
//! A card slot lives in exactly one of {deck, discard, hand} at a time.
//! Draw and shuffle never create or destroy slots; playing a card moves
//! it hand → discard, and the wave-boundary rules (advisor hands,
//! decompile returns) are the only operations that change the number of
//! slots in circulation.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use coreguard_core::cards::{self, CardDef, STARTING_DECK};
use coreguard_core::constants::{HAND_CAPACITY, MAX_ENERGY, START_ENERGY};
use coreguard_core::errors::ActionError;

/// Player economy state: energy plus the three card collections.
pub struct Economy {
    energy: u32,
    deck: Vec<&'static CardDef>,
    discard: Vec<&'static CardDef>,
    hand: Vec<&'static CardDef>,
}

impl Economy {
    /// Build the starting deck, shuffle it, and draw the opening hand.
    pub fn new(rng: &mut ChaCha8Rng) -> Self {
        let mut deck: Vec<&'static CardDef> = STARTING_DECK
            .iter()
            .filter_map(|id| cards::card(id))
            .collect();
        deck.shuffle(rng);

        let mut economy = Self {
            energy: START_ENERGY,
            deck,
            discard: Vec::new(),
            hand: Vec::new(),
        };
        economy.refill_hand(rng);
        economy
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn hand(&self) -> &[&'static CardDef] {
        &self.hand
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Total card slots in circulation.
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.discard.len() + self.hand.len()
    }

    /// Deduct `cost` energy or reject without mutation.
    pub fn spend(&mut self, cost: u32) -> Result<(), ActionError> {
        if self.energy < cost {
            return Err(ActionError::InsufficientEnergy {
                needed: cost,
                available: self.energy,
            });
        }
        self.energy -= cost;
        Ok(())
    }

    /// Add energy, clamped to the cap. Returns the amount actually kept.
    pub fn gain(&mut self, amount: u32) -> u32 {
        let before = self.energy;
        self.energy = (self.energy + amount).min(MAX_ENERGY);
        self.energy - before
    }

    /// Draw one card, recycling the discard pile on deck exhaustion.
    fn draw_one(&mut self, rng: &mut ChaCha8Rng) -> Option<&'static CardDef> {
        if self.deck.is_empty() {
            if self.discard.is_empty() {
                return None;
            }
            self.deck.append(&mut self.discard);
            self.deck.shuffle(rng);
        }
        self.deck.pop()
    }

    /// Draw until the hand is full or no cards remain anywhere.
    pub fn refill_hand(&mut self, rng: &mut ChaCha8Rng) {
        while self.hand.len() < HAND_CAPACITY {
            match self.draw_one(rng) {
                Some(card) => self.hand.push(card),
                None => break,
            }
        }
    }

    /// Move the whole hand to the discard pile (wave boundary).
    pub fn discard_hand(&mut self) {
        self.discard.append(&mut self.hand);
    }

    /// Play the card at `index`: it moves hand → discard.
    /// Caller validates the index.
    pub fn play_from_hand(&mut self, index: usize) -> &'static CardDef {
        let card = self.hand.remove(index);
        self.discard.push(card);
        card
    }

    /// Return a card template to the hand if there is room.
    pub fn return_to_hand(&mut self, card: &'static CardDef) -> bool {
        if self.hand.len() < HAND_CAPACITY {
            self.hand.push(card);
            true
        } else {
            false
        }
    }

    /// Remove two hand cards and add their fusion result.
    /// Caller validates the pair; indices must differ.
    pub fn fuse(&mut self, first: usize, second: usize, result: &'static CardDef) {
        let (hi, lo) = if first > second {
            (first, second)
        } else {
            (second, first)
        };
        self.hand.remove(hi);
        self.hand.remove(lo);
        self.hand.push(result);
    }

    /// Replace the (empty) hand with advisor-suggested cards, topping up
    /// from the deck when fewer than a full hand arrive. Unrecognized
    /// ids fall back to the default card.
    pub fn set_hand_from_suggestions(&mut self, ids: &[String], rng: &mut ChaCha8Rng) {
        self.hand = ids
            .iter()
            .take(HAND_CAPACITY)
            .map(|id| cards::card(id).unwrap_or_else(cards::default_card))
            .collect();
        self.refill_hand(rng);
    }

    /// Inject a bonus card into the discard pile (redemption).
    pub fn inject_discard(&mut self, card: &'static CardDef) {
        self.discard.push(card);
    }

    #[cfg(test)]
    pub(crate) fn set_energy(&mut self, energy: u32) {
        self.energy = energy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn opening_hand_is_full() {
        let mut r = rng();
        let economy = Economy::new(&mut r);
        assert_eq!(economy.hand().len(), HAND_CAPACITY);
        assert_eq!(economy.energy(), START_ENERGY);
        assert_eq!(economy.total_cards(), STARTING_DECK.len());
    }

    #[test]
    fn draw_conserves_cards_across_reshuffle() {
        let mut r = rng();
        let mut economy = Economy::new(&mut r);
        let total = economy.total_cards();

        // Cycle the full deck several times through hand and discard.
        for _ in 0..10 {
            economy.discard_hand();
            economy.refill_hand(&mut r);
            assert!(economy.hand().len() <= HAND_CAPACITY);
            assert_eq!(economy.total_cards(), total);
        }
    }

    #[test]
    fn deck_exhaustion_recycles_discard() {
        let mut r = rng();
        let mut economy = Economy::new(&mut r);

        // Force exhaustion: everything not in hand goes to the discard pile.
        let drained: Vec<_> = economy.deck.drain(..).collect();
        economy.discard.extend(drained);
        economy.discard_hand();
        assert_eq!(economy.deck_len(), 0);
        assert_eq!(economy.hand().len(), 0);

        // Next refill must reshuffle the discard back in.
        economy.refill_hand(&mut r);
        assert_eq!(economy.hand().len(), HAND_CAPACITY);
        assert_eq!(economy.total_cards(), STARTING_DECK.len());
    }

    #[test]
    fn spend_rejects_without_mutation() {
        let mut r = rng();
        let mut economy = Economy::new(&mut r);
        let err = economy.spend(START_ENERGY + 1).unwrap_err();
        assert_eq!(
            err,
            ActionError::InsufficientEnergy {
                needed: START_ENERGY + 1,
                available: START_ENERGY,
            }
        );
        assert_eq!(economy.energy(), START_ENERGY);

        economy.spend(4).unwrap();
        assert_eq!(economy.energy(), START_ENERGY - 4);
    }

    #[test]
    fn gain_clamps_to_cap() {
        let mut r = rng();
        let mut economy = Economy::new(&mut r);
        let kept = economy.gain(MAX_ENERGY * 2);
        assert_eq!(economy.energy(), MAX_ENERGY);
        assert_eq!(kept, MAX_ENERGY - START_ENERGY);
        assert_eq!(economy.gain(5), 0);
    }

    #[test]
    fn suggestions_fall_back_to_default_card() {
        let mut r = rng();
        let mut economy = Economy::new(&mut r);
        economy.discard_hand();
        economy.set_hand_from_suggestions(
            &["lance_node".into(), "no_such_card".into()],
            &mut r,
        );
        assert_eq!(economy.hand().len(), HAND_CAPACITY);
        assert_eq!(economy.hand()[0].id, "lance_node");
        assert_eq!(economy.hand()[1].id, cards::DEFAULT_CARD_ID);
    }

    #[test]
    fn fuse_removes_pair_and_adds_result() {
        let mut r = rng();
        let mut economy = Economy::new(&mut r);
        economy.hand.clear();
        let pulse = cards::card("pulse_node").unwrap();
        let array = cards::card("pulse_array").unwrap();
        economy.hand.extend([pulse, pulse, array]);

        economy.fuse(0, 1, array);
        assert_eq!(economy.hand().len(), 2);
        assert!(economy.hand().iter().all(|c| c.id == "pulse_array"));
    }
}
