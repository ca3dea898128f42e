use super::Card;

/// Iterate every `num_cards` sized combination of some cards.
///
/// Combinations come out in lexicographic order of their indices into
/// `possible_cards`, so for 7 cards the first hand is `[0, 1, 2, 3, 4]`
/// and the last is `[2, 3, 4, 5, 6]`.
#[derive(Debug)]
pub struct CardIter<'a> {
    // All the possible cards that can be chosen
    possible_cards: &'a [Card],

    // Set of current offsets being used to create card sets.
    idx: Vec<usize>,

    // size of card sets requested.
    num_cards: usize,

    // Set once the first combination has been handed out.
    started: bool,
}

impl<'a> CardIter<'a> {
    pub fn new(possible_cards: &'a [Card], num_cards: usize) -> Self {
        Self {
            possible_cards,
            idx: (0..num_cards).collect(),
            num_cards,
            started: false,
        }
    }

    fn advance(&mut self) -> bool {
        let n = self.possible_cards.len();
        // Find the right most index that can still move forward
        let mut level = self.num_cards;
        while level > 0 {
            level -= 1;
            // Each level has to leave room for the levels after it.
            if self.idx[level] < n - (self.num_cards - level) {
                self.idx[level] += 1;
                for after in level + 1..self.num_cards {
                    self.idx[after] = self.idx[after - 1] + 1;
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for CardIter<'_> {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Vec<Card>> {
        if self.num_cards == 0 || self.num_cards > self.possible_cards.len() {
            return None;
        }
        if self.started {
            if !self.advance() {
                // Park the iterator so that further calls stay None.
                self.num_cards = 0;
                return None;
            }
        } else {
            self.started = true;
        }

        Some(self.idx.iter().map(|i| self.possible_cards[*i]).collect())
    }
}
