use std::io::Write;

use crate::arena::action::Action;

use super::{Historian, HistorianError};

/// Writes every action as one line of JSON.
pub struct JsonHistorian<W: Write> {
    writer: W,
}

impl<W: Write> JsonHistorian<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Historian for JsonHistorian<W> {
    fn record_action(&mut self, action: Action) -> Result<(), HistorianError> {
        serde_json::to_writer(&mut self.writer, &action)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{
        action::{DealStartingHandPayload, GameStartPayload},
        game_state::Round,
    };
    use crate::core::cards_from_str;

    #[test]
    fn test_writes_json_lines() {
        let mut hist = JsonHistorian::new(Vec::new());
        let cards = cards_from_str("AsKd").unwrap();

        hist.record_action(Action::GameStart(GameStartPayload {
            stacks: vec![100, 200],
            min_bet: 10,
            big_blind_idx: 0,
        }))
        .unwrap();
        hist.record_action(Action::DealStartingHand(DealStartingHandPayload {
            idx: 1,
            cards: [cards[0], cards[1]],
        }))
        .unwrap();
        hist.record_action(Action::RoundAdvance(Round::Flop)).unwrap();

        let out = String::from_utf8(hist.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(3, lines.len());
        assert!(lines[1].contains("\"As\""));
        assert!(lines[1].contains("\"Kd\""));

        let back: Action = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(Action::RoundAdvance(Round::Flop), back);
    }
}
