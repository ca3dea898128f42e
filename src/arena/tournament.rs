use rand::Rng;
use tracing::{Level, event, trace_span};

use super::{
    Agent, HoldemSimulationBuilder,
    errors::HoldemSimulationError,
    game_state::Seat,
    historian::Historian,
    sim_builder::build_seats,
};

/// This builder is used to create a `SingleTableTournament`.
pub struct SingleTableTournamentBuilder {
    agents: Option<Vec<Box<dyn Agent>>>,
    names: Option<Vec<String>>,
    starting_stacks: Option<Vec<u32>>,
    min_bet: u32,
    max_hands: usize,
    historians: Vec<Box<dyn Historian>>,
    panic_on_historian_error: bool,
}

/// A `SingleTableTournament` is a series of hands at one table with the
/// same bots. It keeps going until one bot has every chip or the hand
/// limit is reached.
///
/// The dealer button moves one live seat every hand and the big blind sits
/// one live seat after the dealer. A bot that runs out of chips is out and
/// gets the worst place still open.
pub struct SingleTableTournament {
    seats: Vec<Seat>,
    min_bet: u32,
    max_hands: usize,
    historians: Vec<Box<dyn Historian>>,
    panic_on_historian_error: bool,
}

/// How everyone finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentResults {
    /// Place for each seat, 1 is the winner.
    pub places: Vec<usize>,
    pub names: Vec<String>,
    pub stacks: Vec<u32>,
    pub hands_played: usize,
}

impl TournamentResults {
    pub fn winner(&self) -> Option<usize> {
        self.places.iter().position(|&place| place == 1)
    }
}

impl SingleTableTournamentBuilder {
    pub fn agents(mut self, agents: Vec<Box<dyn Agent>>) -> Self {
        self.agents = Some(agents);
        self
    }

    pub fn names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    pub fn starting_stacks(mut self, starting_stacks: Vec<u32>) -> Self {
        self.starting_stacks = Some(starting_stacks);
        self
    }

    pub fn min_bet(mut self, min_bet: u32) -> Self {
        self.min_bet = min_bet;
        self
    }

    /// Stop after this many hands even if more than one bot has chips.
    pub fn max_hands(mut self, max_hands: usize) -> Self {
        self.max_hands = max_hands;
        self
    }

    /// Historians that see every hand of the tournament.
    pub fn historians(mut self, historians: Vec<Box<dyn Historian>>) -> Self {
        self.historians = historians;
        self
    }

    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    pub fn build(self) -> Result<SingleTableTournament, HoldemSimulationError> {
        let seats = build_seats(self.agents, self.names, self.starting_stacks)?;
        if self.min_bet == 0 {
            return Err(HoldemSimulationError::ZeroMinimumBet);
        }
        if seats.iter().filter(|s| s.stack > 0).count() < 2 {
            return Err(HoldemSimulationError::NotEnoughPlayers);
        }
        Ok(SingleTableTournament {
            seats,
            min_bet: self.min_bet,
            max_hands: self.max_hands,
            historians: self.historians,
            panic_on_historian_error: self.panic_on_historian_error,
        })
    }
}

impl Default for SingleTableTournamentBuilder {
    fn default() -> Self {
        Self {
            agents: None,
            names: None,
            starting_stacks: None,
            min_bet: 10,
            max_hands: 10,
            historians: vec![],
            panic_on_historian_error: false,
        }
    }
}

impl SingleTableTournament {
    /// Run the tournament to completion.
    ///
    /// Places go from 1 to N. Bots that bust in the same hand are ordered
    /// by the stack they started that hand with. If the hand limit is hit
    /// first the survivors are placed by chip count.
    pub fn run<R: Rng>(self, rng: &mut R) -> Result<TournamentResults, HoldemSimulationError> {
        let span = trace_span!("SingleTableTournament::run");
        let _enter = span.enter();

        let SingleTableTournament {
            mut seats,
            min_bet,
            max_hands,
            mut historians,
            panic_on_historian_error,
        } = self;

        let num_seats = seats.len();
        let mut places = vec![0; num_seats];
        // The place handed to the next bot to bust.
        let mut place = num_seats;
        for (idx, seat) in seats.iter().enumerate() {
            if seat.stack == 0 {
                places[idx] = place;
                place -= 1;
            }
        }

        let mut dealer_idx = 0;
        let mut hands_played = 0;
        while hands_played < max_hands && live_seats(&seats) > 1 {
            let big_blind_idx = next_live(&seats, dealer_idx);
            let starting: Vec<u32> = seats.iter().map(|s| s.stack).collect();

            event!(
                Level::DEBUG,
                hand = hands_played + 1,
                dealer_idx,
                big_blind_idx,
                "hand_start"
            );

            let mut sim = HoldemSimulationBuilder::default()
                .seats(seats)
                .min_bet(min_bet)
                .big_blind_idx(big_blind_idx)
                .historians(historians)
                .panic_on_historian_error(panic_on_historian_error)
                .build()?;
            sim.run(rng)?;
            hands_played += 1;

            seats = std::mem::take(&mut sim.seats);
            historians = std::mem::take(&mut sim.historians);

            let mut busted: Vec<usize> = (0..num_seats)
                .filter(|&idx| starting[idx] > 0 && seats[idx].stack == 0)
                .collect();
            busted.sort_by_key(|&idx| starting[idx]);
            for idx in busted {
                event!(
                    Level::INFO,
                    idx,
                    name = %seats[idx].name,
                    place,
                    "agent_busted"
                );
                places[idx] = place;
                place -= 1;
            }

            dealer_idx = next_live(&seats, dealer_idx);
        }

        // Whoever is left is placed by chips, seat order breaking ties.
        let mut survivors: Vec<usize> = (0..num_seats).filter(|&idx| seats[idx].stack > 0).collect();
        survivors.sort_by(|a, b| seats[*b].stack.cmp(&seats[*a].stack).then(a.cmp(b)));
        for (i, &idx) in survivors.iter().enumerate() {
            places[idx] = i + 1;
        }

        let results = TournamentResults {
            places,
            names: seats.iter().map(|s| s.name.clone()).collect(),
            stacks: seats.iter().map(|s| s.stack).collect(),
            hands_played,
        };

        for (idx, seat) in seats.iter().enumerate() {
            event!(
                Level::INFO,
                idx,
                name = %seat.name,
                stack = seat.stack,
                place = results.places[idx],
                "final_standing"
            );
        }
        if let Some(winner) = results.winner() {
            event!(
                Level::INFO,
                idx = winner,
                name = %results.names[winner],
                hands_played,
                "tournament_winner"
            );
        }
        Ok(results)
    }
}

fn live_seats(seats: &[Seat]) -> usize {
    seats.iter().filter(|s| s.stack > 0).count()
}

/// The first seat after `idx` that still has chips.
fn next_live(seats: &[Seat], idx: usize) -> usize {
    let n = seats.len();
    (1..=n)
        .map(|k| (idx + k) % n)
        .find(|&i| seats[i].stack > 0)
        .unwrap_or(idx)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::arena::{
        action::Action,
        agent::{AggressiveAgent, AllInAgent, CallingAgent, ConservativeAgent, FoldingAgent, RandomAgent},
        historian::{FnHistorian, VecHistorian},
    };

    #[test_log::test]
    fn test_all_in() {
        let mut rng = StdRng::seed_from_u64(420);
        let agents: Vec<Box<dyn Agent>> = (0..4)
            .map(|_| Box::new(AllInAgent) as Box<dyn Agent>)
            .collect();
        let tournament = SingleTableTournamentBuilder::default()
            .agents(agents)
            .starting_stacks(vec![50; 4])
            .max_hands(1_000)
            .build()
            .unwrap();

        let results = tournament.run(&mut rng).unwrap();

        let mut sorted = results.places.clone();
        sorted.sort();
        assert_eq!(vec![1, 2, 3, 4], sorted);

        let winner = results.winner().unwrap();
        assert_eq!(200, results.stacks[winner]);
        assert_eq!(200, results.stacks.iter().sum::<u32>());
    }

    #[test_log::test]
    fn test_stops_at_max_hands() {
        let mut rng = StdRng::seed_from_u64(1);
        let tournament = SingleTableTournamentBuilder::default()
            .agents(vec![
                Box::new(FoldingAgent),
                Box::new(FoldingAgent),
                Box::new(FoldingAgent),
            ])
            .starting_stacks(vec![1_000; 3])
            .build()
            .unwrap();

        let results = tournament.run(&mut rng).unwrap();

        assert_eq!(10, results.hands_played);
        assert_eq!(3_000, results.stacks.iter().sum::<u32>());
        let mut sorted = results.places.clone();
        sorted.sort();
        assert_eq!(vec![1, 2, 3], sorted);
        // Places follow chip counts.
        let winner = results.winner().unwrap();
        assert_eq!(results.stacks.iter().max(), Some(&results.stacks[winner]));
    }

    #[test_log::test]
    fn test_dealer_rotates() {
        let mut rng = StdRng::seed_from_u64(2);
        let records = VecHistorian::new_storage();
        let tournament = SingleTableTournamentBuilder::default()
            .agents(vec![
                Box::new(CallingAgent),
                Box::new(CallingAgent),
                Box::new(CallingAgent),
            ])
            .starting_stacks(vec![10_000; 3])
            .max_hands(4)
            .historians(vec![Box::new(VecHistorian::new(records.clone()))])
            .build()
            .unwrap();

        tournament.run(&mut rng).unwrap();

        let big_blinds: Vec<usize> = records
            .borrow()
            .iter()
            .filter_map(|a| match a {
                Action::GameStart(start) => Some(start.big_blind_idx),
                _ => None,
            })
            .collect();
        assert_eq!(vec![1, 2, 0, 1], big_blinds);
    }

    #[test_log::test]
    fn test_mixed_bots_keep_chips() {
        let mut rng = StdRng::seed_from_u64(77);
        let totals = std::rc::Rc::new(std::cell::RefCell::new(vec![]));
        let hist_totals = totals.clone();
        let historian = FnHistorian::new(move |action| {
            if let Action::GameStart(start) = action {
                hist_totals.borrow_mut().push(start.stacks.iter().sum::<u32>());
            }
            Ok(())
        });

        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(AggressiveAgent),
            Box::new(ConservativeAgent::new(0.9, 0.6, 50, StdRng::seed_from_u64(1))),
            Box::new(AllInAgent),
            Box::new(RandomAgent::with_seed(2)),
        ];
        let results = SingleTableTournamentBuilder::default()
            .agents(agents)
            .starting_stacks(vec![200; 4])
            .max_hands(50)
            .historians(vec![Box::new(historian)])
            .build()
            .unwrap()
            .run(&mut rng)
            .unwrap();

        assert_eq!(800, results.stacks.iter().sum::<u32>());
        assert!(!totals.borrow().is_empty());
        assert!(totals.borrow().iter().all(|&total| total == 800));
        assert_eq!(results.hands_played, totals.borrow().len());
        let mut sorted = results.places.clone();
        sorted.sort();
        assert_eq!(vec![1, 2, 3, 4], sorted);
    }

    #[test]
    fn test_builder_errors() {
        assert_eq!(
            Some(HoldemSimulationError::NeedAgents),
            SingleTableTournamentBuilder::default()
                .starting_stacks(vec![100; 2])
                .build()
                .err()
        );
        assert_eq!(
            Some(HoldemSimulationError::NotEnoughPlayers),
            SingleTableTournamentBuilder::default()
                .agents(vec![Box::new(CallingAgent), Box::new(CallingAgent)])
                .starting_stacks(vec![100, 0])
                .build()
                .err()
        );
        assert_eq!(
            Some(HoldemSimulationError::TooManyPlayers {
                players: 24,
                max: 23
            }),
            SingleTableTournamentBuilder::default()
                .agents((0..24).map(|_| Box::new(CallingAgent) as Box<dyn Agent>).collect())
                .starting_stacks(vec![100; 24])
                .build()
                .err()
        );
    }
}
