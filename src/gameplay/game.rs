use super::action::Action;
use super::seat::Seat;
use super::seat::State;
use super::settlement::Settlement;
use super::showdown::Showdown;
use crate::Chips;
use crate::cards::board::Board;
use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::street::Street;
use crate::cards::strength::Strength;
use crate::error::Error;
use crate::error::Result;
use rand::Rng;
use rand::seq::SliceRandom;

/// one line of the action history
#[derive(Debug, Clone, serde::Serialize)]
pub struct Record {
    pub street: Street,
    pub id: String,
    pub action: Action,
}

/// the authoritative state of one hand in progress.
///
/// owns the seats, the board, and the remaining deck. its immutable
/// methods are the rules of the game: which actions are legal, for
/// whom, for how much. its one mutating entry point is [`Self::execute`],
/// which validates before it touches anything, so a rejected action
/// leaves the state byte-identical. street transitions happen only
/// in the internal advance step; the outside world never moves the
/// dealer's button or burns a card on its own.
#[derive(Debug, Clone)]
pub struct Game {
    seats: Vec<Seat>,
    board: Board,
    deck: Deck,
    pot: Chips,
    street: Street,
    dealer: usize,
    actor: Option<usize>,
    sblind: Chips,
    bblind: Chips,
    history: Vec<Record>,
    result: Option<Vec<Settlement>>,
}

impl Game {
    /// seat the players, shuffle, post blinds, deal hole cards,
    /// and hand the action to the first preflop actor.
    pub fn new(
        mut seats: Vec<Seat>,
        (sblind, bblind): (Chips, Chips),
        rng: &mut impl Rng,
    ) -> Result<Self> {
        Self::validate_table(&seats, sblind, bblind)?;
        for (i, seat) in seats.iter_mut().enumerate() {
            seat.set_position(i);
        }
        let mut deck = Deck::shuffled(rng);
        for seat in seats.iter_mut() {
            let cards = deck.hole();
            seat.set_cards(cards);
        }
        let dealer = seats.iter().position(|s| s.is_dealer()).expect("validated");
        let mut game = Self {
            seats,
            deck,
            dealer,
            board: Board::empty(),
            pot: 0,
            street: Street::Pref,
            actor: None,
            sblind,
            bblind,
            history: Vec::new(),
            result: None,
        };
        game.post(|s| s.is_sblind(), sblind);
        game.post(|s| s.is_bblind(), bblind);
        game.actor = Some(game.first_preflop());
        debug_assert!(game.balanced());
        Ok(game)
    }

    /// convenience constructor: seat 0 takes the button, blinds follow.
    /// heads-up, the button posts the small blind.
    pub fn table(
        ids: &[&str],
        stack: Chips,
        blinds: (Chips, Chips),
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let n = ids.len();
        let seats = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let seat = Seat::new(*id, stack);
                let seat = if i == 0 { seat.with_dealer() } else { seat };
                match (n, i) {
                    (2, 0) => seat.with_sblind(),
                    (2, 1) => seat.with_bblind(),
                    (_, 1) => seat.with_sblind(),
                    (_, 2) => seat.with_bblind(),
                    _ => seat,
                }
            })
            .collect();
        Self::new(seats, blinds, rng)
    }

    //

    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn board(&self) -> Board {
        self.board
    }
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    pub fn blinds(&self) -> (Chips, Chips) {
        (self.sblind, self.bblind)
    }
    pub fn bblind(&self) -> Chips {
        self.bblind
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn history(&self) -> &[Record] {
        &self.history
    }
    pub fn over(&self) -> bool {
        self.actor.is_none()
    }
    /// the hand's final accounting, present once the hand is over
    pub fn result(&self) -> Option<&[Settlement]> {
        self.result.as_deref()
    }
    /// id of the player whose turn it is, empty once the hand ends
    pub fn action_on(&self) -> &str {
        self.actor
            .map(|i| self.seats[i].id())
            .unwrap_or("")
    }
    pub fn actor_index(&self) -> Option<usize> {
        self.actor
    }
    pub fn seat_index(&self, id: &str) -> Result<usize> {
        self.seats
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| Error::UnknownPlayer(id.to_string()))
    }
    pub fn seat(&self, id: &str) -> Result<&Seat> {
        self.seat_index(id).map(|i| &self.seats[i])
    }

    /// the street's high-water commitment
    pub fn current_bet(&self) -> Chips {
        self.seats.iter().map(|s| s.stake()).max().unwrap_or(0)
    }
    /// chips a seat owes to continue
    pub fn to_call(&self, i: usize) -> Chips {
        self.current_bet() - self.seats[i].stake()
    }
    /// minimum legal bet target when the pot is unopened
    pub fn min_bet_to(&self) -> Chips {
        self.bblind
    }
    /// minimum legal raise target, full shoves excepted
    pub fn min_raise_to(&self) -> Chips {
        self.current_bet() * 2
    }
    /// the second-largest live commitment capacity, in chips
    pub fn effective_stack(&self) -> Chips {
        let mut totals = self
            .seats
            .iter()
            .filter(|s| s.state() != State::Folding)
            .map(|s| s.stack() + s.stake())
            .collect::<Vec<Chips>>();
        totals.sort_unstable();
        totals.pop();
        totals.pop().unwrap_or(0)
    }

    //

    /// the legal actions for a player, with representative amounts:
    /// calls carry the chips owed, bets and raises their minimum
    /// target. a seat that is not up to act gets an empty set.
    pub fn legal(&self, id: &str) -> Result<Vec<Action>> {
        let i = self.seat_index(id)?;
        if self.over() {
            return Err(Error::HandEnded);
        }
        if Some(i) != self.actor {
            return Ok(Vec::new());
        }
        let seat = &self.seats[i];
        let stack = seat.stack();
        let stake = seat.stake();
        let to_call = self.to_call(i);
        let mut options = Vec::new();
        if to_call == 0 {
            options.push(Action::Check);
            if self.current_bet() == 0 && stack > 0 {
                options.push(Action::Bet(self.min_bet_to().min(stake + stack)));
            }
            if self.current_bet() > 0 && stake + stack >= self.min_raise_to() {
                options.push(Action::Raise(self.min_raise_to()));
            }
        } else {
            options.push(Action::Fold);
            options.push(Action::Call(to_call.min(stack)));
            if stack > to_call && stake + stack >= self.min_raise_to() {
                options.push(Action::Raise(self.min_raise_to()));
            }
        }
        if stack > 0 {
            options.push(Action::Shove(stake + stack));
        }
        Ok(options)
    }

    /// validate and apply one action, then move the hand along.
    /// errors leave the state unchanged.
    pub fn execute(&mut self, id: &str, action: Action) -> Result<()> {
        let i = self.seat_index(id)?;
        if self.over() {
            return Err(Error::HandEnded);
        }
        if Some(i) != self.actor {
            return Err(Error::IllegalAction(format!(
                "action is on {}, not {}",
                self.action_on(),
                id
            )));
        }
        let action = self.normalize(i, action)?;
        self.apply(i, action);
        self.advance();
        debug_assert!(self.balanced());
        Ok(())
    }

    /// resolve amounts and reject anything outside the rules.
    /// bet and raise targets are the actor's TOTAL street commitment.
    fn normalize(&self, i: usize, action: Action) -> Result<Action> {
        let seat = &self.seats[i];
        let stack = seat.stack();
        let stake = seat.stake();
        let all_in = stake + stack;
        let to_call = self.to_call(i);
        match action {
            Action::Blind(_) => Err(Error::IllegalAction("blinds post themselves".into())),
            Action::Check if to_call != 0 => {
                Err(Error::IllegalAction("cannot check facing a bet".into()))
            }
            Action::Check => Ok(Action::Check),
            Action::Fold if to_call == 0 => {
                Err(Error::IllegalAction("nothing to fold to".into()))
            }
            Action::Fold => Ok(Action::Fold),
            Action::Call(_) if to_call == 0 => {
                Err(Error::IllegalAction("nothing to call".into()))
            }
            Action::Call(_) => Ok(Action::Call(to_call.min(stack))),
            Action::Shove(_) if stack == 0 => {
                Err(Error::IllegalAction("no chips behind".into()))
            }
            Action::Shove(_) => Ok(Action::Shove(all_in)),
            Action::Bet(_) if self.current_bet() != 0 => {
                Err(Error::IllegalAction("pot is open, raise instead".into()))
            }
            Action::Bet(to) if to > all_in => {
                Err(Error::IllegalAction(format!("bet {} exceeds stack", to)))
            }
            Action::Bet(to) if to < self.min_bet_to() && to != all_in => Err(
                Error::IllegalAction(format!("bet {} below minimum {}", to, self.min_bet_to())),
            ),
            Action::Bet(to) => Ok(Action::Bet(to)),
            Action::Raise(_) if self.current_bet() == 0 => {
                Err(Error::IllegalAction("nothing to raise, bet instead".into()))
            }
            Action::Raise(_) if stack <= to_call => {
                Err(Error::IllegalAction("too short to raise, shove instead".into()))
            }
            Action::Raise(to) if to > all_in => {
                Err(Error::IllegalAction(format!("raise {} exceeds stack", to)))
            }
            Action::Raise(to) if to <= self.current_bet() => Err(Error::IllegalAction(format!(
                "raise {} does not exceed the bet {}",
                to,
                self.current_bet()
            ))),
            // a sub-minimum raise is legal only as a full shove
            Action::Raise(to) if to < self.min_raise_to() && to != all_in => {
                Err(Error::IllegalAction(format!(
                    "raise {} below minimum {}",
                    to,
                    self.min_raise_to()
                )))
            }
            Action::Raise(to) => Ok(Action::Raise(to)),
        }
    }

    fn apply(&mut self, i: usize, action: Action) {
        let street = self.street;
        let id = self.seats[i].id().to_string();
        match action {
            Action::Check => {}
            Action::Fold => self.seats[i].fold(),
            Action::Call(chips) => self.commit(i, chips),
            Action::Shove(to) | Action::Bet(to) | Action::Raise(to) => {
                let delta = to - self.seats[i].stake();
                self.commit(i, delta);
            }
            Action::Blind(_) => unreachable!("blinds post in the constructor"),
        }
        self.seats[i].touch();
        self.history.push(Record { street, id, action });
    }

    fn commit(&mut self, i: usize, chips: Chips) {
        self.seats[i].bet(chips);
        self.pot += chips;
    }

    fn post(&mut self, which: impl Fn(&Seat) -> bool, blind: Chips) {
        let i = self
            .seats
            .iter()
            .position(|s| which(s))
            .expect("validated flags");
        let chips = blind.min(self.seats[i].stack());
        self.commit(i, chips);
        self.history.push(Record {
            street: Street::Pref,
            id: self.seats[i].id().to_string(),
            action: Action::Blind(chips),
        });
    }

    //

    /// move the hand along after an action:
    /// last player standing takes the pot; a completed round either
    /// runs out the board (betting exhausted), goes to showdown
    /// (river), or deals the next street; otherwise the action moves
    /// to the next player who owes a decision.
    fn advance(&mut self) {
        if self.live_count() == 1 {
            return self.end();
        }
        if self.round_complete() {
            if self.betting_count() <= 1 {
                return self.runout();
            }
            match self.street {
                Street::Rive => self.end(),
                _ => self.next_street(),
            }
        } else {
            self.actor = self.next_actor();
        }
    }

    /// a betting round is complete when every player still making
    /// decisions has matched the bet and acted this street. posting
    /// a blind is not acting, which is exactly the big blind option:
    /// an unraised preflop pot still owes the big blind a decision.
    fn round_complete(&self) -> bool {
        let bet = self.current_bet();
        self.seats
            .iter()
            .filter(|s| s.state() == State::Betting)
            .all(|s| s.acted() && s.stake() == bet)
    }

    fn next_actor(&self) -> Option<usize> {
        let bet = self.current_bet();
        let from = self.actor.expect("hand in progress");
        let n = self.seats.len();
        (1..=n)
            .map(|k| (from + k) % n)
            .find(|&i| {
                let s = &self.seats[i];
                s.state() == State::Betting && (!s.acted() || s.stake() < bet)
            })
    }

    fn next_street(&mut self) {
        for seat in self.seats.iter_mut() {
            seat.next_street();
        }
        self.street = self.street.next();
        self.board.add(self.deck.reveal(self.street));
        self.actor = self.first_betting_after(self.dealer);
        log::debug!("dealt {}: {}", self.street, self.board);
    }

    /// betting is exhausted: deal the rest of the board, then settle
    fn runout(&mut self) {
        while self.street < Street::Rive {
            self.street = self.street.next();
            self.board.add(self.deck.reveal(self.street));
        }
        self.end();
    }

    fn end(&mut self) {
        if self.live_count() >= 2 {
            self.street = Street::Show;
        }
        let entries = self
            .seats
            .iter()
            .map(|s| Settlement::from((s.spent(), s.state(), self.strength(s))))
            .collect::<Vec<Settlement>>();
        let settled = Showdown::from((entries, self.dealer)).settle();
        for (seat, settlement) in self.seats.iter_mut().zip(settled.iter()) {
            seat.win(settlement.reward);
        }
        self.pot = 0;
        self.actor = None;
        self.result = Some(settled);
        log::debug!("hand over: {}", self.board);
    }

    fn strength(&self, seat: &Seat) -> Option<Strength> {
        if seat.state() == State::Folding || self.live_count() < 2 || self.board.size() < 5 {
            return None;
        }
        let hole = seat.cards().expect("cards dealt at seating");
        Some(Strength::from(Hand::add(
            Hand::from(hole),
            Hand::from(self.board),
        )))
    }

    //

    fn live_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.state() != State::Folding)
            .count()
    }
    fn betting_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.state() == State::Betting)
            .count()
    }
    /// preflop the first decision sits after the big blind,
    /// which heads-up wraps around to the button
    fn first_preflop(&self) -> usize {
        let bb = self
            .seats
            .iter()
            .position(|s| s.is_bblind())
            .expect("validated flags");
        self.first_betting_after(bb).expect("fresh hands have actors")
    }
    fn first_betting_after(&self, from: usize) -> Option<usize> {
        let n = self.seats.len();
        (1..=n)
            .map(|k| (from + k) % n)
            .find(|&i| self.seats[i].state() == State::Betting)
    }

    fn balanced(&self) -> bool {
        self.over() || self.pot == self.seats.iter().map(|s| s.spent()).sum::<Chips>()
    }

    fn validate_table(seats: &[Seat], sblind: Chips, bblind: Chips) -> Result<()> {
        if !(2..=9).contains(&seats.len()) {
            return Err(Error::InvalidState("2 to 9 players".into()));
        }
        if sblind <= 0 || bblind < sblind {
            return Err(Error::InvalidState("blinds must be 0 < sb <= bb".into()));
        }
        if seats.iter().any(|s| s.stack() <= 0) {
            return Err(Error::InvalidState("stacks must be positive".into()));
        }
        for (i, a) in seats.iter().enumerate() {
            if seats.iter().skip(i + 1).any(|b| a.id() == b.id()) {
                return Err(Error::InvalidState(format!("duplicate id {}", a.id())));
            }
        }
        let dealers = seats.iter().filter(|s| s.is_dealer()).count();
        let sblinds = seats.iter().filter(|s| s.is_sblind()).count();
        let bblinds = seats.iter().filter(|s| s.is_bblind()).count();
        if dealers != 1 || sblinds != 1 || bblinds != 1 {
            return Err(Error::InvalidState(
                "exactly one dealer, small blind, and big blind".into(),
            ));
        }
        let hu = seats.len() == 2;
        let stacked = seats.iter().any(|s| s.is_dealer() && s.is_sblind());
        if hu != stacked {
            return Err(Error::InvalidState(if hu {
                "heads-up, the dealer posts the small blind".into()
            } else {
                "dealer and small blind must be different seats".into()
            }));
        }
        Ok(())
    }

    //

    /// swap every live opponent's hole cards for a uniform draw from
    /// the cards the hero cannot see. solver support for sampling
    /// hidden information; the real table never calls this.
    pub fn determinize(&mut self, hero: usize, rng: &mut impl Rng) {
        let mut pool: Vec<Card> = Hand::from(self.deck.clone()).into();
        for (i, seat) in self.seats.iter().enumerate() {
            if i != hero && seat.state() != State::Folding {
                let hole = seat.cards().expect("cards dealt at seating");
                pool.push(hole.hi());
                pool.push(hole.lo());
            }
        }
        pool.shuffle(rng);
        for i in 0..self.seats.len() {
            if i != hero && self.seats[i].state() != State::Folding {
                let a = pool.pop().expect("pool covers live seats");
                let b = pool.pop().expect("pool covers live seats");
                self.seats[i].set_cards(Hole::from((a, b)));
            }
        }
        // the leftover pool stays shuffled so future reveals stay random
        self.deck = Deck::from(pool);
    }

    /// sample one concrete showdown from the hero's point of view:
    /// opponents' cards and the rest of the board drawn from a fresh
    /// shuffled pool of everything the hero cannot see. returns the
    /// hero's pot share in that world: win 1, chop a half, lose 0.
    pub fn sample_showdown(&self, hero: usize, rng: &mut impl Rng) -> crate::Equity {
        let mut world = self.clone();
        world.determinize(hero, rng);
        let mut board = Hand::from(world.board);
        while board.size() < 5 {
            let card = world.deck.draw().expect("deck covers the board");
            board = Hand::add(board, Hand::from(card));
        }
        let strength = |seat: &Seat| {
            let hole = seat.cards().expect("cards dealt at seating");
            Strength::from(Hand::add(Hand::from(hole), board))
        };
        let ours = strength(&world.seats[hero]);
        let best = world
            .seats
            .iter()
            .enumerate()
            .filter(|(i, s)| *i != hero && s.state() != State::Folding)
            .map(|(_, s)| strength(s))
            .max();
        match best {
            None => 1.0,
            Some(theirs) => match ours.cmp(&theirs) {
                std::cmp::Ordering::Greater => 1.0,
                std::cmp::Ordering::Equal => 0.5,
                std::cmp::Ordering::Less => 0.0,
            },
        }
    }

    /// a read-only, serializable snapshot for the outside world.
    /// opponents' hole cards stay hidden until showdown.
    pub fn view(&self) -> View {
        View {
            street: self.street,
            pot: self.pot,
            current_bet: self.current_bet(),
            action_on: self.actor.map(|i| self.seats[i].id().to_string()),
            board: self.board.cards(),
            players: self
                .seats
                .iter()
                .map(|s| PlayerView {
                    id: s.id().to_string(),
                    stack: s.stack(),
                    stake: s.stake(),
                    spent: s.spent(),
                    folded: s.state() == State::Folding,
                    all_in: s.state() == State::Shoving,
                    cards: s
                        .cards()
                        .filter(|_| {
                            s.is_hero()
                                || (self.street == Street::Show
                                    && s.state() != State::Folding)
                        })
                        .map(|c| c.to_string()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct View {
    pub street: Street,
    pub pot: Chips,
    pub current_bet: Chips,
    pub action_on: Option<String>,
    pub board: Vec<Card>,
    pub players: Vec<PlayerView>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PlayerView {
    pub id: String,
    pub stack: Chips,
    pub stake: Chips,
    pub spent: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub cards: Option<String>,
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{} pot {} board {}", self.street, self.pot, self.board)?;
        for seat in &self.seats {
            writeln!(f, "  {}", seat)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(2024)
    }

    fn three_handed() -> Game {
        // blinds 1/2 to keep chips integral; btn, sb, bb seat order
        Game::table(&["btn", "sb", "bb"], 200, (1, 2), &mut rng()).unwrap()
    }

    #[test]
    fn blinds_post_and_action_opens_on_the_button() {
        let game = three_handed();
        assert_eq!(game.pot(), 3);
        assert_eq!(game.current_bet(), 2);
        // 3-handed, first preflop decision is the dealer's
        assert_eq!(game.action_on(), "btn");
    }

    #[test]
    fn pot_matches_total_invested() {
        let mut game = three_handed();
        game.execute("btn", Action::Call(2)).unwrap();
        game.execute("sb", Action::Call(1)).unwrap();
        assert_eq!(
            game.pot(),
            game.seats().iter().map(|s| s.spent()).sum::<Chips>()
        );
    }

    #[test]
    fn history_grows_by_one_per_action() {
        let mut game = three_handed();
        let n = game.history().len();
        game.execute("btn", Action::Call(2)).unwrap();
        assert_eq!(game.history().len(), n + 1);
    }

    #[test]
    fn bb_option_in_a_limped_pot() {
        let mut game = three_handed();
        game.execute("btn", Action::Call(2)).unwrap();
        game.execute("sb", Action::Call(1)).unwrap();
        // the street must NOT advance: the big blind retains the option
        assert_eq!(game.street(), Street::Pref);
        assert_eq!(game.action_on(), "bb");
        let legal = game.legal("bb").unwrap();
        assert!(legal.contains(&Action::Check));
        assert!(legal.iter().any(|a| matches!(a, Action::Raise(_))));
        assert!(!legal.contains(&Action::Fold));
    }

    #[test]
    fn bb_check_closes_the_round() {
        let mut game = three_handed();
        game.execute("btn", Action::Call(2)).unwrap();
        game.execute("sb", Action::Call(1)).unwrap();
        game.execute("bb", Action::Check).unwrap();
        assert_eq!(game.street(), Street::Flop);
        assert_eq!(game.board().size(), 3);
        // postflop the small blind acts first
        assert_eq!(game.action_on(), "sb");
    }

    #[test]
    fn bb_raise_reopens_the_action() {
        let mut game = three_handed();
        game.execute("btn", Action::Call(2)).unwrap();
        game.execute("sb", Action::Call(1)).unwrap();
        game.execute("bb", Action::Raise(8)).unwrap();
        assert_eq!(game.street(), Street::Pref);
        assert_eq!(game.action_on(), "btn");
        assert_eq!(game.to_call(0), 6);
    }

    #[test]
    fn min_raise_is_twice_the_bet() {
        let mut game = three_handed();
        let below = game.execute("btn", Action::Raise(3));
        assert!(matches!(below, Err(Error::IllegalAction(_))));
        assert_eq!(game.action_on(), "btn"); // state untouched
        game.execute("btn", Action::Raise(4)).unwrap();
        assert_eq!(game.current_bet(), 4);
    }

    #[test]
    fn sub_minimum_raise_legal_only_all_in() {
        let seats = vec![
            Seat::new("btn", 3).with_dealer(),
            Seat::new("sb", 200).with_sblind(),
            Seat::new("bb", 200).with_bblind(),
        ];
        let mut game = Game::new(seats, (1, 2), &mut rng()).unwrap();
        // min raise is 4, but a raise to 3 commits the whole stack
        game.execute("btn", Action::Raise(3)).unwrap();
        assert_eq!(game.seats()[0].state(), State::Shoving);
    }

    #[test]
    fn full_stack_raise_goes_all_in() {
        let seats = vec![
            Seat::new("btn", 10).with_dealer(),
            Seat::new("sb", 200).with_sblind(),
            Seat::new("bb", 200).with_bblind(),
        ];
        let mut game = Game::new(seats, (1, 2), &mut rng()).unwrap();
        game.execute("btn", Action::Raise(10)).unwrap();
        assert_eq!(game.seats()[0].state(), State::Shoving);
        assert_eq!(game.seats()[0].stack(), 0);
    }

    #[test]
    fn out_of_turn_is_rejected() {
        let mut game = three_handed();
        let err = game.execute("sb", Action::Call(1));
        assert!(matches!(err, Err(Error::IllegalAction(_))));
    }

    #[test]
    fn unknown_player_is_rejected() {
        let mut game = three_handed();
        let err = game.execute("ghost", Action::Fold);
        assert!(matches!(err, Err(Error::UnknownPlayer(_))));
    }

    #[test]
    fn folds_end_the_hand() {
        let mut game = three_handed();
        game.execute("btn", Action::Fold).unwrap();
        game.execute("sb", Action::Fold).unwrap();
        assert!(game.over());
        assert_eq!(game.action_on(), "");
        // bb wins the blinds without a showdown
        assert_eq!(game.seats()[2].stack(), 201);
        let err = game.execute("bb", Action::Check);
        assert!(matches!(err, Err(Error::HandEnded)));
    }

    #[test]
    fn all_in_runs_out_the_board() {
        let mut game = three_handed();
        game.execute("btn", Action::Shove(0)).unwrap();
        game.execute("sb", Action::Fold).unwrap();
        game.execute("bb", Action::Call(0)).unwrap();
        assert!(game.over());
        assert_eq!(game.board().size(), 5);
        assert_eq!(game.street(), Street::Show);
        let total: Chips = game.seats().iter().map(|s| s.stack()).sum();
        assert_eq!(total, 600); // chips conserved, sb's blind is dead money
    }

    #[test]
    fn chips_are_conserved() {
        let mut game = three_handed();
        game.execute("btn", Action::Raise(6)).unwrap();
        game.execute("sb", Action::Call(5)).unwrap();
        game.execute("bb", Action::Call(4)).unwrap();
        while !game.over() {
            let id = game.action_on().to_string();
            let legal = game.legal(&id).unwrap();
            let action = legal
                .iter()
                .find(|a| matches!(a, Action::Check | Action::Call(_)))
                .copied()
                .unwrap_or(legal[0]);
            game.execute(&id, action).unwrap();
        }
        let total: Chips = game.seats().iter().map(|s| s.stack()).sum();
        assert_eq!(total, 600);
    }

    #[test]
    fn no_duplicate_cards_across_the_table() {
        let game = three_handed();
        let mut seen = Hand::from(game.board());
        for seat in game.seats() {
            let hole = Hand::from(seat.cards().unwrap());
            assert!(!seen.intersects(hole));
            seen = Hand::add(seen, hole);
        }
    }

    #[test]
    fn short_call_is_capped_at_the_stack() {
        let seats = vec![
            Seat::new("btn", 200).with_dealer(),
            Seat::new("sb", 200).with_sblind(),
            Seat::new("bb", 5).with_bblind(),
        ];
        let mut game = Game::new(seats, (1, 2), &mut rng()).unwrap();
        game.execute("btn", Action::Raise(20)).unwrap();
        game.execute("sb", Action::Fold).unwrap();
        game.execute("bb", Action::Call(0)).unwrap();
        // bb had 3 behind after posting 2; the call is 3, not 18
        let last = game.history().last().unwrap();
        assert_eq!(last.action, Action::Call(3));
        assert!(game.over());
    }

    #[test]
    fn heads_up_button_acts_first_preflop() {
        let game = Game::table(&["btn", "bb"], 200, (1, 2), &mut rng()).unwrap();
        assert_eq!(game.action_on(), "btn");
        assert!(game.seats()[0].is_sblind());
    }

    #[test]
    fn side_pots_settle_by_lowest_all_in() {
        // A short-shoves 20, B and C get 50 in: main pot 60, side 60
        let seats = vec![
            Seat::new("a", 20).with_dealer(),
            Seat::new("b", 50).with_sblind(),
            Seat::new("c", 50).with_bblind(),
        ];
        let mut game = Game::new(seats, (1, 2), &mut rng()).unwrap();
        game.execute("a", Action::Shove(0)).unwrap();
        game.execute("b", Action::Shove(0)).unwrap();
        game.execute("c", Action::Call(0)).unwrap();
        assert!(game.over());
        let result = game.result().unwrap();
        let rewards: Vec<Chips> = result.iter().map(|r| r.reward).collect();
        assert_eq!(rewards.iter().sum::<Chips>(), 120);
        // a can win at most the 60-chip main pot
        assert!(rewards[0] == 0 || rewards[0] == 60 || rewards[0] == 20 || rewards[0] == 30);
        let total: Chips = game.seats().iter().map(|s| s.stack()).sum();
        assert_eq!(total, 120);
    }

    #[test]
    fn same_seed_same_deal() {
        let a = Game::table(&["x", "y", "z"], 100, (1, 2), &mut rng()).unwrap();
        let b = Game::table(&["x", "y", "z"], 100, (1, 2), &mut rng()).unwrap();
        for (sa, sb) in a.seats().iter().zip(b.seats().iter()) {
            assert_eq!(sa.cards(), sb.cards());
        }
    }
}
