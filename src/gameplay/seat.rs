use crate::Chips;
use crate::cards::hole::Hole;
use colored::Colorize;

/// betting status within a hand.
/// a Folding player never acts again; a Shoving player is all-in,
/// done deciding but still competing for the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Betting,
    Shoving,
    Folding,
}

impl State {
    /// still competing for the pot
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Betting | Self::Shoving)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            State::Betting => write!(f, "P"),
            State::Shoving => write!(f, "{}", "S".magenta()),
            State::Folding => write!(f, "{}", "F".red()),
        }
    }
}

/// a player's place at the table.
///
/// stack is the chips behind, stake the chips committed this street,
/// spent the chips committed over the whole hand. position flags are
/// set once at seating and never move within a hand.
#[derive(Debug, Clone)]
pub struct Seat {
    id: String,
    position: usize,
    stack: Chips,
    stake: Chips,
    spent: Chips,
    state: State,
    acted: bool,
    cards: Option<Hole>,
    dealer: bool,
    sblind: bool,
    bblind: bool,
    hero: bool,
}

impl Seat {
    pub fn new(id: impl Into<String>, stack: Chips) -> Self {
        Self {
            id: id.into(),
            position: 0,
            stack,
            stake: 0,
            spent: 0,
            state: State::Betting,
            acted: false,
            cards: None,
            dealer: false,
            sblind: false,
            bblind: false,
            hero: false,
        }
    }
    pub fn with_dealer(mut self) -> Self {
        self.dealer = true;
        self
    }
    pub fn with_sblind(mut self) -> Self {
        self.sblind = true;
        self
    }
    pub fn with_bblind(mut self) -> Self {
        self.bblind = true;
        self
    }
    pub fn with_hero(mut self) -> Self {
        self.hero = true;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn position(&self) -> usize {
        self.position
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn stake(&self) -> Chips {
        self.stake
    }
    pub fn spent(&self) -> Chips {
        self.spent
    }
    pub fn state(&self) -> State {
        self.state
    }
    pub fn acted(&self) -> bool {
        self.acted
    }
    pub fn cards(&self) -> Option<Hole> {
        self.cards
    }
    pub fn is_dealer(&self) -> bool {
        self.dealer
    }
    pub fn is_sblind(&self) -> bool {
        self.sblind
    }
    pub fn is_bblind(&self) -> bool {
        self.bblind
    }
    pub fn is_hero(&self) -> bool {
        self.hero
    }

    /// commit chips from stack toward the pot
    pub fn bet(&mut self, chips: Chips) {
        assert!(chips <= self.stack, "cannot bet more than the stack");
        self.stack -= chips;
        self.stake += chips;
        self.spent += chips;
        if self.stack == 0 {
            self.state = State::Shoving;
        }
    }
    pub fn win(&mut self, chips: Chips) {
        self.stack += chips;
    }
    pub fn fold(&mut self) {
        self.state = State::Folding;
    }
    pub fn touch(&mut self) {
        self.acted = true;
    }
    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }
    pub(crate) fn set_cards(&mut self, cards: Hole) {
        self.cards = Some(cards);
    }
    pub(crate) fn next_street(&mut self) {
        self.stake = 0;
        self.acted = false;
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<10} {} {:>6} {:>5}",
            self.id,
            self.state,
            self.stack,
            self.cards
                .map(|c| c.to_string())
                .unwrap_or_else(|| "????".into()),
        )
    }
}
