//! Screen flow: proposal, then ask, then success. Never backwards.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Proposal,
    Ask,
    Success,
}

impl Screen {
    pub fn next(self) -> Option<Screen> {
        match self {
            Screen::Proposal => Some(Screen::Ask),
            Screen::Ask => Some(Screen::Success),
            Screen::Success => None,
        }
    }
}

/// Which engine a pointer / touch move belongs to on the current screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerRoute {
    Ignore,
    Evade,
    Trail,
}

/// Current screen plus whether the card has been revealed yet. Until the
/// reveal no transition is accepted, so the loader never races the screens.
#[derive(Clone, Debug)]
pub struct CardFlow {
    screen: Screen,
    revealed: bool,
}

impl Default for CardFlow {
    fn default() -> Self {
        Self { screen: Screen::Proposal, revealed: false }
    }
}

impl CardFlow {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn go_to_ask(&mut self) -> bool {
        self.advance_from(Screen::Proposal)
    }

    pub fn celebrate(&mut self) -> bool {
        self.advance_from(Screen::Ask)
    }

    fn advance_from(&mut self, expected: Screen) -> bool {
        if !self.revealed {
            return false;
        }
        match (self.screen == expected).then(|| expected.next()).flatten() {
            Some(next) => {
                self.screen = next;
                true
            }
            None => false,
        }
    }

    pub fn route_pointer(&self) -> PointerRoute {
        if !self.revealed {
            return PointerRoute::Ignore;
        }
        match self.screen {
            Screen::Proposal => PointerRoute::Ignore,
            Screen::Ask => PointerRoute::Evade,
            Screen::Success => PointerRoute::Trail,
        }
    }
}
