use crate::player::Player;

/// Tile counters of a board. `free + red + blue + blocked` always equals the
/// board's cell count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Counts {
    pub free: usize,
    pub red: usize,
    pub blue: usize,
    pub blocked: usize,
}

impl Counts {
    pub fn total(&self) -> usize {
        self.free + self.red + self.blue + self.blocked
    }

    pub fn tiles(&self, player: Player) -> usize {
        match player {
            Player::Red => self.red,
            Player::Blue => self.blue,
        }
    }

    /// Winner by strictly more tiles.
    pub fn leader(&self) -> GameOutcome {
        if self.red > self.blue {
            GameOutcome::RedWin
        } else if self.blue > self.red {
            GameOutcome::BlueWin
        } else {
            GameOutcome::Draw
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    RedWin,
    BlueWin,
    Draw,
}

impl GameOutcome {
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::RedWin => Some(Player::Red),
            GameOutcome::BlueWin => Some(Player::Blue),
            GameOutcome::Draw => None,
        }
    }

    pub fn encode_winner_from_perspective(&self, perspective: Player) -> f32 {
        match self.winner() {
            Some(winner) if winner == perspective => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, GameOutcome::Draw)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::RedWin => write!(f, "red wins"),
            GameOutcome::BlueWin => write!(f, "blue wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}
