use crate::constants::BATTLE_SEARCH_DELAY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BattlePhase {
    #[default]
    Idle,
    Searching,
    Unavailable,
}

/// Matchmaking placeholder. The only timer in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BattleView {
    phase: BattlePhase,
}

impl BattleView {
    /// Start searching. Returns the delay to wait before [`Self::finish_search`],
    /// or `None` if a search is already running.
    pub fn start_search(&mut self) -> Option<u32> {
        if self.phase == BattlePhase::Searching {
            return None;
        }
        self.phase = BattlePhase::Searching;
        Some(BATTLE_SEARCH_DELAY_MS)
    }

    pub fn finish_search(&mut self) {
        if self.phase == BattlePhase::Searching {
            self.phase = BattlePhase::Unavailable;
        }
    }

    pub fn acknowledge(&mut self) {
        self.phase = BattlePhase::Idle;
    }

    #[must_use]
    pub const fn phase(self) -> BattlePhase {
        self.phase
    }
}
