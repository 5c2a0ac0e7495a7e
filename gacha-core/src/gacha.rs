//! Pull pricing and the client-side affordability check.
use crate::constants::{
    SINGLE_PULL_COST_COINS, SINGLE_PULL_COST_GEMS, TEN_PULL_COST_COINS, TEN_PULL_COST_GEMS,
    TEN_PULL_SIZE,
};
use crate::model::{Currency, User};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PullKind {
    Single,
    Ten,
}

impl PullKind {
    /// Path segment under `/api/gacha/`.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Ten => "ten",
        }
    }

    #[must_use]
    pub const fn card_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Ten => TEN_PULL_SIZE,
        }
    }

    #[must_use]
    pub const fn cost(self, currency: Currency) -> i64 {
        match (self, currency) {
            (Self::Single, Currency::Coins) => SINGLE_PULL_COST_COINS,
            (Self::Single, Currency::Gems) => SINGLE_PULL_COST_GEMS,
            (Self::Ten, Currency::Coins) => TEN_PULL_COST_COINS,
            (Self::Ten, Currency::Gems) => TEN_PULL_COST_GEMS,
        }
    }
}

impl std::str::FromStr for PullKind {
    type Err = crate::model::UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "1" => Ok(Self::Single),
            "ten" | "10" => Ok(Self::Ten),
            _ => Err(crate::model::UnknownVariant {
                kind: "pull",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GachaError {
    #[error("not enough {currency}: you need {required}")]
    InsufficientFunds { required: i64, currency: Currency },
}

/// A pull the player can afford, ready to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullPlan {
    pub kind: PullKind,
    pub currency: Currency,
    pub cost: i64,
}

/// Check the displayed balance before any request is made.
///
/// # Errors
///
/// Returns [`GachaError::InsufficientFunds`] when the balance is below the price.
pub fn plan_pull(user: &User, kind: PullKind, currency: Currency) -> Result<PullPlan, GachaError> {
    let cost = kind.cost(currency);
    if user.balance(currency) < cost {
        log::debug!(
            "refusing {kind:?} pull: {} {currency} < {cost}",
            user.balance(currency)
        );
        return Err(GachaError::InsufficientFunds {
            required: cost,
            currency,
        });
    }
    Ok(PullPlan {
        kind,
        currency,
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(coins: i64, gems: i64) -> User {
        User {
            id: 1,
            username: "aoi".into(),
            email: None,
            coins,
            gems,
            experience_points: 0,
            level: 1,
            created_at: None,
        }
    }

    #[test]
    fn price_table() {
        assert_eq!(PullKind::Single.cost(Currency::Coins), 100);
        assert_eq!(PullKind::Single.cost(Currency::Gems), 1);
        assert_eq!(PullKind::Ten.cost(Currency::Coins), 900);
        assert_eq!(PullKind::Ten.cost(Currency::Gems), 9);
        assert_eq!(PullKind::Ten.card_count(), 10);
    }

    #[test]
    fn short_balance_is_refused_with_price() {
        let err = plan_pull(&player(50, 0), PullKind::Single, Currency::Coins).unwrap_err();
        assert_eq!(
            err,
            GachaError::InsufficientFunds {
                required: 100,
                currency: Currency::Coins
            }
        );
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn exact_balance_is_enough() {
        let plan = plan_pull(&player(0, 9), PullKind::Ten, Currency::Gems).unwrap();
        assert_eq!(plan.cost, 9);
    }

    #[test]
    fn pull_kind_parses_cli_words() {
        assert_eq!("single".parse::<PullKind>().unwrap(), PullKind::Single);
        assert_eq!("TEN".parse::<PullKind>().unwrap(), PullKind::Ten);
        assert!("five".parse::<PullKind>().is_err());
    }
}
