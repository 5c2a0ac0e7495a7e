use super::{Notice, NoticeArg};
use crate::api::ApiResult;
use crate::gacha::{GachaError, PullKind, PullPlan, plan_pull};
use crate::model::{Currency, GachaResult, User};

const fn currency_name_key(currency: Currency) -> &'static str {
    match currency {
        Currency::Coins => "gacha.currency.coinName",
        Currency::Gems => "gacha.currency.gemName",
    }
}

/// Pull page: balances, busy flag and the last batch of drawn cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GachaView {
    user: User,
    busy: bool,
    last_result: Option<GachaResult>,
    error: Option<Notice>,
}

impl GachaView {
    #[must_use]
    pub const fn new(user: User) -> Self {
        Self {
            user,
            busy: false,
            last_result: None,
            error: None,
        }
    }

    /// Decide whether a pull may be sent. Refusals record a message and
    /// return `None`; nothing should be sent in that case.
    pub fn plan(&mut self, kind: PullKind, currency: Currency) -> Option<PullPlan> {
        if self.busy {
            return None;
        }
        match plan_pull(&self.user, kind, currency) {
            Ok(plan) => {
                self.busy = true;
                self.error = None;
                Some(plan)
            }
            Err(GachaError::InsufficientFunds { required, currency }) => {
                self.error = Some(Notice::with_args(
                    "gacha.errors.notEnough",
                    [
                        ("currency", NoticeArg::Key(currency_name_key(currency))),
                        ("cost", NoticeArg::Text(required.to_string())),
                    ],
                ));
                None
            }
        }
    }

    /// Apply the backend's answer. On success the session user picks up
    /// the remaining balances; the returned user should be written back
    /// to the session store.
    pub fn apply_result(&mut self, result: ApiResult<GachaResult>) -> Option<User> {
        self.busy = false;
        match result {
            Ok(result) => {
                self.user = result.apply_to(&self.user);
                self.last_result = Some(result);
                self.error = None;
                Some(self.user.clone())
            }
            Err(err) => {
                log::warn!("pull failed: {err}");
                self.error = Some(Notice::from_api(&err, "gacha.errors.generic"));
                None
            }
        }
    }

    /// Replace the user after a profile refresh.
    pub fn refresh_user(&mut self, user: User) {
        self.user = user;
    }

    /// Back to the pull buttons.
    pub fn dismiss_result(&mut self) {
        self.last_result = None;
    }

    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub const fn last_result(&self) -> Option<&GachaResult> {
        self.last_result.as_ref()
    }

    #[must_use]
    pub const fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }
}
