#![forbid(unsafe_code)]

mod report;
mod session_file;
mod transport;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use gacha_core::pipeline::counts;
use gacha_core::{
    ApiError, ApiTransport, AuthDraft, AuthMode, CardFilter, CardId, Currency, GachaClient,
    OwnedSet, PullKind, SessionStorage, SessionStore, SortKey, User, ViewQuery, derive_view,
    plan_pull,
};
use std::io::{Write, stdout};
use std::path::PathBuf;

use session_file::SessionFile;
use transport::ReqwestTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PullSize {
    /// One card
    Single,
    /// Ten cards, at least one Rare or better
    Ten,
}

impl From<PullSize> for PullKind {
    fn from(size: PullSize) -> Self {
        match size {
            PullSize::Single => Self::Single,
            PullSize::Ten => Self::Ten,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "gacha-cli", version)]
#[command(about = "Terminal client for the waifu card gacha backend")]
struct Args {
    /// Backend origin
    #[arg(long, default_value = gacha_core::constants::DEFAULT_API_BASE)]
    api_base: String,

    /// File that remembers the signed-in player between runs
    #[arg(long, default_value = ".gacha-session.json")]
    session_file: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and remember the player
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the signed-in player
    Logout,
    /// Refresh and show the signed-in player's balances
    Whoami,
    /// List the catalogue with ownership marks
    Cards {
        /// all, owned, missing or a rarity (COMMON, RARE, EPIC, LEGENDARY)
        #[arg(long, default_value = "all")]
        filter: CardFilter,
        /// name, attack, defense, cost or rarity
        #[arg(long, default_value = "name")]
        sort: SortKey,
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Spend coins (or gems) on a pull
    Pull {
        #[arg(value_enum)]
        size: PullSize,
        /// Pay with gems instead of coins
        #[arg(long)]
        gems: bool,
    },
    /// Show curated collections for a card or by name
    Galleries {
        #[arg(long, conflicts_with = "search", required_unless_present = "search")]
        card: Option<CardId>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show the dialogue lines of one gallery image
    Dialogues {
        #[arg(long)]
        image: i64,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    log::debug!("backend {} session {}", args.api_base, args.session_file.display());

    let client = GachaClient::new(ReqwestTransport::new(), &args.api_base);
    let session = SessionStore::restore(SessionFile::new(&args.session_file));
    let mut out = stdout().lock();
    run(args.command, &client, session, &mut out).await
}

fn signed_in<S: SessionStorage>(session: &SessionStore<S>) -> Result<User> {
    session
        .user()
        .cloned()
        .context("not signed in; run `gacha-cli login <username> --password <password>` first")
}

/// Backend text when the server explains itself, else `fallback`.
fn api_failure(err: &ApiError, fallback: &str) -> anyhow::Error {
    log::debug!("{fallback}: {err}");
    anyhow!("{}", err.message_or(fallback))
}

async fn run<T, S, W>(
    command: Command,
    client: &GachaClient<T>,
    mut session: SessionStore<S>,
    out: &mut W,
) -> Result<()>
where
    T: ApiTransport,
    S: SessionStorage,
    W: Write,
{
    match command {
        Command::Login { username, password } => {
            let draft = AuthDraft {
                mode: AuthMode::Login,
                username,
                password,
                ..AuthDraft::default()
            };
            authenticate(client, &mut session, &draft, out).await
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let draft = AuthDraft {
                mode: AuthMode::Register,
                username,
                email,
                password,
            };
            authenticate(client, &mut session, &draft, out).await
        }
        Command::Logout => {
            session.logout().context("could not clear the session file")?;
            writeln!(out, "{}", "👋 Signed out".green())?;
            Ok(())
        }
        Command::Whoami => {
            let user = signed_in(&session)?;
            let fresh = client
                .fetch_user(user.id)
                .await
                .map_err(|e| api_failure(&e, "Unable to refresh your profile"))?;
            session
                .update_user(fresh.clone())
                .context("could not save the session file")?;
            writeln!(out, "{}", report::user_line(&fresh))?;
            Ok(())
        }
        Command::Cards {
            filter,
            sort,
            search,
        } => {
            let user = signed_in(&session)?;
            let (owned, all) = client
                .fetch_owned_and_all(user.id)
                .await
                .map_err(|e| api_failure(&e, "Unable to load your collection"))?;
            let owned = OwnedSet::from_cards(&owned);
            let query = ViewQuery {
                filter,
                sort,
                search,
            };
            let view = derive_view(&all, &owned, &query);
            if view.is_empty() {
                writeln!(out, "No cards match the selected filters.")?;
            }
            for card in &view {
                writeln!(out, "{}", report::card_line(card, Some(&owned)))?;
            }
            writeln!(out, "{}", report::counts_line(&counts(&all, &owned), view.len()))?;
            Ok(())
        }
        Command::Pull { size, gems } => {
            let user = signed_in(&session)?;
            let currency = if gems { Currency::Gems } else { Currency::Coins };
            let plan = plan_pull(&user, size.into(), currency)?;
            log::debug!("pulling {:?} for {} {}", plan.kind, plan.cost, plan.currency);
            let result = client
                .pull(user.id, plan.kind, plan.currency)
                .await
                .map_err(|e| api_failure(&e, "Something went wrong while running gacha."))?;
            session
                .update_user(result.apply_to(&user))
                .context("could not save the session file")?;
            for line in report::pull_summary(&result) {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
        Command::Galleries { card, search } => {
            let collections = match (card, search) {
                (Some(card), _) => client
                    .collections_for_card(card)
                    .await
                    .map_err(|e| api_failure(&e, "Unable to load collections for this card"))?,
                (None, Some(name)) => {
                    let name = name.trim();
                    if name.is_empty() {
                        bail!("Enter a collection name to search.");
                    }
                    client
                        .search_collections(name)
                        .await
                        .map_err(|e| api_failure(&e, "Unable to search collections"))?
                }
                (None, None) => bail!("pass --card <id> or --search <name>"),
            };
            if collections.is_empty() {
                writeln!(out, "No collections found.")?;
            }
            for collection in &collections {
                for line in report::collection_lines(collection) {
                    writeln!(out, "{line}")?;
                }
            }
            Ok(())
        }
        Command::Dialogues { image } => {
            let lines = client
                .dialogues_for_image(image)
                .await
                .map_err(|e| api_failure(&e, "Unable to load dialogue"))?;
            if lines.is_empty() {
                writeln!(out, "No dialogue lines yet.")?;
            }
            for line in report::dialogue_lines(&lines) {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
    }
}

async fn authenticate<T, S, W>(
    client: &GachaClient<T>,
    session: &mut SessionStore<S>,
    draft: &AuthDraft,
    out: &mut W,
) -> Result<()>
where
    T: ApiTransport,
    S: SessionStorage,
    W: Write,
{
    let credentials = draft.validate()?;
    let result = match draft.mode {
        AuthMode::Login => client.login(&credentials).await,
        AuthMode::Register => client.register(&credentials).await,
    };
    let user = result.map_err(|e| api_failure(&e, "Authentication failed"))?;
    session
        .login(user.clone())
        .context("could not save the session file")?;
    writeln!(out, "{} {}", "✔ Signed in".green().bold(), report::user_line(&user))?;
    Ok(())
}
