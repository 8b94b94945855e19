//! Command-line surface over [`RentLedgerManager`].

pub mod output;

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::RentLedgerManager,
    domain::{MonthKey, PaymentForm, PaymentMethod, PaymentStatus},
    errors::LedgerError,
    ledger::{Clock, FixedClock, SystemClock},
    storage::JsonStore,
    utils,
};

use output::MessageKind;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Usage(String),
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Parser)]
#[command(name = "rent_ledger_cli", about = "Monthly rent ledger", version)]
pub struct Cli {
    /// Application home holding config.json and the data directory.
    #[arg(long, global = true, env = "RENT_LEDGER_HOME")]
    pub home: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD).
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the reconciled ledger of a month (defaults to the current one).
    Month { month: Option<MonthKey> },
    /// Record a payment.
    Pay {
        #[arg(long)]
        contract: Uuid,
        #[arg(long)]
        date: NaiveDate,
        /// Defaults to the contract's monthly rent.
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long, default_value = "paid")]
        status: PaymentStatus,
        #[arg(long)]
        method: Option<PaymentMethod>,
    },
    /// Edit an entry of a month, stored or generated.
    Edit {
        month: MonthKey,
        id: Uuid,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        status: Option<PaymentStatus>,
        #[arg(long)]
        method: Option<PaymentMethod>,
    },
    /// Delete a recorded payment.
    Delete { id: Uuid },
    /// List contracts with their tenant and property.
    Contracts,
    /// Print build information.
    Version,
}

/// Parses the process arguments and runs the selected command.
pub fn run_cli() -> CliResult<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut impl Write) -> CliResult<()> {
    if cli.plain {
        colored::control::set_override(false);
    }
    let home = cli.home.unwrap_or_else(utils::app_data_dir);
    let today = cli.today;

    match cli.command {
        Command::Month { month } => {
            let session = Session::open(&home, today)?;
            let manager = &session.manager;
            let currency = session.config.currency_label.as_str();
            if let Err(err) = manager.stored_payments() {
                let text =
                    format!("Recorded payments unavailable ({err}); showing expected rent only");
                writeln!(out, "{}", output::message(MessageKind::Warning, text))?;
            }
            let month = month.unwrap_or_else(|| MonthKey::from_date(manager.today()));
            let directory = manager.directory()?;
            let calendar = manager.calendar(month)?;
            let summary = manager.summary(month)?;
            write!(out, "{}", output::render_month(&calendar, &directory, currency))?;
            writeln!(out)?;
            let outstanding = manager.outstanding_total();
            write!(out, "{}", output::render_summary(&summary, outstanding, currency))?;
        }
        Command::Pay {
            contract,
            date,
            amount,
            status,
            method,
        } => {
            let session = Session::open(&home, today)?;
            let prefill = session
                .manager
                .contracts()?
                .into_iter()
                .find(|candidate| candidate.id == contract)
                .map(|found| PaymentForm::for_contract(&found))
                .unwrap_or_default();
            let form = PaymentForm {
                contract_id: Some(contract),
                payment_date: Some(date),
                amount: amount.or(prefill.amount),
                status,
                method: method.unwrap_or(session.config.default_method),
            };
            let saved = session.manager.upsert_payment(&form, None)?;
            let text = format!("Recorded {} for {} ({})", saved.status, saved.month_key, saved.id);
            writeln!(out, "{}", output::message(MessageKind::Success, text))?;
        }
        Command::Edit {
            month,
            id,
            date,
            amount,
            status,
            method,
        } => {
            let session = Session::open(&home, today)?;
            let existing = session
                .manager
                .find_entry(month, id)?
                .ok_or_else(|| CliError::Usage(format!("no entry {id} in {month}")))?;
            let mut form = PaymentForm::from_entry(&existing);
            if existing.method.is_none() {
                form.method = session.config.default_method;
            }
            form.payment_date = date.or(form.payment_date);
            form.amount = amount.or(form.amount);
            form.status = status.unwrap_or(form.status);
            form.method = method.unwrap_or(form.method);
            let saved = session.manager.upsert_payment(&form, Some(&existing))?;
            let verb = if existing.generated { "Recorded" } else { "Updated" };
            let text = format!("{verb} {} for {} ({})", saved.status, saved.month_key, saved.id);
            writeln!(out, "{}", output::message(MessageKind::Success, text))?;
        }
        Command::Delete { id } => {
            let session = Session::open(&home, today)?;
            let removed = session.manager.delete_payment(id)?;
            let text = format!("Deleted payment {} from {}", removed.id, removed.month_key);
            writeln!(out, "{}", output::message(MessageKind::Success, text))?;
        }
        Command::Contracts => {
            let session = Session::open(&home, today)?;
            let directory = session.manager.directory()?;
            let contracts = session.manager.contracts()?;
            let currency = session.config.currency_label.as_str();
            write!(out, "{}", output::render_contracts(&directory, &contracts, currency))?;
        }
        Command::Version => writeln!(out, "{}", version_line())?,
    }
    Ok(())
}

/// Loaded configuration and the manager built from it.
struct Session {
    config: Config,
    manager: RentLedgerManager,
}

impl Session {
    fn open(home: &Path, today: Option<NaiveDate>) -> CliResult<Self> {
        let config = ConfigManager::with_base_dir(home)?.load()?;
        let data_dir = config.resolve_data_dir(home);
        debug!(path = %data_dir.display(), "opening json store");
        let store = JsonStore::new(data_dir, Some(config.backup_retention))?;
        let clock: Box<dyn Clock> = match today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        };
        let manager = RentLedgerManager::new(Box::new(store.clone()), Box::new(store), clock);
        Ok(Self { config, manager })
    }
}

fn version_line() -> String {
    format!(
        "rent_ledger {} (build {}, {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("RENT_LEDGER_BUILD_HASH"),
        env!("RENT_LEDGER_BUILD_DATE"),
        env!("RENT_LEDGER_BUILD_PROFILE"),
    )
}
