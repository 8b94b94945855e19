use rent_ledger::cli::output::{message, MessageKind};
use rent_ledger::{cli::run_cli, init};

fn main() {
    init();

    if let Err(err) = run_cli() {
        eprintln!("{}", message(MessageKind::Error, err.to_string()));
        std::process::exit(1);
    }
}
