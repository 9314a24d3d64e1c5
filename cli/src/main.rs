//! CLI entry point: replay a scripted LIMIT BUY session, then explore it.
//!
//! Usage:
//!   orderfsm                          built-in demo session, then a REPL
//!   orderfsm --config session.toml    session from file
//!   orderfsm --config s.toml --batch  replay only; exit 2 on any refusal

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use orderfsm::Account;
use orderfsm_cli::config::SessionConfig;
use orderfsm_cli::session::Session;

#[derive(Parser)]
#[command(name = "orderfsm")]
#[command(about = "Drive a LIMIT BUY order through its lifecycle")]
#[command(version)]
struct Cli {
    /// Path to a session TOML file (default: built-in demo)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay the scripted events and exit without a prompt
    #[arg(long)]
    batch: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(refused) if cli.batch && refused > 0 => process::exit(2),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

/// Returns the number of refused events.
fn run(cli: &Cli) -> anyhow::Result<usize> {
    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading session {}", path.display()))?,
        None => SessionConfig::demo(),
    };
    let script = config.script()?;

    let account = Account::from(config.account);
    log::info!("account opened with {account}");
    let mut session = Session::open(config.order, &account);
    println!("{}", session.order());

    for outcome in session.run(&script) {
        println!("  {outcome}");
    }
    println!("{}\n{account}", session.order());

    if !cli.batch {
        repl(&mut session, &account).context("reading commands")?;
    }
    Ok(session.refused())
}

fn repl(session: &mut Session<'_>, account: &Account) -> io::Result<()> {
    println!("\nType 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("fsm> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => {}
            "help" | "h" | "?" => print_help(),
            "quit" | "exit" | "q" => break,
            "status" | "s" => println!("{}", session.order()),
            "account" | "a" => println!("{account}"),
            _ => match session.apply_line(line) {
                Ok(outcome) => println!("  {outcome}"),
                Err(e) => println!("{e}. Type 'help' for commands."),
            },
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_help() {
    println!(
        r#"
Commands:
  status                         Show the order
  account                        Show account balances
  help                           Show this help
  quit                           Exit

Events:
  ack                            PlaceOrderReqAck
  cancel-ack                     PendingCancellationAck
  modify-ack                     PendingModificationAck
  placed                         OrderPlacedInOrderBook
  modified <price> <volume>      ModifiedPlaced
  partial <volume>               PartiallyFilled
  modified-partial <price> <vol> ModifiedPartiallyFilled
  filled <volume>                Filled (0 closes a fully filled order)
  rejected                       Rejected
  cancelled                      Cancelled
  expired                        Expired
"#
    );
}
