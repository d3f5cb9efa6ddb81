//! Cardgen CLI: issue and inspect sequence-numbered cards.
//!
//! - `cardgen generate`: issue a batch, prompting for anything not given
//! - `cardgen init --start N`: seed the sequence file
//! - `cardgen status` / `cardgen list`: inspect the two store files

mod commands;
mod format;
mod prompt;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::ArgMatches;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use cardgen_core::timestamp::now;
use cardgen_core::{CardStore, CardType, SequenceRecord, SequenceStore};
use cardgen_engine::{open_shared, CardGenConfig, GenerationRequest};
use cardgen_storage::{FileCardStore, FileSequenceStore};

use commands::build_cli;
use format::{format_card, format_record, format_report_summary};
use prompt::Prompter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = build_cli().get_matches();

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(1);
        }
    };

    let exit_code = match matches.subcommand() {
        Some(("generate", sub)) => run_generate(sub, &config),
        Some(("init", sub)) => run_init(sub, &config),
        Some(("status", _)) => run_status(&config),
        Some(("list", _)) => run_list(&config),
        _ => {
            eprintln!("(error) unknown command");
            2
        }
    };
    process::exit(exit_code);
}

fn load_config(matches: &ArgMatches) -> cardgen_core::Result<CardGenConfig> {
    let path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(cardgen_engine::CONFIG_FILE_NAME));
    CardGenConfig::write_default_if_missing(&path)?;
    CardGenConfig::from_file(&path)
}

/// Values for one run, taken from flags or asked for.
fn collect_request(matches: &ArgMatches) -> io::Result<GenerationRequest> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let count = match matches.get_one::<u64>("count") {
        Some(count) => *count,
        None => prompter.ask_count()?,
    };
    let balance = match matches.get_one::<Decimal>("balance") {
        Some(balance) => *balance,
        None => prompter.ask_balance()?,
    };
    let card_type = match matches.get_one::<String>("type").map(String::as_str) {
        Some("gift") => CardType::Gift,
        Some("prepaid") => CardType::Prepaid,
        _ => prompter.ask_card_type()?,
    };
    let expiration = match card_type {
        CardType::Gift => None,
        CardType::Prepaid if matches.get_flag("no-expiration") => None,
        CardType::Prepaid => match matches.get_one::<String>("expires") {
            Some(raw) => prompter.expiration_or_notice(raw),
            None => prompter.ask_expiration()?,
        },
    };

    Ok(GenerationRequest {
        count,
        balance,
        card_type,
        expiration,
    })
}

fn run_generate(matches: &ArgMatches, config: &CardGenConfig) -> i32 {
    let request = match collect_request(matches) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("(error) {}", e);
            println!("No cards were generated.");
            return 1;
        }
    };

    let generator = match open_shared(config) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("(error) {}", e);
            println!("No cards were generated.");
            return 1;
        }
    };

    println!(
        "Generating {} {} cards with {} balance each...",
        request.count, request.card_type, request.balance
    );
    match generator.generate(&request) {
        Ok(batch) => {
            println!("Successfully generated {} cards!", batch.cards.len());
            if let (Some(first), Some(last)) = (batch.first_number(), batch.last_number()) {
                println!("Card number range: {} - {}", first, last);
            }
            0
        }
        Err(e) => {
            eprintln!("(error) {}", e);
            if e.cards_committed() {
                eprintln!(
                    "(error) cards were written to {} but the sequence was not advanced; \
                     fix {} before generating again",
                    config.card_file.display(),
                    config.sequence_file.display()
                );
            }
            println!("No cards were generated.");
            1
        }
    }
}

fn run_init(matches: &ArgMatches, config: &CardGenConfig) -> i32 {
    let start = matches.get_one::<u64>("start").copied().unwrap_or_default();
    let end = matches
        .get_one::<u64>("end")
        .copied()
        .unwrap_or(cardgen_core::MAX_SEQUENCE_VALUE);
    let name = matches
        .get_one::<String>("name")
        .map(String::as_str)
        .unwrap_or("card_sequence");

    if end < start {
        eprintln!("(error) end {} is below start {}", end, start);
        return 1;
    }

    let store = FileSequenceStore::new(&config.sequence_file);
    match store.initialize(SequenceRecord::new(start, end, name, &config.actor, now())) {
        Ok(record) => {
            println!("{}", format_record(&record));
            0
        }
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    }
}

fn run_status(config: &CardGenConfig) -> i32 {
    match FileSequenceStore::new(&config.sequence_file).load() {
        Ok(Some(record)) => {
            println!("{}", format_record(&record));
            0
        }
        Ok(None) => {
            println!(
                "(nil) no sequence at {}; run `cardgen init --start N`",
                config.sequence_file.display()
            );
            1
        }
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    }
}

fn run_list(config: &CardGenConfig) -> i32 {
    match FileCardStore::new(&config.card_file).read_all_with_report() {
        Ok(report) => {
            for card in &report.cards {
                println!("{}", format_card(card));
            }
            println!("{}", format_report_summary(&report));
            0
        }
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    }
}
