//! Clap command tree definition.

use clap::{value_parser, Arg, ArgAction, Command};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use cardgen_engine::CONFIG_FILE_NAME;

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("cardgen")
        .about("Issue sequence-numbered gift and prepaid cards")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file, created with defaults if missing")
                .value_parser(value_parser!(PathBuf))
                .default_value(CONFIG_FILE_NAME)
                .global(true),
        )
        .subcommand(build_generate())
        .subcommand(build_init())
        .subcommand(Command::new("status").about("Show the current sequence record"))
        .subcommand(Command::new("list").about("List stored cards"))
}

fn build_generate() -> Command {
    Command::new("generate")
        .about("Generate a batch of cards; missing values are prompted for")
        .arg(
            Arg::new("count")
                .long("count")
                .short('n')
                .help("Number of cards")
                .value_parser(parse_count),
        )
        .arg(
            Arg::new("balance")
                .long("balance")
                .short('b')
                .help("Balance of each card")
                .value_parser(parse_balance),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .short('t')
                .help("Card type")
                .value_parser(["gift", "prepaid"]),
        )
        .arg(
            Arg::new("expires")
                .long("expires")
                .help("Prepaid expiration, \"YYYY-MM-DD HH:MM:SS\""),
        )
        .arg(
            Arg::new("no-expiration")
                .long("no-expiration")
                .help("Prepaid cards without expiration, skips the prompt")
                .action(ArgAction::SetTrue)
                .conflicts_with("expires"),
        )
}

fn build_init() -> Command {
    Command::new("init")
        .about("Seed the sequence file")
        .arg(
            Arg::new("start")
                .long("start")
                .help("First sequence value to issue")
                .value_parser(value_parser!(u64))
                .required(true),
        )
        .arg(
            Arg::new("end")
                .long("end")
                .help("Recorded upper bound (default: largest 9-digit value)")
                .value_parser(value_parser!(u64))
                .default_value("999999999"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .help("Sequence name")
                .default_value("card_sequence"),
        )
}

pub(crate) fn parse_count(s: &str) -> Result<u64, String> {
    match s.trim().parse::<u64>() {
        Ok(0) => Err("count must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a whole number", s)),
    }
}

pub(crate) fn parse_balance(s: &str) -> Result<Decimal, String> {
    match Decimal::from_str(s.trim()) {
        Ok(b) if b > Decimal::ZERO => Ok(b),
        Ok(_) => Err("balance must be greater than 0".to_string()),
        Err(_) => Err(format!("'{}' is not a valid amount", s)),
    }
}
