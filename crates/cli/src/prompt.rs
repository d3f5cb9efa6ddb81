//! Interactive prompts for `generate`.
//!
//! Each question re-asks until the answer is valid. End of input is an
//! error so a closed stdin never loops forever.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

use cardgen_core::CardType;

use crate::commands::{parse_balance, parse_count};

/// Format accepted for expiration dates.
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Question/answer loop over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn ask_count(&mut self) -> io::Result<u64> {
        self.ask(
            "How many cards do you want to generate? ",
            "Please enter a valid positive number: ",
            |s| parse_count(s).ok(),
        )
    }

    pub fn ask_balance(&mut self) -> io::Result<Decimal> {
        self.ask(
            "Enter the balance for each card: ",
            "Please enter a valid positive number: ",
            |s| parse_balance(s).ok(),
        )
    }

    pub fn ask_card_type(&mut self) -> io::Result<CardType> {
        writeln!(self.output, "Select card type:")?;
        for (i, card_type) in CardType::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, card_type)?;
        }
        let max = CardType::ALL.len();
        let retry = format!("Please enter a number between 1 and {}: ", max);
        let index = self.ask(
            &format!("Enter your choice (1-{}): ", max),
            &retry,
            |s| match s.trim().parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => Some(n - 1),
                _ => None,
            },
        )?;
        Ok(CardType::ALL[index])
    }

    /// Expiration for prepaid cards; anything unparsable means none.
    pub fn ask_expiration(&mut self) -> io::Result<Option<NaiveDateTime>> {
        write!(self.output, "Enter the expiration date (yyyy-MM-dd HH:mm:ss): ")?;
        self.output.flush()?;
        let line = self.read_line()?;
        Ok(self.expiration_or_notice(&line))
    }

    /// Parse `raw`, telling the user when it falls back to none.
    pub fn expiration_or_notice(&mut self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match NaiveDateTime::parse_from_str(raw, EXPIRATION_FORMAT) {
            Ok(ts) => Some(ts),
            Err(e) => {
                // Output failures here only lose the notice.
                let _ = writeln!(
                    self.output,
                    "Invalid date format ({}). Cards will have no expiration.",
                    e
                );
                None
            }
        }
    }

    fn ask<T>(
        &mut self,
        question: &str,
        retry: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<T> {
        write!(self.output, "{}", question)?;
        loop {
            self.output.flush()?;
            let line = self.read_line()?;
            if let Some(value) = parse(&line) {
                return Ok(value);
            }
            write!(self.output, "{}", retry)?;
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output.clone()).unwrap()
    }

    #[test]
    fn count_reprompts_until_positive() {
        let mut p = prompter("abc\n0\n-4\n12\n");
        assert_eq!(p.ask_count().unwrap(), 12);
        assert_eq!(
            transcript(&p).matches("Please enter a valid positive number").count(),
            3
        );
    }

    #[test]
    fn balance_accepts_decimal() {
        let mut p = prompter("0.00\n25.75\n");
        assert_eq!(p.ask_balance().unwrap(), Decimal::new(2575, 2));
    }

    #[test]
    fn card_type_menu_lists_all_and_checks_range() {
        let mut p = prompter("0\n3\n2\n");
        assert_eq!(p.ask_card_type().unwrap(), CardType::Prepaid);
        let out = transcript(&p);
        assert!(out.contains("1. GIFT"));
        assert!(out.contains("2. PREPAID"));
        assert_eq!(out.matches("between 1 and 2").count(), 2);
    }

    #[test]
    fn expiration_parses_or_falls_back() {
        let mut p = prompter("2026-01-31 23:59:00\n");
        let ts = p.ask_expiration().unwrap().unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        assert_eq!(ts.minute(), 59);

        let mut p = prompter("next tuesday\n");
        assert_eq!(p.ask_expiration().unwrap(), None);
        assert!(transcript(&p).contains("Invalid date format"));

        let mut p = prompter("\n");
        assert_eq!(p.ask_expiration().unwrap(), None);
        assert!(!transcript(&p).contains("Invalid date format"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut p = prompter("abc\n");
        let err = p.ask_count().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
