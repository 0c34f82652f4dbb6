//! Interactive recovery-phrase quiz for `mycoin mnemonic new --verify`.
//!
//! A wrong answer never discards the phrase: the user retries the same
//! questions, or types `back` to see the phrase again and get new ones.

use std::io::{BufRead, Write};

use anyhow::bail;
use mycoin_wallet_core::{RecoveryChallenge, WalletError};
use rand::Rng;

use crate::secrets::read_line;

const BACK: &str = "back";

/// Parse a 1-based menu answer into a 0-based option index.
pub fn parse_choice(answer: &str, options: usize) -> anyhow::Result<usize> {
    let answer = answer.trim();
    let Ok(choice) = answer.parse::<usize>() else {
        bail!("'{answer}' is not a number");
    };
    if choice == 0 || choice > options {
        bail!("choose a number from 1 to {options}");
    }
    Ok(choice - 1)
}

/// Run the quiz until it is answered correctly.
///
/// `challenge` must already be in the verify stage. Returns an error only on
/// I/O failure or end of input.
pub fn run_quiz<R: Rng + ?Sized>(
    challenge: &mut RecoveryChallenge,
    rng: &mut R,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    loop {
        let questions = match challenge.quiz() {
            Some(quiz) => quiz.questions().to_vec(),
            None => bail!("recovery quiz is not running"),
        };

        for (q, question) in questions.iter().enumerate() {
            loop {
                write!(out, "word #{}:", question.position)?;
                for (i, option) in question.options.iter().enumerate() {
                    write!(out, " {}) {}", i + 1, option.word())?;
                }
                writeln!(out)?;
                out.flush()?;

                let answer = read_line(input)?;
                match parse_choice(&answer, question.options.len()) {
                    Ok(option) => {
                        challenge.select(q, option)?;
                        break;
                    }
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
        }

        if !challenge.passphrase().is_empty() {
            writeln!(out, "re-enter the extra word:")?;
            out.flush()?;
            let confirmation = read_line(input)?;
            challenge.confirm_passphrase(&confirmation)?;
        }

        match challenge.verify() {
            Ok(()) => return Ok(()),
            Err(WalletError::VerificationFailed) => {
                let message = challenge
                    .quiz()
                    .and_then(|quiz| quiz.last_error())
                    .unwrap_or("wrong answers");
                writeln!(out, "{message}")?;
                writeln!(out, "press enter to retry, or type '{BACK}' to see the phrase again:")?;
                out.flush()?;

                if read_line(input)?.trim() == BACK {
                    challenge.back()?;
                    writeln!(out, "{}", challenge.mnemonic())?;
                    challenge.continue_to_verify(rng)?;
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}
