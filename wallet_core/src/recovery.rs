//! Recovery-phrase verification before a new wallet is handed out.
//!
//! A [`RecoveryChallenge`] walks through three stages:
//!
//! 1. `WriteDown`: the user is shown the phrase and may regenerate it or set
//!    an extra word (passphrase).
//! 2. `Verify`: a short quiz asks for the word at a few positions, each with
//!    decoys drawn from the same phrase.
//! 3. `Done`: the quiz was answered correctly and the wallet can be derived.
//!
//! The quiz only proves the phrase was written down. Its RNG is supplied by
//! the caller and is not used for any key material.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use zeroize::Zeroizing;

use mycoin_crypto::{generate_mnemonic, mnemonic_words, parse_mnemonic, WordCount};

use crate::error::WalletError;
use crate::wallet::Wallet;

/// Number of questions in a quiz.
pub const QUESTION_COUNT: usize = 3;
/// Options per question: the true word plus decoys.
pub const OPTIONS_PER_QUESTION: usize = 3;

const WRONG_ANSWERS: &str = "wrong values, please try again";

/// One answer choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOption {
    word: String,
    correct: bool,
}

impl QuizOption {
    pub fn word(&self) -> &str {
        &self.word
    }
}

/// "Which word is at position N?"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    /// 1-based position in the phrase.
    pub position: usize,
    pub options: Vec<QuizOption>,
}

/// Quiz state while in the `Verify` stage.
#[derive(Clone, Debug)]
pub struct Quiz {
    questions: Vec<Question>,
    selected: Vec<Option<usize>>,
    confirmation: Zeroizing<String>,
    last_error: Option<String>,
}

impl Quiz {
    fn generate<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> Self {
        let count = QUESTION_COUNT.min(words.len());
        let mut questions: Vec<Question> = index::sample(rng, words.len(), count)
            .into_iter()
            .map(|pos| {
                let answer = &words[pos];
                let mut decoys: Vec<&String> = Vec::new();
                for word in words.iter().filter(|w| *w != answer) {
                    if !decoys.contains(&word) {
                        decoys.push(word);
                    }
                }

                let mut options: Vec<QuizOption> = decoys
                    .choose_multiple(rng, OPTIONS_PER_QUESTION - 1)
                    .map(|w| QuizOption {
                        word: (*w).clone(),
                        correct: false,
                    })
                    .collect();
                options.push(QuizOption {
                    word: answer.clone(),
                    correct: true,
                });
                options.shuffle(rng);

                Question {
                    position: pos + 1,
                    options,
                }
            })
            .collect();
        questions.sort_by_key(|q| q.position);

        Self {
            selected: vec![None; questions.len()],
            questions,
            confirmation: Zeroizing::new(String::new()),
            last_error: None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Selected option per question, `None` where unanswered.
    pub fn selected(&self) -> &[Option<usize>] {
        &self.selected
    }

    /// Message from the last failed verification, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn select(&mut self, question: usize, option: usize) -> Result<(), WalletError> {
        let in_range = self
            .questions
            .get(question)
            .is_some_and(|q| option < q.options.len());
        if !in_range {
            return Err(WalletError::InvalidSelection { question, option });
        }
        self.selected[question] = Some(option);
        Ok(())
    }

    fn all_correct(&self) -> bool {
        self.questions
            .iter()
            .zip(&self.selected)
            .all(|(q, sel)| sel.is_some_and(|i| q.options[i].correct))
    }
}

/// Where the challenge currently is.
#[derive(Clone, Debug)]
pub enum RecoveryStage {
    WriteDown,
    Verify(Quiz),
    Done,
}

impl RecoveryStage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WriteDown => "write-down",
            Self::Verify(_) => "verify",
            Self::Done => "done",
        }
    }
}

/// The write-down / verify / done flow for a newly created phrase.
pub struct RecoveryChallenge {
    mnemonic: Zeroizing<String>,
    passphrase: Zeroizing<String>,
    stage: RecoveryStage,
}

impl RecoveryChallenge {
    /// Start with a freshly generated phrase.
    pub fn new(word_count: WordCount) -> Result<Self, WalletError> {
        let phrase = Zeroizing::new(generate_mnemonic(word_count)?);
        Self::from_mnemonic(&phrase)
    }

    /// Start from an existing phrase, which must be valid.
    pub fn from_mnemonic(phrase: &str) -> Result<Self, WalletError> {
        let mnemonic = parse_mnemonic(phrase)?;
        Ok(Self {
            mnemonic: Zeroizing::new(mnemonic.to_string()),
            passphrase: Zeroizing::new(String::new()),
            stage: RecoveryStage::WriteDown,
        })
    }

    pub fn stage(&self) -> &RecoveryStage {
        &self.stage
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    pub fn words(&self) -> Vec<String> {
        mnemonic_words(&self.mnemonic)
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// The quiz, while in the `Verify` stage.
    pub fn quiz(&self) -> Option<&Quiz> {
        match &self.stage {
            RecoveryStage::Verify(quiz) => Some(quiz),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.stage, RecoveryStage::Done)
    }

    /// Replace the phrase with a new one of the given length.
    pub fn regenerate(&mut self, word_count: WordCount) -> Result<(), WalletError> {
        self.expect_write_down()?;
        self.mnemonic = Zeroizing::new(generate_mnemonic(word_count)?);
        tracing::debug!(words = word_count.words(), "recovery phrase regenerated");
        Ok(())
    }

    /// Set the extra word. Stored trimmed; empty means none.
    pub fn set_passphrase(&mut self, passphrase: &str) -> Result<(), WalletError> {
        self.expect_write_down()?;
        self.passphrase = Zeroizing::new(passphrase.trim().to_string());
        Ok(())
    }

    /// Move to the quiz, building fresh questions.
    pub fn continue_to_verify<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Quiz, WalletError> {
        self.expect_write_down()?;
        let words = Zeroizing::new(self.words());
        self.stage = RecoveryStage::Verify(Quiz::generate(&words, rng));
        tracing::debug!("recovery quiz started");
        self.quiz().ok_or(WalletError::InvalidStage("write-down"))
    }

    /// Choose `option` (0-based) for `question` (0-based).
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), WalletError> {
        self.quiz_mut()?.select(question, option)
    }

    /// Enter the extra word again for confirmation.
    pub fn confirm_passphrase(&mut self, confirmation: &str) -> Result<(), WalletError> {
        self.quiz_mut()?.confirmation = Zeroizing::new(confirmation.to_string());
        Ok(())
    }

    /// Check the answers. On success the challenge is `Done`; on failure it
    /// stays in `Verify` with the error recorded and the phrase unchanged.
    pub fn verify(&mut self) -> Result<(), WalletError> {
        let passphrase = self.passphrase.trim();
        let quiz = match &mut self.stage {
            RecoveryStage::Verify(quiz) => quiz,
            other => return Err(WalletError::InvalidStage(other.name())),
        };

        let passphrase_ok = passphrase.is_empty() || quiz.confirmation.trim() == passphrase;
        if !(quiz.all_correct() && passphrase_ok) {
            quiz.last_error = Some(WRONG_ANSWERS.to_string());
            tracing::debug!("recovery quiz failed");
            return Err(WalletError::VerificationFailed);
        }

        self.stage = RecoveryStage::Done;
        tracing::info!("recovery phrase verified");
        Ok(())
    }

    /// Leave the quiz and return to the phrase, discarding answers.
    pub fn back(&mut self) -> Result<(), WalletError> {
        self.quiz_mut()?;
        self.stage = RecoveryStage::WriteDown;
        Ok(())
    }

    /// Derive the wallet once the phrase is verified.
    pub fn into_wallet(self) -> Result<Wallet, WalletError> {
        if !self.is_done() {
            return Err(WalletError::InvalidStage(self.stage.name()));
        }
        Wallet::from_mnemonic(&self.mnemonic, &self.passphrase)
    }

    fn expect_write_down(&self) -> Result<(), WalletError> {
        match self.stage {
            RecoveryStage::WriteDown => Ok(()),
            ref other => Err(WalletError::InvalidStage(other.name())),
        }
    }

    fn quiz_mut(&mut self) -> Result<&mut Quiz, WalletError> {
        match &mut self.stage {
            RecoveryStage::Verify(quiz) => Ok(quiz),
            other => Err(WalletError::InvalidStage(other.name())),
        }
    }
}
