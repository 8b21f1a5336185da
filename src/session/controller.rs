//! Session Controller
//!
//! Runs one round over a line-based prompt:
//!
//! ```text
//! HMAC: <digest>
//! Available moves:
//! 1 - rock
//! 2 - paper
//! 3 - scissors
//! 0 - exit
//! ? - help
//! Enter your move: 2
//! Your move: paper
//! Computer move: rock
//! You Win
//! HMAC key: <key>
//! ```
//!
//! Generic over `BufRead`/`Write` so the same loop serves stdin/stdout
//! and scripted tests.

use std::io::{BufRead, Write};

use rand::{CryptoRng, RngCore};
use tracing::{debug, info};

use crate::core::rng::SecureRng;
use crate::game::rules::RuleTable;
use crate::game::table::render_table;
use crate::proof::commitment::Reveal;
use crate::proof::transcript::RoundTranscript;
use crate::session::input::{parse_selection, Selection, EXIT_INPUT, HELP_INPUT};
use crate::session::state::{Round, RoundResult, SessionError};

/// Prompt shown before each read.
pub const PROMPT: &str = "Enter your move: ";

/// Message printed for rejected input.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Please select one of the listed options.";

/// How a round ended.
#[derive(Debug, Clone)]
pub enum RoundEnd {
    /// Round resolved and the key was disclosed.
    Disclosed {
        /// Resolved pairing.
        result: RoundResult,
        /// Disclosed key and opponent move.
        reveal: Reveal,
        /// Record of the round.
        transcript: Option<RoundTranscript>,
    },
    /// Player exited (or input closed) before choosing. Nothing disclosed.
    Abandoned,
}

/// Options for a single round.
#[derive(Debug, Clone, Default)]
pub struct RoundOptions {
    /// Print the JSON transcript after disclosure.
    pub print_transcript: bool,
}

/// Drives a [`Round`] through the prompt protocol.
pub struct SessionController<'a, I, O> {
    rules: &'a RuleTable,
    input: I,
    output: O,
    options: RoundOptions,
}

impl<'a, I: BufRead, O: Write> SessionController<'a, I, O> {
    /// Create a controller reading `input` and writing `output`.
    pub fn new(rules: &'a RuleTable, input: I, output: O, options: RoundOptions) -> Self {
        Self { rules, input, output, options }
    }

    /// Give back the output sink (used by tests to inspect what was written).
    pub fn into_output(self) -> O {
        self.output
    }

    /// Play one round to completion or exit.
    pub fn play_round<R>(&mut self, rng: &mut SecureRng<R>) -> Result<RoundEnd, SessionError>
    where
        R: RngCore + CryptoRng,
    {
        let mut round = Round::new(self.rules);
        let digest = round.commit(rng)?;

        writeln!(self.output, "HMAC: {digest}")?;
        self.print_menu()?;

        let human_move = loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                info!(round = %round.id(), "input closed, round abandoned");
                writeln!(self.output)?;
                return Ok(RoundEnd::Abandoned);
            }

            match parse_selection(&line, self.rules.len()) {
                Ok(Selection::Move(index)) => break index,
                Ok(Selection::Help) => {
                    debug!("help table requested");
                    write!(self.output, "{}", render_table(self.rules))?;
                }
                Ok(Selection::Exit) => {
                    info!(round = %round.id(), "player exited, round abandoned");
                    return Ok(RoundEnd::Abandoned);
                }
                Err(err) => {
                    debug!(input = line.trim(), error = %err, "rejected selection");
                    writeln!(self.output, "{INVALID_INPUT_MESSAGE}")?;
                }
            }
        };

        let result = round.select(human_move)?;
        let moves = self.rules.moves();
        let name = |index| moves.name(index).unwrap_or("?");

        writeln!(self.output, "Your move: {}", name(result.human_move))?;
        writeln!(self.output, "Computer move: {}", name(result.opponent_move))?;
        writeln!(self.output, "You {}", result.outcome)?;

        let reveal = round.disclose()?;
        writeln!(self.output, "HMAC key: {}", reveal.key.as_str())?;

        let transcript = round.transcript();
        if self.options.print_transcript {
            if let Some(transcript) = &transcript {
                let json = transcript
                    .to_json()
                    .map_err(|e| SessionError::Io(e.into()))?;
                writeln!(self.output, "{json}")?;
            }
        }
        self.output.flush()?;

        Ok(RoundEnd::Disclosed { result, reveal, transcript })
    }

    fn print_menu(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "Available moves:")?;
        for (i, name) in self.rules.moves().iter().enumerate() {
            writeln!(self.output, "{} - {}", i + 1, name)?;
        }
        writeln!(self.output, "{EXIT_INPUT} - exit")?;
        writeln!(self.output, "{HELP_INPUT} - help")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::core::rng::tests::seeded;
    use crate::game::rules::{build_rule_table, Outcome};
    use crate::proof::commitment::verify_commitment;

    fn run(moves: &[&str], script: &str, seed: u64, options: RoundOptions) -> (RoundEnd, String) {
        let rules = build_rule_table(moves.iter().copied()).unwrap();
        let mut rng = seeded(seed);
        let mut controller =
            SessionController::new(&rules, Cursor::new(script.to_string()), Vec::new(), options);
        let end = controller.play_round(&mut rng).unwrap();
        let output = String::from_utf8(controller.into_output()).unwrap();
        (end, output)
    }

    fn published_digest(output: &str) -> &str {
        output
            .lines()
            .find_map(|l| l.strip_prefix("HMAC: "))
            .unwrap()
    }

    #[test]
    fn test_menu_layout() {
        let (_, output) = run(&["rock", "paper", "scissors"], "0\n", 1, RoundOptions::default());
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("HMAC: "));
        assert_eq!(lines[0].len(), "HMAC: ".len() + 64);
        assert_eq!(
            &lines[1..7],
            &["Available moves:", "1 - rock", "2 - paper", "3 - scissors", "0 - exit", "? - help"]
        );
    }

    #[test]
    fn test_exit_discloses_nothing() {
        let (end, output) = run(&["rock", "paper", "scissors"], "0\n", 2, RoundOptions::default());
        assert!(matches!(end, RoundEnd::Abandoned));
        assert!(!output.contains("HMAC key:"));
        assert!(!output.contains("Computer move:"));
    }

    #[test]
    fn test_closed_input_abandons() {
        let (end, output) = run(&["rock", "paper", "scissors"], "", 3, RoundOptions::default());
        assert!(matches!(end, RoundEnd::Abandoned));
        assert!(!output.contains("HMAC key:"));
    }

    #[test]
    fn test_completed_round_is_verifiable() {
        let (end, output) = run(&["rock", "paper", "scissors"], "2\n", 4, RoundOptions::default());
        let RoundEnd::Disclosed { result, reveal, .. } = end else {
            panic!("round should complete");
        };

        assert_eq!(result.human_move, 1);
        assert!(output.contains("Your move: paper\n"));
        assert!(output.contains(&format!("Computer move: {}\n", reveal.move_name)));
        assert!(output.contains(&format!("You {}\n", result.outcome)));
        assert!(output.ends_with(&format!("HMAC key: {}\n", reveal.key.as_str())));

        let digest = published_digest(&output);
        assert!(verify_commitment(digest, reveal.key.as_str(), &reveal.move_name));
    }

    #[test]
    fn test_help_then_move() {
        let moves = ["rock", "paper", "scissors"];
        let (end, output) = run(&moves, "?\n1\n", 5, RoundOptions::default());
        let RoundEnd::Disclosed { result, reveal, .. } = end else {
            panic!("round should complete");
        };

        assert!(output.contains("| rock "));
        assert!(output.contains("Draw"));
        assert_eq!(output.matches(PROMPT).count(), 2);

        let rules = build_rule_table(moves).unwrap();
        assert_eq!(result.human_move, 0);
        assert_eq!(result.outcome, rules.resolve(0, reveal.move_index).unwrap());
        assert!(verify_commitment(published_digest(&output), reveal.key.as_str(), &reveal.move_name));
    }

    #[test]
    fn test_invalid_inputs_reprompt() {
        let (end, output) = run(
            &["rock", "paper", "scissors"],
            "4\nlizard\n\n-2\n3\n",
            6,
            RoundOptions::default(),
        );

        assert_eq!(output.matches(INVALID_INPUT_MESSAGE).count(), 4);
        assert_eq!(output.matches(PROMPT).count(), 5);
        assert!(matches!(end, RoundEnd::Disclosed { result, .. } if result.human_move == 2));
    }

    /// Counts events at WARN or above.
    struct LoudEvents(std::sync::Arc<std::sync::atomic::AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LoudEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
            if *event.metadata().level() <= tracing::Level::WARN {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_rejected_input_stays_below_default_log_level() {
        use tracing_subscriber::layer::SubscriberExt;

        let count = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(LoudEvents(count.clone()));

        let (_, output) = tracing::subscriber::with_default(subscriber, || {
            run(&["rock", "paper", "scissors"], "9\nrock\n1\n", 9, RoundOptions::default())
        });

        assert_eq!(output.matches(INVALID_INPUT_MESSAGE).count(), 2);
        assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_selection_bounded_by_move_count() {
        // Five moves: "6" is rejected, "5" plays spock.
        let moves = ["rock", "paper", "scissors", "lizard", "spock"];
        let (end, output) = run(&moves, "6\n5\n", 7, RoundOptions::default());
        assert_eq!(output.matches(INVALID_INPUT_MESSAGE).count(), 1);
        assert!(output.contains("Your move: spock\n"));
        assert!(matches!(end, RoundEnd::Disclosed { .. }));
    }

    #[test]
    fn test_transcript_printed_on_request() {
        let options = RoundOptions { print_transcript: true };
        let (end, output) = run(&["rock", "paper", "scissors"], "1\n", 8, options);
        let RoundEnd::Disclosed { transcript: Some(transcript), .. } = end else {
            panic!("transcript expected");
        };

        let json_start = output.find('{').unwrap();
        let parsed = RoundTranscript::from_json(&output[json_start..]).unwrap();
        assert_eq!(parsed.round_id, transcript.round_id);
        assert_eq!(parsed.human_move, "rock");
        assert_eq!(parsed.verify(), Ok(()));
    }

    #[test]
    fn test_outcome_word_from_player_side() {
        // Over many seeds the word printed always matches the rule table.
        let moves = ["rock", "paper", "scissors"];
        let rules = build_rule_table(moves).unwrap();
        let mut seen = Vec::new();

        for seed in 0..30 {
            let (end, output) = run(&moves, "1\n", seed, RoundOptions::default());
            let RoundEnd::Disclosed { result, .. } = end else { unreachable!() };
            let expected = rules.resolve(0, result.opponent_move).unwrap();
            assert_eq!(result.outcome, expected);
            assert!(output.contains(&format!("You {expected}\n")));
            seen.push(expected);
        }
        assert!(seen.contains(&Outcome::Win));
        assert!(seen.contains(&Outcome::Lose));
        assert!(seen.contains(&Outcome::Draw));
    }
}
