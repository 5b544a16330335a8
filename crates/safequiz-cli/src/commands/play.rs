//! The `safequiz play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use safequiz_core::config::load_config_from;
use safequiz_core::driver::{run_quiz, EventSource, Presenter};
use safequiz_core::session::{
    Feedback, IgnoreReason, QuestionView, QuizEvent, Session, Summary,
};

/// One line of user input, interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Event(QuizEvent),
    Quit,
}

/// Map a typed line to a command. Option numbers are 1-based on screen.
fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "s" | "start" => Some(Command::Event(QuizEvent::Start)),
        "c" | "confirm" => Some(Command::Event(QuizEvent::Confirm)),
        "n" | "next" => Some(Command::Event(QuizEvent::Next)),
        "q" | "quit" | "exit" => Some(Command::Quit),
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => Some(Command::Event(QuizEvent::Select(n - 1))),
            _ => None,
        },
    }
}

/// Reads commands line by line, prompting on stdout.
///
/// On the welcome screen an empty line also starts the quiz.
struct TerminalEvents<B> {
    lines: io::Lines<B>,
    started: bool,
}

impl<B: BufRead> TerminalEvents<B> {
    fn new(input: B) -> Self {
        Self {
            lines: input.lines(),
            started: false,
        }
    }
}

impl<B: BufRead> EventSource for TerminalEvents<B> {
    fn next_event(&mut self) -> Option<QuizEvent> {
        loop {
            print!("> ");
            if let Err(e) = io::stdout().flush() {
                tracing::warn!("failed to flush prompt: {e}");
            }

            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("failed to read input: {e}");
                    return None;
                }
            };

            match parse_command(&line) {
                Some(Command::Event(event)) => {
                    if event == QuizEvent::Start {
                        self.started = true;
                    }
                    return Some(event);
                }
                Some(Command::Quit) => return None,
                None if line.trim().is_empty() && !self.started => {
                    self.started = true;
                    return Some(QuizEvent::Start);
                }
                None if line.trim().is_empty() => {}
                None => println!(
                    "Unrecognised input '{}'. Type an option number, c (confirm), n (next) or q (quit).",
                    line.trim()
                ),
            }
        }
    }
}

/// Renders the quiz on stdout.
struct ConsolePresenter;

impl ConsolePresenter {
    fn print_options(view: &QuestionView<'_>) {
        for (i, text) in view.options.iter().enumerate() {
            let marker = if view.selected == Some(i) { "(x)" } else { "( )" };
            println!("  {marker} {}. {text}", i + 1);
        }
    }
}

impl Presenter for ConsolePresenter {
    fn on_question(&mut self, view: &QuestionView<'_>) {
        println!();
        println!("Question {}/{}", view.number, view.total);
        println!("{}", view.prompt);
        Self::print_options(view);
        println!("Pick an option number.");
    }

    fn on_selection(&mut self, view: &QuestionView<'_>) {
        Self::print_options(view);
        println!("Type c to confirm, or pick another option.");
    }

    fn on_feedback(&mut self, _view: &QuestionView<'_>, feedback: &Feedback) {
        if feedback.correct {
            println!("Correct! (+{} points)", feedback.points);
        } else {
            println!("Incorrect. (+{} points)", feedback.points);
        }
        if !feedback.explanation.is_empty() {
            println!("  {}", feedback.explanation);
        }
        println!("Type n for the next question.");
    }

    fn on_finished(&mut self, summary: &Summary) {
        println!();
        println!("Final result");
        println!(
            "Your score: {} / {} ({} of {} correct)",
            summary.score, summary.max_score, summary.correct_count, summary.question_count
        );
        println!("Tier: {} ({})", summary.result.tier, summary.result.color);
        println!("Badge: {}", summary.result.badge);
        println!("{}", summary.result.message);

        let mut table = Table::new();
        table.set_header(vec!["Question", "Your answer", "Points", "Result"]);
        for answer in &summary.answers {
            table.add_row(vec![
                Cell::new(answer.question_id),
                Cell::new(&answer.chosen),
                Cell::new(answer.points),
                Cell::new(if answer.correct { "correct" } else { "wrong" }),
            ]);
        }
        println!("{table}");
        println!("Run `safequiz play` again to retake the quiz.");
    }

    fn on_ignored(&mut self, _event: QuizEvent, reason: &IgnoreReason) {
        println!("  ({reason})");
    }
}

pub fn execute(
    bank_path: Option<PathBuf>,
    seed: Option<u64>,
    no_shuffle: bool,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if bank_path.is_some() {
        config.bank = bank_path;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if no_shuffle {
        config.shuffle = false;
    }

    let bank = config.load_bank()?;
    tracing::debug!(bank = bank.id(), seed = ?config.seed, shuffle = config.shuffle, "starting quiz");

    println!("{}", bank.name());
    if !bank.description().is_empty() {
        println!("{}", bank.description());
    }
    println!(
        "{} questions. Press Enter or type s to start, q to quit at any time.",
        bank.len()
    );

    let mut session = Session::seeded(&bank, config.seed);
    if !config.shuffle {
        session = session.without_shuffle();
    }

    let stdin = io::stdin();
    let mut source = TerminalEvents::new(stdin.lock());
    let summary = run_quiz(&mut session, &mut source, &mut ConsolePresenter);

    match summary {
        Some(summary) => {
            if json {
                let line =
                    serde_json::to_string(&summary).context("failed to serialize summary")?;
                println!("{line}");
            }
        }
        None => {
            println!();
            println!(
                "Quiz abandoned after {} of {} questions (score {}).",
                session.answers().len(),
                bank.len(),
                session.score()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn parse_known_commands() {
        assert_eq!(
            parse_command("s"),
            Some(Command::Event(QuizEvent::Start))
        );
        assert_eq!(
            parse_command(" Confirm "),
            Some(Command::Event(QuizEvent::Confirm))
        );
        assert_eq!(parse_command("n"), Some(Command::Event(QuizEvent::Next)));
        assert_eq!(parse_command("QUIT"), Some(Command::Quit));
    }

    #[test]
    fn option_numbers_are_one_based() {
        assert_eq!(
            parse_command("1"),
            Some(Command::Event(QuizEvent::Select(0)))
        );
        assert_eq!(
            parse_command("4"),
            Some(Command::Event(QuizEvent::Select(3)))
        );
        assert_eq!(parse_command("0"), None);
        assert_eq!(parse_command("-2"), None);
        assert_eq!(parse_command("maybe"), None);
    }

    #[test]
    fn empty_line_starts_from_welcome_screen() {
        let mut source = TerminalEvents::new(Cursor::new("\n"));
        assert_eq!(source.next_event(), Some(QuizEvent::Start));
        assert_eq!(source.next_event(), None);
    }

    #[test]
    fn empty_line_is_ignored_once_started() {
        let mut source = TerminalEvents::new(Cursor::new("\n\n\n3\n"));
        assert_eq!(source.next_event(), Some(QuizEvent::Start));
        assert_eq!(source.next_event(), Some(QuizEvent::Select(2)));
    }

    #[test]
    fn terminal_events_skip_noise_and_stop_on_quit() {
        let input = Cursor::new("hello\ns\n\n2\nq\nc\n");
        let mut source = TerminalEvents::new(input);
        assert_eq!(source.next_event(), Some(QuizEvent::Start));
        assert_eq!(source.next_event(), Some(QuizEvent::Select(1)));
        assert_eq!(source.next_event(), None);
    }

    #[test]
    fn terminal_events_end_at_eof() {
        let mut source = TerminalEvents::new(Cursor::new("n"));
        assert_eq!(source.next_event(), Some(QuizEvent::Next));
        assert_eq!(source.next_event(), None);
    }
}
