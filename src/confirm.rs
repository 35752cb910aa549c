//! Confirmation policy.
//!
//! Every kind of destructive decision has its own confirmer. Answering a
//! prompt with "don't ask again" makes that confirmer replay the answer for
//! the rest of the run. A dismissed prompt counts as a decline for that one
//! decision and never turns the prompt off.

use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};

/// The kinds of decision the sanitizer asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    RasterColorModel,
    RasterResolution,
    HiddenLayer,
    HiddenItem,
    ColorlessPath,
    StrayPoint,
    FilledLine,
    OffArtboardItem,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decision::RasterColorModel => "Raster effects are not grayscale",
            Decision::RasterResolution => "Raster effects resolution is off",
            Decision::HiddenLayer => "There are hidden layers",
            Decision::HiddenItem => "There are hidden objects",
            Decision::ColorlessPath => "There are paths without fill or stroke",
            Decision::StrayPoint => "There are stray points",
            Decision::FilledLine => "A straight path has a fill",
            Decision::OffArtboardItem => "There are objects outside the artboard",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Accept,
    Decline,
    /// The prompt was closed without an answer.
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    pub reply: Reply,
    pub dont_ask_again: bool,
}

impl Answer {
    pub fn accept() -> Self {
        Self {
            reply: Reply::Accept,
            dont_ask_again: false,
        }
    }

    pub fn decline() -> Self {
        Self {
            reply: Reply::Decline,
            dont_ask_again: false,
        }
    }

    pub fn dismiss() -> Self {
        Self {
            reply: Reply::Dismiss,
            dont_ask_again: false,
        }
    }

    /// The same answer, with "don't ask again" ticked.
    pub fn remembered(self) -> Self {
        Self {
            dont_ask_again: true,
            ..self
        }
    }
}

/// Where questions and notices go.
pub trait Prompt {
    fn ask(&mut self, decision: Decision, message: &str) -> Answer;

    /// Show a notice and block until it is acknowledged.
    fn notify(&mut self, message: &str);
}

/// The outcome of one confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Declined,
    Dismissed,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Confirmer {
    /// Set once the user asked not to be asked again.
    remembered: Option<bool>,
}

impl Confirmer {
    fn should_ask(&self) -> bool {
        self.remembered.is_none()
    }
}

/// Per-run decision state on top of a [`Prompt`].
pub struct Policy<'p> {
    prompt: &'p mut dyn Prompt,
    confirmers: HashMap<Decision, Confirmer>,
}

impl<'p> Policy<'p> {
    pub fn new(prompt: &'p mut dyn Prompt) -> Self {
        Self {
            prompt,
            confirmers: HashMap::new(),
        }
    }

    /// Whether the next decision of this kind will reach the prompt.
    pub fn should_ask(&self, decision: Decision) -> bool {
        self.confirmers
            .get(&decision)
            .is_none_or(Confirmer::should_ask)
    }

    pub fn confirm(&mut self, decision: Decision, message: &str) -> Verdict {
        let confirmer = self.confirmers.entry(decision).or_default();
        if let Some(accepted) = confirmer.remembered {
            log::debug!("{:?}: replaying remembered answer ({})", decision, accepted);
            return if accepted {
                Verdict::Accepted
            } else {
                Verdict::Declined
            };
        }

        let answer = self.prompt.ask(decision, message);
        let accepted = match answer.reply {
            Reply::Accept => true,
            Reply::Decline => false,
            Reply::Dismiss => {
                log::debug!("{:?}: prompt dismissed", decision);
                return Verdict::Dismissed;
            }
        };
        if answer.dont_ask_again {
            confirmer.remembered = Some(accepted);
        }
        if accepted {
            Verdict::Accepted
        } else {
            Verdict::Declined
        }
    }

    pub fn notify(&mut self, message: &str) {
        self.prompt.notify(message);
    }
}

/// Answers every question the same way without asking anyone.
#[derive(Debug, Clone, Default)]
pub struct AutoPrompt {
    accept: bool,
    notices: Vec<String>,
}

impl AutoPrompt {
    pub fn accept_all() -> Self {
        Self {
            accept: true,
            notices: Vec::new(),
        }
    }

    pub fn decline_all() -> Self {
        Self {
            accept: false,
            notices: Vec::new(),
        }
    }

    /// Notices raised so far.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl Prompt for AutoPrompt {
    fn ask(&mut self, decision: Decision, message: &str) -> Answer {
        log::debug!("{}: {} -> {}", decision, message, if self.accept { "yes" } else { "no" });
        if self.accept {
            Answer::accept()
        } else {
            Answer::decline()
        }
    }

    fn notify(&mut self, message: &str) {
        log::warn!("{}", message);
        self.notices.push(message.to_string());
    }
}

/// Line-based prompt: `y`/`n` answer once, `Y`/`N` answer for every later
/// question of the same kind. End of input or anything else dismisses.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                log::warn!("Failed to read answer: {}", e);
                None
            }
        }
    }

    fn show(&mut self, text: &str) {
        if let Err(e) = write!(self.output, "{}", text).and_then(|()| self.output.flush()) {
            log::warn!("Failed to write prompt: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn ask(&mut self, decision: Decision, message: &str) -> Answer {
        self.show(&format!("{}\n{} [y/n, Y/N for all] ", decision, message));
        let Some(line) = self.read_line() else {
            return Answer::dismiss();
        };
        match line.as_str() {
            "Y" => Answer::accept().remembered(),
            "N" => Answer::decline().remembered(),
            other => match other.to_ascii_lowercase().as_str() {
                "y" | "yes" => Answer::accept(),
                "n" | "no" => Answer::decline(),
                _ => Answer::dismiss(),
            },
        }
    }

    fn notify(&mut self, message: &str) {
        self.show(&format!("{}\n[press Enter to continue] ", message));
        self.read_line();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// Replies from a script and records every question.
    struct Scripted {
        answers: VecDeque<Answer>,
        asked: Vec<Decision>,
    }

    impl Scripted {
        fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompt for Scripted {
        fn ask(&mut self, decision: Decision, _message: &str) -> Answer {
            self.asked.push(decision);
            self.answers.pop_front().unwrap_or_else(Answer::dismiss)
        }

        fn notify(&mut self, _message: &str) {}
    }

    #[test]
    fn test_remembered_answer_is_replayed() {
        let mut prompt = Scripted::new([Answer::accept().remembered()]);
        let mut policy = Policy::new(&mut prompt);

        assert_eq!(policy.confirm(Decision::StrayPoint, "a"), Verdict::Accepted);
        assert!(!policy.should_ask(Decision::StrayPoint));
        assert_eq!(policy.confirm(Decision::StrayPoint, "b"), Verdict::Accepted);
        assert_eq!(policy.confirm(Decision::StrayPoint, "c"), Verdict::Accepted);
        drop(policy);
        assert_eq!(prompt.asked, vec![Decision::StrayPoint]);
    }

    #[test]
    fn test_confirmers_are_per_decision() {
        let mut prompt = Scripted::new([Answer::decline().remembered(), Answer::accept()]);
        let mut policy = Policy::new(&mut prompt);

        assert_eq!(policy.confirm(Decision::HiddenItem, "a"), Verdict::Declined);
        assert_eq!(policy.confirm(Decision::HiddenLayer, "b"), Verdict::Accepted);
        assert!(policy.should_ask(Decision::HiddenLayer));
        assert_eq!(policy.confirm(Decision::HiddenItem, "c"), Verdict::Declined);
    }

    #[test]
    fn test_dismissal_does_not_suppress() {
        let mut prompt = Scripted::new([Answer::dismiss().remembered(), Answer::accept()]);
        let mut policy = Policy::new(&mut prompt);

        assert_eq!(policy.confirm(Decision::FilledLine, "a"), Verdict::Dismissed);
        assert!(policy.should_ask(Decision::FilledLine));
        assert_eq!(policy.confirm(Decision::FilledLine, "b"), Verdict::Accepted);
        drop(policy);
        assert_eq!(prompt.asked.len(), 2);
    }

    #[test]
    fn test_plain_answers_keep_asking() {
        let mut prompt = Scripted::new([Answer::accept(), Answer::decline()]);
        let mut policy = Policy::new(&mut prompt);

        assert_eq!(policy.confirm(Decision::ColorlessPath, "a"), Verdict::Accepted);
        assert_eq!(policy.confirm(Decision::ColorlessPath, "b"), Verdict::Declined);
        assert_eq!(policy.confirm(Decision::ColorlessPath, "c"), Verdict::Dismissed);
    }

    #[test]
    fn test_terminal_prompt_replies() {
        let input = Cursor::new("y\nN\nmaybe\n");
        let mut output = Vec::new();
        let mut prompt = TerminalPrompt::new(input, &mut output);

        assert_eq!(prompt.ask(Decision::StrayPoint, "Delete?"), Answer::accept());
        assert_eq!(
            prompt.ask(Decision::StrayPoint, "Delete?"),
            Answer::decline().remembered()
        );
        assert_eq!(prompt.ask(Decision::StrayPoint, "Delete?"), Answer::dismiss());
        // Input exhausted
        assert_eq!(prompt.ask(Decision::StrayPoint, "Delete?"), Answer::dismiss());
        drop(prompt);

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("There are stray points\nDelete? [y/n, Y/N for all]"));
    }

    #[test]
    fn test_auto_prompt_collects_notices() {
        let mut prompt = AutoPrompt::decline_all();
        assert_eq!(prompt.ask(Decision::HiddenItem, "x"), Answer::decline());
        prompt.notify("look at this");
        assert_eq!(prompt.notices(), &["look at this".to_string()]);
    }
}
