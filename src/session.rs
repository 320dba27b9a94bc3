use crate::config::{Config, Mode};
use crate::runtime::Key;
use crate::words::WordSource;
use std::time::SystemTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// One accepted keystroke. The comparison result is stored at write time so
/// backspace never has to re-derive it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Input {
    pub char: char,
    pub outcome: Outcome,
}

/// One typing run against one target text.
///
/// Idle until the first non-whitespace keystroke, running until completion
/// or quit, then finished for good; a restart builds a fresh `Session`.
/// Invariant after every applied event:
/// `typed == correct + mistakes == input.len()`.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub target: String,
    pub target_len: usize,
    pub input: Vec<Input>,
    pub typed: usize,
    pub correct: usize,
    pub mistakes: usize,
    pub started_at: Option<SystemTime>,
    pub ended_at: Option<SystemTime>,
    source: WordSource,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let mut source = WordSource::new(&config);
        let target = source.build_text(&config);
        Self::assemble(config, target, source)
    }

    /// Builds a session over a fixed target instead of a generated one.
    pub fn with_target(config: Config, target: impl Into<String>) -> Self {
        let source = WordSource::new(&config);
        Self::assemble(config, target.into(), source)
    }

    fn assemble(config: Config, target: String, source: WordSource) -> Self {
        let target_len = target.chars().count();
        Self {
            config,
            target,
            target_len,
            input: Vec::new(),
            typed: 0,
            correct: 0,
            mistakes: 0,
            started_at: None,
            ended_at: None,
            source,
        }
    }

    /// Applies one normalized key event. Never fails; out-of-range input is
    /// a no-op. Completion is re-checked after every event.
    pub fn apply(&mut self, key: Key) {
        if self.is_finished() {
            return;
        }
        match key {
            Key::Char(c) => self.write(c),
            Key::Enter => self.write(' '),
            Key::Backspace => self.backspace(),
            Key::Escape => self.quit(),
            Key::Tab | Key::Other => {}
        }
        self.check_completion();
    }

    /// Clock poll for timed sessions; lets them finish with no keystroke.
    pub fn poll(&mut self) {
        if !self.is_finished() {
            self.check_completion();
        }
    }

    fn write(&mut self, c: char) {
        if self.started_at.is_none() && !c.is_whitespace() {
            self.started_at = Some(SystemTime::now());
        }

        if self.input.len() < self.target_len {
            let expected = self.target.chars().nth(self.input.len());
            let outcome = if expected == Some(c) {
                Outcome::Correct
            } else {
                Outcome::Incorrect
            };
            self.input.push(Input { char: c, outcome });
            self.typed += 1;
            match outcome {
                Outcome::Correct => self.correct += 1,
                Outcome::Incorrect => self.mistakes += 1,
            }
        }

        // A timed session that outruns its buffer gets more words rather
        // than ending early.
        if self.config.mode == Mode::Time && self.input.len() >= self.target_len && !self.time_up()
        {
            self.extend_target();
        }
    }

    fn backspace(&mut self) {
        if let Some(popped) = self.input.pop() {
            self.typed -= 1;
            match popped.outcome {
                Outcome::Correct => self.correct -= 1,
                Outcome::Incorrect => self.mistakes -= 1,
            }
        }
    }

    /// Ends the session immediately, whatever the typed length.
    pub fn quit(&mut self) {
        if self.ended_at.is_none() {
            self.ended_at = Some(SystemTime::now());
        }
    }

    fn check_completion(&mut self) {
        let done = match self.config.mode {
            Mode::Words => self.input.len() == self.target_len,
            Mode::Time => self.time_up(),
        };
        if done && self.ended_at.is_none() {
            self.ended_at = Some(SystemTime::now());
        }
    }

    fn time_up(&self) -> bool {
        match self.started_at {
            Some(started) => match started.elapsed() {
                Ok(elapsed) => elapsed.as_secs_f64() >= self.config.seconds as f64,
                Err(_) => false,
            },
            None => false,
        }
    }

    fn extend_target(&mut self) {
        let chunk = self.source.extension();
        self.target_len += 1 + chunk.chars().count();
        self.target.push(' ');
        self.target.push_str(&chunk);
    }

    pub fn cursor(&self) -> usize {
        self.input.len()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.ended_at.is_some()
    }
}
