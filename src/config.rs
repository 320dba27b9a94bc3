use clap::ValueEnum;

/// Floor applied to `--seconds`; anything lower is clamped up.
pub const MIN_SECONDS: u64 = 5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Time,
    Words,
}

/// Immutable per-session settings, built once from the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub seconds: u64,
    pub words: usize,
    pub numbers: bool,
    pub punctuation: bool,
    pub seed: Option<u64>,
}

impl Config {
    pub fn new(
        mode: Mode,
        seconds: u64,
        words: usize,
        numbers: bool,
        punctuation: bool,
        seed: Option<u64>,
    ) -> Self {
        Self {
            mode,
            seconds: seconds.max(MIN_SECONDS),
            words: words.max(1),
            numbers,
            punctuation,
            seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Time,
            seconds: 60,
            words: 50,
            numbers: false,
            punctuation: false,
            seed: None,
        }
    }
}
