use crate::config::{Config, Mode};
use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::from_str;

static LANG_DIR: Dir = include_dir!("src/lang");

/// Digit tokens mixed into the pool with `--numbers`
const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Punctuation tokens mixed into the pool with `--punctuation`
const PUNCTUATION: [&str; 17] = [
    ",", ".", "!", "?", ":", ";", "'", "\"", "-", "(", ")", "[", "]", "{", "}", "/", "\\",
];

/// How many extra words are appended when a timed session outruns its buffer
pub const EXTEND_WORDS: usize = 50;

/// Upper-bound typing speed the initial time-mode buffer is sized for
const BUFFER_WPM: f64 = 300.0;

#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn english() -> Self {
        let file = LANG_DIR
            .get_file("english.json")
            .expect("embedded word list missing");
        let contents = file
            .contents_utf8()
            .expect("embedded word list is not utf-8");
        from_str(contents).expect("embedded word list failed to parse")
    }
}

/// Seedable uniform word generator over the configured vocabulary.
#[derive(Debug)]
pub struct WordSource {
    vocabulary: Vec<String>,
    rng: StdRng,
}

impl WordSource {
    pub fn new(config: &Config) -> Self {
        let mut vocabulary = Language::english().words;
        if config.numbers {
            vocabulary.extend(DIGITS.iter().map(|s| s.to_string()));
        }
        if config.punctuation {
            vocabulary.extend(PUNCTUATION.iter().map(|s| s.to_string()));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { vocabulary, rng }
    }

    /// Draws `count` words uniformly with replacement. `count == 0` yields
    /// an empty sequence.
    pub fn generate(&mut self, count: usize) -> Vec<String> {
        (0..count)
            .map(|_| {
                self.vocabulary
                    .choose(&mut self.rng)
                    .cloned()
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Builds the initial target text for a session. Words mode is sized
    /// exactly; time mode over-provisions so the buffer outlasts a fast
    /// typist for the configured duration.
    pub fn build_text(&mut self, config: &Config) -> String {
        let count = match config.mode {
            Mode::Words => config.words,
            Mode::Time => initial_word_count(config.seconds),
        };
        self.generate(count).iter().join(" ")
    }

    /// Returns a chunk to append when a timed session reaches the buffer end.
    pub fn extension(&mut self) -> String {
        self.generate(EXTEND_WORDS).iter().join(" ")
    }
}

fn initial_word_count(seconds: u64) -> usize {
    let estimate = (seconds as f64 / 60.0) * BUFFER_WPM;
    (estimate as usize).max(EXTEND_WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config(seed: u64) -> Config {
        Config {
            seed: Some(seed),
            ..Config::default()
        }
    }

    #[test]
    fn test_language_english_loads() {
        let lang = Language::english();

        assert_eq!(lang.name, "english");
        assert!(!lang.words.is_empty());
        assert_eq!(lang.size as usize, lang.words.len());
    }

    #[test]
    fn test_generate_zero_is_empty() {
        let mut source = WordSource::new(&seeded_config(1));
        assert!(source.generate(0).is_empty());
    }

    #[test]
    fn test_generate_count() {
        let mut source = WordSource::new(&seeded_config(1));
        assert_eq!(source.generate(7).len(), 7);
    }

    #[test]
    fn test_same_seed_reproduces_sequence() {
        let config = Config::new(Mode::Words, 60, 5, false, false, Some(1));

        let a = WordSource::new(&config).generate(5);
        let b = WordSource::new(&config).generate(5);

        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = WordSource::new(&seeded_config(1)).generate(20);
        let b = WordSource::new(&seeded_config(2)).generate(20);

        // Twenty uniform draws over hundreds of words colliding entirely
        // would mean the seed is being ignored.
        assert_ne!(a, b);
    }

    #[test]
    fn test_words_mode_text_sized_exactly() {
        let config = Config::new(Mode::Words, 60, 12, false, false, Some(3));
        let mut source = WordSource::new(&config);

        let text = source.build_text(&config);

        assert_eq!(text.split(' ').count(), 12);
        assert!(!text.starts_with(' '));
        assert!(!text.ends_with(' '));
    }

    #[test]
    fn test_time_mode_text_over_provisioned() {
        let config = Config::new(Mode::Time, 60, 50, false, false, Some(3));
        let mut source = WordSource::new(&config);

        let text = source.build_text(&config);

        // 60s at the 300wpm bound -> 300 words
        assert_eq!(text.split(' ').count(), 300);
    }

    #[test]
    fn test_initial_word_count_floor() {
        // Short durations still get at least one extension-sized chunk
        assert_eq!(initial_word_count(5), 50);
        assert_eq!(initial_word_count(60), 300);
        assert_eq!(initial_word_count(120), 600);
    }

    #[test]
    fn test_extension_size() {
        let mut source = WordSource::new(&seeded_config(9));
        let chunk = source.extension();

        assert_eq!(chunk.split(' ').count(), EXTEND_WORDS);
    }

    #[test]
    fn test_numbers_flag_widens_pool() {
        let config = Config::new(Mode::Time, 60, 50, true, false, Some(4));
        let mut source = WordSource::new(&config);

        let words = source.generate(2000);
        assert!(words.iter().any(|w| w.chars().all(|c| c.is_ascii_digit())));
    }

    #[test]
    fn test_punctuation_flag_widens_pool() {
        let config = Config::new(Mode::Time, 60, 50, false, true, Some(4));
        let mut source = WordSource::new(&config);

        let words = source.generate(2000);
        assert!(words.iter().any(|w| PUNCTUATION.contains(&w.as_str())));
    }

    #[test]
    fn test_plain_pool_has_no_digit_tokens() {
        let config = Config::new(Mode::Time, 60, 50, false, false, Some(4));
        let mut source = WordSource::new(&config);

        let words = source.generate(2000);
        assert!(!words.iter().any(|w| DIGITS.contains(&w.as_str())));
    }
}
