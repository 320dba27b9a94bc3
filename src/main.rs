use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use typr::{
    config::{Config, Mode},
    keyboard,
    metrics::Metrics,
    runtime::{CrosstermEventSource, FixedTicker, Key, Runner, TyprEvent},
    session::Session,
    ui::{App, AppState},
    wrap::wrap,
};

const TICK_RATE_MS: u64 = 100;

/// terminal typing practice with live wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// practice mode: run for a fixed time or a fixed word count
    #[clap(short, long, value_enum, default_value_t = Mode::Time)]
    mode: Mode,

    /// seconds for time mode (clamped up to at least 5)
    #[clap(short, long, default_value_t = 60)]
    seconds: u64,

    /// word count for words mode (at least 1)
    #[clap(short, long, default_value_t = 50)]
    words: usize,

    /// include digits 0-9 in the word pool
    #[clap(short, long)]
    numbers: bool,

    /// include basic punctuation in the word pool
    #[clap(short, long)]
    punctuation: bool,

    /// random seed for reproducible word sequences
    #[clap(long)]
    seed: Option<u64>,

    /// run a non-interactive self-check and exit
    #[clap(long)]
    check: bool,
}

impl Cli {
    fn to_config(&self) -> Config {
        Config::new(
            self.mode,
            self.seconds,
            self.words,
            self.numbers,
            self.punctuation,
            self.seed,
        )
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.check {
        std::process::exit(self_check());
    }

    if !stdin().is_tty() {
        eprintln!("typr needs an interactive terminal; run it from a real shell, not a pipe.");
        std::process::exit(1);
    }

    let config = cli.to_config();
    if let Err(err) = run(config) {
        eprintln!("terminal error: {err}");
        eprintln!("make sure TERM is set and you are running in a real terminal.");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, App::new(config));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| f.render_widget(&app, f.area()))?;

    loop {
        match runner.step() {
            TyprEvent::Tick => {
                // Timed sessions end on the clock, not on a keystroke
                app.session.poll();
                if app.session.is_finished() && app.state == AppState::Typing {
                    app.state = AppState::Results;
                }
                if app.session.has_started() {
                    terminal.draw(|f| f.render_widget(&app, f.area()))?;
                }
            }
            TyprEvent::Resize => {
                terminal.draw(|f| f.render_widget(&app, f.area()))?;
            }
            TyprEvent::Key(key) => {
                app.highlight = keyboard::pressed_tokens(&key);

                match app.state {
                    AppState::Typing => match key {
                        Key::Tab => app.restart(),
                        Key::Escape => {
                            app.session.apply(key);
                            break;
                        }
                        key => {
                            app.session.apply(key);
                            if app.session.is_finished() {
                                app.state = AppState::Results;
                            }
                        }
                    },
                    AppState::Results => match key {
                        Key::Char('r') | Key::Char('R') | Key::Tab => app.restart(),
                        Key::Char('q') | Key::Char('Q') | Key::Escape => break,
                        _ => {}
                    },
                }

                terminal.draw(|f| f.render_widget(&app, f.area()))?;
            }
        }
    }

    Ok(())
}

/// Non-interactive validation for CI and sandboxes without a TTY: build a
/// seeded timed text, wrap it, type a prefix, and confirm the derived
/// metrics are sane.
fn self_check() -> i32 {
    let config = Config::new(Mode::Time, 10, 20, true, true, Some(42));
    let mut session = Session::new(config);

    let layout = wrap(&session.target, 20);
    if layout.lines.is_empty() {
        eprintln!("check failed: wrap produced no lines");
        return 1;
    }

    let prefix: String = session.target.chars().take(30).collect();
    for c in prefix.chars() {
        session.apply(Key::Char(c));
    }
    session.quit();

    let metrics = Metrics::snapshot(&session);
    if !metrics.raw_wpm.is_finite() || metrics.raw_wpm < 0.0 {
        eprintln!("check failed: wpm {}", metrics.raw_wpm);
        return 1;
    }

    println!(
        "check ok: wpm {:.1}, accuracy {:.1}%",
        metrics.raw_wpm,
        metrics.accuracy * 100.0
    );
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["typr"]);

        assert_eq!(cli.mode, Mode::Time);
        assert_eq!(cli.seconds, 60);
        assert_eq!(cli.words, 50);
        assert!(!cli.numbers);
        assert!(!cli.punctuation);
        assert_eq!(cli.seed, None);
        assert!(!cli.check);
    }

    #[test]
    fn test_cli_mode_parsing() {
        let cli = Cli::parse_from(["typr", "--mode", "words"]);
        assert_eq!(cli.mode, Mode::Words);

        let cli = Cli::parse_from(["typr", "-m", "time"]);
        assert_eq!(cli.mode, Mode::Time);
    }

    #[test]
    fn test_cli_invalid_mode_rejected() {
        assert!(Cli::try_parse_from(["typr", "--mode", "sprint"]).is_err());
    }

    #[test]
    fn test_cli_numeric_options() {
        let cli = Cli::parse_from(["typr", "--seconds", "30", "--words", "10", "--seed", "7"]);

        assert_eq!(cli.seconds, 30);
        assert_eq!(cli.words, 10);
        assert_eq!(cli.seed, Some(7));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["typr", "--numbers", "--punctuation", "--check"]);

        assert!(cli.numbers);
        assert!(cli.punctuation);
        assert!(cli.check);
    }

    #[test]
    fn test_to_config_applies_clamps() {
        let cli = Cli::parse_from(["typr", "--seconds", "1", "--words", "0"]);
        let config = cli.to_config();

        assert_eq!(config.seconds, 5);
        assert_eq!(config.words, 1);
    }

    #[test]
    fn test_self_check_passes() {
        assert_eq!(self_check(), 0);
    }

    #[test]
    fn test_tick_rate_constant() {
        const _: () = assert!(TICK_RATE_MS > 0);
        const _: () = assert!(TICK_RATE_MS <= 1000);
    }
}
