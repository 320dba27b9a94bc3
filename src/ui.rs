use std::collections::HashSet;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    config::{Config, Mode},
    keyboard,
    metrics::Metrics,
    render::{self, CellStyle},
    session::Session,
    wrap::wrap,
};

/// Left/right gutter around the text band, in columns
const TEXT_MARGIN: u16 = 1;
/// Minimum terminal height before the keyboard overlay is drawn
const KEYBOARD_MIN_HEIGHT: u16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

/// Rendering-layer state: the live session plus the key-cap highlight set,
/// which is owned here and replaced on every key event.
#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub session: Session,
    pub state: AppState,
    pub highlight: HashSet<String>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            session: Session::new(config.clone()),
            config,
            state: AppState::Typing,
            highlight: HashSet::new(),
        }
    }

    /// Swaps in a fresh session with the same settings. A fixed seed
    /// reproduces the same text; otherwise a new draw.
    pub fn restart(&mut self) {
        self.session = Session::new(self.config.clone());
        self.state = AppState::Typing;
        self.highlight.clear();
    }
}

fn style_for(style: CellStyle) -> Style {
    match style {
        CellStyle::Base => Style::default().add_modifier(Modifier::DIM),
        CellStyle::Correct => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        CellStyle::Incorrect => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        CellStyle::Caret => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 * TEXT_MARGIN + 2 || area.height < 6 {
            return;
        }

        let dim = Style::default().add_modifier(Modifier::DIM);
        let text_width = (area.width - 2 * TEXT_MARGIN).max(1) as usize;
        let show_keyboard = area.height >= KEYBOARD_MIN_HEIGHT;
        let kb_height = if show_keyboard {
            keyboard::ROWS.len() as u16 + 1
        } else {
            0
        };
        let band_rows = area.height.saturating_sub(kb_height + 5).max(3);

        buf.set_stringn(
            area.x + TEXT_MARGIN,
            area.y,
            "typr  |  esc quit  tab restart",
            text_width,
            dim,
        );

        // Wrapping is recomputed per frame, so a resize or an extended
        // target is always reflected.
        let layout = wrap(&self.session.target, text_width);
        let plan = render::plan(&layout, &self.session.input, band_rows as usize);
        let band_top = area.y + 2;
        for op in &plan.ops {
            let y = band_top + op.row as u16;
            let x = area.x + TEXT_MARGIN + op.col as u16;
            if y < band_top + band_rows && x < area.right() {
                let room = (area.right() - x) as usize;
                buf.set_stringn(x, y, &op.text, room, style_for(op.style));
            }
        }

        let metrics = Metrics::snapshot(&self.session);
        let status = match self.config.mode {
            Mode::Time => {
                let remaining = (self.config.seconds as f64 - metrics.elapsed_secs).max(0.0);
                format!(
                    "mode: time   left: {:3.0}s   wpm: {:5.1}   acc: {:5.1}%",
                    remaining,
                    metrics.raw_wpm,
                    metrics.accuracy * 100.0
                )
            }
            Mode::Words => format!(
                "mode: words  words: {}   wpm: {:5.1}   acc: {:5.1}%",
                self.config.words,
                metrics.raw_wpm,
                metrics.accuracy * 100.0
            ),
        };
        buf.set_stringn(
            area.x + TEXT_MARGIN,
            area.bottom() - 2,
            &status,
            text_width,
            dim,
        );

        if show_keyboard {
            let kb_top = band_top + band_rows + 1;
            render_keyboard(buf, area, kb_top, &self.highlight);
        }

        if self.state == AppState::Results {
            let done = format!(
                "done: {:.1} wpm   {:.1}% accuracy   {:.1}s",
                metrics.raw_wpm,
                metrics.accuracy * 100.0,
                metrics.elapsed_secs
            );
            buf.set_stringn(area.x + TEXT_MARGIN, area.bottom() - 4, &done, text_width, dim);
            buf.set_stringn(
                area.x + TEXT_MARGIN,
                area.bottom() - 3,
                "press r to restart, q to quit",
                text_width,
                dim,
            );
        }
    }
}

fn render_keyboard(buf: &mut Buffer, area: Rect, top: u16, highlight: &HashSet<String>) {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let lit = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    for (i, row) in keyboard::ROWS.iter().enumerate() {
        let y = top + i as u16;
        if y >= area.bottom().saturating_sub(2) {
            break;
        }

        let labels: Vec<String> = row.iter().map(|cap| format!("[{cap}]")).collect();
        let row_text = labels.join(" ");
        let total = row_text.width() as u16;
        let x0 = area.x + ((area.width.saturating_sub(total)) / 2).max(1);

        buf.set_stringn(x0, y, &row_text, area.width as usize, dim);

        let mut x = x0;
        for (cap, label) in row.iter().zip(&labels) {
            if highlight.contains(*cap) {
                buf.set_stringn(x, y, label, area.width as usize, lit);
            }
            x += label.width() as u16 + 1;
        }
    }
}
