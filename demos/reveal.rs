//! Reveal Demo - scroll the phrases into view and watch the reels land
//!
//! - Mouse wheel, arrow keys, PageUp/PageDown, Home/End scroll the page
//! - `r` rotates the phrase list (new mask, new animation)
//! - `q`, Esc or Ctrl+C quits
//!
//! Set `SLOT_REVEAL_CONFIG=path/to/config.json` to load a [`RevealConfig`],
//! and `RUST_LOG=debug` to see lifecycle logs on stderr.
//!
//! Run with: cargo run --example reveal

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use slot_reveal::{DiffRenderer, RevealConfig, RevealProps, SlotReveal, Viewport};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> slot_reveal::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match std::env::var_os("SLOT_REVEAL_CONFIG") {
        Some(path) => RevealConfig::load(path)?,
        None => RevealConfig::default(),
    };

    let mut reveal = SlotReveal::mount(RevealProps {
        config,
        ..Default::default()
    });

    let mut stdout = io::stdout();
    let mut renderer = DiffRenderer::new();
    enable_raw_mode()?;
    execute!(stdout, EnableMouseCapture)?;
    renderer.enter_fullscreen(&mut stdout)?;

    let result = run(&mut reveal, &mut renderer, &mut stdout);

    renderer.exit_fullscreen(&mut stdout)?;
    execute!(stdout, DisableMouseCapture)?;
    disable_raw_mode()?;
    reveal.unmount();
    result
}

fn run<W: Write>(
    reveal: &mut SlotReveal,
    renderer: &mut DiffRenderer,
    out: &mut W,
) -> slot_reveal::Result<()> {
    let (width, height) = terminal::size()?;
    let mut viewport = Viewport::new(width, height);
    reveal.render(viewport)?;

    let mut last = Instant::now();
    loop {
        if event::poll(FRAME)? {
            let page = viewport.height as i32;
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if is_quit(&key) {
                        return Ok(());
                    }
                    match key.code {
                        KeyCode::Up | KeyCode::Char('k') => reveal.scroll_by(-1),
                        KeyCode::Down | KeyCode::Char('j') => reveal.scroll_by(1),
                        KeyCode::PageUp => reveal.scroll_by(-page),
                        KeyCode::PageDown | KeyCode::Char(' ') => reveal.scroll_by(page),
                        KeyCode::Home => reveal.scroll_to(0),
                        KeyCode::End => reveal.scroll_to(u16::MAX),
                        KeyCode::Char('r') => {
                            let mut phrases = reveal.phrases();
                            phrases.rotate_left(1);
                            reveal.set_phrases(phrases);
                            reveal.render(viewport)?;
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => reveal.scroll_by(-2),
                    MouseEventKind::ScrollDown => reveal.scroll_by(2),
                    _ => {}
                },
                Event::Resize(width, height) => {
                    viewport = Viewport::new(width, height);
                    reveal.render(viewport)?;
                    renderer.invalidate();
                }
                _ => {}
            }
        }

        let now = Instant::now();
        reveal.tick(now.duration_since(last).as_secs_f32());
        last = now;

        renderer.render(out, &reveal.frame())?;
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
