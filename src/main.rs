//! Terminal runner (default binary).
//!
//! A tick thread owns the `GameState` and the input sampler and advances the
//! game at a fixed rate. The main thread reads terminal events, forwards them
//! over a channel and redraws whenever the tick thread publishes a newer
//! snapshot.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{debug, info};

use fallblock::core::{EngineConfig, GameSnapshot, GameState, SnapshotSlot};
use fallblock::input::{is_restart, should_quit, IntentSampler};
use fallblock::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Messages from the event loop to the tick thread.
#[derive(Debug, Clone, Copy)]
enum Control {
    Press(KeyCode),
    Release(KeyCode),
    Restart,
    Quit,
}

const EVENT_POLL: Duration = Duration::from_millis(5);

fn main() -> Result<()> {
    init_logging()?;
    let config = EngineConfig::from_env();
    info!("starting with {:?}", config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to the file named by `FALLBLOCK_LOG`; the terminal itself is busy.
fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("FALLBLOCK_LOG") else {
        return Ok(());
    };
    let file =
        std::fs::File::create(&path).with_context(|| format!("failed to create log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn initial_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: EngineConfig) -> Result<()> {
    let slot = Arc::new(SnapshotSlot::new());
    let (tx, rx) = mpsc::channel();

    let ticker = {
        let slot = Arc::clone(&slot);
        thread::Builder::new()
            .name("tick".into())
            .spawn(move || tick_loop(config, initial_seed(), rx, &slot))
            .context("failed to spawn tick thread")?
    };

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut seen = 0u64;
    let mut snap = GameSnapshot::default();
    let mut dirty = true;

    let result = loop {
        if event::poll(EVENT_POLL)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        let msg = if should_quit(key) {
                            Control::Quit
                        } else if is_restart(key) {
                            Control::Restart
                        } else {
                            Control::Press(key.code)
                        };
                        // A closed channel means the tick thread is gone.
                        if tx.send(msg).is_err() || matches!(msg, Control::Quit) {
                            break Ok(());
                        }
                    }
                    KeyEventKind::Release => {
                        let _ = tx.send(Control::Release(key.code));
                    }
                    // Held keys are tracked by the sampler, not terminal auto-repeat.
                    KeyEventKind::Repeat => {}
                },
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if let Some((version, latest)) = slot.latest_since(seen) {
            seen = version;
            snap = latest;
            dirty = true;
        }

        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            if let Err(e) = term.draw_swap(&mut fb) {
                break Err(e);
            }
            dirty = false;
        }
    };

    let _ = tx.send(Control::Quit);
    drop(tx);
    if ticker.join().is_err() {
        anyhow::bail!("tick thread panicked");
    }
    result
}

/// Owns the game. Runs until told to quit or the sender hangs up.
fn tick_loop(config: EngineConfig, seed: u32, rx: Receiver<Control>, slot: &SnapshotSlot) {
    let mut game = GameState::new(config, seed);
    let mut sampler = IntentSampler::new();
    let mut snap = GameSnapshot::default();
    // Monotonic across games; feeds restart seeds.
    let mut ticks: u64 = 0;

    game.snapshot_into(&mut snap);
    slot.publish(&snap);

    let interval = config.tick_interval();
    let mut deadline = Instant::now() + interval;

    loop {
        let mut restarted = false;
        loop {
            match rx.try_recv() {
                Ok(Control::Press(code)) => sampler.handle_key_press(code),
                Ok(Control::Release(code)) => sampler.handle_key_release(code),
                Ok(Control::Restart) => {
                    game.restart(seed.wrapping_add(ticks as u32));
                    sampler.reset();
                    restarted = true;
                }
                Ok(Control::Quit) | Err(TryRecvError::Disconnected) => return,
                Err(TryRecvError::Empty) => break,
            }
        }

        let changed = game.tick(sampler.sample());
        ticks = ticks.wrapping_add(1);

        if let Some(event) = game.take_last_event() {
            debug!(
                "lock: {} line(s), +{}, streak {}",
                event.lines_cleared, event.points, event.tetris_streak
            );
        }

        if changed || restarted {
            game.snapshot_into(&mut snap);
            slot.publish(&snap);
        }

        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
            deadline += interval;
        } else {
            // Fell behind; do not try to catch up with a burst of ticks.
            deadline = now + interval;
        }
    }
}
