use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use client_logging::client_info;
use sitecopy_core::{update, AppState, Msg, Phase};

use crate::config::ClientConfig;
use crate::effects::EffectRunner;
use crate::ui;

/// Render tick cadence. `NOTICE_TICKS` of these make the 5 s notice window.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Everything the dispatch loop can receive.
pub(crate) enum Event {
    /// A state-machine message from a timer, the service pump, or the loop.
    Core(Msg),
    /// One line typed by the user; interpreted against the current phase.
    Line(String),
    /// Stdin closed; leave the loop.
    Quit,
}

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<Event>();
    let mut runner =
        EffectRunner::new(&config, event_tx.clone()).context("initialize the service client")?;

    client_info!("Sitecopy client targeting {}", config.service_url);
    spawn_tick_thread(event_tx.clone());
    spawn_input_thread(event_tx);

    let mut state = AppState::new();
    ui::print(&ui::render::render(&state.view()));

    let mut poll_ticks: u64 = 0;
    for event in event_rx {
        let msgs = match event {
            Event::Quit => break,
            Event::Line(line) => interpret_line(&state, line),
            Event::Core(msg) => vec![msg],
        };

        for msg in msgs {
            if matches!(msg, Msg::PollTick) {
                poll_ticks += 1;
                client_logging::set_poll_tick(poll_ticks);
            }
            let (next, effects) = update(std::mem::take(&mut state), msg);
            state = next;
            runner.run(effects);
            if state.consume_dirty() {
                ui::print(&ui::render::render(&state.view()));
            }
        }
    }

    client_info!("Sitecopy client exiting");
    Ok(())
}

fn interpret_line(state: &AppState, line: String) -> Vec<Msg> {
    match state.view().phase {
        Phase::Form => vec![Msg::InputChanged(line), Msg::CopySubmitted],
        Phase::Progress => match line.trim() {
            "n" => vec![Msg::NewCopyClicked],
            _ => Vec::new(),
        },
        Phase::Result => match line.trim() {
            "d" => vec![Msg::DownloadClicked],
            "p" => vec![Msg::PreviewClicked],
            "n" => vec![Msg::NewCopyClicked],
            _ => Vec::new(),
        },
    }
}

// Background tick to expire notices and coalesce rendering.
fn spawn_tick_thread(event_tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        while event_tx.send(Event::Core(Msg::Tick)).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });
}

fn spawn_input_thread(event_tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(text) => {
                    if event_tx.send(Event::Line(text)).is_err() {
                        return;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = event_tx.send(Event::Quit);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_lines_are_submitted_as_urls() {
        let state = AppState::new();
        let msgs = interpret_line(&state, "https://example.com".to_string());
        assert_eq!(
            msgs,
            vec![
                Msg::InputChanged("https://example.com".to_string()),
                Msg::CopySubmitted,
            ]
        );
    }

    #[test]
    fn unknown_keys_are_ignored_outside_the_form() {
        let state = AppState::new();
        let (state, _) = update(state, Msg::InputChanged("https://example.com".to_string()));
        let (state, _) = update(state, Msg::CopySubmitted);
        let (state, _) = update(
            state,
            Msg::SubmitFinished {
                result: Ok("abc".to_string()),
            },
        );
        assert_eq!(state.view().phase, Phase::Progress);

        assert!(interpret_line(&state, "x".to_string()).is_empty());
        assert_eq!(
            interpret_line(&state, " n ".to_string()),
            vec![Msg::NewCopyClicked]
        );
    }
}
