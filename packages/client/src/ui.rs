//! UI utilities for the client.

use std::{
    io::Write,
    sync::{Arc, Mutex},
};

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

/// Prompt text shared by the readline thread and the event printer
pub type SharedPrompt = Arc<Mutex<String>>;

/// `name@room> ` or `name> ` when not in a room
pub fn prompt_for(name: &str, room: Option<&str>) -> String {
    match room {
        Some(room) => format!("{}@{}> ", name, room),
        None => format!("{}> ", name),
    }
}

pub fn set_prompt(prompt: &SharedPrompt, value: String) {
    if let Ok(mut current) = prompt.lock() {
        *current = value;
    }
}

pub fn current_prompt(prompt: &SharedPrompt) -> String {
    prompt
        .lock()
        .map(|current| current.clone())
        .unwrap_or_default()
}

/// Redisplay the prompt after printing an incoming event
pub fn redisplay_prompt(prompt: &SharedPrompt) {
    print!("{}", current_prompt(prompt));
    std::io::stdout().flush().ok();
}

/// Reads lines on a dedicated thread (rustyline is synchronous).
///
/// The receiver yields trimmed, non-empty lines and closes on Ctrl+C / Ctrl+D.
pub fn spawn_readline(prompt: SharedPrompt) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&current_prompt(&prompt)) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
