use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io;

pub const PROMPT_HINT: &str = "Dapatkan API key di Bot Telegram @fyxt_bot";
pub const PROMPT_LABEL: &str = "Masukkan API key: ";

/// Seam for interactive key entry so the orchestrator stays testable.
/// `Ok(None)` means the user ended input (EOF or interrupt).
pub trait PromptInput {
    fn read_key(&mut self) -> io::Result<Option<String>>;
}

/// Console prompt backed by rustyline.
pub struct ConsolePrompt;

impl PromptInput for ConsolePrompt {
    fn read_key(&mut self) -> io::Result<Option<String>> {
        let mut editor = DefaultEditor::new()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

        println!("{}", PROMPT_HINT);
        match editor.readline(PROMPT_LABEL) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        }
    }
}
