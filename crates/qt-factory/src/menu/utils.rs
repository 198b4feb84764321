use dialoguer::console::{Key, Term};
use dialoguer::theme::{ColorfulTheme, Theme};
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Submit(String),
    Cancel,
}

/// Single-line editor state. Enter submits, Esc cancels.
#[derive(Debug, Default)]
pub struct LineEditor {
    buf: Vec<char>,
}

impl LineEditor {
    pub fn new(initial: &str) -> Self {
        Self {
            buf: initial.chars().collect(),
        }
    }

    pub fn text(&self) -> String {
        self.buf.iter().collect()
    }

    /// Applies one key. Returns the terminal echo for edits, or the final
    /// event for Enter / Esc.
    pub fn apply(&mut self, key: Key) -> Result<Echo, LineEvent> {
        match key {
            Key::Enter => Err(LineEvent::Submit(self.text())),
            Key::Escape => Err(LineEvent::Cancel),
            Key::Char(c) if !c.is_control() => {
                self.buf.push(c);
                Ok(Echo::Insert(c))
            }
            Key::Backspace if !self.buf.is_empty() => {
                self.buf.pop();
                Ok(Echo::Erase)
            }
            _ => Ok(Echo::Nothing),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    Insert(char),
    Erase,
    Nothing,
}

/// Reads one line from the terminal with the dialoguer look.
///
/// Ctrl+C surfaces as an `Interrupted` io error, like dialoguer's prompts.
pub fn read_text(prompt: &str, initial: &str) -> io::Result<LineEvent> {
    let term = Term::stderr();
    if !term.is_term() {
        return Err(io::Error::new(io::ErrorKind::NotConnected, "not a terminal"));
    }

    let theme = ColorfulTheme::default();
    let mut header = String::new();
    theme
        .format_input_prompt(&mut header, prompt, None)
        .map_err(|_| io::Error::other("prompt formatting failed"))?;

    let mut editor = LineEditor::new(initial);
    term.write_str(&header)?;
    term.write_str(initial)?;
    term.flush()?;

    loop {
        match editor.apply(term.read_key()?) {
            Ok(Echo::Insert(c)) => term.write_str(c.encode_utf8(&mut [0; 4]))?,
            Ok(Echo::Erase) => term.clear_chars(1)?,
            Ok(Echo::Nothing) => continue,
            Err(event) => {
                term.write_line("")?;
                return Ok(event);
            }
        }
        term.flush()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(editor: &mut LineEditor, keys: Vec<Key>) -> Option<LineEvent> {
        for key in keys {
            if let Err(event) = editor.apply(key) {
                return Some(event);
            }
        }
        None
    }

    #[test]
    fn enter_submits_edited_text() {
        let mut ed = LineEditor::new("1-5");
        let event = feed(
            &mut ed,
            vec![Key::Backspace, Key::Char('7'), Key::Char(','), Key::Char('9'), Key::Enter],
        );
        assert_eq!(event, Some(LineEvent::Submit("1-7,9".into())));
    }

    #[test]
    fn escape_cancels() {
        let mut ed = LineEditor::new("");
        let event = feed(&mut ed, vec![Key::Char('h'), Key::Escape, Key::Char('x')]);
        assert_eq!(event, Some(LineEvent::Cancel));
        assert_eq!(ed.text(), "h");
    }

    #[test]
    fn backspace_on_empty_and_arrows_are_ignored() {
        let mut ed = LineEditor::default();
        assert_eq!(ed.apply(Key::Backspace), Ok(Echo::Nothing));
        assert_eq!(ed.apply(Key::ArrowLeft), Ok(Echo::Nothing));
        assert_eq!(ed.apply(Key::Char('\u{7}')), Ok(Echo::Nothing));
        assert_eq!(ed.apply(Key::Char('é')), Ok(Echo::Insert('é')));
    }
}
