//! Direct text entry for the picker value.

use crate::error::{PickerError, Result};

/// Edit buffer for the value field. `None` while not editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    buffer: Option<String>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.buffer.is_some()
    }

    /// Start editing with the current value as text.
    pub fn begin(&mut self, value: i32) {
        self.buffer = Some(value.to_string());
    }

    /// Accept digits anywhere and a minus sign only as the first character.
    pub fn input(&mut self, c: char) -> bool {
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };
        let accepted = c.is_ascii_digit() || (c == '-' && buffer.is_empty());
        if accepted {
            buffer.push(c);
        }
        accepted
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.pop();
        }
    }

    /// Stop editing and discard the buffer.
    pub fn cancel(&mut self) {
        self.buffer = None;
    }

    /// Stop editing and parse the buffer.
    ///
    /// Empty input yields `Ok(None)`, meaning "keep the current value".
    pub fn commit(&mut self) -> Result<Option<i32>> {
        let Some(text) = self.buffer.take() else {
            return Ok(None);
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        text.parse::<i32>()
            .map(Some)
            .map_err(|_| PickerError::InvalidNumber(text.to_string()))
    }

    /// Text to display: the buffer while editing, otherwise `value`.
    pub fn display(&self, value: i32) -> String {
        match &self.buffer {
            Some(buffer) => buffer.clone(),
            None => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_filters_characters() {
        let mut field = TextField::new();
        assert!(!field.input('1'));

        field.begin(12);
        field.backspace();
        field.backspace();
        assert!(field.input('-'));
        assert!(field.input('4'));
        assert!(!field.input('-'));
        assert!(!field.input('a'));
        assert_eq!(field.display(0), "-4");
        assert_eq!(field.commit().unwrap(), Some(-4));
        assert!(!field.is_editing());
    }

    #[test]
    fn test_commit_empty_keeps_value() {
        let mut field = TextField::new();
        field.begin(7);
        field.backspace();
        assert_eq!(field.commit().unwrap(), None);
        assert_eq!(field.display(7), "7");
    }

    #[test]
    fn test_commit_rejects_non_integer() {
        let mut field = TextField::new();
        field.begin(0);
        field.backspace();
        field.input('-');
        let err = field.commit().unwrap_err();
        assert!(matches!(err, PickerError::InvalidNumber(ref s) if s == "-"));
        assert!(!field.is_editing());
    }

    #[test]
    fn test_commit_rejects_overflow() {
        let mut field = TextField::new();
        field.begin(99999);
        for c in "999999".chars() {
            field.input(c);
        }
        assert!(field.commit().is_err());
    }
}
