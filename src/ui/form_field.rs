//! Reusable form field widgets for the wizard

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::application::FieldValue;

/// A selectable option: wire code and display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub code: String,
    pub label: String,
}

impl Choice {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// A form field widget that can handle different input types
#[derive(Debug, Clone)]
pub enum FormField {
    /// Single-line text input
    TextInput {
        value: String,
        cursor_pos: usize,
        placeholder: String,
        max_length: Option<usize>,
    },
    /// One option out of a fixed list; nothing chosen initially
    Select {
        options: Vec<Choice>,
        selected: Option<usize>,
        placeholder: String,
    },
    /// Checkbox
    Toggle { checked: bool },
}

impl FormField {
    pub fn text(placeholder: &str, max_length: Option<usize>) -> Self {
        FormField::TextInput {
            value: String::new(),
            cursor_pos: 0,
            placeholder: placeholder.to_string(),
            max_length,
        }
    }

    pub fn select(options: Vec<Choice>, placeholder: &str) -> Self {
        FormField::Select {
            options,
            selected: None,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn toggle() -> Self {
        FormField::Toggle { checked: false }
    }

    /// Current value in draft form
    pub fn value(&self) -> FieldValue {
        match self {
            FormField::TextInput { value, .. } => FieldValue::Text(value.clone()),
            FormField::Select {
                options, selected, ..
            } => FieldValue::Text(
                selected
                    .and_then(|i| options.get(i))
                    .map(|choice| choice.code.clone())
                    .unwrap_or_default(),
            ),
            FormField::Toggle { checked } => FieldValue::Flag(*checked),
        }
    }

    /// Set the value from a draft value, ignoring mismatched kinds
    pub fn set_value(&mut self, new_value: &FieldValue) {
        match (self, new_value) {
            (
                FormField::TextInput {
                    value,
                    cursor_pos,
                    max_length,
                    ..
                },
                FieldValue::Text(text),
            ) => {
                *value = match max_length {
                    Some(max) => text.chars().take(*max).collect(),
                    None => text.clone(),
                };
                *cursor_pos = value.chars().count();
            }
            (
                FormField::Select {
                    options, selected, ..
                },
                FieldValue::Text(code),
            ) => {
                *selected = options.iter().position(|o| o.code == *code);
            }
            (FormField::Toggle { checked }, FieldValue::Flag(flag)) => *checked = *flag,
            _ => {}
        }
    }

    /// Handle a key event, returns true if the value changed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                max_length,
                ..
            } => {
                let len = value.chars().count();
                match key {
                    KeyCode::Char(c) => {
                        if max_length.map_or(true, |m| len < m) {
                            let idx = byte_index(value, *cursor_pos);
                            value.insert(idx, c);
                            *cursor_pos += 1;
                            return true;
                        }
                        false
                    }
                    KeyCode::Backspace if *cursor_pos > 0 => {
                        *cursor_pos -= 1;
                        let idx = byte_index(value, *cursor_pos);
                        value.remove(idx);
                        true
                    }
                    KeyCode::Delete if *cursor_pos < len => {
                        let idx = byte_index(value, *cursor_pos);
                        value.remove(idx);
                        true
                    }
                    KeyCode::Left => {
                        *cursor_pos = cursor_pos.saturating_sub(1);
                        false
                    }
                    KeyCode::Right => {
                        *cursor_pos = (*cursor_pos + 1).min(len);
                        false
                    }
                    KeyCode::Home => {
                        *cursor_pos = 0;
                        false
                    }
                    KeyCode::End => {
                        *cursor_pos = len;
                        false
                    }
                    _ => false,
                }
            }
            FormField::Select {
                options, selected, ..
            } => {
                if options.is_empty() {
                    return false;
                }
                let last = options.len() - 1;
                let next = match (key, *selected) {
                    (KeyCode::Right | KeyCode::Char('l' | ' '), None) => Some(0),
                    (KeyCode::Right | KeyCode::Char('l' | ' '), Some(i)) => Some((i + 1).min(last)),
                    (KeyCode::Left | KeyCode::Char('h'), None) => Some(last),
                    (KeyCode::Left | KeyCode::Char('h'), Some(i)) => Some(i.saturating_sub(1)),
                    _ => return false,
                };
                let changed = next != *selected;
                *selected = next;
                changed
            }
            FormField::Toggle { checked } => match key {
                KeyCode::Char(' ') => {
                    *checked = !*checked;
                    true
                }
                _ => false,
            },
        }
    }

    /// Render the field
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let text_style = Style::default().fg(if focused { Color::White } else { Color::Gray });
        let hint = Style::default().fg(Color::DarkGray);

        let line = match self {
            FormField::TextInput {
                value,
                cursor_pos,
                placeholder,
                max_length,
            } => {
                if value.is_empty() && !focused {
                    Line::from(Span::styled(placeholder.as_str(), hint))
                } else {
                    let mut text = value.clone();
                    if focused {
                        text.insert(byte_index(&text, *cursor_pos), '|');
                    }
                    let suffix = max_length
                        .map(|m| format!(" ({}/{})", value.chars().count(), m))
                        .unwrap_or_default();
                    Line::from(vec![Span::styled(text, text_style), Span::styled(suffix, hint)])
                }
            }
            FormField::Select {
                options,
                selected,
                placeholder,
            } => {
                let arrows = if focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    hint
                };
                match selected.and_then(|i| options.get(i)) {
                    Some(choice) => Line::from(vec![
                        Span::styled("< ", arrows),
                        Span::styled(
                            choice.label.as_str(),
                            text_style.add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(" >", arrows),
                    ]),
                    None => Line::from(vec![
                        Span::styled("< ", arrows),
                        Span::styled(placeholder.as_str(), hint),
                        Span::styled(" >", arrows),
                    ]),
                }
            }
            FormField::Toggle { checked } => {
                let (mark, style) = if *checked {
                    ("[x]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
                } else {
                    ("[ ]", text_style)
                };
                Line::from(Span::styled(mark, style))
            }
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn byte_index(value: &str, char_pos: usize) -> usize {
    value
        .char_indices()
        .nth(char_pos)
        .map_or(value.len(), |(i, _)| i)
}
