// Terminal input wiring - Lines become page events
use crate::domain::prediction::FormField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// `field=value` sets a control to everything after the first `=`, as typed
    Edit { field: FormField, value: String },
    /// A bare field name focuses that control
    Focus(FormField),
    KeyPress { field: FormField, key: Key },
    /// The predict button
    Submit,
    ShowForm,
    Quit,
    Unrecognized(String),
}

impl UserAction {
    /// The predict button, or Enter inside any of the five controls
    pub fn is_submit_trigger(&self) -> bool {
        matches!(
            self,
            UserAction::Submit | UserAction::KeyPress { key: Key::Enter, .. }
        )
    }
}

/// Tracks which control has focus between lines.
#[derive(Debug, Default)]
pub struct InputParser {
    focus: Option<FormField>,
}

impl InputParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` for a blank line with nothing focused
    pub fn parse(&mut self, line: &str) -> Option<UserAction> {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim().is_empty() {
            return self.focus.map(|field| UserAction::KeyPress {
                field,
                key: Key::Enter,
            });
        }

        if let Some((name, value)) = line.split_once('=') {
            let name = name.trim();
            return Some(match FormField::from_element_id(name) {
                Some(field) => {
                    self.focus = Some(field);
                    UserAction::Edit {
                        field,
                        value: value.to_string(),
                    }
                }
                None => UserAction::Unrecognized(line.to_string()),
            });
        }

        let word = line.trim();
        if let Some(field) = FormField::from_element_id(word) {
            self.focus = Some(field);
            return Some(UserAction::Focus(field));
        }

        Some(match word {
            "submit" | "predict" => UserAction::Submit,
            "show" | "form" => UserAction::ShowForm,
            "quit" | "exit" => UserAction::Quit,
            _ => UserAction::Unrecognized(word.to_string()),
        })
    }
}
