use crate::core::expression::value::Value;

/// Named values a formula is evaluated against.
///
/// Formulas bind a handful of variables, so lookup is a linear scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings<'n> {
    entries: Vec<(&'n str, Value)>,
}

impl<'n> Bindings<'n> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: &'n str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Inserts `name` or overwrites its current value.
    pub fn set(&mut self, name: &'n str, value: impl Into<Value>) {
        let value = value.into();

        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| *value)
    }
}
