//! Inbound manual-form boundary.
//!
//! Route definitions and view rendering live in external collaborators; the
//! pipeline only sees the submitted fields as a key/value map. Scalar fields
//! appear once; repeated fields (the parallel variant arrays) carry one value
//! per row.

use std::collections::HashMap;

/// A single submitted form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// A field submitted once.
    Scalar(String),
    /// A field submitted once per variant row.
    List(Vec<String>),
}

/// The submitted manual product form.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    fields: HashMap<String, FormValue>,
}

impl FormInput {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar field.
    pub fn set_scalar(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields
            .insert(key.into(), FormValue::Scalar(value.into()));
    }

    /// Set a repeated field.
    pub fn set_list<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.insert(
            key.into(),
            FormValue::List(values.into_iter().map(Into::into).collect()),
        );
    }

    /// A scalar field's value, if the field was submitted as a scalar.
    #[must_use]
    pub fn scalar(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FormValue::Scalar(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// A scalar field's value with surrounding whitespace removed, dropped
    /// entirely when blank.
    #[must_use]
    pub fn trimmed_scalar(&self, key: &str) -> Option<&str> {
        self.scalar(key).map(str::trim).filter(|value| !value.is_empty())
    }

    /// A repeated field's values, if the field was submitted as a list.
    #[must_use]
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.fields.get(key) {
            Some(FormValue::List(values)) => Some(values.as_slice()),
            _ => None,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, FormValue)> for FormInput {
    fn from_iter<T: IntoIterator<Item = (K, FormValue)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}
