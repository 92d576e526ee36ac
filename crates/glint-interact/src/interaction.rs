//! Named interaction extension points

/// A specific interaction an interactable offers (open, read, pick up, ...).
///
/// The base interactable only stores these; what they do is up to the
/// behavior that owns the list.
pub trait ObjectInteraction {
    /// Display name
    fn name(&self) -> &str;
}

/// An interaction that is nothing but its name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedInteraction {
    name: String,
}

impl NamedInteraction {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ObjectInteraction for NamedInteraction {
    fn name(&self) -> &str {
        &self.name
    }
}
