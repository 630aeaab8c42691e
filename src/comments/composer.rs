//! State of a single comment input box.

/// Where a composer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    Idle,
    Composing,
    Submitting,
}

/// A comment draft, optionally replying to another comment.
#[derive(Debug, Clone)]
pub struct Composer {
    state: ComposerState,
    draft: String,
    parent_id: Option<String>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// Composer for a top-level comment.
    pub fn new() -> Self {
        Self {
            state: ComposerState::Idle,
            draft: String::new(),
            parent_id: None,
        }
    }

    /// Composer for a reply to `parent_id`.
    pub fn reply_to(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            ..Self::new()
        }
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Update the draft. Ignored while a submission is in flight.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.state == ComposerState::Submitting {
            return;
        }
        self.draft = text.into();
        self.state = if self.draft.trim().is_empty() {
            ComposerState::Idle
        } else {
            ComposerState::Composing
        };
    }

    /// Move to `Submitting` and hand out the draft, if there is one to send.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.state != ComposerState::Composing {
            return None;
        }
        self.state = ComposerState::Submitting;
        Some(self.draft.clone())
    }

    /// Settle an in-flight submission. Success clears the draft, failure keeps
    /// it for another try.
    pub fn finish_submit(&mut self, succeeded: bool) {
        if self.state != ComposerState::Submitting {
            return;
        }
        if succeeded {
            self.draft.clear();
            self.state = ComposerState::Idle;
        } else {
            self.state = ComposerState::Composing;
        }
    }
}
