use std::cmp::min;

use crate::models::PromptPreview;

/// Read-only browser over the prompts already saved on the backend. Loaded
/// once when the screen opens; Enter copies the selected prompt back into
/// the form.
pub(crate) struct PromptBrowser {
    pub(crate) prompts: Vec<PromptPreview>,
    pub(crate) selected: usize,
}

impl PromptBrowser {
    pub(crate) fn new(prompts: Vec<PromptPreview>) -> Self {
        Self {
            prompts,
            selected: 0,
        }
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        if self.prompts.is_empty() {
            self.selected = 0;
            return;
        }
        let len = self.prompts.len() as isize;
        let current = self.selected as isize;
        let next = (current + delta).clamp(0, len - 1);
        self.selected = next as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.prompts.len().saturating_sub(1);
    }

    pub(crate) fn current(&self) -> Option<&PromptPreview> {
        self.prompts.get(self.selected)
    }

    /// One-line summary for the list widget.
    pub(crate) fn summary(prompt: &PromptPreview) -> String {
        let title = if prompt.title.trim().is_empty() {
            "Untitled"
        } else {
            prompt.title.trim()
        };
        if prompt.styles.is_empty() {
            title.to_string()
        } else {
            format!(
                "{} [{}]",
                title,
                prompt.styles[..min(3, prompt.styles.len())].join(", ")
            )
        }
    }
}
