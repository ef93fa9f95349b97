use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{parse_level, split_styles, LevelValue, PromptPreview, SavePayload};

/// Internal representation of the prompt form. Every field keeps the raw
/// text the user typed; normalization happens only when a view object is
/// derived, so the preview and the payload are always pure functions of the
/// current values.
#[derive(Default, Clone)]
pub(crate) struct PromptForm {
    pub(crate) title: String,
    pub(crate) lyrics: String,
    pub(crate) subject: String,
    pub(crate) styles: String,
    pub(crate) excluded_styles: String,
    pub(crate) weirdness: String,
    pub(crate) style_influence: String,
    pub(crate) instrumental: bool,
    pub(crate) active: PromptField,
}

/// Fields available within the prompt form, in focus-cycle order.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum PromptField {
    Title,
    Lyrics,
    Subject,
    Styles,
    ExcludedStyles,
    Weirdness,
    StyleInfluence,
    Instrumental,
}

impl Default for PromptField {
    fn default() -> Self {
        PromptField::Title
    }
}

impl PromptField {
    /// Label shown next to the field; also used for cursor positioning.
    pub(crate) fn label(self) -> &'static str {
        match self {
            PromptField::Title => "Title",
            PromptField::Lyrics => "Lyrics",
            PromptField::Subject => "Subject",
            PromptField::Styles => "Styles",
            PromptField::ExcludedStyles => "Excluded styles",
            PromptField::Weirdness => "Weirdness",
            PromptField::StyleInfluence => "Style influence",
            PromptField::Instrumental => "Instrumental",
        }
    }

    /// All fields in display order.
    pub(crate) const ALL: [PromptField; 8] = [
        PromptField::Title,
        PromptField::Lyrics,
        PromptField::Subject,
        PromptField::Styles,
        PromptField::ExcludedStyles,
        PromptField::Weirdness,
        PromptField::StyleInfluence,
        PromptField::Instrumental,
    ];

    fn index(self) -> usize {
        PromptField::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }
}

impl PromptForm {
    /// Move focus to the next field (Tab).
    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % PromptField::ALL.len();
        self.active = PromptField::ALL[next];
    }

    /// Move focus to the previous field (Shift+Tab).
    pub(crate) fn previous_field(&mut self) {
        let count = PromptField::ALL.len();
        let previous = (self.active.index() + count - 1) % count;
        self.active = PromptField::ALL[previous];
    }

    /// Append a character to the active field, validating allowed input. The
    /// slider fields only accept digits; the checkbox toggles on space.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            PromptField::Title => self.title.push(ch),
            PromptField::Lyrics => self.lyrics.push(ch),
            PromptField::Subject => self.subject.push(ch),
            PromptField::Styles => self.styles.push(ch),
            PromptField::ExcludedStyles => self.excluded_styles.push(ch),
            PromptField::Weirdness => {
                if !ch.is_ascii_digit() {
                    return false;
                }
                self.weirdness.push(ch);
            }
            PromptField::StyleInfluence => {
                if !ch.is_ascii_digit() {
                    return false;
                }
                self.style_influence.push(ch);
            }
            PromptField::Instrumental => {
                if ch != ' ' {
                    return false;
                }
                self.toggle_instrumental();
            }
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            PromptField::Title => {
                self.title.pop();
            }
            PromptField::Lyrics => {
                self.lyrics.pop();
            }
            PromptField::Subject => {
                self.subject.pop();
            }
            PromptField::Styles => {
                self.styles.pop();
            }
            PromptField::ExcludedStyles => {
                self.excluded_styles.pop();
            }
            PromptField::Weirdness => {
                self.weirdness.pop();
            }
            PromptField::StyleInfluence => {
                self.style_influence.pop();
            }
            PromptField::Instrumental => {}
        }
    }

    pub(crate) fn toggle_instrumental(&mut self) {
        self.instrumental = !self.instrumental;
    }

    /// Clear every field and return focus to the top, mirroring a form
    /// reset.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Derive the normalized preview object from the current field values.
    pub(crate) fn preview(&self) -> PromptPreview {
        let lyrics = if self.lyrics.is_empty() {
            self.subject.clone()
        } else {
            self.lyrics.clone()
        };
        PromptPreview {
            title: self.title.clone(),
            lyrics,
            styles: split_styles(&self.styles),
            excluded_styles: split_styles(&self.excluded_styles),
            weirdness: parse_level(&self.weirdness),
            style_influence: parse_level(&self.style_influence),
            instrumental: self.instrumental,
        }
    }

    /// Derive the raw save payload. Styles stay unsplit and the subject
    /// keeps its own field; see the note on `SavePayload`.
    pub(crate) fn payload(&self) -> SavePayload {
        SavePayload {
            title: self.title.clone(),
            lyrics: self.lyrics.clone(),
            subject: self.subject.clone(),
            styles: self.styles.clone(),
            excluded_styles: self.excluded_styles.clone(),
            weirdness: LevelValue::from_field(&self.weirdness),
            style_influence: LevelValue::from_field(&self.style_influence),
            is_instrumental: self.instrumental,
        }
    }

    /// Serialize the preview with two-space indentation for the preview
    /// pane.
    pub(crate) fn preview_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.preview())?)
    }

    /// Populate the form from a saved prompt. The listing endpoint returns
    /// the formatted shape, so arrays are re-joined and the subject (already
    /// folded into lyrics by the backend) comes back empty.
    pub(crate) fn load_preview(&mut self, prompt: &PromptPreview) {
        self.title = prompt.title.clone();
        self.lyrics = prompt.lyrics.clone();
        self.subject = String::new();
        self.styles = prompt.styles.join(", ");
        self.excluded_styles = prompt.excluded_styles.join(", ");
        self.weirdness = prompt.weirdness.to_string();
        self.style_influence = prompt.style_influence.to_string();
        self.instrumental = prompt.instrumental;
        self.active = PromptField::Title;
    }

    fn value(&self, field: PromptField) -> &str {
        match field {
            PromptField::Title => &self.title,
            PromptField::Lyrics => &self.lyrics,
            PromptField::Subject => &self.subject,
            PromptField::Styles => &self.styles,
            PromptField::ExcludedStyles => &self.excluded_styles,
            PromptField::Weirdness => &self.weirdness,
            PromptField::StyleInfluence => &self.style_influence,
            PromptField::Instrumental => "",
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: PromptField) -> Line<'static> {
        let is_active = self.active == field;

        if field == PromptField::Instrumental {
            let checkbox = if self.instrumental { "[x]" } else { "[ ]" };
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            return Line::from(vec![
                Span::raw(format!("{}: ", field.label())),
                Span::styled(checkbox.to_string(), style),
            ]);
        }

        let value = self.value(field);
        let display = if value.is_empty() {
            placeholder(field).to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: PromptField) -> usize {
        self.value(field).chars().count()
    }
}

/// Hint shown for an empty field.
fn placeholder(field: PromptField) -> &'static str {
    match field {
        PromptField::Weirdness | PromptField::StyleInfluence => "<50>",
        PromptField::Styles | PromptField::ExcludedStyles => "<comma separated>",
        _ => "<empty>",
    }
}
