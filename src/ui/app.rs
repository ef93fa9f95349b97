use std::mem;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::client::PromptApi;
use crate::clipboard::ClipboardSink;

use super::forms::{PromptField, PromptForm};
use super::helpers::centered_rect;
use super::screens::PromptBrowser;

/// Footer space reserved for the banner, the action bar, and key hints.
const FOOTER_HEIGHT: u16 = 3;
/// How long the copy control shows its acknowledgment before reverting.
const COPY_FEEDBACK: Duration = Duration::from_millis(2000);
/// How long a success banner stays on screen.
const SUCCESS_BANNER: Duration = Duration::from_millis(3000);
/// How long an error banner stays on screen.
const ERROR_BANNER: Duration = Duration::from_millis(5000);

const COPY_LABEL: &str = "Copy JSON";
const COPIED_LABEL: &str = "Copied!";

/// High-level navigation states: the form itself and the saved-prompt
/// browser modal.
enum Screen {
    Form,
    Prompts(PromptBrowser),
}

/// Transient notification reporting a save (or fetch) outcome. Removed once
/// its deadline passes; a newer banner simply replaces the old one.
struct Banner {
    text: String,
    kind: BannerKind,
    expires_at: Instant,
}

/// Severity of the banner, mapped to a color.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    fn style(&self) -> Style {
        match self {
            BannerKind::Success => Style::default().fg(Color::Green),
            BannerKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state. Every key event flows through here; the
/// preview text is recomputed from the form after each mutation instead of
/// being patched incrementally.
pub struct App {
    form: PromptForm,
    preview_text: String,
    client: Box<dyn PromptApi>,
    clipboard: Box<dyn ClipboardSink>,
    screen: Screen,
    banner: Option<Banner>,
    /// When set, the copy control reads "Copied!" until the deadline passes.
    /// A re-trigger overwrites the deadline; last timer wins.
    copy_reset: Option<Instant>,
}

impl App {
    pub fn new(client: Box<dyn PromptApi>, clipboard: Box<dyn ClipboardSink>) -> Result<Self> {
        let mut app = Self {
            form: PromptForm::default(),
            preview_text: String::new(),
            client,
            clipboard,
            screen: Screen::Form,
            banner: None,
            copy_reset: None,
        };
        app.update_preview()?;
        Ok(app)
    }

    /// Rebuild the preview pane text from the current form state.
    fn update_preview(&mut self) -> Result<()> {
        self.preview_text = self.form.preview_json()?;
        Ok(())
    }

    /// Expire the copy acknowledgment and the banner once their deadlines
    /// pass. Called on every pass of the event loop.
    pub fn tick(&mut self, now: Instant) {
        if matches!(self.copy_reset, Some(deadline) if now >= deadline) {
            self.copy_reset = None;
        }
        if matches!(&self.banner, Some(banner) if now >= banner.expires_at) {
            self.banner = None;
        }
    }

    /// Handle an unmodified key press. Returns `true` when the app should
    /// exit. The screen is taken out of `self` for the duration of the
    /// dispatch so handlers can freely touch the rest of the state.
    pub fn handle_key(&mut self, code: KeyCode, now: Instant) -> Result<bool> {
        let mut exit = false;
        let mut screen = mem::replace(&mut self.screen, Screen::Form);

        screen = match screen {
            Screen::Form => {
                self.handle_form_key(code, now, &mut exit)?;
                Screen::Form
            }
            Screen::Prompts(browser) => self.handle_browser_key(code, browser)?,
        };

        self.screen = screen;
        Ok(exit)
    }

    fn handle_form_key(&mut self, code: KeyCode, now: Instant, exit: &mut bool) -> Result<()> {
        match code {
            KeyCode::Esc => *exit = true,
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.previous_field(),
            KeyCode::Backspace => {
                self.form.backspace();
                self.update_preview()?;
            }
            KeyCode::Enter => {
                if self.form.active == PromptField::Instrumental {
                    self.form.toggle_instrumental();
                    self.update_preview()?;
                } else {
                    self.handle_save(now)?;
                }
            }
            KeyCode::Char(ch) => {
                if self.form.push_char(ch) {
                    self.update_preview()?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_browser_key(&mut self, code: KeyCode, mut browser: PromptBrowser) -> Result<Screen> {
        match code {
            KeyCode::Esc => return Ok(Screen::Form),
            KeyCode::Up => browser.move_selection(-1),
            KeyCode::Down => browser.move_selection(1),
            KeyCode::PageUp => browser.move_selection(-5),
            KeyCode::PageDown => browser.move_selection(5),
            KeyCode::Home => browser.select_first(),
            KeyCode::End => browser.select_last(),
            KeyCode::Enter => {
                if let Some(prompt) = browser.current().cloned() {
                    self.form.load_preview(&prompt);
                    self.update_preview()?;
                    return Ok(Screen::Form);
                }
            }
            _ => {}
        }
        Ok(Screen::Prompts(browser))
    }

    /// Copy the preview text to the clipboard and show the timed
    /// acknowledgment. Clipboard failures are recovered inside the sink; if
    /// even the fallback fails the control simply keeps its label.
    pub fn handle_copy(&mut self, now: Instant) -> Result<()> {
        if self.clipboard.write_text(&self.preview_text).is_ok() {
            self.copy_reset = Some(now + COPY_FEEDBACK);
        }
        Ok(())
    }

    /// Submit the raw payload to the save endpoint. Success clears the form
    /// and shows a short banner; any failure shows a longer banner and
    /// leaves the form untouched for retry.
    pub fn handle_save(&mut self, now: Instant) -> Result<()> {
        let payload = self.form.payload();
        match self.client.save_prompt(&payload) {
            Ok(_) => {
                self.form.reset();
                self.update_preview()?;
                self.banner = Some(Banner {
                    text: "Prompt saved successfully!".to_string(),
                    kind: BannerKind::Success,
                    expires_at: now + SUCCESS_BANNER,
                });
            }
            Err(err) => {
                self.banner = Some(Banner {
                    text: format!("Error saving prompt: {err}"),
                    kind: BannerKind::Error,
                    expires_at: now + ERROR_BANNER,
                });
            }
        }
        Ok(())
    }

    /// Fetch the saved prompts and open the browser modal. A fetch failure
    /// is reported like a save failure and the form stays in place.
    pub fn open_prompts(&mut self, now: Instant) -> Result<()> {
        match self.client.fetch_prompts() {
            Ok(prompts) => {
                self.screen = Screen::Prompts(PromptBrowser::new(prompts));
            }
            Err(err) => {
                self.banner = Some(Banner {
                    text: format!("Error loading prompts: {err}"),
                    kind: BannerKind::Error,
                    expires_at: now + ERROR_BANNER,
                });
            }
        }
        Ok(())
    }

    /// Clear the form without saving.
    pub fn handle_reset(&mut self) -> Result<()> {
        self.form.reset();
        self.update_preview()
    }

    pub(crate) fn form(&self) -> &PromptForm {
        &self.form
    }

    pub(crate) fn preview_text(&self) -> &str {
        &self.preview_text
    }

    /// Label currently shown on the copy control.
    pub(crate) fn copy_label(&self) -> &'static str {
        if self.copy_reset.is_some() {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }

    pub(crate) fn banner_text(&self) -> Option<&str> {
        self.banner.as_ref().map(|banner| banner.text.as_str())
    }

    pub(crate) fn banner_kind(&self) -> Option<BannerKind> {
        self.banner.as_ref().map(|banner| banner.kind)
    }

    pub fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(FOOTER_HEIGHT)])
            .split(frame.area());

        self.draw_main(frame, chunks[0]);
        self.draw_footer(frame, chunks[1]);

        if let Screen::Prompts(browser) = &self.screen {
            self.draw_prompt_browser(frame, frame.area(), browser);
        }
    }

    fn draw_main(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.draw_form(frame, columns[0]);
        self.draw_preview(frame, columns[1]);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Song Prompt").borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let lines: Vec<Line> = PromptField::ALL
            .iter()
            .map(|field| self.form.build_line(*field))
            .collect();

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);

        // Cursor sits at the end of the active field, unless the checkbox is
        // focused (nothing to type there).
        if matches!(self.screen, Screen::Form) && self.form.active != PromptField::Instrumental {
            let row = PromptField::ALL
                .iter()
                .position(|field| *field == self.form.active)
                .unwrap_or(0) as u16;
            let prefix = self.form.active.label().len() as u16 + 2;
            let cursor_x = inner.x + prefix + self.form.value_len(self.form.active) as u16;
            let cursor_y = inner.y + row;
            if cursor_y < inner.y + inner.height {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }

    fn draw_preview(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("JSON Preview").borders(Borders::ALL);
        let paragraph = Paragraph::new(self.preview_text.clone())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::with_capacity(2);

        if let Some(banner) = &self.banner {
            lines.push(Line::from(Span::styled(
                banner.text.clone(),
                banner.kind.style(),
            )));
        } else {
            lines.push(Line::from(""));
        }

        let key_style = Style::default().fg(Color::Cyan);
        let copy_style = if self.copy_reset.is_some() {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled("[Ctrl+Y]", key_style),
            Span::raw(" "),
            Span::styled(self.copy_label(), copy_style),
            Span::raw("   "),
            Span::styled("[Ctrl+S]", key_style),
            Span::raw(" Save   "),
            Span::styled("[Ctrl+P]", key_style),
            Span::raw(" Saved Prompts   "),
            Span::styled("[Ctrl+R]", key_style),
            Span::raw(" Clear   "),
            Span::styled("[Tab]", key_style),
            Span::raw(" Next Field   "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Quit"),
        ]));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_prompt_browser(&self, frame: &mut Frame, area: Rect, browser: &PromptBrowser) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Saved Prompts")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        if browser.prompts.is_empty() {
            let paragraph = Paragraph::new(vec![
                Line::from("No prompts saved yet."),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to return to the form.",
                    Style::default().fg(Color::Gray),
                )),
            ])
            .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, inner);
            return;
        }

        let items: Vec<ListItem> = browser
            .prompts
            .iter()
            .map(|prompt| ListItem::new(PromptBrowser::summary(prompt)))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::NONE))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        list_state.select(Some(browser.selected));
        frame.render_stateful_widget(list, inner, &mut list_state);
    }
}
