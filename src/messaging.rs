//! Message boundary between a page and the surfaces that drive it.
//!
//! Commands arrive as JSON objects tagged by `action`; anything that does not
//! parse into a [`ClipCommand`] is rejected with [`Error::InvalidMessage`]
//! instead of being ignored. Pointer and keyboard input arrive as
//! [`PageEvent`]s. Finished selection clips and selection failures leave as
//! [`ClipEvent`]s on an unbounded channel, since they complete after the
//! command that started the session has already been answered.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::clip;
use crate::dom::NodeId;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::page::Page;
use crate::selection::{HitTester, Point, SelectionController, Transition};
use crate::styles::StylesheetFetcher;

/// A request addressed to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ClipCommand {
    StartSelectionMode,
    ExitSelectionMode,
    CaptureFullPage,
}

impl ClipCommand {
    /// Parse and validate a JSON command.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidMessage(e.to_string()))
    }
}

/// Immediate answer to a [`ClipCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClipResponse {
    /// `{"success": true}`
    Ack { success: bool },
    /// `{"html": "..."}`
    Html { html: String },
    /// `{"error": "..."}`
    Error { error: String },
}

impl ClipResponse {
    #[must_use]
    pub fn ack() -> Self {
        Self::Ack { success: true }
    }

    #[must_use]
    pub fn error(err: &Error) -> Self {
        Self::Error {
            error: err.to_string(),
        }
    }
}

/// Notification sent when a selection session finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ClipEvent {
    /// A selection clip is ready to be saved.
    DownloadSelection { html: String },
    /// Capturing the chosen element failed.
    ClipError { error: String },
}

/// Pointer and keyboard input from the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PageEvent {
    PointerMove { x: f64, y: f64 },
    PointerDown { x: f64, y: f64 },
    KeyDown { key: String },
}

/// Owner of one page and its selection session.
///
/// Routes commands and page events, turns a completed selection into a clip,
/// and reports it on the event channel returned by [`ClipAgent::new`].
pub struct ClipAgent<H, F> {
    page: Page,
    controller: SelectionController<H>,
    fetcher: F,
    options: Options,
    events: UnboundedSender<ClipEvent>,
    chosen_tx: UnboundedSender<NodeId>,
    chosen_rx: UnboundedReceiver<NodeId>,
}

impl<H: HitTester, F: StylesheetFetcher> ClipAgent<H, F> {
    /// Create the agent and the receiving end of its event channel.
    #[must_use]
    pub fn new(
        page: Page,
        hit_tester: H,
        fetcher: F,
        options: Options,
    ) -> (Self, UnboundedReceiver<ClipEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let (chosen_tx, chosen_rx) = mpsc::unbounded_channel();
        let controller = SelectionController::new(hit_tester, options.highlight_source.clone());

        let mut agent = Self {
            page,
            controller,
            fetcher,
            options,
            events,
            chosen_tx,
            chosen_rx,
        };
        agent.register_handler();

        (agent, events_rx)
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub fn controller(&self) -> &SelectionController<H> {
        &self.controller
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse a JSON command and handle it.
    pub async fn handle_message(&mut self, json: &str) -> Result<ClipResponse> {
        let command = ClipCommand::from_json(json)?;
        Ok(self.handle_command(command).await)
    }

    pub async fn handle_command(&mut self, command: ClipCommand) -> ClipResponse {
        log::debug!("Handling {command:?}");

        match command {
            ClipCommand::StartSelectionMode => {
                // The previous session may have consumed the handler.
                self.register_handler();
                self.controller
                    .enter_selection_mode(self.page.document(), &self.fetcher)
                    .await;
                ClipResponse::ack()
            }
            ClipCommand::ExitSelectionMode => {
                self.controller.exit_selection_mode(self.page.document());
                ClipResponse::ack()
            }
            ClipCommand::CaptureFullPage => {
                match clip::capture_full_page(&self.page, &self.fetcher, &self.options).await {
                    Ok(html) => ClipResponse::Html { html },
                    Err(e) => {
                        log::warn!("Failed to build clip: {e}");
                        ClipResponse::error(&e)
                    }
                }
            }
        }
    }

    /// Feed one input to the selection session.
    ///
    /// When the input completes a selection, the clip is captured and
    /// reported before this returns.
    pub async fn handle_page_event(&mut self, event: PageEvent) -> Transition {
        let doc = self.page.document();
        let transition = match event {
            PageEvent::PointerMove { x, y } => self.controller.pointer_move(doc, Point::new(x, y)),
            PageEvent::PointerDown { x, y } => self.controller.pointer_down(doc, Point::new(x, y)),
            PageEvent::KeyDown { key } => self.controller.key_down(doc, &key),
        };

        if let Transition::Selected(_) = transition {
            while let Ok(node) = self.chosen_rx.try_recv() {
                self.clip_selection(node).await;
            }
        }

        transition
    }

    /// Capture `node` and emit the outcome as a [`ClipEvent`].
    pub async fn clip_selection(&self, node: NodeId) {
        let event = match clip::capture_selection(&self.page, node, &self.fetcher, &self.options).await {
            Ok(html) => ClipEvent::DownloadSelection { html },
            Err(e) => {
                log::warn!("Selection capture failed: {e}");
                ClipEvent::ClipError {
                    error: e.to_string(),
                }
            }
        };

        if self.events.send(event).is_err() {
            log::debug!("Clip event dropped, no receiver");
        }
    }

    fn register_handler(&mut self) {
        let chosen = self.chosen_tx.clone();
        self.controller.set_selection_handler(move |node| {
            if chosen.send(node).is_err() {
                log::debug!("Selection dropped, agent gone");
            }
        });
    }
}
