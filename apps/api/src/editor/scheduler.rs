//! Debounced preview rendering.
//!
//! One pending slot: scheduling a render aborts whatever is still waiting and starts a new
//! timer, so within the debounce window the most recent mutation wins. Finished renders are
//! published on a `watch` channel; readers always see the latest preview.
//!
//! Revisions are handed out when a job is scheduled, not when it finishes. An aborted task
//! may already be past its timer and still rendering; its older revision is then refused by
//! the channel, so a late stale render never replaces a newer one.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::document::CvDocument;
use crate::models::template::{AccentColor, TemplateId};
use crate::render;

/// Everything a render needs, captured at mutation time.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub document: CvDocument,
    pub template: TemplateId,
    pub accent: AccentColor,
}

impl RenderJob {
    fn run(self, revision: u64) -> RenderedPreview {
        RenderedPreview {
            revision,
            template: self.template,
            html: render::render_page(&self.document, self.template, &self.accent, PREVIEW_TITLE),
        }
    }
}

const PREVIEW_TITLE: &str = "CV Preview";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedPreview {
    /// Order in which the job was scheduled; 0 means nothing rendered yet.
    pub revision: u64,
    pub template: TemplateId,
    pub html: String,
}

pub struct RenderScheduler {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    tx: Arc<watch::Sender<RenderedPreview>>,
    revision: u64,
}

impl RenderScheduler {
    pub fn new(delay: Duration) -> (Self, watch::Receiver<RenderedPreview>) {
        let (tx, rx) = watch::channel(RenderedPreview::default());
        let scheduler = Self {
            delay,
            pending: None,
            tx: Arc::new(tx),
            revision: 0,
        };
        (scheduler, rx)
    }

    /// Replaces any pending render with `job`, run after the debounce delay.
    pub fn schedule(&mut self, job: RenderJob) {
        self.cancel_pending();
        let revision = self.next_revision();
        let delay = self.delay;
        let tx = Arc::clone(&self.tx);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            publish(&tx, revision, job);
        }));
    }

    /// Cancels any pending render and renders `job` right away.
    pub fn render_now(&mut self, job: RenderJob) {
        self.cancel_pending();
        let revision = self.next_revision();
        publish(&self.tx, revision, job);
    }

    fn next_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for RenderScheduler {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn publish(tx: &watch::Sender<RenderedPreview>, revision: u64, job: RenderJob) {
    let template = job.template;
    let preview = job.run(revision);
    let bytes = preview.html.len();
    let accepted = tx.send_if_modified(|current| {
        if revision > current.revision {
            *current = preview;
            true
        } else {
            false
        }
    });
    if accepted {
        debug!("Rendered preview r{revision} with template {template} ({bytes} bytes)");
    } else {
        debug!("Discarded stale preview r{revision}");
    }
}
