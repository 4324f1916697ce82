// Export adapter.
// Hands the rendered surface to the host print pipeline. While a job runs the export control
// shows a busy label and is disabled, and the document title carries the suggested filename.

pub mod handlers;

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::markup::Markup;
use crate::render::page::{self, PageOptions};

pub const IDLE_LABEL: &str = "Xuất PDF";
pub const BUSY_LABEL: &str = "Đang chuẩn bị...";
pub const DEFAULT_TITLE: &str = "CV Builder";

/// Printed pages kept for `GET /api/v1/export/:job_id`; the oldest is evicted first.
const KEPT_ARTIFACTS: usize = 8;

/// Lets the busy state reach observers before the host takes over.
const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// A printable document handed to the host.
#[derive(Debug, Clone)]
pub struct PrintJob {
    pub title: String,
    pub html: String,
}

/// The host print/export facility.
#[async_trait]
pub trait PrintHost: Send + Sync {
    /// Prints `job`, returning where the printable artifact ended up.
    async fn print(&self, job: &PrintJob) -> anyhow::Result<PathBuf>;
}

/// Writes `<dir>/<title>.html`: a standalone page that opens the browser print dialog on load,
/// where the user picks "Save as PDF".
#[derive(Debug, Clone)]
pub struct HtmlPrintHost {
    dir: PathBuf,
}

impl HtmlPrintHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl PrintHost for HtmlPrintHost {
    async fn print(&self, job: &PrintJob) -> anyhow::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create export dir {}", self.dir.display()))?;
        let path = self.dir.join(format!("{}.html", file_stem(&job.title)));
        tokio::fs::write(&path, job.html.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Path separators and control characters cannot appear in a file name.
fn file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                '_'
            } else {
                c
            }
        })
        .collect();
    match stem.trim_matches('.') {
        "" => "export".to_string(),
        s => s.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportControl {
    pub label: String,
    pub disabled: bool,
}

impl Default for ExportControl {
    fn default() -> Self {
        Self {
            label: IDLE_LABEL.to_string(),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportReceipt {
    pub job_id: Uuid,
    pub title: String,
    pub path: PathBuf,
    pub exported_at: DateTime<Utc>,
}

/// Title offered to the print dialog: the filename without its `.pdf` extension.
pub fn title_for(suggested_filename: &str) -> &str {
    suggested_filename
        .strip_suffix(".pdf")
        .unwrap_or(suggested_filename)
}

pub struct ExportAdapter {
    host: Arc<dyn PrintHost>,
    control: Mutex<ExportControl>,
    title: Mutex<String>,
    artifacts: Mutex<VecDeque<(Uuid, String)>>,
}

impl ExportAdapter {
    pub fn new(host: Arc<dyn PrintHost>) -> Self {
        Self {
            host,
            control: Mutex::new(ExportControl::default()),
            title: Mutex::new(DEFAULT_TITLE.to_string()),
            artifacts: Mutex::new(VecDeque::with_capacity(KEPT_ARTIFACTS)),
        }
    }

    pub fn control(&self) -> ExportControl {
        lock(&self.control).clone()
    }

    pub fn title(&self) -> String {
        lock(&self.title).clone()
    }

    /// The printable page of a recent export.
    pub fn artifact(&self, job_id: Uuid) -> Option<String> {
        lock(&self.artifacts)
            .iter()
            .find(|(id, _)| *id == job_id)
            .map(|(_, html)| html.clone())
    }

    pub async fn export_to_printable(
        &self,
        surface: &Markup,
        suggested_filename: &str,
    ) -> Result<ExportReceipt, AppError> {
        let _busy = BusyGuard::acquire(&self.control)?;
        let title = title_for(suggested_filename).to_string();
        let _title = TitleGuard::swap(&self.title, title.clone());

        tokio::time::sleep(SETTLE_DELAY).await;

        let job = PrintJob {
            html: page::wrap_surface(surface, &title, PageOptions { auto_print: true }),
            title: title.clone(),
        };
        let path = self.host.print(&job).await.map_err(|e| {
            warn!("Export of '{title}' failed: {e:#}");
            AppError::Internal(e)
        })?;

        let job_id = Uuid::new_v4();
        {
            let mut artifacts = lock(&self.artifacts);
            if artifacts.len() == KEPT_ARTIFACTS {
                artifacts.pop_front();
            }
            artifacts.push_back((job_id, job.html));
        }

        info!("Exported '{title}' to {} as job {job_id}", path.display());
        Ok(ExportReceipt {
            job_id,
            title,
            path,
            exported_at: Utc::now(),
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks the control busy for its lifetime and restores the previous state on drop.
struct BusyGuard<'a> {
    control: &'a Mutex<ExportControl>,
    previous: ExportControl,
}

impl<'a> BusyGuard<'a> {
    fn acquire(control: &'a Mutex<ExportControl>) -> Result<Self, AppError> {
        let mut current = lock(control);
        if current.disabled {
            return Err(AppError::ExportBusy);
        }
        let previous = std::mem::replace(
            &mut *current,
            ExportControl {
                label: BUSY_LABEL.to_string(),
                disabled: true,
            },
        );
        Ok(Self { control, previous })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *lock(self.control) = std::mem::take(&mut self.previous);
    }
}

struct TitleGuard<'a> {
    title: &'a Mutex<String>,
    previous: String,
}

impl<'a> TitleGuard<'a> {
    fn swap(title: &'a Mutex<String>, next: String) -> Self {
        let previous = std::mem::replace(&mut *lock(title), next);
        Self { title, previous }
    }
}

impl Drop for TitleGuard<'_> {
    fn drop(&mut self) {
        *lock(self.title) = std::mem::take(&mut self.previous);
    }
}
