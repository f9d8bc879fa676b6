//! Session state: the drawing surface, the refinement lifecycle, and the
//! gallery of results.
//!
//! [`Studio`] is the single owner of all mutable state. Refinements run on the
//! [`RefineManager`] worker; their outcomes are folded back in by [`Studio::poll`]
//! or [`Studio::wait_for_refine`], so at most one request is ever in flight.

pub mod file;
pub mod gallery;
pub mod state;

#[cfg(test)]
mod tests;

pub use file::FileError;
pub use gallery::{Gallery, GalleryItem};
pub use state::AppState;

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;
use uuid::Uuid;

use crate::config::{Config, OutputConfig};
use crate::draw::ExportError;
use crate::input::DrawingSurface;
use crate::refine::{RefineError, RefineJob, RefineManager, RefineOutcome, Style};

/// Errors surfaced by studio actions.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("No sketch to refine; draw or upload one first")]
    InputMissing,

    #[error("A refinement is already in progress")]
    AlreadyRefining,

    #[error("No refined image to save")]
    NothingToSave,

    #[error("No gallery item with id {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Refine(#[from] RefineError),

    #[error("Failed to export sketch: {0}")]
    Export(#[from] ExportError),

    #[error(transparent)]
    File(#[from] FileError),
}

/// Owns the drawing surface, refinement state, and gallery for one session.
pub struct Studio {
    surface: DrawingSurface,
    state: AppState,
    gallery: Gallery,
    refiner: RefineManager,
    /// Id of the job whose outcome the state is waiting for.
    pending_job: Option<u64>,
    next_job_id: u64,
    output: OutputConfig,
}

impl Studio {
    pub fn new(config: &Config, refiner: RefineManager) -> Self {
        let state = AppState {
            selected_style: Style::resolve(&config.refine.default_style),
            ..AppState::default()
        };
        Self {
            surface: DrawingSurface::from_config(&config.canvas),
            state,
            gallery: Gallery::new(),
            refiner,
            pending_job: None,
            next_job_id: 0,
            output: config.output.clone(),
        }
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Exports the current drawing and makes it the refinement input.
    pub fn use_sketch(&mut self) -> Result<(), StudioError> {
        let image = self.surface.export_raster()?;
        self.state.input_image = Some(image);
        Ok(())
    }

    /// Loads an image file and makes it the refinement input.
    pub fn upload(&mut self, path: &Path) -> Result<(), StudioError> {
        let image = file::load_image(path, self.output.max_upload_bytes)?;
        self.state.input_image = Some(image);
        Ok(())
    }

    pub fn set_style(&mut self, style: Style) {
        self.state.selected_style = style;
    }

    pub fn set_details(&mut self, details: impl Into<String>) {
        self.state.details = details.into();
    }

    /// Queues a refinement of the current input with the selected style.
    ///
    /// # Errors
    /// `InputMissing` without an input image, `AlreadyRefining` while a
    /// request is outstanding, or `Refine` if the worker is gone.
    pub fn request_refine(&mut self) -> Result<(), StudioError> {
        if self.state.is_refining {
            return Err(StudioError::AlreadyRefining);
        }
        let image = self
            .state
            .input_image
            .clone()
            .ok_or(StudioError::InputMissing)?;

        let details = self.state.details.trim();
        let id = self.next_job_id;
        let job = RefineJob {
            id,
            image,
            style: self.state.selected_style.as_str().to_string(),
            details: (!details.is_empty()).then(|| details.to_string()),
        };
        self.refiner.request_refine(job)?;
        self.next_job_id += 1;
        self.pending_job = Some(id);
        self.state.start_refining();
        info!("Refinement started ({})", self.state.selected_style);
        Ok(())
    }

    /// Applies the outstanding refinement's outcome if it has arrived,
    /// without waiting. Outcomes of jobs abandoned by [`Studio::reset`] are
    /// discarded.
    pub fn poll(&mut self) -> Option<RefineOutcome> {
        while let Some(finished) = self.refiner.try_take_outcome() {
            if self.is_pending(finished.id) {
                self.apply_outcome(finished.outcome.clone());
                return Some(finished.outcome);
            }
        }
        None
    }

    /// Waits for the outstanding refinement and applies its outcome.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn wait_for_refine(&mut self) -> Option<RefineOutcome> {
        self.pending_job?;
        loop {
            let next = self.refiner.next_outcome().await;
            let outcome = match next {
                Some(finished) if self.is_pending(finished.id) => finished.outcome,
                Some(_) => continue,
                None => RefineOutcome::Failed(RefineError::ManagerUnavailable.to_string()),
            };
            self.apply_outcome(outcome.clone());
            return Some(outcome);
        }
    }

    fn is_pending(&self, id: u64) -> bool {
        if self.pending_job == Some(id) {
            true
        } else {
            debug!("Discarding outcome of abandoned refinement job {}", id);
            false
        }
    }

    fn apply_outcome(&mut self, outcome: RefineOutcome) {
        self.pending_job = None;
        match outcome {
            RefineOutcome::Success { image, style } => {
                self.gallery.add(image.clone(), Style::resolve(&style));
                self.state.finish_success(image);
            }
            RefineOutcome::Failed(message) => {
                warn!("Refinement failed: {}", message);
                self.state.finish_failure(message);
            }
        }
    }

    /// Writes the latest refined image. Without `path`, the configured
    /// result filename in the output directory is used.
    pub fn download_result(&self, path: Option<&Path>) -> Result<PathBuf, StudioError> {
        let image = self
            .state
            .result_image
            .as_deref()
            .ok_or(StudioError::NothingToSave)?;
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| file::output_path(&self.output, &self.output.result_filename));
        Ok(file::save_data_url(image, &path)?)
    }

    /// Exports the drawing and writes it. Without `path`, the configured
    /// sketch filename in the output directory is used.
    pub fn download_sketch(&self, path: Option<&Path>) -> Result<PathBuf, StudioError> {
        let image = self.surface.export_raster()?;
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| file::output_path(&self.output, &self.output.sketch_filename));
        Ok(file::save_data_url(&image, &path)?)
    }

    /// Writes one gallery image. Without `path`, the configured result
    /// filename with the item's style appended is used.
    pub fn download_gallery_item(
        &self,
        id: Uuid,
        path: Option<&Path>,
    ) -> Result<PathBuf, StudioError> {
        let item = self.gallery.get(id).ok_or(StudioError::NotFound(id))?;
        let path = path.map(Path::to_path_buf).unwrap_or_else(|| {
            let name = file::styled_filename(&self.output.result_filename, item.style.as_str());
            file::output_path(&self.output, &name)
        });
        Ok(file::save_data_url(&item.image, &path)?)
    }

    pub fn delete_gallery_item(&mut self, id: Uuid) -> bool {
        self.gallery.delete(id)
    }

    /// Clears the input image and refinement state. The gallery is kept.
    ///
    /// A refinement still in flight is abandoned; its outcome is dropped
    /// when it arrives.
    pub fn reset(&mut self) {
        if let Some(id) = self.pending_job.take() {
            info!("Abandoning refinement job {}", id);
        }
        self.state.reset();
    }
}
