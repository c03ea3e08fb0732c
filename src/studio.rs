//! The studio: synchronous orchestrator for the render-capture-publish
//! pipeline.
//!
//! Owns the current plan, the displayed error line, the HTTP exchanges, the
//! capture backend, and the operation coordinator. Within one invocation
//! capture strictly precedes assembly or publishing; a generation triggered
//! while an export or share is in flight replaces the plan but does not
//! invalidate a capture already taken; that capture completes as a valid
//! artifact of the state that existed when it began.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::capture::{CaptureBackend, SoftwareCapture};
use crate::coordinator::{Coordinator, Operation};
use crate::document;
use crate::generate::GenerateClient;
use crate::model::Plan;
use crate::publish::{ComposerLauncher, LogComposer, SharePublisher, ShareOutcome};
use crate::surface::RenderSurface;
use crate::{Error, Result, StudioConfig};

pub struct Studio {
    config: StudioConfig,
    coordinator: Coordinator,
    backend: Box<dyn CaptureBackend>,
    composer: Box<dyn ComposerLauncher>,
    generator: GenerateClient,
    publisher: SharePublisher,
    plan: Option<Plan>,
    error: Option<String>,
}

impl Studio {
    /// Create a studio with the built-in software capture backend and the
    /// logging composer launcher.
    pub fn new(config: StudioConfig) -> Result<Self> {
        let backend = Box::new(SoftwareCapture::new(config.pixel_ratio));
        Self::with_parts(config, backend, Box::new(LogComposer))
    }

    /// Create a studio with explicit capture and composer adapters.
    pub fn with_parts(
        config: StudioConfig,
        backend: Box<dyn CaptureBackend>,
        composer: Box<dyn ComposerLauncher>,
    ) -> Result<Self> {
        if config.timeout_ms == 0 {
            return Err(Error::ConfigError("timeout_ms must be non-zero".into()));
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build HTTP client: {}", e)))?;

        let generator =
            GenerateClient::new(client.clone(), config.generate_endpoint.clone(), config.timeout_ms);
        let publisher =
            SharePublisher::new(client, config.share_endpoint.clone(), config.timeout_ms);

        Ok(Self {
            config,
            coordinator: Coordinator::new(),
            backend,
            composer,
            generator,
            publisher,
            plan: None,
            error: None,
        })
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// The currently displayed plan, if any.
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// Restore a previously generated plan (e.g. one loaded from disk by the
    /// CLI). Replaces the current plan wholesale, like a generation would.
    pub fn load_plan(&mut self, plan: Plan) {
        self.plan = Some(plan);
    }

    /// The user-visible error line for a failed generation.
    pub fn error_line(&self) -> Option<String> {
        self.error.as_ref().map(|e| format!("{} Wait a few minutes", e))
    }

    /// Run one generation exchange. Entry clears any previously displayed
    /// error; failure records a new one and leaves the previous plan
    /// untouched.
    pub fn generate(&mut self, message: &str) -> Result<&Plan> {
        let guard = self.coordinator.begin(Operation::Generate)?;
        self.error = None;
        match self.generator.generate(message) {
            Ok(plan) => {
                guard.succeed();
                Ok(self.plan.insert(plan))
            }
            Err(e) => {
                let reason = match &e {
                    Error::GenerationError(msg) => msg.clone(),
                    other => other.to_string(),
                };
                log::error!("generation failed: {}", reason);
                self.error = Some(reason.clone());
                guard.fail(reason);
                Err(e)
            }
        }
    }

    /// Capture the full-plan surface and persist it as a single-page PDF
    /// inside `dir`. Returns the written path.
    pub fn export_pdf(&self, dir: &Path) -> Result<PathBuf> {
        let guard = self.coordinator.begin(Operation::Export)?;
        match self.export_inner(dir) {
            Ok(path) => {
                guard.succeed();
                Ok(path)
            }
            Err(e) => {
                log::error!("export failed: {}", e);
                guard.fail(e.to_string());
                Err(e)
            }
        }
    }

    fn export_inner(&self, dir: &Path) -> Result<PathBuf> {
        let plan = self
            .plan
            .as_ref()
            .ok_or_else(|| Error::AssembleError("no plan to export".into()))?;
        let surface = RenderSurface::full_plan(plan, self.config.viewport);
        // Capture strictly precedes assembly; a failed capture writes nothing.
        let raster = self.backend.capture(&surface)?;
        document::save(&raster, surface.width(), surface.height(), dir)
    }

    /// Capture the summary card, publish it to the share endpoint, and open
    /// the composer intent URL on success. The sharing flag clears on every
    /// exit path.
    pub fn share(&self) -> Result<ShareOutcome> {
        let guard = self.coordinator.begin(Operation::Share)?;
        match self.share_inner() {
            Ok(outcome) => {
                guard.succeed();
                Ok(outcome)
            }
            Err(e) => {
                log::error!("share failed: {}", e);
                guard.fail(e.to_string());
                Err(e)
            }
        }
    }

    fn share_inner(&self) -> Result<ShareOutcome> {
        let plan = self
            .plan
            .as_ref()
            .ok_or_else(|| Error::PublishError("no plan to share".into()))?;
        let surface = RenderSurface::summary_card(plan, self.config.viewport);
        let raster = self.backend.capture(&surface)?;
        self.publisher
            .publish(&raster, &plan.title, &plan.summary, self.composer.as_ref())
    }
}
