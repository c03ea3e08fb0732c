use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;

use tokio::sync::oneshot;

use crate::coordinator::{OpState, Operation};
use crate::model::Plan;
use crate::publish::ShareOutcome;
use crate::studio::Studio;
use crate::{Error, Result, StudioConfig};

enum Command {
    Generate(String, oneshot::Sender<Result<Plan>>),
    Export(PathBuf, oneshot::Sender<Result<PathBuf>>),
    Share(oneshot::Sender<Result<ShareOutcome>>),
    LoadPlan(Plan, oneshot::Sender<()>),
    CurrentPlan(oneshot::Sender<Option<Plan>>),
    ErrorLine(oneshot::Sender<Option<String>>),
    State(Operation, oneshot::Sender<OpState>),
    Close(oneshot::Sender<()>),
}

/// An async-friendly studio abstraction backed by a dedicated worker thread.
///
/// The worker thread owns a synchronous `Studio` instance and executes
/// commands sent from async tasks, so callers get an async interface without
/// the blocking HTTP client ever running on the async runtime. The worker
/// loop also serializes operations against each other: within one
/// invocation, capture strictly precedes assembly or publishing.
#[derive(Clone)]
pub struct StudioHandle {
    cmd_tx: Sender<Command>,
}

impl StudioHandle {
    /// Create a new handle (spawns a background thread that owns the studio).
    pub async fn new(config: Option<StudioConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            // Initialize the studio on the worker thread
            let mut studio = match Studio::new(config) {
                Ok(s) => s,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            let _ = init_tx.send(Ok(()));

            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Generate(message, resp) => {
                        let res = studio.generate(&message).map(Plan::clone);
                        let _ = resp.send(res);
                    }
                    Command::Export(dir, resp) => {
                        let res = studio.export_pdf(&dir);
                        let _ = resp.send(res);
                    }
                    Command::Share(resp) => {
                        let res = studio.share();
                        let _ = resp.send(res);
                    }
                    Command::LoadPlan(plan, resp) => {
                        studio.load_plan(plan);
                        let _ = resp.send(());
                    }
                    Command::CurrentPlan(resp) => {
                        let _ = resp.send(studio.plan().cloned());
                    }
                    Command::ErrorLine(resp) => {
                        let _ = resp.send(studio.error_line());
                    }
                    Command::State(op, resp) => {
                        let _ = resp.send(studio.coordinator().state(op));
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        // Wait for the worker to report initialization success or failure
        let init_res = init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))?;
        init_res?;

        Ok(Self { cmd_tx })
    }

    /// Run a generation exchange and return the produced plan.
    pub async fn generate(&self, message: &str) -> Result<Plan> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Generate(message.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("Generate canceled: {}", e)))?
    }

    /// Export the current plan as a PDF into `dir`.
    pub async fn export(&self, dir: impl Into<PathBuf>) -> Result<PathBuf> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Export(dir.into(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("Export canceled: {}", e)))?
    }

    /// Publish the current plan's summary card to the share endpoint.
    pub async fn share(&self) -> Result<ShareOutcome> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Share(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Share canceled: {}", e)))?
    }

    /// Restore a previously generated plan.
    pub async fn load_plan(&self, plan: Plan) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::LoadPlan(plan, tx));
        rx.await
            .map_err(|e| Error::Other(format!("LoadPlan canceled: {}", e)))
    }

    /// The currently displayed plan, if any.
    pub async fn plan(&self) -> Result<Option<Plan>> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::CurrentPlan(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Plan canceled: {}", e)))
    }

    /// The user-visible error line for a failed generation, if any.
    pub async fn error_line(&self) -> Result<Option<String>> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::ErrorLine(tx));
        rx.await
            .map_err(|e| Error::Other(format!("ErrorLine canceled: {}", e)))
    }

    /// Current state of one operation.
    pub async fn state(&self, op: Operation) -> Result<OpState> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::State(op, tx));
        rx.await
            .map_err(|e| Error::Other(format!("State canceled: {}", e)))
    }

    /// Shutdown the background worker.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))
    }
}
