//! Prescription submission simulator.
//!
//! [`PrescriptionUpload`] is the pure state machine; [`UploadSimulator`]
//! drives it with timers instead of a network call:
//! selected → uploading → (delay) → success → (delay) → idle.

use std::cell::RefCell;
use std::rc::Rc;

use pharmacy_types::{
    PharmacyError, Result,
    config::UploadConfig,
    event::AppEvent,
    upload::{PrescriptionFile, UploadState, UploadStatus},
};
use uuid::Uuid;

use crate::cancel::CancellationToken;
use crate::event_bus::EventBus;
use crate::ports::{PreviewPort, TimerPort};

/// Upload lifecycle with explicit guards on every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrescriptionUpload {
    state: UploadState,
}

impl PrescriptionUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn status(&self) -> UploadStatus {
        self.state.status()
    }

    pub fn file(&self) -> Option<&PrescriptionFile> {
        self.state.file()
    }

    /// Hold `file`, whatever the previous state. Returns the replaced file.
    pub fn select(&mut self, file: PrescriptionFile) -> Option<PrescriptionFile> {
        into_file(std::mem::replace(&mut self.state, UploadState::Selected { file }))
    }

    /// Empty the slot. Returns the removed file.
    pub fn clear(&mut self) -> Option<PrescriptionFile> {
        into_file(std::mem::take(&mut self.state))
    }

    pub fn begin_submit(&mut self) -> Result<()> {
        match std::mem::take(&mut self.state) {
            UploadState::Selected { file } | UploadState::Success { file, .. } => {
                self.state = UploadState::Uploading { file };
                Ok(())
            }
            other => self.reject(other, "submit"),
        }
    }

    pub fn finish_upload(&mut self, reference: Uuid) -> Result<()> {
        match std::mem::take(&mut self.state) {
            UploadState::Uploading { file } => {
                self.state = UploadState::Success { file, reference };
                Ok(())
            }
            other => self.reject(other, "finish upload"),
        }
    }

    /// Start over after a confirmed submission. Returns the released file.
    pub fn reset(&mut self) -> Result<PrescriptionFile> {
        match std::mem::take(&mut self.state) {
            UploadState::Success { file, .. } => Ok(file),
            other => self.reject(other, "reset"),
        }
    }

    fn reject<T>(&mut self, previous: UploadState, action: &str) -> Result<T> {
        let err = PharmacyError::invalid_transition(previous.name(), action);
        self.state = previous;
        Err(err)
    }
}

fn into_file(state: UploadState) -> Option<PrescriptionFile> {
    match state {
        UploadState::Idle => None,
        UploadState::Selected { file }
        | UploadState::Uploading { file }
        | UploadState::Success { file, .. } => Some(file),
    }
}

/// One mounted upload form.
pub struct UploadSimulator {
    machine: RefCell<PrescriptionUpload>,
    timer: Rc<dyn TimerPort>,
    previews: Rc<dyn PreviewPort>,
    config: UploadConfig,
    events: EventBus,
    token: RefCell<CancellationToken>,
}

impl UploadSimulator {
    pub fn new(
        config: UploadConfig,
        timer: Rc<dyn TimerPort>,
        previews: Rc<dyn PreviewPort>,
        events: EventBus,
    ) -> Self {
        Self {
            machine: RefCell::new(PrescriptionUpload::new()),
            timer,
            previews,
            config,
            events,
            token: RefCell::new(CancellationToken::new()),
        }
    }

    pub fn state(&self) -> UploadState {
        self.machine.borrow().state().clone()
    }

    pub fn status(&self) -> UploadStatus {
        self.machine.borrow().status()
    }

    pub fn has_file(&self) -> bool {
        self.machine.borrow().file().is_some()
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        matches!(
            self.machine.borrow().state(),
            UploadState::Selected { .. } | UploadState::Success { .. }
        )
    }

    /// Put a freshly picked file in the slot. Any simulated submission in
    /// flight is abandoned.
    pub fn select(&self, file: PrescriptionFile) {
        self.abandon_in_flight();
        log::info!("Prescription selected: {} ({})", file.name, file.size_label());
        let preview = file.preview.clone();
        let replaced = self.machine.borrow_mut().select(file);
        if let Some(old) = replaced {
            if old.preview != preview {
                self.previews.release(&old.preview);
            }
        }
        self.emit(UploadStatus::Idle);
    }

    pub fn clear(&self) {
        self.abandon_in_flight();
        if let Some(old) = self.machine.borrow_mut().clear() {
            self.previews.release(&old.preview);
        }
        self.emit(UploadStatus::Idle);
    }

    /// Run the simulated submission to completion.
    ///
    /// Resolves to the submission reference once the form has reset, to
    /// `InvalidTransition` when no file is held or a submission is already
    /// running, and to `Cancelled` when the form was changed or unmounted
    /// mid-flight.
    pub async fn submit(&self) -> Result<Uuid> {
        // resubmitting from success supersedes the pending reset
        if matches!(self.machine.borrow().state(), UploadState::Success { .. }) {
            self.abandon_in_flight();
        }
        let token = self.token.borrow().clone();
        if token.is_cancelled() {
            return Err(PharmacyError::Cancelled);
        }
        if let Err(e) = self.machine.borrow_mut().begin_submit() {
            log::warn!("Prescription submit rejected: {}", e);
            return Err(e);
        }
        log::info!("Uploading prescription (simulated)");
        self.emit(UploadStatus::Uploading);

        token.run(self.timer.sleep(self.config.processing_delay_ms)).await?;
        let reference = Uuid::new_v4();
        self.machine.borrow_mut().finish_upload(reference)?;
        log::info!("Prescription accepted: {}", reference);
        self.emit(UploadStatus::Success);

        token.run(self.timer.sleep(self.config.reset_delay_ms)).await?;
        let file = self.machine.borrow_mut().reset()?;
        self.previews.release(&file.preview);
        self.emit(UploadStatus::Idle);
        Ok(reference)
    }

    /// Abandon outstanding timers for good (the form is going away).
    pub fn cancel(&self) {
        self.token.borrow().cancel();
    }

    fn abandon_in_flight(&self) {
        let mut token = self.token.borrow_mut();
        if token.in_flight() > 0 {
            log::debug!("Abandoning in-flight prescription submission");
            token.cancel();
            *token = CancellationToken::new();
        }
    }

    fn emit(&self, status: UploadStatus) {
        self.events.emit(AppEvent::UploadStatusChanged { status });
    }
}

impl Drop for UploadSimulator {
    fn drop(&mut self) {
        self.cancel();
    }
}
