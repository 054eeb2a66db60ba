//! Background job registry: one worker thread per remote call, outcomes
//! funneled back to the controller over an mpsc channel.

use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread;

use crate::classifier::{self, Classification, ClassifyError, ClassifyRequest, HealthStatus};

pub(crate) enum JobMessage {
    ClassifyFinished(Result<Classification, ClassifyError>),
    HealthChecked(Result<HealthStatus, ClassifyError>),
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    classify_in_progress: bool,
    health_in_progress: bool,
}

impl ControllerJobs {
    pub(crate) fn new() -> Self {
        let (message_tx, message_rx) = channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            classify_in_progress: false,
            health_in_progress: false,
        }
    }

    pub(crate) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(crate) fn message_sender(&self) -> Sender<JobMessage> {
        self.message_tx.clone()
    }

    pub(crate) fn classify_in_progress(&self) -> bool {
        self.classify_in_progress
    }

    /// Run one classification call on a worker thread. Ignored while a call
    /// is already outstanding.
    pub(crate) fn begin_classify(&mut self, base_url: String, request: ClassifyRequest) {
        if self.classify_in_progress {
            return;
        }
        self.classify_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = classifier::classify(&base_url, &request);
            let _ = tx.send(JobMessage::ClassifyFinished(result));
        });
    }

    pub(crate) fn clear_classify(&mut self) {
        self.classify_in_progress = false;
    }

    /// Run one availability probe on a worker thread.
    pub(crate) fn begin_health_check(&mut self, base_url: String) {
        if self.health_in_progress {
            return;
        }
        self.health_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = classifier::check_health(&base_url);
            let _ = tx.send(JobMessage::HealthChecked(result));
        });
    }

    pub(crate) fn clear_health_check(&mut self) {
        self.health_in_progress = false;
    }
}
