//! Background execution of blocking motion profiles.
//!
//! Profiles keep their blocking, paced send loop; [`ProfileTask`] moves that
//! loop onto tokio's blocking pool and hands the controller back on join.

use servolink_errors::{ControlError, ControlResult};
use servolink_protocol::Transport;
use servolink_units::{Angle, AngularVelocity};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::pacing::Pacer;
use crate::ramp::VelocityRampController;
use crate::step::PositionStepController;

/// Controllers whose profiles observe a [`CancelToken`].
pub trait Cancellable {
    fn cancel_token(&self) -> &CancelToken;
}

impl<T: Transport, P: Pacer> Cancellable for VelocityRampController<T, P> {
    fn cancel_token(&self) -> &CancelToken {
        VelocityRampController::cancel_token(self)
    }
}

impl<T: Transport, P: Pacer> Cancellable for PositionStepController<T, P> {
    fn cancel_token(&self) -> &CancelToken {
        PositionStepController::cancel_token(self)
    }
}

/// A motion profile running on a blocking worker.
#[derive(Debug)]
pub struct ProfileTask<C> {
    handle: JoinHandle<(C, ControlResult)>,
    cancel: CancelToken,
}

impl<C> ProfileTask<C>
where
    C: Cancellable + Send + 'static,
{
    /// Run `profile` against `controller` on the current runtime's blocking
    /// pool.
    ///
    /// # Errors
    ///
    /// [`ControlError::Task`] when called outside a tokio runtime.
    pub fn spawn<F>(controller: C, profile: F) -> Result<Self, ControlError>
    where
        F: FnOnce(&mut C) -> ControlResult + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|e| ControlError::Task(e.to_string()))?;
        let cancel = controller.cancel_token().clone();
        let handle = runtime.spawn_blocking(move || {
            let mut controller = controller;
            let result = profile(&mut controller);
            (controller, result)
        });
        debug!("Motion profile task spawned");
        Ok(Self { handle, cancel })
    }

    /// Stop the profile before its next send.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the profile and take the controller back.
    ///
    /// # Errors
    ///
    /// [`ControlError::Task`] if the worker could not be joined. The profile's
    /// own failure is returned inside the tuple.
    pub async fn join(self) -> Result<(C, ControlResult), ControlError> {
        self.handle
            .await
            .map_err(|e| ControlError::Task(e.to_string()))
    }
}

impl<T, P> VelocityRampController<T, P>
where
    T: Transport + Send + 'static,
    P: Pacer + Send + 'static,
{
    /// [`VelocityRampController::ramp_to`] as a cancellable task.
    ///
    /// # Errors
    ///
    /// See [`ProfileTask::spawn`].
    pub fn spawn_ramp(self, target: AngularVelocity) -> Result<ProfileTask<Self>, ControlError> {
        ProfileTask::spawn(self, move |ctrl| ctrl.ramp_to(target))
    }
}

impl<T, P> PositionStepController<T, P>
where
    T: Transport + Send + 'static,
    P: Pacer + Send + 'static,
{
    /// [`PositionStepController::move_to`] as a cancellable task.
    ///
    /// # Errors
    ///
    /// See [`ProfileTask::spawn`].
    pub fn spawn_move(self, target: Angle) -> Result<ProfileTask<Self>, ControlError> {
        ProfileTask::spawn(self, move |ctrl| ctrl.move_to(target))
    }
}
