//! In-memory bus transport.
//!
//! [`MockTransport`] is a cheap handle over shared state: clone it, hand one
//! copy to the motor under test and keep the other to inspect what was sent.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use servolink_errors::{TransportError, TransportResult};
use servolink_protocol::{Frame, ModeCommand, Transport};

#[derive(Debug, Default)]
struct MockState {
    written: Vec<Frame>,
    feedback: VecDeque<Frame>,
    is_open: bool,
    open_calls: usize,
    close_calls: usize,
    read_calls: usize,
    attempted_writes: usize,
    fail_on_write: bool,
    fail_after: Option<usize>,
    fail_on_read: bool,
}

/// Transport that records every frame written and replays queued feedback.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write fails.
    pub fn with_failure() -> Self {
        let mock = Self::new();
        mock.set_fail_on_write(true);
        mock
    }

    /// The first `successes` writes succeed, every later one fails.
    pub fn failing_after(successes: usize) -> Self {
        let mock = Self::new();
        mock.state.lock().fail_after = Some(successes);
        mock
    }

    pub fn set_fail_on_write(&self, fail: bool) {
        self.state.lock().fail_on_write = fail;
    }

    pub fn set_fail_on_read(&self, fail: bool) {
        self.state.lock().fail_on_read = fail;
    }

    /// Queue a frame for the next `read`.
    pub fn push_feedback(&self, frame: Frame) {
        self.state.lock().feedback.push_back(frame);
    }

    /// Frames successfully written, in order.
    pub fn frames(&self) -> Vec<Frame> {
        self.state.lock().written.clone()
    }

    /// Payloads successfully written, in order.
    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.state
            .lock()
            .written
            .iter()
            .map(|f| f.payload().to_vec())
            .collect()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.state.lock().written.last().copied()
    }

    /// Successful writes.
    pub fn write_count(&self) -> usize {
        self.state.lock().written.len()
    }

    /// Every call to `write`, including failed ones.
    pub fn attempted_writes(&self) -> usize {
        self.state.lock().attempted_writes
    }

    /// Written frames that were not mode-change commands.
    pub fn command_frames(&self) -> Vec<Frame> {
        self.state
            .lock()
            .written
            .iter()
            .filter(|f| ModeCommand::from_payload(f.payload()).is_none())
            .copied()
            .collect()
    }

    /// Mode-change commands written, in order.
    pub fn mode_commands(&self) -> Vec<ModeCommand> {
        self.state
            .lock()
            .written
            .iter()
            .filter_map(|f| ModeCommand::from_payload(f.payload()))
            .collect()
    }

    pub fn read_count(&self) -> usize {
        self.state.lock().read_calls
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().is_open
    }

    pub fn open_calls(&self) -> usize {
        self.state.lock().open_calls
    }

    pub fn close_calls(&self) -> usize {
        self.state.lock().close_calls
    }

    /// Forget recorded frames; failure settings are kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.written.clear();
        state.attempted_writes = 0;
    }
}

impl Transport for MockTransport {
    fn open(&mut self) -> TransportResult {
        let mut state = self.state.lock();
        state.open_calls += 1;
        state.is_open = true;
        Ok(())
    }

    fn close(&mut self) -> TransportResult {
        let mut state = self.state.lock();
        state.close_calls += 1;
        state.is_open = false;
        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> TransportResult {
        let mut state = self.state.lock();
        state.attempted_writes += 1;
        if state.fail_on_write {
            return Err(TransportError::WriteFailed("mock write failure".to_string()));
        }
        if let Some(limit) = state.fail_after.filter(|limit| state.written.len() >= *limit) {
            return Err(TransportError::WriteFailed(format!(
                "mock write failure after {limit} frames"
            )));
        }
        state.written.push(*frame);
        Ok(())
    }

    fn read(&mut self) -> TransportResult<Option<Frame>> {
        let mut state = self.state.lock();
        state.read_calls += 1;
        if state.fail_on_read {
            return Err(TransportError::ReadFailed("mock read failure".to_string()));
        }
        Ok(state.feedback.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_writes_through_clone() {
        let probe = MockTransport::new();
        let mut bus = probe.clone();
        bus.write(&Frame::full(1, 0, ModeCommand::EnterMotorMode.payload()))
            .unwrap();
        bus.write(&Frame::full(1, 0, [0x80, 0, 0x80, 0, 0, 0, 0x08, 0]))
            .unwrap();
        assert_eq!(probe.write_count(), 2);
        assert_eq!(probe.mode_commands(), vec![ModeCommand::EnterMotorMode]);
        assert_eq!(probe.command_frames().len(), 1);
    }

    #[test]
    fn test_fail_after() {
        let mut bus = MockTransport::failing_after(2);
        let frame = Frame::new(1, 0, &[1]);
        assert!(bus.write(&frame).is_ok());
        assert!(bus.write(&frame).is_ok());
        assert!(bus.write(&frame).is_err());
        assert_eq!(bus.write_count(), 2);
        assert_eq!(bus.attempted_writes(), 3);
    }

    #[test]
    fn test_always_fail() {
        let mut bus = MockTransport::with_failure();
        assert!(bus.write(&Frame::default()).is_err());
        assert_eq!(bus.write_count(), 0);
    }

    #[test]
    fn test_feedback_queue() {
        let mut bus = MockTransport::new();
        assert_eq!(bus.read().unwrap(), None);
        bus.push_feedback(Frame::new(1, 0, &[1, 2, 3, 4, 5, 6]));
        assert_eq!(bus.read().unwrap().map(|f| f.size), Some(6));
        assert_eq!(bus.read_count(), 2);
        bus.set_fail_on_read(true);
        assert!(bus.read().is_err());
    }

    #[test]
    fn test_open_close() {
        let mut bus = MockTransport::new();
        bus.open().unwrap();
        assert!(bus.is_open());
        bus.close().unwrap();
        assert!(!bus.is_open());
        assert_eq!((bus.open_calls(), bus.close_calls()), (1, 1));
    }
}
