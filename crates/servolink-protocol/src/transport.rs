//! Transport contract consumed by the actuator.
//!
//! Implementations own the physical bus (SocketCAN, a serial bridge, a mock).
//! A write either succeeds or fails immediately; no timeout or retry is
//! applied on top of it.

use servolink_errors::TransportResult;

use crate::frame::Frame;

/// Minimal send/receive contract for a framed bus.
pub trait Transport {
    /// Open the underlying interface.
    fn open(&mut self) -> TransportResult {
        Ok(())
    }

    /// Close the underlying interface.
    fn close(&mut self) -> TransportResult {
        Ok(())
    }

    /// Write one frame.
    fn write(&mut self, frame: &Frame) -> TransportResult;

    /// Read one pending frame, if any.
    fn read(&mut self) -> TransportResult<Option<Frame>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn open(&mut self) -> TransportResult {
        (**self).open()
    }

    fn close(&mut self) -> TransportResult {
        (**self).close()
    }

    fn write(&mut self, frame: &Frame) -> TransportResult {
        (**self).write(frame)
    }

    fn read(&mut self) -> TransportResult<Option<Frame>> {
        (**self).read()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn open(&mut self) -> TransportResult {
        (**self).open()
    }

    fn close(&mut self) -> TransportResult {
        (**self).close()
    }

    fn write(&mut self, frame: &Frame) -> TransportResult {
        (**self).write(frame)
    }

    fn read(&mut self) -> TransportResult<Option<Frame>> {
        (**self).read()
    }
}
