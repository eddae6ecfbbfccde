//! Raw bus frame.

/// Maximum payload carried by one frame.
pub const FRAME_DATA_LEN: usize = 8;

/// One frame as exchanged with the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    /// Actuator (destination) id.
    pub id: u8,
    /// Host (source) id.
    pub master_id: u8,
    /// Payload; bytes past `size` are zero.
    pub data: [u8; FRAME_DATA_LEN],
    /// Number of valid payload bytes.
    pub size: u8,
}

impl Frame {
    /// Build a frame from up to eight payload bytes; extra bytes are dropped.
    pub fn new(id: u8, master_id: u8, payload: &[u8]) -> Self {
        let mut data = [0u8; FRAME_DATA_LEN];
        let len = payload.len().min(FRAME_DATA_LEN);
        for (dst, src) in data.iter_mut().zip(payload) {
            *dst = *src;
        }
        Self {
            id,
            master_id,
            data,
            size: len as u8,
        }
    }

    /// Full eight-byte frame.
    pub fn full(id: u8, master_id: u8, data: [u8; FRAME_DATA_LEN]) -> Self {
        Self {
            id,
            master_id,
            data,
            size: FRAME_DATA_LEN as u8,
        }
    }

    /// The valid payload bytes.
    pub fn payload(&self) -> &[u8] {
        let len = usize::from(self.size).min(FRAME_DATA_LEN);
        self.data.get(..len).unwrap_or(&[])
    }
}
