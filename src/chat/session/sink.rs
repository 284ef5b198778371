//! Outbound seam towards the relay connection.

use crate::chat::protocol::OutboundFrame;

/// Fire-and-forget frame transport. There is no acknowledgment channel:
/// a frame handed over here may still be lost if the connection is down.
pub trait FrameSink {
    /// Queue `frame` for delivery.
    fn send_frame(&mut self, frame: &OutboundFrame);
}

impl FrameSink for Vec<OutboundFrame> {
    fn send_frame(&mut self, frame: &OutboundFrame) {
        self.push(frame.clone());
    }
}
