/// The presentation boundary.
use crate::device::FrameBuffer;

/// Whatever shows finished frames: a terminal, a canvas, a window.
///
/// The host loop clocks frames, draws into a [`FrameBuffer`] and hands it to
/// the sink. The core itself never presents anything.
pub trait DisplaySink {
    type Error;

    /// Show a finished frame.
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;

    /// The output surface changed size; the next frame will match it.
    fn resize(&mut self, width: usize, height: usize) -> Result<(), Self::Error>;
}
