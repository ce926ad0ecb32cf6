//! Data words exchanged on the bus

/// A buffer element that can be shifted out as one SPI frame.
///
/// Frames travel through the stack as `u32`; the peripheral only clocks the
/// low `bits` of each frame, where `bits` comes from the active [`Format`].
/// Converting a received frame back into a narrower word truncates it.
///
/// [`Format`]: crate::Format
pub trait Word: Copy + Default + 'static {
    /// Widen this word into a frame
    fn to_frame(self) -> u32;

    /// Narrow a received frame into this word type
    fn from_frame(frame: u32) -> Self;
}

impl Word for u8 {
    #[inline]
    fn to_frame(self) -> u32 {
        u32::from(self)
    }

    #[inline]
    fn from_frame(frame: u32) -> Self {
        frame as u8
    }
}

impl Word for u16 {
    #[inline]
    fn to_frame(self) -> u32 {
        u32::from(self)
    }

    #[inline]
    fn from_frame(frame: u32) -> Self {
        frame as u16
    }
}

impl Word for u32 {
    #[inline]
    fn to_frame(self) -> u32 {
        self
    }

    #[inline]
    fn from_frame(frame: u32) -> Self {
        frame
    }
}
