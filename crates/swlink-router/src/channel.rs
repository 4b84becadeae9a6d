//! Virtual channels.
//!
//! Channel ids 0-15 index a fixed table. Each channel carries its own flow
//! control credit, starting at [`DEFAULT_CHANNEL_CREDITS`].

/// Number of virtual channels per router.
pub const MAX_CHANNELS: usize = 16;

/// Credit assigned to every channel at router init.
pub const DEFAULT_CHANNEL_CREDITS: u16 = 64;

/// An independently flow-controlled logical path sharing one physical link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualChannel {
    pub channel_id: u8,
    pub active: bool,
    pub credits: u16,
}

impl VirtualChannel {
    pub(crate) fn new(channel_id: u8) -> Self {
        Self {
            channel_id,
            active: false,
            credits: DEFAULT_CHANNEL_CREDITS,
        }
    }

    /// Spend one credit. Returns false if the channel is inactive or out of credit.
    pub fn consume_credit(&mut self) -> bool {
        if !self.active || self.credits == 0 {
            return false;
        }
        self.credits -= 1;
        true
    }

    /// Return credit to the channel (saturating).
    pub fn grant_credits(&mut self, credits: u16) {
        self.credits = self.credits.saturating_add(credits);
    }
}
