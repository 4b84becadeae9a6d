use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Transfer counters shared by every packet context that is handed a
/// reference to it.
///
/// Counters are independent relaxed atomics. A snapshot taken while other
/// threads are encoding may mix counts from before and after a given packet.
#[derive(Debug, Default)]
pub struct Statistics {
    packets_sent: AtomicU64,
    packets_received: AtomicU64,
    crc_errors: AtomicU64,
    frame_errors: AtomicU64,
    link_errors: AtomicU64,
    bytes_sent: AtomicU64,
    bytes_received: AtomicU64,
}

/// Point-in-time copy of [`Statistics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsSnapshot {
    pub packets_sent: u64,
    pub packets_received: u64,
    pub crc_errors: u64,
    pub frame_errors: u64,
    pub link_errors: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

fn bump(counter: &AtomicU64, by: usize) {
    counter.fetch_add(by as u64, Ordering::Relaxed);
}

impl Statistics {
    pub const fn new() -> Self {
        Self {
            packets_sent: AtomicU64::new(0),
            packets_received: AtomicU64::new(0),
            crc_errors: AtomicU64::new(0),
            frame_errors: AtomicU64::new(0),
            link_errors: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            packets_sent: self.packets_sent.load(Ordering::Relaxed),
            packets_received: self.packets_received.load(Ordering::Relaxed),
            crc_errors: self.crc_errors.load(Ordering::Relaxed),
            frame_errors: self.frame_errors.load(Ordering::Relaxed),
            link_errors: self.link_errors.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        for counter in [
            &self.packets_sent,
            &self.packets_received,
            &self.crc_errors,
            &self.frame_errors,
            &self.link_errors,
            &self.bytes_sent,
            &self.bytes_received,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Count a failure reported by the physical transport.
    pub fn record_link_error(&self) {
        bump(&self.link_errors, 1);
    }

    pub(crate) fn record_sent(&self, bytes: usize) {
        bump(&self.packets_sent, 1);
        bump(&self.bytes_sent, bytes);
    }

    pub(crate) fn record_received(&self, bytes: usize) {
        bump(&self.packets_received, 1);
        bump(&self.bytes_received, bytes);
    }

    pub(crate) fn record_crc_error(&self) {
        bump(&self.crc_errors, 1);
    }

    pub(crate) fn record_frame_error(&self) {
        bump(&self.frame_errors, 1);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(Statistics::new().snapshot(), StatisticsSnapshot::default());
    }

    #[test]
    fn reset_zeroes_everything() {
        let stats = Statistics::new();
        stats.record_sent(10);
        stats.record_received(12);
        stats.record_crc_error();
        stats.record_frame_error();
        stats.record_link_error();

        let snap = stats.snapshot();
        assert_eq!(snap.packets_sent, 1);
        assert_eq!(snap.bytes_received, 12);
        assert_eq!(snap.link_errors, 1);

        stats.reset();
        assert_eq!(stats.snapshot(), StatisticsSnapshot::default());
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let stats = Arc::new(Statistics::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        stats.record_sent(3);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = stats.snapshot();
        assert_eq!(snap.packets_sent, 4000);
        assert_eq!(snap.bytes_sent, 12_000);
    }

    #[test]
    fn snapshot_serializes() {
        let stats = Statistics::new();
        stats.record_sent(5);
        let json = serde_json::to_value(stats.snapshot()).unwrap();
        assert_eq!(json["packets_sent"], 1);
        assert_eq!(json["bytes_sent"], 5);
    }
}
