/// RTT statistics for a single node, in whole milliseconds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RttStats {
    pub total: u64,
    pub count: u64,
    /// Smallest non-zero sample seen
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl RttStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, rtt_ms: u64) {
        // A zero RTT counts toward the total and the max, never the min.
        if rtt_ms > 0 {
            self.min = Some(self.min.map_or(rtt_ms, |min| min.min(rtt_ms)));
        }
        self.max = Some(self.max.map_or(rtt_ms, |max| max.max(rtt_ms)));

        self.total = self.total.saturating_add(rtt_ms);
        self.count += 1;
    }

    pub fn average_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total as f64 / self.count as f64
        }
    }

    pub fn min_ms(&self) -> u64 {
        self.min.unwrap_or(0)
    }

    pub fn max_ms(&self) -> u64 {
        self.max.unwrap_or(0)
    }
}
