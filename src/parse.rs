use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// `Node ID <id>` followed later on the same line by `RTT: <ms> ms`
const SAMPLE_PATTERN: &str = r"Node ID ([0-9]+).*?RTT: ([0-9]+) ms";

fn sample_regex() -> &'static Regex {
    static SAMPLE_REGEX: OnceLock<Regex> = OnceLock::new();
    SAMPLE_REGEX.get_or_init(|| Regex::new(SAMPLE_PATTERN).expect("sample pattern is valid"))
}

/// One RTT measurement extracted from a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RttSample {
    pub node_id: u64,
    pub rtt_ms: u64,
}

impl RttSample {
    /// Extract a sample from a log line.
    ///
    /// Returns `None` for lines that don't carry both fragments, and for
    /// digit runs too large to fit a `u64`.
    pub fn from_line(line: &str) -> Option<Self> {
        let caps = sample_regex().captures(line)?;

        let node_id = caps[1].parse::<u64>();
        let rtt_ms = caps[2].parse::<u64>();

        match (node_id, rtt_ms) {
            (Ok(node_id), Ok(rtt_ms)) => Some(Self { node_id, rtt_ms }),
            _ => {
                debug!("Skipping line with out-of-range number: {}", line);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_line() {
        let sample = RttSample::from_line("Node ID 1 blah RTT: 10 ms");
        assert_eq!(sample, Some(RttSample { node_id: 1, rtt_ms: 10 }));
    }

    #[test]
    fn test_coordinator_status_line() {
        let line = "Node ID 7 [fd00::207:7:7:7] via root | TX: 12 | RX: 11 | PRR: 91% | Temp: 24C | RSSI: -61 | PING Sent: 10 | PONG Received: 9 | Packet Loss: 10% | RTT: 42 ms\r";
        let sample = RttSample::from_line(line);
        assert_eq!(sample, Some(RttSample { node_id: 7, rtt_ms: 42 }));
    }

    #[test]
    fn test_first_rtt_after_node_id_wins() {
        let sample = RttSample::from_line("Node ID 3 RTT: 5 ms then RTT: 9 ms");
        assert_eq!(sample, Some(RttSample { node_id: 3, rtt_ms: 5 }));
    }

    #[test]
    fn test_missing_fragments() {
        assert_eq!(RttSample::from_line("garbage line"), None);
        assert_eq!(RttSample::from_line("Node ID 4 | TX: 3"), None);
        assert_eq!(RttSample::from_line("PONG received from Coordinator | RTT: 12 ms"), None);
        assert_eq!(RttSample::from_line("Node 4 | RTT: 12 ms"), None);
        assert_eq!(RttSample::from_line(""), None);
    }

    #[test]
    fn test_rtt_before_node_id_does_not_match() {
        assert_eq!(RttSample::from_line("RTT: 12 ms Node ID 4"), None);
    }

    #[test]
    fn test_rtt_requires_ms_suffix() {
        assert_eq!(RttSample::from_line("Node ID 4 RTT: 12ms"), None);
        assert_eq!(RttSample::from_line("Node ID 4 RTT: -12 ms"), None);
    }

    #[test]
    fn test_overflowing_number_is_skipped() {
        let line = "Node ID 1 RTT: 99999999999999999999999 ms";
        assert_eq!(RttSample::from_line(line), None);
    }
}
