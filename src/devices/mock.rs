//! A scripted in-memory transport for tests.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::Transport;
use crate::errors::DeviceError;

/// Serves one scripted response per write and records everything written.
#[derive(Default)]
pub struct MockTransport {
    pub writes: Vec<Vec<u8>>,
    pub responses: VecDeque<Vec<u8>>,
    pub pending: VecDeque<u8>,
    pub flushes: usize,
    /// Largest number of bytes handed out by one read, to simulate a response arriving in pieces
    pub chunk: Option<usize>,
    /// How long after a write the response becomes readable, to simulate a slow device
    pub latency: Option<Duration>,
    written_at: Option<Instant>,
}

impl MockTransport {
    pub fn new<I: IntoIterator<Item = Vec<u8>>>(responses: I) -> Self {
        MockTransport {
            responses: responses.into_iter().collect(),
            ..Default::default()
        }
    }

    /// True while the last response is still on its way from the device
    fn in_flight(&self) -> bool {
        match (self.latency, self.written_at) {
            (Some(latency), Some(at)) => at.elapsed() < latency,
            _ => false,
        }
    }

    /// Leaves bytes in the receive buffer before any exchange begins
    pub fn with_stale(mut self, stale: &[u8]) -> Self {
        self.pending.extend(stale);
        self
    }
}

impl Transport for MockTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), DeviceError> {
        self.writes.push(data.to_vec());
        self.written_at = Some(Instant::now());
        if let Some(response) = self.responses.pop_front() {
            self.pending.extend(response);
        }
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<u32, DeviceError> {
        if self.in_flight() {
            return Ok(0);
        }
        Ok(self.pending.len() as u32)
    }

    fn read_available(&mut self) -> Result<Vec<u8>, DeviceError> {
        if self.in_flight() {
            return Ok(Vec::new());
        }
        let n = self.chunk.unwrap_or(self.pending.len()).min(self.pending.len());
        Ok(self.pending.drain(..n).collect())
    }

    fn flush_input(&mut self) -> Result<(), DeviceError> {
        self.flushes += 1;
        self.pending.clear();
        Ok(())
    }
}
