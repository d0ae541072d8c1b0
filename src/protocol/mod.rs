//! The request/response engine: collecting responses and dispatching commands.

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::commands::{Catalog, Command, Frame};
use crate::devices::Transport;
use crate::errors::{DecodeError, DeviceError};
use crate::handlers::{DefaultHandler, ResponseHandler, TagEnumeration};

/// How long to give the device before and after draining a response.
pub const SETTLE_INTERVAL: Duration = Duration::from_millis(100);

/// Collects one response by writing a frame and draining the port until it goes quiet.
///
/// The protocol carries no length or terminator on responses, so the end of a
/// response is taken to be the point where no more bytes are waiting.
#[derive(Copy, Clone, Debug)]
pub struct ResponseCollector {
    settle: Duration,
}

impl ResponseCollector {
    pub fn new(settle: Duration) -> Self {
        ResponseCollector { settle }
    }

    /// Writes `frame` and returns whatever the device sent back, possibly nothing.
    pub fn exchange(&self, transport: &mut dyn Transport, frame: &Frame) -> Result<Vec<u8>, DeviceError> {
        transport.write_all(frame.as_bytes())?;

        // Give the device time to start answering
        thread::sleep(self.settle);

        let mut response = Vec::new();
        while transport.bytes_available()? > 0 {
            response.extend(transport.read_available()?);
        }

        // A slow device may still be mid transmission
        thread::sleep(self.settle);

        debug!("Exchanged {} bytes for {} byte response", frame.len(), response.len());
        Ok(response)
    }

    /// Throws away anything left over from an earlier exchange
    pub fn discard_stale(&self, transport: &mut dyn Transport) -> Result<(), DeviceError> {
        if transport.bytes_available()? > 0 {
            transport.flush_input()?;
        }
        Ok(())
    }
}

impl Default for ResponseCollector {
    fn default() -> Self {
        Self::new(SETTLE_INTERVAL)
    }
}

/// Resolves commands to frames and routes each response to its handler.
pub struct Dispatcher {
    catalog: Catalog,
    collector: ResponseCollector,
    handlers: HashMap<Command, Box<dyn ResponseHandler>>,
    default_handler: Box<dyn ResponseHandler>,
}

impl Dispatcher {
    /// Creates a dispatcher with no per-command handlers registered
    pub fn new(catalog: Catalog, collector: ResponseCollector) -> Self {
        Dispatcher {
            catalog,
            collector,
            handlers: HashMap::new(),
            default_handler: Box::new(DefaultHandler),
        }
    }

    /// Overrides the handler used for one command
    pub fn register(&mut self, command: Command, handler: Box<dyn ResponseHandler>) {
        self.handlers.insert(command, handler);
    }

    /// Sends every frame of the named command and hands each response to its handler.
    pub fn execute(&self, transport: &mut dyn Transport, name: &str) -> Result<(), DecodeError> {
        self.collector.discard_stale(transport)?;

        let (command, frames) = self.catalog.lookup(name)?;
        info!("Sending command: {}", command);

        let handler = self
            .handlers
            .get(&command)
            .unwrap_or(&self.default_handler);

        for frame in frames {
            let response = self.collector.exchange(transport, frame)?;
            handler.handle(transport, &self.collector, command, &response)?;
        }

        Ok(())
    }
}

impl Default for Dispatcher {
    /// The full Velocio command set, with tag enumeration wired to `read_tags`
    fn default() -> Self {
        let mut dispatcher = Dispatcher::new(Catalog::new(), ResponseCollector::default());
        dispatcher.register(Command::ReadTags, Box::new(TagEnumeration));
        dispatcher
    }
}
