//! Multi-port capture loop
//!
//! Every session keeps exactly one read pending. All pending reads live in a
//! single [`FuturesUnordered`] polled from one loop, so completions are
//! handled strictly one at a time:
//!
//! 1. take the next finished read, whichever port it came from
//! 2. dump the received bytes to the output sink
//! 3. arm the next read on the same session
//!
//! A dump is finished before its session reads again and before any other
//! completion is looked at, so dumps never interleave and the read buffer is
//! never overwritten while it is being rendered.

use crate::dump::HexDump;
use crate::error::{Error, Result};
use crate::serial::port::PortSession;
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use log::{info, trace};
use std::io::{self, Write};
use tokio::io::AsyncRead;

type Completion<H> = (PortSession<H>, io::Result<usize>);

/// Reads from many ports and dumps whatever arrives
pub struct SerialMonitor<H, W: Write> {
    pending: FuturesUnordered<LocalBoxFuture<'static, Completion<H>>>,
    dump: HexDump<W>,
}

impl<H, W> SerialMonitor<H, W>
where
    H: AsyncRead + Unpin + 'static,
    W: Write,
{
    pub fn new(dump: HexDump<W>) -> Self {
        Self {
            pending: FuturesUnordered::new(),
            dump,
        }
    }

    /// Start reading from `session`
    pub fn arm(&mut self, session: PortSession<H>) {
        self.pending.push(Box::pin(session.read_next()));
    }

    /// Number of sessions with a read in flight
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Capture until a read fails
    ///
    /// A read that completes with zero bytes means the link is gone and is
    /// treated as a failure too. The first failure ends the whole capture.
    /// Returns `Ok` only if there is nothing to read from.
    pub async fn run(&mut self) -> Result<()> {
        info!("Capturing from {} interface(s)", self.len());

        while let Some((session, result)) = self.pending.next().await {
            let descriptor = session.descriptor();

            let len = match result {
                Ok(0) => {
                    return Err(Error::read(
                        descriptor.device(),
                        io::Error::new(io::ErrorKind::UnexpectedEof, "end of stream"),
                    ));
                }
                Ok(len) => len,
                Err(e) => return Err(Error::read(descriptor.device(), e)),
            };

            trace!("{}: received {} byte(s)", descriptor.alias(), len);
            self.dump.dump(descriptor.alias(), session.received(len))?;

            self.arm(session);
        }

        Ok(())
    }
}

/// Capture from all `sessions` into `output` until a read fails
pub async fn run_monitor<H, W>(sessions: Vec<PortSession<H>>, output: W) -> Result<()>
where
    H: AsyncRead + Unpin + 'static,
    W: Write,
{
    let mut monitor = SerialMonitor::new(HexDump::new(output));
    for session in sessions {
        monitor.arm(session);
    }
    monitor.run().await
}
