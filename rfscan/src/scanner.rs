//! High-level reader interface
//!
//! A [`Scanner`] owns one transport connection, one vendor dialect and one
//! scan session. `start_scan` drives the poll loop: build the inventory
//! command, send it, reassemble response frames out of the transport's byte
//! chunks, interpret them, and report progress and faults through the
//! caller's callbacks. One outstanding send and one receive accumulation at
//! a time; frame interpretation is synchronous with the receive loop.

use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use rfscan_core::dialect::{Dialect, Verdict};
use rfscan_core::reassembler::Reassembler;
use rfscan_core::session::{ScanOptions, ScanSession, ScanState, TerminalKind};
use rfscan_core::{Hf, WYuan, frame};
use rfscan_transport::{SerialTransport, TcpTransport, Transport};
use rfscan_types::{ScanFault, ScanUpdate, TagBatch};

use crate::error::{Error, Result};

/// How one send/receive attempt ended
enum AttemptEnd {
    /// Terminal frame received (or the reader went quiet on a dialect where
    /// that means completion)
    Completed,

    /// Benign inquiry-timeout status; nothing to report
    Quiet,

    /// Cancellation observed during the receive loop
    Cancelled,
}

/// RFID reader handle
///
/// # Examples
///
/// ```no_run
/// use rfscan::Scanner;
///
/// #[tokio::main]
/// async fn main() -> rfscan::Result<()> {
///     let mut scanner = Scanner::w_yuan_serial("/dev/ttyUSB0");
///     scanner.connect().await?;
///
///     scanner
///         .start_scan(
///             |update| {
///                 for batch in &update.batches {
///                     for tag in &batch.records {
///                         println!("{tag}");
///                     }
///                 }
///             },
///             |fault| eprintln!("scan failed: {fault}"),
///         )
///         .await?;
///
///     scanner.close().await?;
///     Ok(())
/// }
/// ```
pub struct Scanner<D: Dialect> {
    transport: Box<dyn Transport>,
    dialect: D,
    options: ScanOptions,
    session: ScanSession,
    splicing: Vec<TagBatch>,
}

impl Scanner<WYuan> {
    /// W-Yuan reader over any transport
    pub fn w_yuan(transport: Box<dyn Transport>) -> Self {
        Self::with_dialect(transport, WYuan)
    }

    /// W-Yuan reader on a directly attached serial line (57600 baud)
    pub fn w_yuan_serial(path: impl Into<String>) -> Self {
        Self::w_yuan(Box::new(SerialTransport::for_wyuan_reader(path)))
    }
}

impl Scanner<Hf> {
    /// HF reader over any transport
    pub fn hf(transport: Box<dyn Transport>) -> Self {
        Self::with_dialect(transport, Hf)
    }

    /// Network-attached HF reader on its stock TCP port
    pub fn hf_tcp(host: impl Into<String>) -> Self {
        Self::hf(Box::new(TcpTransport::for_hf_reader(host)))
    }
}

impl<D: Dialect> Scanner<D> {
    pub fn with_dialect(transport: Box<dyn Transport>, dialect: D) -> Self {
        Self {
            transport,
            dialect,
            options: ScanOptions::default(),
            session: ScanSession::new(),
            splicing: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Clonable session handle, for stopping a scan from outside the loop
    pub fn session(&self) -> ScanSession {
        self.session.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    pub async fn connect(&mut self) -> Result<()> {
        self.transport.connect().await?;
        debug!(endpoint = %self.transport.endpoint(), dialect = self.dialect.name(), "reader connected");
        Ok(())
    }

    /// Stop any scan in progress and close the transport
    pub async fn close(&mut self) -> Result<()> {
        self.stop_scan();
        self.transport.close().await?;
        Ok(())
    }

    /// Run a scan, reporting progress and faults through the callbacks
    ///
    /// Each reassembled frame produces at most one `on_progress` call; the
    /// final update of an attempt carries `finished: true`. Faults reach
    /// `on_error` exactly once and terminate the session. With
    /// `ScanOptions::poll` set (the default) the scan command is re-issued
    /// after each completed attempt, with the accumulated batches cleared,
    /// until the session is cancelled.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotConnected` if called before `connect`. Failures
    /// during the scan itself are reported through `on_error`, never as a
    /// return value; cancellation reports nothing.
    pub async fn start_scan<P, E>(&mut self, mut on_progress: P, mut on_error: E) -> Result<()>
    where
        P: FnMut(ScanUpdate),
        E: FnMut(ScanFault),
    {
        if !self.transport.is_connected() {
            return Err(Error::NotConnected);
        }

        self.session.begin();
        self.splicing.clear();
        let command = self.dialect.scan_command(&self.options);

        loop {
            if self.session.is_cancelled() {
                self.splicing.clear();
                self.session.finish(TerminalKind::Cancelled);
                return Ok(());
            }

            self.splicing.clear();
            match self.run_attempt(&command, &mut on_progress).await {
                Ok(AttemptEnd::Completed | AttemptEnd::Quiet) => {}
                Ok(AttemptEnd::Cancelled) => {
                    self.splicing.clear();
                    self.session.finish(TerminalKind::Cancelled);
                    return Ok(());
                }
                Err(err) => {
                    // A cancel signalled while a receive was pending surfaces
                    // as a transport error; cancellation stays silent.
                    if self.session.is_cancelled() {
                        self.splicing.clear();
                        self.session.finish(TerminalKind::Cancelled);
                        return Ok(());
                    }
                    warn!(error = %err, "scan attempt failed");
                    on_error(fault_for(&err));
                    self.abort();
                    return Ok(());
                }
            }

            if !self.options.poll {
                break;
            }
            tokio::time::sleep(self.poll_delay()).await;
        }

        self.session.finish(TerminalKind::Complete);
        Ok(())
    }

    /// Cancel the session and discard accumulated batches; idempotent
    pub fn stop_scan(&mut self) {
        self.session.cancel();
        self.splicing.clear();
        if self.session.is_active() {
            self.session.finish(TerminalKind::Cancelled);
        }
    }

    fn abort(&mut self) {
        self.session.cancel();
        self.splicing.clear();
        self.session.finish(TerminalKind::Failed);
    }

    fn poll_delay(&self) -> Duration {
        self.options
            .poll_delay
            .unwrap_or_else(|| self.dialect.poll_delay())
    }

    /// One send/receive cycle: send the command, reassemble and interpret
    /// response frames until the attempt reaches a terminal outcome
    async fn run_attempt<P>(&mut self, command: &Bytes, on_progress: &mut P) -> Result<AttemptEnd>
    where
        P: FnMut(ScanUpdate),
    {
        self.session.set_state(ScanState::Sending);
        self.transport.send(command).await?;
        trace!(dialect = self.dialect.name(), "scan command sent");

        self.session.set_state(ScanState::AwaitingFrame);
        let mut reassembler = Reassembler::new(self.dialect.frame_layout());
        let wait = self
            .options
            .read_timeout
            .unwrap_or_else(|| self.dialect.read_timeout());

        loop {
            let chunk = match self.transport.receive(wait).await {
                Ok(chunk) => chunk,
                Err(rfscan_transport::Error::ReadTimeout)
                    if self.dialect.idle_completes_attempt() =>
                {
                    if self.session.is_cancelled() {
                        return Ok(AttemptEnd::Cancelled);
                    }

                    // No terminal status byte in this dialect; the reader
                    // going quiet is the attempt boundary.
                    on_progress(ScanUpdate {
                        batches: self.splicing.clone(),
                        finished: true,
                    });
                    return Ok(AttemptEnd::Completed);
                }
                Err(rfscan_transport::Error::ConnectionClosed) => {
                    reassembler.finish()?;
                    return Err(rfscan_transport::Error::ConnectionClosed.into());
                }
                Err(err) => return Err(err.into()),
            };

            if self.session.is_cancelled() {
                return Ok(AttemptEnd::Cancelled);
            }

            for frame in reassembler.feed(&chunk) {
                if self.options.verify_checksum {
                    frame::verify(&frame)?;
                }

                match self.dialect.interpret(&frame)? {
                    Verdict::Complete => {
                        self.splicing.push(TagBatch::terminal(frame));
                        on_progress(ScanUpdate {
                            batches: self.splicing.clone(),
                            finished: true,
                        });
                        return Ok(AttemptEnd::Completed);
                    }
                    Verdict::Continuation => {
                        let records = self.dialect.parse_tags(&frame)?;
                        self.splicing.push(TagBatch::with_records(frame, records));
                        on_progress(ScanUpdate {
                            batches: self.splicing.clone(),
                            finished: false,
                        });
                    }
                    Verdict::Quiet => return Ok(AttemptEnd::Quiet),
                    Verdict::Fault { code, message } => {
                        let err = match message {
                            Some(message) => {
                                rfscan_core::Error::ProtocolStatus { code, message }
                            }
                            None => rfscan_core::Error::UnrecognizedStatus { code },
                        };
                        return Err(err.into());
                    }
                }
            }
        }
    }
}

/// Map a scan failure onto the caller-facing fault categories
fn fault_for(error: &Error) -> ScanFault {
    match error {
        Error::Core(rfscan_core::Error::ProtocolStatus { code, message }) => {
            ScanFault::status(*code, Some(message))
        }
        Error::Core(rfscan_core::Error::UnrecognizedStatus { code }) => {
            ScanFault::status(*code, None)
        }
        Error::Core(core) if !core.is_transport() => ScanFault::protocol(core.to_string()),
        other => ScanFault::transport(other.to_string()),
    }
}
