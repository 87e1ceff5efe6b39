//! `ChannelRoad` — single-threaded server realization.
//!
//! All road state lives on one server thread that owns the [`Coordinator`]
//! outright, so no lock is ever taken.  Callers are synchronous stubs: each
//! operation sends a [`Command`] carrying a fresh `bounded(1)` reply channel
//! and blocks reading it.  A deferred request simply keeps its reply sender
//! in the deferred queue until re-evaluation resolves it.
//!
//! The server re-evaluates after every command that changes the road
//! (the coordinator does this itself), so no command can leave an eligible
//! request parked.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use cw_core::{RoadConfig, RoadError, RoadResult};
use cw_rules::{Reply, Request};
use log::{debug, error, info};

use crate::{Coordinator, NoopObserver, Resume, Road, RoadObserver, RoadSnapshot, TickReport};

type ReplyTx = Sender<RoadResult<Reply>>;

/// Messages accepted by the road server.
enum Command {
    Call     { request: Request, reply: ReplyTx },
    Tick     { reply: Sender<TickReport> },
    Cancel   { seq: u64, reply: Sender<bool> },
    Snapshot { reply: Sender<RoadSnapshot> },
}

impl Resume for ReplyTx {
    fn resume(self, outcome: RoadResult<Reply>) {
        if self.send(outcome).is_err() {
            debug!("caller hung up before its reply arrived");
        }
    }
}

/// A [`Road`] served by a dedicated thread over channels.
///
/// Dropping the road closes the command channel and joins the server.
pub struct ChannelRoad {
    config:   RoadConfig,
    commands: Option<Sender<Command>>,
    server:   Option<JoinHandle<()>>,
}

impl ChannelRoad {
    /// Start a server with no observer.
    pub fn spawn(config: RoadConfig) -> RoadResult<Self> {
        Self::spawn_with_observer(config, Box::new(NoopObserver))
    }

    pub fn spawn_with_observer(
        config:   RoadConfig,
        observer: Box<dyn RoadObserver + Send>,
    ) -> RoadResult<Self> {
        let core = Coordinator::new(config.clone(), observer)?;
        let (tx, rx) = unbounded();
        let server = thread::Builder::new()
            .name("road-server".into())
            .spawn(move || serve(core, rx))
            .map_err(|e| RoadError::Spawn(e.to_string()))?;
        Ok(Self {
            config,
            commands: Some(tx),
            server:   Some(server),
        })
    }

    fn send(&self, command: Command) -> RoadResult<()> {
        let commands = self.commands.as_ref().ok_or(RoadError::Disconnected)?;
        commands.send(command).map_err(|_| RoadError::Disconnected)
    }

    /// Send a command built around a fresh reply channel and wait for the answer.
    fn request<T>(&self, make: impl FnOnce(Sender<T>) -> Command) -> RoadResult<T> {
        let (tx, rx) = bounded(1);
        self.send(make(tx))?;
        rx.recv().map_err(|_| RoadError::Disconnected)
    }
}

impl Road for ChannelRoad {
    fn call(&self, request: Request) -> RoadResult<Reply> {
        self.request(|reply| Command::Call { request, reply })?
    }

    fn tick(&self) -> RoadResult<TickReport> {
        self.request(|reply| Command::Tick { reply })
    }

    fn cancel(&self, seq: u64) -> RoadResult<bool> {
        self.request(|reply| Command::Cancel { seq, reply })
    }

    fn snapshot(&self) -> RoadResult<RoadSnapshot> {
        self.request(|reply| Command::Snapshot { reply })
    }

    fn config(&self) -> &RoadConfig {
        &self.config
    }
}

impl Drop for ChannelRoad {
    fn drop(&mut self) {
        // Closing the channel ends the server loop.
        self.commands.take();
        if let Some(server) = self.server.take() {
            if server.join().is_err() {
                error!("road server thread panicked");
            }
        }
    }
}

/// Server loop: one command at a time until every sender is gone.
fn serve(mut core: Coordinator<ReplyTx>, commands: Receiver<Command>) {
    info!("road server started");
    for command in commands.iter() {
        match command {
            Command::Call { request, reply } => core.submit(request, reply),
            Command::Tick { reply } => {
                let _ = reply.send(core.tick());
            }
            Command::Cancel { seq, reply } => {
                let _ = reply.send(core.cancel(seq));
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(core.snapshot());
            }
        }
    }
    info!("road server stopped at {}", core.clock());
}
