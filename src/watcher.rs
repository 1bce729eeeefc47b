//! Keeps the derived root set in sync with the metadata database.
//!
//! The whole database tree is watched, so a package directory created under
//! the root and the `desc` file written inside it both show up. Each creation
//! or removal triggers a full rebuild cycle (scan, compute roots, emit).
//! Rebuilds run one at a time on the loop itself; events arriving meanwhile
//! wait in the channel and are serviced in order. Without a settle window
//! there is no coalescing: one rebuild per event.

use log::{debug, info, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::error::{Error, Result};
use crate::manifest::Emitter;
use crate::package::{RootSet, compute_roots, scan};
use crate::runtime::Runtime;

pub type EventResult = notify::Result<Event>;

/// Only creations and removals change the set of installed packages.
pub fn is_qualifying(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Remove(_))
}

/// One full scan, compute and emit cycle.
#[tracing::instrument(skip(runtime, emitter))]
pub fn rebuild<R: Runtime, E: Emitter + ?Sized>(
    runtime: &R,
    root: &Path,
    emitter: &mut E,
) -> Result<RootSet> {
    let records = scan(runtime, root)?;
    let roots = compute_roots(&records);
    debug!(
        "{} of {} package(s) are roots",
        roots.len(),
        records.len()
    );
    emitter.emit(&roots)?;
    Ok(roots)
}

/// Subscribe to filesystem events anywhere under `root`.
///
/// The returned watcher must be kept alive for events to keep flowing.
pub fn subscribe(root: &Path) -> Result<(RecommendedWatcher, UnboundedReceiver<EventResult>)> {
    let (tx, rx) = mpsc::unbounded_channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: EventResult| {
            // The loop is gone when the receiver is dropped; nothing to do.
            let _ = tx.send(res);
        },
        notify::Config::default(),
    )
    .map_err(Error::WatchSetup)?;

    watcher
        .watch(root, RecursiveMode::Recursive)
        .map_err(Error::WatchSetup)?;

    Ok((watcher, rx))
}

pub struct ChangeWatcher<'a, R: Runtime, E: Emitter> {
    runtime: &'a R,
    root: PathBuf,
    emitter: E,
    settle: Option<Duration>,
    rebuilds: u64,
}

impl<'a, R: Runtime, E: Emitter> ChangeWatcher<'a, R, E> {
    pub fn new(runtime: &'a R, root: PathBuf, emitter: E) -> Self {
        Self {
            runtime,
            root,
            emitter,
            settle: None,
            rebuilds: 0,
        }
    }

    /// Wait `settle` after a qualifying event and fold everything queued by
    /// then into a single rebuild.
    ///
    /// Gives the package manager time to finish writing a `desc` file whose
    /// creation triggered the event.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = (!settle.is_zero()).then_some(settle);
        self
    }

    /// Number of rebuild cycles completed so far.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    pub fn into_emitter(self) -> E {
        self.emitter
    }

    pub fn rebuild(&mut self) -> Result<RootSet> {
        let roots = rebuild(self.runtime, &self.root, &mut self.emitter)?;
        self.rebuilds += 1;
        Ok(roots)
    }

    /// Subscribe to the metadata root and rebuild on every qualifying event.
    ///
    /// With `initial` set, one rebuild runs before waiting for events. Returns
    /// `Ok(())` on Ctrl-C, or the first rebuild error.
    #[tracing::instrument(skip(self))]
    pub async fn watch(mut self, initial: bool) -> Result<()> {
        let (_watcher, events) = subscribe(&self.root)?;
        info!("Watching {}", self.root.display());

        if initial {
            self.rebuild()?;
        }

        tokio::select! {
            res = self.run(events) => res,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watcher");
                Ok(())
            }
        }
    }

    /// Service events until the channel closes.
    pub async fn run(&mut self, mut events: UnboundedReceiver<EventResult>) -> Result<()> {
        while let Some(event) = events.recv().await {
            if !accept(event) {
                continue;
            }

            if let Some(settle) = self.settle {
                tokio::time::sleep(settle).await;
                let mut folded = 0;
                while let Ok(event) = events.try_recv() {
                    if accept(event) {
                        folded += 1;
                    }
                }
                if folded > 0 {
                    debug!("Folded {} queued event(s) into one rebuild", folded);
                }
            }

            self.rebuild()?;
        }
        debug!("Event stream closed after {} rebuild(s)", self.rebuilds);
        Ok(())
    }
}

/// Log an event and report whether it calls for a rebuild.
fn accept(event: EventResult) -> bool {
    match event {
        Ok(event) if is_qualifying(&event.kind) => {
            info!("Rebuilding after {:?} on {:?}", event.kind, event.paths);
            true
        }
        Ok(event) => {
            debug!("Ignoring {:?} on {:?}", event.kind, event.paths);
            false
        }
        Err(e) => {
            warn!("{}", Error::WatchDelivery(e));
            false
        }
    }
}
