//! Real-time scheduler for a `HomeSimulation`
//!
//! One tokio task owns the simulation. It selects over a clock interval,
//! one interval per controller (each on its own cadence), a command channel
//! and a shutdown signal. Ticks never overlap because a single task runs
//! them; controllers are not synchronised to each other beyond that.
//!
//! Stopping abandons any live event in whatever phase it is in. `stop`
//! hands the simulation back so callers can inspect or dump it.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::core::config::CadenceConfig;
use crate::core::error::{Result, SimBotError};
use crate::core::types::{AlarmState, EventCategory, EventId, RoomId};
use crate::events::model::{EventKind, LiveEventView};
use crate::simulation::director::HomeSimulation;

const COMMAND_BUFFER: usize = 32;

enum Command {
    SetRate(f64),
    SetAlarm(AlarmState),
    Force {
        kind: EventKind,
        room: Option<RoomId>,
        reply: oneshot::Sender<Result<EventId>>,
    },
}

/// Control surface for a running simulation
pub struct SimulationHandle {
    commands: mpsc::Sender<Command>,
    live: watch::Receiver<Vec<LiveEventView>>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<HomeSimulation>,
}

impl SimulationHandle {
    pub async fn set_rate(&self, rate: f64) -> Result<()> {
        self.send(Command::SetRate(rate)).await
    }

    pub async fn set_alarm(&self, state: AlarmState) -> Result<()> {
        self.send(Command::SetAlarm(state)).await
    }

    pub async fn force(&self, kind: EventKind, room: Option<RoomId>) -> Result<EventId> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Force { kind, room, reply }).await?;
        response
            .await
            .map_err(|_| SimBotError::RuntimeStopped("force reply dropped".into()))?
    }

    /// Latest live-event board, refreshed after every controller tick
    pub fn live(&self) -> Vec<LiveEventView> {
        self.live.borrow().clone()
    }

    /// Receiver that wakes whenever the live board changes
    pub fn subscribe(&self) -> watch::Receiver<Vec<LiveEventView>> {
        self.live.clone()
    }

    /// Stop the scheduler and take the simulation back
    pub async fn stop(mut self) -> Result<HomeSimulation> {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already have exited; the join below reports that
            let _ = shutdown.send(());
        }
        self.task
            .await
            .map_err(|e| SimBotError::RuntimeStopped(e.to_string()))
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SimBotError::RuntimeStopped("command channel closed".into()))
    }
}

/// Spawn the scheduler on the current tokio runtime
pub fn start(simulation: HomeSimulation) -> SimulationHandle {
    let cadence = simulation.config().cadence.clone();
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (live_tx, live_rx) = watch::channel(simulation.live_views());
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(run(simulation, cadence, command_rx, live_tx, shutdown_rx));

    SimulationHandle {
        commands: command_tx,
        live: live_rx,
        shutdown: Some(shutdown_tx),
        task,
    }
}

fn every(millis: u64) -> tokio::time::Interval {
    let mut timer = interval(Duration::from_millis(millis.max(1)));
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

async fn run(
    mut simulation: HomeSimulation,
    cadence: CadenceConfig,
    mut commands: mpsc::Receiver<Command>,
    live: watch::Sender<Vec<LiveEventView>>,
    mut shutdown: oneshot::Receiver<()>,
) -> HomeSimulation {
    let mut clock = every(cadence.clock_ms);
    let mut disaster = every(cadence.for_category(EventCategory::Disaster));
    let mut home = every(cadence.for_category(EventCategory::HomeEvent));
    let mut intruder = every(cadence.for_category(EventCategory::Intruder));
    let mut last_clock = Instant::now();

    info!(?cadence, "simulation runtime started");

    loop {
        let ticked = tokio::select! {
            _ = &mut shutdown => break,
            command = commands.recv() => match command {
                Some(command) => {
                    apply(&mut simulation, command);
                    true
                }
                None => break,
            },
            _ = clock.tick() => {
                let now = Instant::now();
                simulation.advance_clock((now - last_clock).as_secs_f64());
                last_clock = now;
                false
            }
            _ = disaster.tick() => {
                simulation.tick_category(EventCategory::Disaster);
                true
            }
            _ = home.tick() => {
                simulation.tick_category(EventCategory::HomeEvent);
                true
            }
            _ = intruder.tick() => {
                simulation.tick_category(EventCategory::Intruder);
                true
            }
        };

        if ticked {
            let views = simulation.live_views();
            live.send_if_modified(|current| {
                if *current == views {
                    return false;
                }
                *current = views;
                true
            });
        }
    }

    info!(ended_at = simulation.now(), "simulation runtime stopped");
    simulation
}

fn apply(simulation: &mut HomeSimulation, command: Command) {
    match command {
        Command::SetRate(rate) => simulation.set_rate(rate),
        Command::SetAlarm(state) => simulation.set_alarm(state),
        Command::Force { kind, room, reply } => {
            let result = simulation.force(kind, room);
            if let Err(e) = &result {
                warn!(kind = %kind, error = %e, "forced trigger refused");
            }
            if reply.send(result).is_err() {
                debug!(kind = %kind, "force requester went away");
            }
        }
    }
}
