use std::{
    panic,
    sync::mpsc,
    thread::{self, JoinHandle},
};

use tracing::{debug, error, info};

use crate::{Game, Grid, GridError, History, Pos};

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("the simulation thread is gone")]
    Disconnected,
}

impl<T> From<mpsc::SendError<T>> for SimError {
    fn from(_: mpsc::SendError<T>) -> Self {
        SimError::Disconnected
    }
}

impl From<mpsc::RecvError> for SimError {
    fn from(_: mpsc::RecvError) -> Self {
        SimError::Disconnected
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// generations actually advanced by this request.
    pub advanced: u64,
    pub generation: u64,
    /// the grid came back to a state seen in the recent history.
    pub repeated: bool,
}

struct State {
    game: Game,
    history: History,
}

impl State {
    fn new(game: Game) -> Self {
        let mut state = Self {
            game,
            history: History::new(),
        };
        state.forget_history();
        state
    }

    fn forget_history(&mut self) {
        self.history.clear();
        self.history.record(self.game.fingerprint());
    }

    fn step(&mut self, count: u64) -> Result<StepReport, GridError> {
        let mut report = StepReport {
            advanced: 0,
            generation: self.game.generation(),
            repeated: false,
        };

        while report.advanced < count {
            if let Err(err) = self.game.advance() {
                error!(%err, generation = self.game.generation(), "generation failed");
                return Err(err);
            }
            report.advanced += 1;
            report.generation = self.game.generation();

            if self.history.record(self.game.fingerprint()) {
                info!(generation = report.generation, "grid repeats a recent state");
                report.repeated = true;
                break;
            }
        }
        Ok(report)
    }

    /// applies a user edit; the old history no longer describes the grid.
    fn edit<T>(
        &mut self,
        f: impl FnOnce(&mut Grid) -> Result<T, GridError>,
    ) -> Result<T, GridError> {
        let result = f(self.game.grid_mut())?;
        self.forget_history();
        Ok(result)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.game.grid().clone(),
            generation: self.game.generation(),
        }
    }
}

type Reply<T> = mpsc::Sender<Result<T, GridError>>;

pub enum SimCmd {
    Step(u64, Reply<StepReport>),
    SetAlive(Pos, Reply<()>),
    SetDead(Pos, Reply<()>),
    Toggle(Pos, Reply<bool>),
    Snapshot(mpsc::Sender<Snapshot>),
    Reset(mpsc::Sender<()>),
    Shutdown,
}

/// Cloneable access to a running [`Sim`]. Every request is queued behind the
/// ones before it, so edits and generations never interleave.
#[derive(Debug, Clone)]
pub struct SimHandle {
    sender: mpsc::Sender<SimCmd>,
}

impl SimHandle {
    fn request<T>(
        &self,
        cmd: impl FnOnce(Reply<T>) -> SimCmd,
    ) -> Result<T, SimError> {
        let (sender, receiver) = mpsc::channel();
        self.sender.send(cmd(sender))?;
        Ok(receiver.recv()??)
    }

    pub fn step(&self, count: u64) -> Result<StepReport, SimError> {
        self.request(|reply| SimCmd::Step(count, reply))
    }

    pub fn set_alive(&self, pos: Pos) -> Result<(), SimError> {
        self.request(|reply| SimCmd::SetAlive(pos, reply))
    }

    pub fn set_dead(&self, pos: Pos) -> Result<(), SimError> {
        self.request(|reply| SimCmd::SetDead(pos, reply))
    }

    pub fn toggle(&self, pos: Pos) -> Result<bool, SimError> {
        self.request(|reply| SimCmd::Toggle(pos, reply))
    }

    pub fn snapshot(&self) -> Result<Snapshot, SimError> {
        let (sender, receiver) = mpsc::channel();
        self.sender.send(SimCmd::Snapshot(sender))?;
        Ok(receiver.recv()?)
    }

    pub fn reset(&self) -> Result<(), SimError> {
        let (sender, receiver) = mpsc::channel();
        self.sender.send(SimCmd::Reset(sender))?;
        Ok(receiver.recv()?)
    }

    pub fn shutdown(&self) -> Result<(), SimError> {
        Ok(self.sender.send(SimCmd::Shutdown)?)
    }
}

/// Owns a [`Game`] on its own thread, the only place it is ever mutated.
///
/// Nothing advances on its own: generations happen when a handle asks for
/// them.
#[derive(Debug)]
pub struct Sim {
    thread: JoinHandle<()>,
    sender: mpsc::Sender<SimCmd>,
}

impl Sim {
    pub fn spawn(game: Game) -> Self {
        let state = State::new(game);
        let (sender, receiver) = mpsc::channel();
        let thread = thread::spawn(move || sim_loop(receiver, state));

        Self { thread, sender }
    }

    pub fn handle(&self) -> SimHandle {
        let sender = self.sender.clone();
        SimHandle { sender }
    }

    /// Waits for the thread to stop, which happens after a shutdown request
    /// or once every handle is dropped.
    pub fn join(self) {
        let Self { thread, sender } = self;
        drop(sender);
        if let Err(payload) = thread.join() {
            panic::resume_unwind(payload);
        }
    }
}

fn sim_loop(receiver: mpsc::Receiver<SimCmd>, mut state: State) {
    // a requester that hung up does not need its answer, so send results are ignored.
    for cmd in receiver {
        match cmd {
            SimCmd::Step(count, reply) => {
                debug!(count, "step");
                reply.send(state.step(count)).ok();
            }
            SimCmd::SetAlive(pos, reply) => {
                debug!(?pos, "set alive");
                reply.send(state.edit(|grid| grid.set_alive(pos))).ok();
            }
            SimCmd::SetDead(pos, reply) => {
                debug!(?pos, "set dead");
                reply.send(state.edit(|grid| grid.set_dead(pos))).ok();
            }
            SimCmd::Toggle(pos, reply) => {
                debug!(?pos, "toggle");
                reply.send(state.edit(|grid| grid.toggle(pos))).ok();
            }
            SimCmd::Snapshot(reply) => {
                reply.send(state.snapshot()).ok();
            }
            SimCmd::Reset(reply) => {
                debug!("reset");
                state.game.grid_mut().reset();
                state.forget_history();
                reply.send(()).ok();
            }
            SimCmd::Shutdown => break,
        }
    }
    debug!(generation = state.game.generation(), "simulation stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos;

    fn spawn(positions: &[Pos]) -> Sim {
        Sim::spawn(Game::new(10, 10, positions.iter().copied()).unwrap())
    }

    #[test]
    fn test_step_and_snapshot() {
        let sim = spawn(&[pos!(1, 1), pos!(2, 1), pos!(3, 1)]);
        let handle = sim.handle();

        let report = handle.step(1).unwrap();
        assert_eq!(report.advanced, 1);
        assert_eq!(report.generation, 1);
        assert!(!report.repeated);

        let snapshot = handle.snapshot().unwrap();
        assert_eq!(snapshot.generation, 1);
        assert_eq!(
            snapshot.grid.actives().collect::<Vec<_>>(),
            vec![pos!(2, 0), pos!(2, 1), pos!(2, 2)]
        );

        handle.shutdown().unwrap();
        sim.join();
    }

    #[test]
    fn test_step_stops_on_repeat() {
        let sim = spawn(&[pos!(1, 1), pos!(2, 1), pos!(3, 1)]);
        let handle = sim.handle();

        let report = handle.step(50).unwrap();
        assert_eq!(report.advanced, 2);
        assert_eq!(report.generation, 2);
        assert!(report.repeated);

        drop(handle);
        sim.join();
    }

    #[test]
    fn test_edits_are_serialized_with_steps() {
        let sim = spawn(&[]);
        let handle = sim.handle();

        assert!(handle.toggle(pos!(4, 4)).unwrap());
        handle.set_alive(pos!(5, 4)).unwrap();
        handle.set_alive(pos!(6, 4)).unwrap();
        handle.set_dead(pos!(6, 4)).unwrap();
        assert_eq!(handle.snapshot().unwrap().grid.live_count(), 2);

        // a lone pair dies out
        handle.step(1).unwrap();
        assert_eq!(handle.snapshot().unwrap().grid.live_count(), 0);

        assert!(matches!(
            handle.set_alive(pos!(10, 0)),
            Err(SimError::Grid(GridError::OutOfRange { .. }))
        ));

        drop(handle);
        sim.join();
    }

    #[test]
    fn test_reset() {
        let sim = spawn(&[pos!(3, 3), pos!(4, 3), pos!(3, 4), pos!(4, 4)]);
        let handle = sim.handle();
        handle.reset().unwrap();

        let snapshot = handle.snapshot().unwrap();
        assert_eq!(snapshot.grid.live_count(), 0);

        drop(handle);
        sim.join();
    }

    #[test]
    fn test_disconnected() {
        let sim = spawn(&[]);
        let handle = sim.handle();
        handle.shutdown().unwrap();
        sim.join();
        assert!(matches!(handle.snapshot(), Err(SimError::Disconnected)));
    }
}
