//! Simulated robot rig shared by the unit tests.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::data_store::DataStore;
use crate::params::RobotParams;
use crate::sched::{Command, CommandId, Scheduler};
use crate::sim::{self, SimPlant};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A data store and scheduler on simulated hardware, with no bindings configured.
pub(crate) struct Rig {
    pub ds: DataStore,
    pub scheduler: Scheduler<DataStore>,
    pub plant: SimPlant,

    /// Time of the next cycle.
    pub now_s: f64,

    pub period_s: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Rig {
    pub fn new() -> Self {
        let params = RobotParams::default();
        let (hardware, plant) = sim::build(params.sim.clone());
        let mut scheduler = Scheduler::new();
        let ds = DataStore::new(hardware, &params, &mut scheduler).unwrap();

        Self {
            ds,
            scheduler,
            plant,
            now_s: 0.0,
            period_s: params.exec.cycle_period_s,
        }
    }

    pub fn register(&mut self, command: Command<DataStore>) -> CommandId {
        self.scheduler.register(command).unwrap()
    }

    /// Schedule a command at the time of the next cycle.
    pub fn schedule(&mut self, id: CommandId) {
        self.scheduler.schedule(&mut self.ds, id, self.now_s).unwrap();
    }

    /// Update the plant and sample sensors at the time of the next cycle, without running it.
    pub fn sample(&mut self) {
        self.plant.update(self.now_s);
        self.ds.cycle_start(self.now_s);
    }

    /// Sample sensors and run the scheduler, leaving the plant alone.
    pub fn sample_and_run(&mut self) {
        self.ds.cycle_start(self.now_s);
        self.run();
    }

    /// Run one full cycle.
    pub fn step(&mut self) {
        self.plant.update(self.now_s);
        self.ds.cycle_start(self.now_s);
        self.run();
    }

    fn run(&mut self) {
        self.scheduler.run(&mut self.ds, self.now_s);
        self.ds.num_cycles += 1;
        self.now_s = self.ds.num_cycles as f64 * self.period_s;
    }
}
