//! Shared simulated robot for the scenario tests.

#![allow(dead_code)]

use comms_if::tc::{ButtonId, Tc};
use robot_lib::{
    bindings::Bindings,
    data_store::DataStore,
    params::RobotParams,
    sched::Scheduler,
    sim::{self, SimPlant},
    tc_processor::{self, TcResponse},
};

/// A fully configured robot on simulated hardware.
pub struct Robot {
    pub ds: DataStore,
    pub scheduler: Scheduler<DataStore>,
    pub plant: SimPlant,
    pub bindings: Bindings,
    pub params: RobotParams,
}

impl Robot {
    pub fn new() -> Self {
        Self::with_params(RobotParams::default())
    }

    pub fn with_params(params: RobotParams) -> Self {
        let (hardware, plant) = sim::build(params.sim.clone());
        let mut scheduler = Scheduler::new();
        let ds = DataStore::new(hardware, &params, &mut scheduler).unwrap();
        let bindings = Bindings::configure(&mut scheduler, &ds, &params.exec).unwrap();

        Self {
            ds,
            scheduler,
            plant,
            bindings,
            params,
        }
    }

    /// Time of the next cycle.
    pub fn now_s(&self) -> f64 {
        self.ds.num_cycles as f64 * self.params.exec.cycle_period_s
    }

    /// Run one cycle the way the executable does.
    pub fn step(&mut self) {
        let now_s = self.now_s();

        self.plant.update(now_s);
        self.ds.cycle_start(now_s);
        if !self.ds.safe {
            self.scheduler.run(&mut self.ds, now_s);
        }

        self.ds.num_cycles += 1;
    }

    pub fn steps(&mut self, n: u32) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Step until `cond` holds, returning the number of cycles taken.
    pub fn step_until(&mut self, max_steps: u32, cond: impl Fn(&Robot) -> bool) -> Option<u32> {
        for i in 0..max_steps {
            self.step();
            if cond(self) {
                return Some(i);
            }
        }
        None
    }

    pub fn tc(&mut self, tc: Tc) -> TcResponse {
        tc_processor::exec(&mut self.ds, &mut self.scheduler, &tc)
    }

    /// Press and release a button over two cycles.
    pub fn tap(&mut self, button: ButtonId) {
        self.tc(Tc::Button {
            button,
            pressed: true,
        });
        self.step();
        self.tc(Tc::Button {
            button,
            pressed: false,
        });
        self.step();
    }

    pub fn owner_name(&self, group: robot_lib::sched::GroupId) -> Option<&str> {
        self.scheduler
            .owner_of(group)
            .and_then(|id| self.scheduler.command_name(id))
    }
}
