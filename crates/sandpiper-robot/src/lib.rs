//! Robot semantics on top of the behavior-tree kernel and the hardware
//! abstraction: blackboard key registry, timed motor instructions with a
//! background executor, per-sensor data recollection nodes, the task
//! subtrees, and the fixed-cadence tick driver.

#![forbid(unsafe_code)]

pub mod config;
pub mod data;
pub mod driver;
pub mod executor;
pub mod instructions;
pub mod keys;
pub mod root;
pub mod tasks;

pub use config::RobotConfig;
pub use driver::TickDriver;
pub use executor::{ExecuteInstructions, InstructionRunner};
pub use instructions::{execute_instructions, MotorInstruction, Movement};
pub use root::build_root;
