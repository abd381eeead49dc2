//! Canopy conformance engine.
//!
//! Verifies that a tree-structured multi-select UI component obeys
//! cascade-selection invariants: checking a node checks every
//! descendant (cascade-down), and a node becomes checked once all of
//! its children are checked (cascade-up).
//!
//! The engine never renders or implements the tree itself. It encodes
//! a reference model ([`oracle`]) and drives the system under test
//! through the [`SelectionDriver`] seam: any automation backend that
//! can click a checkbox, read its state, read the status message and
//! expand collapsed nodes can be verified.
//!
//! Flow: [`expansion::expand_tree`] materializes the lazily rendered
//! hierarchy once per run, then [`ScenarioRunner`] runs each scenario
//! against a freshly reset baseline ([`reset`]), diffing observed
//! state against the oracle's prediction ([`verifier`]).

#![deny(unsafe_code)]

pub mod config;
pub mod driver;
pub mod error;
pub mod expansion;
pub mod fixture;
pub mod oracle;
pub mod report;
pub mod reset;
pub mod runner;
pub mod sim;
pub mod verifier;
mod wait;

pub use config::{ExpansionPolicy, RunnerConfig, WaitPolicy};
pub use driver::{MarkerHandle, SelectionDriver};
pub use error::{DriverError, DriverResult, EngineError, EngineResult};
pub use report::{RunReport, RunSummary};
pub use runner::ScenarioRunner;
pub use sim::{FaultInjection, SimulatedSelectionDriver};
