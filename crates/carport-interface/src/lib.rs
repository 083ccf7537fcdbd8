//! Per-cycle vehicle interface
//!
//! One control tick runs:
//!
//! 1. [`translate`]: decoded signals and the previous [`CanonicalState`]
//!    become the next state plus at most one [`ButtonEvent`].
//! 2. [`evaluate`]: the state is classified into a [`NotificationSet`].
//! 3. [`OutputGate`]: the pipeline's [`CarControl`] is gated against the
//!    vehicle interlocks and handed to a [`CarController`].
//!
//! [`CarInterface`] owns one vehicle's state across ticks and runs the steps
//! in order. Every step is also usable on its own.
//!
//! # Example
//!
//! ```
//! use carport_interface::{CarControl, CarInterface, DecodedSignals, InterfaceConfig};
//! use carport_profile::{CarModel, Fingerprint};
//!
//! let mut session = CarInterface::open(CarModel::Volt, &Fingerprint::new(), &InterfaceConfig::default());
//! let state = session.update(&DecodedSignals::default())?;
//! assert_eq!(state.cycle, 1);
//!
//! let messages = session.apply(&CarControl::default());
//! assert!(!messages.is_empty());
//! # Ok::<(), carport_errors::InvariantError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod controller;
pub mod evaluator;
pub mod events;
pub mod gate;
pub mod interface;
pub mod signals;
pub mod state;
pub mod translator;

pub use config::InterfaceConfig;
pub use controller::{CanBus, CarController, ControlMessage, GmCarController, PedalParameter};
pub use evaluator::{evaluate, evaluate_at};
pub use events::{ButtonEvent, ButtonEvents, ButtonKind, Notification, NotificationSet};
pub use gate::{Actuators, CarControl, GatedCommand, HudControl, OutputGate, VisualAlert, gate};
pub use interface::CarInterface;
pub use signals::{AccState, CruiseButton, DecodedSignals};
pub use state::{ButtonEdge, CanonicalState, CruiseButtonHistory, CruiseState};
pub use translator::translate;
