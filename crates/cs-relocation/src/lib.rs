//! `cs-relocation`: operator-driven relocation of idle vehicles.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                           |
//! |------------|--------------------------------------------------------------------|
//! | [`task`]   | `RelocationTask`: one pickup/dropoff order                         |
//! | [`state`]  | `OperatorMode`, `MovementState`                                    |
//! | [`store`]  | `Operator`, `OperatorStore`: held road trains per operator         |
//! | [`engine`] | `RelocationEngine<P>`: `process_pickup` / `process_dropoff`        |
//! | [`event`]  | `RelocationEvent`, `RelocationObserver`, `NoopObserver`, `EventLog` |
//! | [`error`]  | `RelocationError`, `RelocationResult<T>`                           |
//!
//! # Relocation cycle
//!
//! ```text
//!            process_pickup (ok)
//!   ReadyToPickup ─────────────────▶ Carrying
//!        ▲  ▲                           │  │
//!        │  └── process_pickup ─────────┘  │  (redirect: drive, defer)
//!        └───── process_dropoff (ok) ──────┘
//! ```
//!
//! Vehicles are conserved: at every instant each vehicle is in exactly one
//! site's parking, one operator's road train, or one customer rental.

pub mod engine;
pub mod error;
pub mod event;
pub mod state;
pub mod store;
pub mod task;


pub use engine::RelocationEngine;
pub use error::{RelocationError, RelocationResult};
pub use event::{EventLog, NoopObserver, RelocationEvent, RelocationEventKind, RelocationObserver};
pub use state::{MovementState, OperatorMode};
pub use store::{Operator, OperatorStore};
pub use task::RelocationTask;
