pub mod edge_gate;
pub mod validate;

pub use self::edge_gate::{EdgeGate, GateDecision, Identity, RedirectReason, edge_gate};
pub use self::validate::{SimpleValidatedJson, first_validation_message};
