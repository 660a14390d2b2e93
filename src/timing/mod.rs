pub mod types;
pub mod validator;

pub use types::{Phase, PhaseRange, RangeSet, TimingSet, UnknownPhase};
pub use validator::{
    propose_edit, request_save, EditOutcome, Rejection, TimingEditor, TimingListener,
};
