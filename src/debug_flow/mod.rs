mod session;
mod state;

pub use session::{DEFAULT_CANDIDATE_EMAIL, DEFAULT_CANDIDATE_NAME, DebugSession};
pub use state::{DebugFlowAction, DebugFlowState, DebugStep, reduce};
