pub mod triage;
pub mod user;

pub use triage::{
    Classification, ClassificationView, Statistics, TriageFilter, TriageOutcome, TriageRecord,
};
pub use user::{NewUser, Role, User, UserUpdate};
