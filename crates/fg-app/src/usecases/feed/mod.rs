mod controller;
mod gate;
mod outcome;

pub use controller::FeedController;
pub use outcome::{LoadOutcome, LoadRequest, RejectReason};
