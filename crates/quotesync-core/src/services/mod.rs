//! Application services shared by front ends.

mod session;

pub use session::{pick_random, Intent, IntentOutcome, QuoteSession, SessionView};
