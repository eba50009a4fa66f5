//! Guided dialogue: link, then Video or Audio, then quality or format.

pub mod choice;
pub mod driver;
pub mod link;
pub mod machine;
pub mod messages;
pub mod state;

pub use choice::{Choice, ChoiceOption};
pub use driver::{ChatTransport, DeliveryOutcome, DialogueDriver};
pub use link::{DialogueError, MediaLink};
pub use machine::{step, Effect, Transition};
pub use state::{CompletedSession, DialogueEvent, DialogueState};
