use rand::seq::SliceRandom;
use rand::Rng;

pub const PLACEHOLDERS: &[&str] = &[
    "what's the one thing today?",
    "write that email",
    "call the dentist",
    "water the plants",
    "finish the report",
    "go for a walk",
    "read a chapter",
    "clean the desk",
    "plan the week",
    "reply to messages",
];

/// Pick the placeholder shown in the first field for this session.
pub fn pick_placeholder<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PLACEHOLDERS.choose(rng).copied().unwrap_or("task-1")
}
