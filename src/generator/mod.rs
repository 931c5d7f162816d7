//! Terrazzo pattern generation: single shapes and paced runs of them

/// Surface ownership, run budgeting and the self-rescheduling draw loop
pub mod host;
/// Painting one randomized blob with its optional debug overlay
pub mod shape;

pub use host::{
    OverlapPolicy, PatternHost, RunId, RunOutcome, RunSummary, RunTrigger, ShapeEvent, Viewport,
};
pub use shape::{PaintedShape, draw_shape};
