use textpipe_core::Transform;

/// Reverses the payload by character (Unicode scalar values, not bytes).
pub struct Flip;

impl Transform for Flip {
    fn apply(&self, input: String) -> Option<String> {
        Some(input.chars().rev().collect())
    }
}
