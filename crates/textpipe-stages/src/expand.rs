use textpipe_core::Transform;

/// Inserts a single space between every pair of adjacent characters.
/// `"abc"` becomes `"a b c"`.
pub struct Expand;

impl Transform for Expand {
    fn apply(&self, input: String) -> Option<String> {
        let spaced = input
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        Some(spaced)
    }
}
