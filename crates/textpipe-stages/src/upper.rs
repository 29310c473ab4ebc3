use textpipe_core::Transform;

/// Converts the payload to uppercase.
pub struct Upper;

impl Transform for Upper {
    fn apply(&self, input: String) -> Option<String> {
        Some(input.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_ascii_and_unicode() {
        assert_eq!(Upper.apply("hello".into()), Some("HELLO".to_string()));
        assert_eq!(Upper.apply("café".into()), Some("CAFÉ".to_string()));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(Upper.apply(String::new()), Some(String::new()));
    }
}
