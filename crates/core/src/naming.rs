//! URL slugs for cards.

/// Generate a URL-safe slug from a card name.
///
/// Lower-cases, replaces every run of characters outside `[a-z0-9]` with a
/// single hyphen, and trims leading/trailing hyphens.
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_hyphen = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }

    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name() {
        assert_eq!(generate_slug("Aria Stormwind"), "aria-stormwind");
    }

    #[test]
    fn punctuation_runs_collapse() {
        assert_eq!(generate_slug("The  Keep -- of (Old) Kings!"), "the-keep-of-old-kings");
    }

    #[test]
    fn leading_and_trailing_are_trimmed() {
        assert_eq!(generate_slug("  ~Castle~  "), "castle");
    }

    #[test]
    fn non_ascii_letters_become_separators() {
        assert_eq!(generate_slug("Café Noir"), "caf-noir");
    }

    #[test]
    fn only_symbols_gives_empty() {
        assert_eq!(generate_slug("!!!"), "");
    }
}
