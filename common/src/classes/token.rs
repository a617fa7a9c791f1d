//! Token anatomy: variant modifiers, the important flag, and the utility.

/// A class token split into the parts that take part in conflict detection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Token<'t> {
    modifiers: Vec<&'t str>,
    important: bool,
    utility: &'t str,
}

impl<'t> Token<'t> {
    /// Parses `raw` (for example `md:hover:!-mt-2`).
    pub(crate) fn parse(raw: &'t str) -> Self {
        let (modifiers, base) = split_modifiers(raw);
        let (important, base) = strip_important(base);
        let utility = base
            .strip_prefix('-')
            .filter(|rest| !rest.is_empty())
            .unwrap_or(base);

        Self {
            modifiers,
            important,
            utility,
        }
    }

    /// Utility with modifiers, the important flag, and a leading minus removed.
    pub(crate) const fn utility(&self) -> &'t str {
        self.utility
    }

    /// Prefix shared by every conflict key this token claims.
    ///
    /// Modifier order is irrelevant to CSS precedence, so runs of ordinary
    /// modifiers are sorted. Arbitrary variants (`[&>*]`) change the selector
    /// itself and therefore stay in place, splitting the runs around them.
    pub(crate) fn key_prefix(&self) -> String {
        let mut prefix = String::new();
        for modifier in sorted_modifiers(&self.modifiers) {
            prefix.push_str(modifier);
            prefix.push(':');
        }
        if self.important {
            prefix.push('!');
        }
        prefix
    }
}

fn split_modifiers(raw: &str) -> (Vec<&str>, &str) {
    let mut modifiers = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0_usize;

    for (index, character) in raw.char_indices() {
        match character {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                modifiers.push(raw.get(start..index).unwrap_or_default());
                start = index + character.len_utf8();
            }
            _ => {}
        }
    }

    (modifiers, raw.get(start..).unwrap_or_default())
}

fn strip_important(base: &str) -> (bool, &str) {
    if let Some(rest) = base.strip_prefix('!') {
        return (true, rest);
    }
    base.strip_suffix('!')
        .map_or((false, base), |rest| (true, rest))
}

fn sorted_modifiers<'t>(modifiers: &[&'t str]) -> Vec<&'t str> {
    let mut sorted = Vec::with_capacity(modifiers.len());
    let mut run: Vec<&'t str> = Vec::new();

    for &modifier in modifiers {
        if modifier.starts_with('[') {
            run.sort_unstable();
            sorted.append(&mut run);
            sorted.push(modifier);
        } else {
            run.push(modifier);
        }
    }

    run.sort_unstable();
    sorted.append(&mut run);
    sorted
}

/// Splits `utility` at its last top-level `/`, yielding the part before a
/// postfix modifier such as the line height in `text-lg/7`.
pub(crate) fn without_postfix(utility: &str) -> Option<&str> {
    let mut depth = 0_usize;
    let mut split = None;

    for (index, character) in utility.char_indices() {
        match character {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => split = Some(index),
            _ => {}
        }
    }

    split
        .and_then(|index| utility.get(..index))
        .filter(|head| !head.is_empty())
}

/// Property name of an arbitrary property such as `[mask-type:alpha]`.
pub(crate) fn arbitrary_property(utility: &str) -> Option<&str> {
    let inner = utility.strip_prefix('[')?.strip_suffix(']')?;
    let (property, value) = inner.split_once(':')?;
    let well_formed = !value.is_empty()
        && !property.is_empty()
        && property
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || character == '-');
    well_formed.then_some(property)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn splits_variants_from_utility() {
        let token = Token::parse("md:hover:p-4");
        assert_eq!(token.utility(), "p-4");
        assert_eq!(token.key_prefix(), "hover:md:");
    }

    #[rstest]
    fn ignores_colons_inside_brackets() {
        let token = Token::parse("[&:nth-child(3)]:[mask-type:alpha]");
        assert_eq!(token.utility(), "[mask-type:alpha]");
        assert_eq!(token.key_prefix(), "[&:nth-child(3)]:");
    }

    #[rstest]
    #[case("!p-4")]
    #[case("p-4!")]
    fn detects_important_on_either_side(#[case] raw: &str) {
        let token = Token::parse(raw);
        assert_eq!(token.utility(), "p-4");
        assert_eq!(token.key_prefix(), "!");
    }

    #[rstest]
    fn strips_negative_values() {
        assert_eq!(Token::parse("-mt-2").utility(), "mt-2");
        assert_eq!(Token::parse("-").utility(), "-");
    }

    #[rstest]
    fn arbitrary_variants_act_as_sort_barriers() {
        let left = Token::parse("hover:[&>*]:focus:dark:p-1");
        let right = Token::parse("hover:[&>*]:dark:focus:p-1");
        let moved = Token::parse("[&>*]:hover:dark:focus:p-1");
        assert_eq!(left.key_prefix(), right.key_prefix());
        assert_ne!(left.key_prefix(), moved.key_prefix());
    }

    #[rstest]
    fn finds_postfix_and_arbitrary_properties() {
        assert_eq!(without_postfix("text-lg/7"), Some("text-lg"));
        assert_eq!(without_postfix("w-[calc(1/2)]"), None);
        assert_eq!(arbitrary_property("[mask-type:alpha]"), Some("mask-type"));
        assert_eq!(arbitrary_property("[3px]"), None);
    }
}
