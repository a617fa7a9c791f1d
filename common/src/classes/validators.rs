//! Value validators used by prefixed classification rules.
//!
//! Arbitrary values are written in square brackets (`p-[3px]`). An optional
//! `label:` inside the brackets (`[length:var(--gap)]`) forces the
//! interpretation when the raw value alone is ambiguous.

const TSHIRT_SIZES: [&str; 5] = ["xs", "sm", "md", "lg", "xl"];

const LENGTH_UNITS: [&str; 28] = [
    "px", "rem", "em", "%", "vh", "vw", "vmin", "vmax", "ch", "ex", "pt", "pc", "in", "cm", "mm",
    "lh", "rlh", "svh", "lvh", "dvh", "svw", "lvw", "dvw", "cqw", "cqh", "cqi", "cqb", "q",
];

const LENGTH_FUNCTIONS: [&str; 4] = ["calc(", "min(", "max(", "clamp("];

const COLOR_FUNCTIONS: [&str; 10] = [
    "rgb(", "rgba(", "hsl(", "hsla(", "hwb(", "lab(", "lch(", "oklab(", "oklch(", "color(",
];

pub(crate) fn is_number(value: &str) -> bool {
    let mut digits = 0_usize;
    let mut dots = 0_usize;
    for character in value.chars() {
        match character {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

pub(crate) fn is_integer(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|character| character.is_ascii_digit())
}

pub(crate) fn is_fraction(value: &str) -> bool {
    value
        .split_once('/')
        .is_some_and(|(numerator, denominator)| is_integer(numerator) && is_integer(denominator))
}

pub(crate) fn is_percent(value: &str) -> bool {
    value.strip_suffix('%').is_some_and(is_number)
}

pub(crate) fn is_tshirt(value: &str) -> bool {
    TSHIRT_SIZES.iter().any(|size| {
        value
            .strip_suffix(size)
            .is_some_and(|lead| lead.is_empty() || is_number(lead))
    })
}

pub(crate) fn arbitrary_inner(value: &str) -> Option<&str> {
    value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|inner| !inner.is_empty())
}

pub(crate) fn is_arbitrary(value: &str) -> bool {
    arbitrary_inner(value).is_some()
}

fn labelled<'v>(inner: &'v str, label: &str) -> Option<&'v str> {
    inner
        .strip_prefix(label)
        .and_then(|rest| rest.strip_prefix(':'))
}

fn has_label(inner: &str, labels: &[&str]) -> bool {
    labels.iter().any(|label| labelled(inner, label).is_some())
}

fn is_css_length(inner: &str) -> bool {
    if inner == "0" || LENGTH_FUNCTIONS.iter().any(|function| inner.starts_with(function)) {
        return true;
    }

    let magnitude = inner.strip_prefix('-').unwrap_or(inner);
    LENGTH_UNITS.iter().any(|unit| {
        magnitude
            .strip_suffix(unit)
            .is_some_and(is_number)
    })
}

pub(crate) fn is_arbitrary_length(value: &str) -> bool {
    arbitrary_inner(value).is_some_and(|inner| has_label(inner, &["length"]) || is_css_length(inner))
}

pub(crate) fn is_arbitrary_number(value: &str) -> bool {
    arbitrary_inner(value).is_some_and(|inner| has_label(inner, &["number"]) || is_number(inner))
}

pub(crate) fn is_arbitrary_color(value: &str) -> bool {
    arbitrary_inner(value).is_some_and(|inner| {
        has_label(inner, &["color"])
            || inner.starts_with('#')
            || COLOR_FUNCTIONS.iter().any(|function| inner.starts_with(function))
    })
}

pub(crate) fn is_arbitrary_image(value: &str) -> bool {
    arbitrary_inner(value).is_some_and(|inner| {
        has_label(inner, &["image", "url"])
            || inner.starts_with("url(")
            || inner.contains("gradient(")
            || inner.starts_with("image(")
    })
}

pub(crate) fn is_arbitrary_position(value: &str) -> bool {
    arbitrary_inner(value).is_some_and(|inner| has_label(inner, &["position"]))
}

pub(crate) fn is_arbitrary_size(value: &str) -> bool {
    arbitrary_inner(value).is_some_and(|inner| has_label(inner, &["size", "length"]))
}

/// Shadows look like `[0_35px_60px_-15px_rgba(0,0,0,0.3)]`: underscores
/// separate at least two parts and the first part is a length.
pub(crate) fn is_arbitrary_shadow(value: &str) -> bool {
    arbitrary_inner(value).is_some_and(|inner| {
        if has_label(inner, &["shadow"]) {
            return true;
        }
        let body = inner.strip_prefix("inset_").unwrap_or(inner);
        let mut parts = body.split('_');
        let leading = parts.next().is_some_and(is_css_length);
        leading && parts.next().is_some()
    })
}
