//! Utility-group classification tables.
//!
//! A table maps a utility (the token with variants, `!`, and a leading `-`
//! removed) to the group whose members are mutually exclusive, and lists the
//! groups each group overrides. Rules are checked in order and the first
//! match wins, so keyword and validated rules must precede the catch-all
//! colour rules that share their prefix (`text-left`, `text-lg`, then
//! `text-<anything>`).

use std::borrow::Cow;
use std::collections::HashMap;

use super::validators::{
    is_arbitrary, is_arbitrary_color, is_arbitrary_image, is_arbitrary_length,
    is_arbitrary_number, is_arbitrary_position, is_arbitrary_shadow, is_arbitrary_size,
    is_fraction, is_integer, is_number, is_percent, is_tshirt,
};

/// Source of utility-group membership for the merge algorithm.
///
/// Implementations must be deterministic: the same utility always maps to the
/// same group for a given [`version`](Self::version).
pub trait ClassGroups {
    /// Identifies the convention the table encodes.
    fn version(&self) -> &str;

    /// Returns the group `utility` belongs to, if any.
    fn classify(&self, utility: &str) -> Option<&str>;

    /// Groups that a member of `group` overrides when declared later.
    fn conflicts(&self, group: &str) -> &[&str];
}

/// Accepted shapes for the value part of a prefixed utility.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    /// Any non-empty value.
    Any,
    /// One of the listed words.
    Keywords(&'static [&'static str]),
    /// A plain number (`2`, `0.5`) or an arbitrary number.
    Number,
    /// A whole number or an arbitrary number.
    Integer,
    /// A percentage such as `35%`.
    Percent,
    /// A ratio such as `1/2`.
    Fraction,
    /// A size keyword such as `sm`, `lg`, or `2xl`.
    TShirt,
    /// Any bracketed value.
    Arbitrary,
    /// A bracketed colour literal or `color:` labelled value.
    ArbitraryColor,
    /// A bracketed CSS length or `length:` labelled value.
    ArbitraryLength,
    /// A bracketed number or `number:` labelled value.
    ArbitraryNumber,
    /// A bracketed `url(...)`, gradient, or `image:` labelled value.
    ArbitraryImage,
    /// A `position:` labelled bracketed value.
    ArbitraryPosition,
    /// A `size:` or `length:` labelled bracketed value.
    ArbitrarySize,
    /// A bracketed box-shadow value.
    ArbitraryShadow,
}

impl ValueKind {
    /// Returns `true` when `value` has this shape.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Any => !value.is_empty(),
            Self::Keywords(words) => words.contains(&value),
            Self::Number => is_number(value) || is_arbitrary_number(value),
            Self::Integer => is_integer(value) || is_arbitrary_number(value),
            Self::Percent => is_percent(value),
            Self::Fraction => is_fraction(value),
            Self::TShirt => is_tshirt(value),
            Self::Arbitrary => is_arbitrary(value),
            Self::ArbitraryColor => is_arbitrary_color(value),
            Self::ArbitraryLength => is_arbitrary_length(value),
            Self::ArbitraryNumber => is_arbitrary_number(value),
            Self::ArbitraryImage => is_arbitrary_image(value),
            Self::ArbitraryPosition => is_arbitrary_position(value),
            Self::ArbitrarySize => is_arbitrary_size(value),
            Self::ArbitraryShadow => is_arbitrary_shadow(value),
        }
    }
}

/// How a rule recognises utilities.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Matcher {
    /// The utility equals one of the names.
    Exact(&'static [&'static str]),
    /// The utility is `prefix-<value>` with a value accepted by any of
    /// `values`, or exactly `prefix` when `bare` is set.
    Prefixed {
        /// Leading utility name, without the trailing dash.
        prefix: &'static str,
        /// Accepted value shapes.
        values: &'static [ValueKind],
        /// Whether the prefix alone is a valid member.
        bare: bool,
    },
}

/// A single classification rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GroupRule {
    /// Group that matching utilities belong to.
    pub group: &'static str,
    /// Recognition strategy.
    pub matcher: Matcher,
}

impl GroupRule {
    /// Rule matching a fixed set of utility names.
    #[must_use]
    pub const fn exact(group: &'static str, names: &'static [&'static str]) -> Self {
        Self {
            group,
            matcher: Matcher::Exact(names),
        }
    }

    /// Rule matching `prefix-<value>`.
    #[must_use]
    pub const fn prefixed(
        group: &'static str,
        prefix: &'static str,
        values: &'static [ValueKind],
    ) -> Self {
        Self {
            group,
            matcher: Matcher::Prefixed {
                prefix,
                values,
                bare: false,
            },
        }
    }

    /// Rule matching `prefix` alone as well as `prefix-<value>`.
    #[must_use]
    pub const fn prefixed_or_bare(
        group: &'static str,
        prefix: &'static str,
        values: &'static [ValueKind],
    ) -> Self {
        Self {
            group,
            matcher: Matcher::Prefixed {
                prefix,
                values,
                bare: true,
            },
        }
    }

    /// Returns `true` when `utility` belongs to this rule's group.
    #[must_use]
    pub fn matches(&self, utility: &str) -> bool {
        match self.matcher {
            Matcher::Exact(names) => names.contains(&utility),
            Matcher::Prefixed {
                prefix,
                values,
                bare,
            } => {
                if utility == prefix {
                    return bare;
                }
                utility
                    .strip_prefix(prefix)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .is_some_and(|value| values.iter().any(|kind| kind.accepts(value)))
            }
        }
    }
}

/// Ordered, versioned classification table.
///
/// # Examples
///
/// ```
/// use stockroom_common::classes::{ClassGroups, GroupRule, GroupTable, ValueKind};
///
/// let table = GroupTable::tailwind_v3()
///     .with_priority_rule(GroupRule::prefixed("elevation", "elevation", &[ValueKind::Integer]));
/// assert_eq!(table.classify("elevation-2"), Some("elevation"));
/// assert_eq!(table.classify("text-lg"), Some("font-size"));
/// ```
#[derive(Clone, Debug)]
pub struct GroupTable {
    version: Cow<'static, str>,
    rules: Vec<GroupRule>,
    conflicts: HashMap<&'static str, Vec<&'static str>>,
}

impl GroupTable {
    /// Creates an empty table identified by `version`.
    #[must_use]
    pub fn new(version: impl Into<Cow<'static, str>>) -> Self {
        Self {
            version: version.into(),
            rules: Vec::new(),
            conflicts: HashMap::new(),
        }
    }

    /// Table following the Tailwind CSS v3 utility naming conventions.
    #[must_use]
    pub fn tailwind_v3() -> Self {
        let mut table = Self::new(TAILWIND_V3_VERSION);
        table.rules.extend_from_slice(TAILWIND_V3_RULES);
        for (group, overrides) in TAILWIND_V3_CONFLICTS {
            table.conflicts.insert(*group, overrides.to_vec());
        }
        table
    }

    /// Appends `rule` after the existing rules.
    #[must_use]
    pub fn with_rule(mut self, rule: GroupRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Inserts `rule` ahead of the existing rules so it wins ambiguities.
    #[must_use]
    pub fn with_priority_rule(mut self, rule: GroupRule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    /// Declares that later members of `group` override `overrides`.
    #[must_use]
    pub fn with_conflict(mut self, group: &'static str, overrides: &[&'static str]) -> Self {
        let entry = self.conflicts.entry(group).or_default();
        for candidate in overrides {
            if !entry.contains(candidate) {
                entry.push(*candidate);
            }
        }
        self
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[GroupRule] {
        &self.rules
    }
}

impl ClassGroups for GroupTable {
    fn version(&self) -> &str {
        &self.version
    }

    fn classify(&self, utility: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(utility))
            .map(|rule| rule.group)
    }

    fn conflicts(&self, group: &str) -> &[&str] {
        self.conflicts
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

const TAILWIND_V3_VERSION: &str = "tailwind-v3";

const ANY: &[ValueKind] = &[ValueKind::Any];
const NUMERIC: &[ValueKind] = &[ValueKind::Number, ValueKind::ArbitraryLength];
const FONT_SIZE: &[ValueKind] = &[
    ValueKind::TShirt,
    ValueKind::Keywords(&["base"]),
    ValueKind::ArbitraryLength,
];
const RADIUS: &[ValueKind] = &[
    ValueKind::TShirt,
    ValueKind::Keywords(&["none", "full"]),
    ValueKind::ArbitraryLength,
];
const SHADOW: &[ValueKind] = &[
    ValueKind::TShirt,
    ValueKind::Keywords(&["inner", "none"]),
    ValueKind::ArbitraryShadow,
];
const FONT_WEIGHT: &[ValueKind] = &[
    ValueKind::Keywords(&[
        "thin",
        "extralight",
        "light",
        "normal",
        "medium",
        "semibold",
        "bold",
        "extrabold",
        "black",
    ]),
    ValueKind::ArbitraryNumber,
];
const GRADIENT_POSITION: &[ValueKind] = &[ValueKind::Percent, ValueKind::ArbitraryLength];
const LINE_STYLE: &[ValueKind] = &[ValueKind::Keywords(&[
    "solid", "dashed", "dotted", "double", "hidden", "none",
])];
const BLUR: &[ValueKind] = &[
    ValueKind::TShirt,
    ValueKind::Keywords(&["none"]),
    ValueKind::Arbitrary,
];

const TAILWIND_V3_RULES: &[GroupRule] = &[
    // Layout
    GroupRule::exact("container", &["container"]),
    GroupRule::exact(
        "display",
        &[
            "block",
            "inline-block",
            "inline",
            "flex",
            "inline-flex",
            "table",
            "inline-table",
            "table-caption",
            "table-cell",
            "table-column",
            "table-column-group",
            "table-footer-group",
            "table-header-group",
            "table-row-group",
            "table-row",
            "flow-root",
            "grid",
            "inline-grid",
            "contents",
            "list-item",
            "hidden",
        ],
    ),
    GroupRule::exact("position", &["static", "fixed", "absolute", "relative", "sticky"]),
    GroupRule::exact("visibility", &["visible", "invisible", "collapse"]),
    GroupRule::exact("isolation", &["isolate", "isolation-auto"]),
    GroupRule::exact("box", &["box-border", "box-content"]),
    GroupRule::exact("sr", &["sr-only", "not-sr-only"]),
    GroupRule::prefixed("float", "float", &[ValueKind::Keywords(&["right", "left", "none", "start", "end"])]),
    GroupRule::prefixed("clear", "clear", &[ValueKind::Keywords(&["left", "right", "both", "none", "start", "end"])]),
    GroupRule::prefixed(
        "object-fit",
        "object",
        &[ValueKind::Keywords(&["contain", "cover", "fill", "none", "scale-down"])],
    ),
    GroupRule::prefixed("object-position", "object", ANY),
    GroupRule::prefixed("overflow-x", "overflow-x", ANY),
    GroupRule::prefixed("overflow-y", "overflow-y", ANY),
    GroupRule::prefixed(
        "overflow",
        "overflow",
        &[ValueKind::Keywords(&["auto", "hidden", "clip", "visible", "scroll"])],
    ),
    GroupRule::prefixed("inset-x", "inset-x", ANY),
    GroupRule::prefixed("inset-y", "inset-y", ANY),
    GroupRule::prefixed("inset", "inset", ANY),
    GroupRule::prefixed("start", "start", ANY),
    GroupRule::prefixed("end", "end", ANY),
    GroupRule::prefixed("top", "top", ANY),
    GroupRule::prefixed("right", "right", ANY),
    GroupRule::prefixed("bottom", "bottom", ANY),
    GroupRule::prefixed("left", "left", ANY),
    GroupRule::prefixed("z", "z", ANY),
    GroupRule::prefixed("aspect", "aspect", ANY),
    GroupRule::prefixed("columns", "columns", ANY),
    // Flexbox and grid
    GroupRule::exact(
        "flex-direction",
        &["flex-row", "flex-row-reverse", "flex-col", "flex-col-reverse"],
    ),
    GroupRule::exact("flex-wrap", &["flex-wrap", "flex-wrap-reverse", "flex-nowrap"]),
    GroupRule::prefixed_or_bare("grow", "flex-grow", ANY),
    GroupRule::prefixed_or_bare("shrink", "flex-shrink", ANY),
    GroupRule::prefixed("flex", "flex", ANY),
    GroupRule::prefixed(
        "basis",
        "basis",
        &[
            ValueKind::Fraction,
            ValueKind::Number,
            ValueKind::Keywords(&["auto", "full", "px"]),
            ValueKind::Any,
        ],
    ),
    GroupRule::prefixed_or_bare("grow", "grow", ANY),
    GroupRule::prefixed_or_bare("shrink", "shrink", ANY),
    GroupRule::prefixed("order", "order", ANY),
    GroupRule::prefixed("grid-cols", "grid-cols", ANY),
    GroupRule::prefixed("grid-rows", "grid-rows", ANY),
    GroupRule::prefixed("grid-flow", "grid-flow", ANY),
    GroupRule::exact("col-start-end", &["col-auto"]),
    GroupRule::prefixed("col-start-end", "col-span", ANY),
    GroupRule::prefixed("col-start", "col-start", ANY),
    GroupRule::prefixed("col-end", "col-end", ANY),
    GroupRule::exact("row-start-end", &["row-auto"]),
    GroupRule::prefixed("row-start-end", "row-span", ANY),
    GroupRule::prefixed("row-start", "row-start", ANY),
    GroupRule::prefixed("row-end", "row-end", ANY),
    GroupRule::prefixed("auto-cols", "auto-cols", ANY),
    GroupRule::prefixed("auto-rows", "auto-rows", ANY),
    GroupRule::prefixed("gap-x", "gap-x", ANY),
    GroupRule::prefixed("gap-y", "gap-y", ANY),
    GroupRule::prefixed("gap", "gap", ANY),
    GroupRule::prefixed("justify-items", "justify-items", ANY),
    GroupRule::prefixed("justify-self", "justify-self", ANY),
    GroupRule::prefixed(
        "justify-content",
        "justify",
        &[ValueKind::Keywords(&[
            "normal", "start", "end", "center", "between", "around", "evenly", "stretch",
        ])],
    ),
    GroupRule::exact("content", &["content-none"]),
    GroupRule::prefixed(
        "align-content",
        "content",
        &[ValueKind::Keywords(&[
            "normal", "center", "start", "end", "between", "around", "evenly", "baseline",
            "stretch",
        ])],
    ),
    GroupRule::prefixed("content", "content", &[ValueKind::Arbitrary]),
    GroupRule::prefixed("align-items", "items", ANY),
    GroupRule::prefixed("align-self", "self", ANY),
    GroupRule::prefixed("place-content", "place-content", ANY),
    GroupRule::prefixed("place-items", "place-items", ANY),
    GroupRule::prefixed("place-self", "place-self", ANY),
    // Spacing
    GroupRule::prefixed("p", "p", ANY),
    GroupRule::prefixed("px", "px", ANY),
    GroupRule::prefixed("py", "py", ANY),
    GroupRule::prefixed("ps", "ps", ANY),
    GroupRule::prefixed("pe", "pe", ANY),
    GroupRule::prefixed("pt", "pt", ANY),
    GroupRule::prefixed("pr", "pr", ANY),
    GroupRule::prefixed("pb", "pb", ANY),
    GroupRule::prefixed("pl", "pl", ANY),
    GroupRule::prefixed("m", "m", ANY),
    GroupRule::prefixed("mx", "mx", ANY),
    GroupRule::prefixed("my", "my", ANY),
    GroupRule::prefixed("ms", "ms", ANY),
    GroupRule::prefixed("me", "me", ANY),
    GroupRule::prefixed("mt", "mt", ANY),
    GroupRule::prefixed("mr", "mr", ANY),
    GroupRule::prefixed("mb", "mb", ANY),
    GroupRule::prefixed("ml", "ml", ANY),
    GroupRule::exact("space-x-reverse", &["space-x-reverse"]),
    GroupRule::exact("space-y-reverse", &["space-y-reverse"]),
    GroupRule::prefixed("space-x", "space-x", ANY),
    GroupRule::prefixed("space-y", "space-y", ANY),
    // Sizing
    GroupRule::prefixed("w", "w", ANY),
    GroupRule::prefixed("min-w", "min-w", ANY),
    GroupRule::prefixed("max-w", "max-w", ANY),
    GroupRule::prefixed("h", "h", ANY),
    GroupRule::prefixed("min-h", "min-h", ANY),
    GroupRule::prefixed("max-h", "max-h", ANY),
    GroupRule::prefixed("size", "size", ANY),
    // Typography
    GroupRule::exact("font-smoothing", &["antialiased", "subpixel-antialiased"]),
    GroupRule::exact("font-style", &["italic", "not-italic"]),
    GroupRule::prefixed("font-weight", "font", FONT_WEIGHT),
    GroupRule::prefixed("font-family", "font", ANY),
    GroupRule::prefixed("tracking", "tracking", ANY),
    GroupRule::prefixed("line-clamp", "line-clamp", ANY),
    GroupRule::prefixed("leading", "leading", ANY),
    GroupRule::exact("list-style-position", &["list-inside", "list-outside"]),
    GroupRule::prefixed("list-style-type", "list", ANY),
    GroupRule::exact("text-decoration", &["underline", "overline", "line-through", "no-underline"]),
    GroupRule::exact("text-transform", &["uppercase", "lowercase", "capitalize", "normal-case"]),
    GroupRule::exact("text-overflow", &["truncate", "text-ellipsis", "text-clip"]),
    GroupRule::exact("text-wrap", &["text-wrap", "text-nowrap", "text-balance", "text-pretty"]),
    GroupRule::prefixed(
        "text-alignment",
        "text",
        &[ValueKind::Keywords(&["left", "center", "right", "justify", "start", "end"])],
    ),
    GroupRule::prefixed("font-size", "text", FONT_SIZE),
    GroupRule::prefixed("text-color", "text", ANY),
    GroupRule::prefixed(
        "text-decoration-style",
        "decoration",
        &[ValueKind::Keywords(&["solid", "dashed", "dotted", "double", "wavy"])],
    ),
    GroupRule::prefixed(
        "text-decoration-thickness",
        "decoration",
        &[
            ValueKind::Keywords(&["auto", "from-font"]),
            ValueKind::Number,
            ValueKind::ArbitraryLength,
        ],
    ),
    GroupRule::prefixed("text-decoration-color", "decoration", ANY),
    GroupRule::prefixed("underline-offset", "underline-offset", ANY),
    GroupRule::prefixed("indent", "indent", ANY),
    GroupRule::prefixed(
        "vertical-align",
        "align",
        &[
            ValueKind::Keywords(&[
                "baseline",
                "top",
                "middle",
                "bottom",
                "text-top",
                "text-bottom",
                "sub",
                "super",
            ]),
            ValueKind::Arbitrary,
        ],
    ),
    GroupRule::prefixed("whitespace", "whitespace", ANY),
    GroupRule::exact("break", &["break-normal", "break-words", "break-all", "break-keep"]),
    GroupRule::prefixed("hyphens", "hyphens", ANY),
    // Backgrounds
    GroupRule::exact("bg-attachment", &["bg-fixed", "bg-local", "bg-scroll"]),
    GroupRule::prefixed("bg-clip", "bg-clip", ANY),
    GroupRule::prefixed("bg-origin", "bg-origin", ANY),
    GroupRule::prefixed("bg-blend", "bg-blend", ANY),
    GroupRule::exact(
        "bg-repeat",
        &[
            "bg-repeat",
            "bg-no-repeat",
            "bg-repeat-x",
            "bg-repeat-y",
            "bg-repeat-round",
            "bg-repeat-space",
        ],
    ),
    GroupRule::prefixed(
        "bg-position",
        "bg",
        &[
            ValueKind::Keywords(&[
                "bottom",
                "center",
                "left",
                "left-bottom",
                "left-top",
                "right",
                "right-bottom",
                "right-top",
                "top",
            ]),
            ValueKind::ArbitraryPosition,
        ],
    ),
    GroupRule::prefixed(
        "bg-size",
        "bg",
        &[
            ValueKind::Keywords(&["auto", "cover", "contain"]),
            ValueKind::ArbitrarySize,
        ],
    ),
    GroupRule::prefixed(
        "bg-image",
        "bg",
        &[
            ValueKind::Keywords(&[
                "none",
                "gradient-to-t",
                "gradient-to-tr",
                "gradient-to-r",
                "gradient-to-br",
                "gradient-to-b",
                "gradient-to-bl",
                "gradient-to-l",
                "gradient-to-tl",
            ]),
            ValueKind::ArbitraryImage,
        ],
    ),
    GroupRule::prefixed("bg-color", "bg", ANY),
    GroupRule::prefixed("gradient-from-pos", "from", GRADIENT_POSITION),
    GroupRule::prefixed("gradient-from", "from", ANY),
    GroupRule::prefixed("gradient-via-pos", "via", GRADIENT_POSITION),
    GroupRule::prefixed("gradient-via", "via", ANY),
    GroupRule::prefixed("gradient-to-pos", "to", GRADIENT_POSITION),
    GroupRule::prefixed("gradient-to", "to", ANY),
    // Borders
    GroupRule::prefixed_or_bare("rounded-ss", "rounded-ss", RADIUS),
    GroupRule::prefixed_or_bare("rounded-se", "rounded-se", RADIUS),
    GroupRule::prefixed_or_bare("rounded-ee", "rounded-ee", RADIUS),
    GroupRule::prefixed_or_bare("rounded-es", "rounded-es", RADIUS),
    GroupRule::prefixed_or_bare("rounded-tl", "rounded-tl", RADIUS),
    GroupRule::prefixed_or_bare("rounded-tr", "rounded-tr", RADIUS),
    GroupRule::prefixed_or_bare("rounded-br", "rounded-br", RADIUS),
    GroupRule::prefixed_or_bare("rounded-bl", "rounded-bl", RADIUS),
    GroupRule::prefixed_or_bare("rounded-s", "rounded-s", RADIUS),
    GroupRule::prefixed_or_bare("rounded-e", "rounded-e", RADIUS),
    GroupRule::prefixed_or_bare("rounded-t", "rounded-t", RADIUS),
    GroupRule::prefixed_or_bare("rounded-r", "rounded-r", RADIUS),
    GroupRule::prefixed_or_bare("rounded-b", "rounded-b", RADIUS),
    GroupRule::prefixed_or_bare("rounded-l", "rounded-l", RADIUS),
    GroupRule::prefixed_or_bare("rounded", "rounded", RADIUS),
    GroupRule::exact("border-collapse", &["border-collapse", "border-separate"]),
    GroupRule::prefixed("border-spacing-x", "border-spacing-x", ANY),
    GroupRule::prefixed("border-spacing-y", "border-spacing-y", ANY),
    GroupRule::prefixed("border-spacing", "border-spacing", ANY),
    GroupRule::prefixed("border-style", "border", LINE_STYLE),
    GroupRule::prefixed_or_bare("border-w-x", "border-x", NUMERIC),
    GroupRule::prefixed_or_bare("border-w-y", "border-y", NUMERIC),
    GroupRule::prefixed_or_bare("border-w-s", "border-s", NUMERIC),
    GroupRule::prefixed_or_bare("border-w-e", "border-e", NUMERIC),
    GroupRule::prefixed_or_bare("border-w-t", "border-t", NUMERIC),
    GroupRule::prefixed_or_bare("border-w-r", "border-r", NUMERIC),
    GroupRule::prefixed_or_bare("border-w-b", "border-b", NUMERIC),
    GroupRule::prefixed_or_bare("border-w-l", "border-l", NUMERIC),
    GroupRule::prefixed_or_bare("border-w", "border", NUMERIC),
    GroupRule::prefixed("border-color-x", "border-x", ANY),
    GroupRule::prefixed("border-color-y", "border-y", ANY),
    GroupRule::prefixed("border-color-s", "border-s", ANY),
    GroupRule::prefixed("border-color-e", "border-e", ANY),
    GroupRule::prefixed("border-color-t", "border-t", ANY),
    GroupRule::prefixed("border-color-r", "border-r", ANY),
    GroupRule::prefixed("border-color-b", "border-b", ANY),
    GroupRule::prefixed("border-color-l", "border-l", ANY),
    GroupRule::prefixed("border-color", "border", ANY),
    GroupRule::exact("divide-x-reverse", &["divide-x-reverse"]),
    GroupRule::exact("divide-y-reverse", &["divide-y-reverse"]),
    GroupRule::prefixed_or_bare("divide-x", "divide-x", NUMERIC),
    GroupRule::prefixed_or_bare("divide-y", "divide-y", NUMERIC),
    GroupRule::prefixed("divide-style", "divide", LINE_STYLE),
    GroupRule::prefixed("divide-color", "divide", ANY),
    GroupRule::exact(
        "outline-style",
        &["outline", "outline-none", "outline-dashed", "outline-dotted", "outline-double"],
    ),
    GroupRule::prefixed("outline-offset", "outline-offset", ANY),
    GroupRule::prefixed("outline-w", "outline", NUMERIC),
    GroupRule::prefixed("outline-color", "outline", ANY),
    GroupRule::exact("ring-w-inset", &["ring-inset"]),
    GroupRule::prefixed("ring-offset-w", "ring-offset", NUMERIC),
    GroupRule::prefixed("ring-offset-color", "ring-offset", ANY),
    GroupRule::prefixed_or_bare("ring-w", "ring", NUMERIC),
    GroupRule::prefixed("ring-color", "ring", ANY),
    // Effects and filters
    GroupRule::prefixed_or_bare("shadow", "shadow", SHADOW),
    GroupRule::prefixed("shadow-color", "shadow", ANY),
    GroupRule::prefixed("opacity", "opacity", ANY),
    GroupRule::prefixed("mix-blend", "mix-blend", ANY),
    GroupRule::prefixed_or_bare("blur", "blur", BLUR),
    GroupRule::prefixed("brightness", "brightness", ANY),
    GroupRule::prefixed("contrast", "contrast", ANY),
    GroupRule::prefixed_or_bare("grayscale", "grayscale", ANY),
    GroupRule::prefixed("hue-rotate", "hue-rotate", ANY),
    GroupRule::prefixed_or_bare("invert", "invert", ANY),
    GroupRule::prefixed("saturate", "saturate", ANY),
    GroupRule::prefixed_or_bare("sepia", "sepia", ANY),
    GroupRule::prefixed_or_bare("drop-shadow", "drop-shadow", ANY),
    GroupRule::prefixed_or_bare("backdrop-blur", "backdrop-blur", BLUR),
    // Tables
    GroupRule::exact("table-layout", &["table-auto", "table-fixed"]),
    GroupRule::prefixed("caption", "caption", &[ValueKind::Keywords(&["top", "bottom"])]),
    // Transitions and animation
    GroupRule::prefixed_or_bare(
        "transition",
        "transition",
        &[
            ValueKind::Keywords(&["none", "all", "colors", "opacity", "shadow", "transform"]),
            ValueKind::Arbitrary,
        ],
    ),
    GroupRule::prefixed("duration", "duration", ANY),
    GroupRule::prefixed("ease", "ease", ANY),
    GroupRule::prefixed("delay", "delay", ANY),
    GroupRule::prefixed("animate", "animate", ANY),
    // Transforms
    GroupRule::prefixed("scale-x", "scale-x", ANY),
    GroupRule::prefixed("scale-y", "scale-y", ANY),
    GroupRule::prefixed("scale", "scale", ANY),
    GroupRule::prefixed("rotate", "rotate", ANY),
    GroupRule::prefixed("translate-x", "translate-x", ANY),
    GroupRule::prefixed("translate-y", "translate-y", ANY),
    GroupRule::prefixed("skew-x", "skew-x", ANY),
    GroupRule::prefixed("skew-y", "skew-y", ANY),
    GroupRule::prefixed("transform-origin", "origin", ANY),
    // Interactivity
    GroupRule::prefixed("accent", "accent", ANY),
    GroupRule::prefixed("appearance", "appearance", ANY),
    GroupRule::prefixed("cursor", "cursor", ANY),
    GroupRule::prefixed("caret-color", "caret", ANY),
    GroupRule::prefixed("pointer-events", "pointer-events", ANY),
    GroupRule::prefixed_or_bare(
        "resize",
        "resize",
        &[ValueKind::Keywords(&["none", "x", "y"])],
    ),
    GroupRule::exact("scroll-behavior", &["scroll-auto", "scroll-smooth"]),
    GroupRule::prefixed("select", "select", ANY),
    GroupRule::prefixed("will-change", "will-change", ANY),
    // SVG
    GroupRule::prefixed("fill", "fill", ANY),
    GroupRule::prefixed("stroke-color", "stroke", &[ValueKind::ArbitraryColor]),
    GroupRule::prefixed("stroke-w", "stroke", &[ValueKind::Integer, ValueKind::ArbitraryLength]),
    GroupRule::prefixed("stroke-color", "stroke", ANY),
];

const TAILWIND_V3_CONFLICTS: &[(&str, &[&str])] = &[
    ("overflow", &["overflow-x", "overflow-y"]),
    (
        "inset",
        &["inset-x", "inset-y", "start", "end", "top", "right", "bottom", "left"],
    ),
    ("inset-x", &["right", "left"]),
    ("inset-y", &["top", "bottom"]),
    ("flex", &["basis", "grow", "shrink"]),
    ("gap", &["gap-x", "gap-y"]),
    ("p", &["px", "py", "ps", "pe", "pt", "pr", "pb", "pl"]),
    ("px", &["pr", "pl"]),
    ("py", &["pt", "pb"]),
    ("m", &["mx", "my", "ms", "me", "mt", "mr", "mb", "ml"]),
    ("mx", &["mr", "ml"]),
    ("my", &["mt", "mb"]),
    ("size", &["w", "h"]),
    ("font-size", &["leading"]),
    ("line-clamp", &["display", "overflow"]),
    (
        "rounded",
        &[
            "rounded-s",
            "rounded-e",
            "rounded-t",
            "rounded-r",
            "rounded-b",
            "rounded-l",
            "rounded-ss",
            "rounded-se",
            "rounded-ee",
            "rounded-es",
            "rounded-tl",
            "rounded-tr",
            "rounded-br",
            "rounded-bl",
        ],
    ),
    ("rounded-s", &["rounded-ss", "rounded-es"]),
    ("rounded-e", &["rounded-se", "rounded-ee"]),
    ("rounded-t", &["rounded-tl", "rounded-tr"]),
    ("rounded-r", &["rounded-tr", "rounded-br"]),
    ("rounded-b", &["rounded-br", "rounded-bl"]),
    ("rounded-l", &["rounded-tl", "rounded-bl"]),
    ("border-spacing", &["border-spacing-x", "border-spacing-y"]),
    (
        "border-w",
        &[
            "border-w-x",
            "border-w-y",
            "border-w-s",
            "border-w-e",
            "border-w-t",
            "border-w-r",
            "border-w-b",
            "border-w-l",
        ],
    ),
    ("border-w-x", &["border-w-r", "border-w-l"]),
    ("border-w-y", &["border-w-t", "border-w-b"]),
    (
        "border-color",
        &[
            "border-color-x",
            "border-color-y",
            "border-color-s",
            "border-color-e",
            "border-color-t",
            "border-color-r",
            "border-color-b",
            "border-color-l",
        ],
    ),
    ("border-color-x", &["border-color-r", "border-color-l"]),
    ("border-color-y", &["border-color-t", "border-color-b"]),
];
