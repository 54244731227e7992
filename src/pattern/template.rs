use std::fmt;

/// One of the ten recognised local-part templates, in the fixed declared
/// order used throughout generation, ranking and de-duplication.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternTemplate {
    FirstDotLast,
    FirstLast,
    FirstInitialDotLast,
    FirstInitialLast,
    FirstUnderscoreLast,
    First,
    LastDotFirst,
    LastFirst,
    LastFirstInitial,
    FirstInitialLastInitial,
}

/// The recognised template set, in declared order. Ranking and the
/// static-generator fallback both iterate this list, never a re-sorted copy.
pub const ALL_TEMPLATES: [PatternTemplate; 10] = [
    PatternTemplate::FirstDotLast,
    PatternTemplate::FirstLast,
    PatternTemplate::FirstInitialDotLast,
    PatternTemplate::FirstInitialLast,
    PatternTemplate::FirstUnderscoreLast,
    PatternTemplate::First,
    PatternTemplate::LastDotFirst,
    PatternTemplate::LastFirst,
    PatternTemplate::LastFirstInitial,
    PatternTemplate::FirstInitialLastInitial,
];

impl PatternTemplate {
    /// The literal template string, e.g. `{firstName}.{lastName}`. This is
    /// also the canonical persisted form used as a repository key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstDotLast => "{firstName}.{lastName}",
            Self::FirstLast => "{firstName}{lastName}",
            Self::FirstInitialDotLast => "{firstInitial}.{lastName}",
            Self::FirstInitialLast => "{firstInitial}{lastName}",
            Self::FirstUnderscoreLast => "{firstName}_{lastName}",
            Self::First => "{firstName}",
            Self::LastDotFirst => "{lastName}.{firstName}",
            Self::LastFirst => "{lastName}{firstName}",
            Self::LastFirstInitial => "{lastName}{firstInitial}",
            Self::FirstInitialLastInitial => "{firstInitial}{lastInitial}",
        }
    }

    pub fn from_str_exact(s: &str) -> Option<Self> {
        ALL_TEMPLATES.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for PatternTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of mapping a verified email address back to a template.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedPattern {
    /// The local-part exactly matches one recognised template's expansion.
    Recognized(PatternTemplate),
    /// No template matches; the raw local-part is logged but not learnable.
    Raw(String),
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

fn first_initial(first: &str) -> String {
    fold(first).chars().next().map(String::from).unwrap_or_default()
}

fn last_initial(last: &str) -> String {
    fold(last).chars().next().map(String::from).unwrap_or_default()
}

fn local_part(template: PatternTemplate, first: &str, last: &str) -> String {
    let first = fold(first);
    let last = fold(last);
    let fi = first_initial(&first);
    let li = last_initial(&last);

    match template {
        PatternTemplate::FirstDotLast => format!("{first}.{last}"),
        PatternTemplate::FirstLast => format!("{first}{last}"),
        PatternTemplate::FirstInitialDotLast => format!("{fi}.{last}"),
        PatternTemplate::FirstInitialLast => format!("{fi}{last}"),
        PatternTemplate::FirstUnderscoreLast => format!("{first}_{last}"),
        PatternTemplate::First => first,
        PatternTemplate::LastDotFirst => format!("{last}.{first}"),
        PatternTemplate::LastFirst => format!("{last}{first}"),
        PatternTemplate::LastFirstInitial => format!("{last}{fi}"),
        PatternTemplate::FirstInitialLastInitial => format!("{fi}{li}"),
    }
}

/// Expands `template` for `(first, last)` at `domain` into a full email
/// address. Names are case-folded to lowercase before substitution;
/// non-ASCII code points pass through unchanged. Literal punctuation in the
/// template (`.`, `_`) is preserved verbatim.
pub fn expand(template: PatternTemplate, first: &str, last: &str, domain: &str) -> String {
    format!("{}@{}", local_part(template, first, last), domain)
}

/// Maps a verified `email` back to the template that produced it, trying
/// every recognised template in declared order and returning the first
/// exact match. Returns the raw local-part, unrecognised, otherwise.
pub fn derive(email: &str, first: &str, last: &str) -> DerivedPattern {
    let Some((local, _domain)) = email.split_once('@') else {
        return DerivedPattern::Raw(email.to_string());
    };

    for template in ALL_TEMPLATES {
        if local_part(template, first, last) == local {
            return DerivedPattern::Recognized(template);
        }
    }
    DerivedPattern::Raw(local.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_lowercases_and_substitutes() {
        let email = expand(PatternTemplate::FirstDotLast, "Ada", "Lovelace", "analyticalengines.com");
        assert_eq!(email, "ada.lovelace@analyticalengines.com");
    }

    #[test]
    fn expand_preserves_non_ascii() {
        let email = expand(PatternTemplate::FirstLast, "André", "Noël", "example.com");
        assert_eq!(email, "andré{}@example.com".replace("{}", "noël"));
    }

    #[test]
    fn derive_round_trips_every_template() {
        for template in ALL_TEMPLATES {
            let email = expand(template, "Ada", "Lovelace", "example.com");
            let derived = derive(&email, "Ada", "Lovelace");
            assert_eq!(derived, DerivedPattern::Recognized(template));
        }
    }

    #[test]
    fn derive_returns_raw_for_unrecognised_local_part() {
        let derived = derive("totally-custom@example.com", "Ada", "Lovelace");
        assert_eq!(derived, DerivedPattern::Raw("totally-custom".to_string()));
    }

    #[test]
    fn template_display_matches_literal_form() {
        assert_eq!(PatternTemplate::FirstDotLast.to_string(), "{firstName}.{lastName}");
        assert_eq!(
            PatternTemplate::from_str_exact("{firstName}.{lastName}"),
            Some(PatternTemplate::FirstDotLast)
        );
    }

    proptest::proptest! {
        /// `derive(expand(T, f, l, d), f, l) == T` for every template and any
        /// ASCII alphabetic first/last name — the round-trip invariant spec.md
        /// §8 names, checked beyond the single `"Ada"/"Lovelace"` example above.
        #[test]
        fn derive_expand_round_trip_holds_for_arbitrary_ascii_names(
            first in "[a-zA-Z]{1,16}",
            last in "[a-zA-Z]{1,16}",
        ) {
            for template in ALL_TEMPLATES {
                let email = expand(template, &first, &last, "example.com");
                let derived = derive(&email, &first, &last);
                proptest::prop_assert_eq!(derived, DerivedPattern::Recognized(template));
            }
        }
    }
}
