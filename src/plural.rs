//! Plural categories and language plural rules
//!
//! Pluralized source strings carry `[i2p_<Category>]` tags separating the
//! grammatical-number alternatives of a term. `Plural` is the default form
//! (stored untagged); the remaining categories are only stored when a language
//! distinguishes them.
//!
//! Which categories a language supports, and which integer triggers each of
//! them, comes from the [`PluralRules`] collaborator. [`IcuPluralRules`]
//! implements it on top of ICU CLDR data by probing candidate numbers until
//! one lands in the wanted category.

use icu_locale::Locale;
use icu_plurals::{PluralCategory as IcuCategory, PluralRuleType, PluralRules as IcuRules};

/// Prefix of a plural category tag inside a source string.
pub const PLURAL_TAG_PREFIX: &str = "[i2p_";

/// Grammatical number classes distinguished by the protocol.
///
/// `Plural` is the default/fallback form and always comes last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Plural,
}

impl PluralCategory {
    /// All categories, in query-construction order.
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Plural,
    ];

    /// Every category except the default `Plural` form.
    pub const SECONDARY: [PluralCategory; 5] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PluralCategory::Zero => "Zero",
            PluralCategory::One => "One",
            PluralCategory::Two => "Two",
            PluralCategory::Few => "Few",
            PluralCategory::Many => "Many",
            PluralCategory::Plural => "Plural",
        }
    }

    /// The tag introducing this category in a pluralized string, e.g. `[i2p_One]`.
    pub fn tag(self) -> String {
        format!("{}{}]", PLURAL_TAG_PREFIX, self.name())
    }
}

/// Language pluralization rules: which categories a language has, and a
/// representative number selecting each of them.
pub trait PluralRules {
    /// A number that triggers `category` in `language`, or `None` when the
    /// language does not distinguish that category.
    ///
    /// `Plural` is the fallback form, so it must always yield a number.
    fn test_number(&self, language: &str, category: PluralCategory) -> Option<u32>;

    /// Whether `language` grammatically distinguishes `category`.
    fn has_plural_form(&self, language: &str, category: PluralCategory) -> bool {
        self.test_number(language, category).is_some()
    }
}

/// Plural rules backed by ICU CLDR cardinal data.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcuPluralRules;

impl IcuPluralRules {
    pub fn new() -> Self {
        IcuPluralRules
    }

    /// Candidate numbers probed for each category. The first candidate the
    /// language actually maps to the category becomes its test number.
    fn candidates(category: PluralCategory) -> &'static [u32] {
        match category {
            PluralCategory::Zero => &[0],
            PluralCategory::One => &[1, 21, 31, 41],
            PluralCategory::Two => &[2, 22, 32],
            PluralCategory::Few => &[3, 4, 23, 24],
            PluralCategory::Many => &[5, 11, 101],
            PluralCategory::Plural => &[6, 7, 8, 9, 10, 25, 100, 1000],
        }
    }

    fn icu_category(category: PluralCategory) -> IcuCategory {
        match category {
            PluralCategory::Zero => IcuCategory::Zero,
            PluralCategory::One => IcuCategory::One,
            PluralCategory::Two => IcuCategory::Two,
            PluralCategory::Few => IcuCategory::Few,
            PluralCategory::Many => IcuCategory::Many,
            PluralCategory::Plural => IcuCategory::Other,
        }
    }
}

impl PluralRules for IcuPluralRules {
    fn test_number(&self, language: &str, category: PluralCategory) -> Option<u32> {
        let locale: Locale = language.parse().ok()?;
        let rules = IcuRules::try_new(locale.into(), PluralRuleType::Cardinal.into()).ok()?;

        let wanted = Self::icu_category(category);
        let candidates = Self::candidates(category);
        let found = candidates
            .iter()
            .copied()
            .find(|&n| rules.category_for(n as usize) == wanted);

        // Some languages (e.g. Russian) map every integer to one/few/many and
        // never hit "other"; the default form still needs a number.
        if found.is_none() && category == PluralCategory::Plural {
            return candidates.last().copied();
        }
        found
    }
}
