//! Plural rule resolution.
//!
//! Maps a target language tag to its numerus-form count and selects the
//! correct form for a given cardinal. Rules are a closed set of shapes, each
//! a pure function of `n`, looked up by the primary language subtag through a
//! static table.
//!
//! The table follows the form counts the original tool's own catalogs use
//! (`ru`/`pl` = 3, `hu`/`ja` = 1, `da` = 2), which differ from raw CLDR for a
//! few languages. Unknown tags resolve to [`PluralRule::Universal`]; the
//! codec surfaces that as a warning, never an error.

/// A plural-rule shape shared by one or more languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// One form for every quantity ("Universal Form").
    Universal,
    /// `n == 1` vs everything else.
    OneOther,
    /// `n <= 1` vs everything else (French-style).
    UpToOneOther,
    /// Distinct singular and dual (Irish-style).
    OneTwoOther,
    /// Slavic modulo rule: 1/x1 singular, 2-4/x2-x4 paucal, rest plural.
    OneFewMany,
    /// Polish variant: the singular form is exactly `n == 1`.
    PolishOneFewMany,
    /// Czech/Slovak: singular at 1, paucal at 2-4, rest plural.
    OneFewOther,
    /// Slovenian: modulo-100 singular, dual, paucal, plural.
    OneTwoFewOther,
    /// Arabic: zero, singular, dual, paucal, plural, other.
    ArabicSixForms,
}

/// `(primary subtag, rule)` pairs. Kept sorted for readability only; lookup
/// is a linear scan over a few dozen entries.
static LANGUAGE_RULES: &[(&str, PluralRule)] = &[
    ("af", PluralRule::OneOther),
    ("ar", PluralRule::ArabicSixForms),
    ("be", PluralRule::OneFewMany),
    ("bg", PluralRule::OneOther),
    ("bs", PluralRule::OneFewMany),
    ("ca", PluralRule::OneOther),
    ("cs", PluralRule::OneFewOther),
    ("da", PluralRule::OneOther),
    ("de", PluralRule::OneOther),
    ("el", PluralRule::OneOther),
    ("en", PluralRule::OneOther),
    ("es", PluralRule::OneOther),
    ("et", PluralRule::OneOther),
    ("eu", PluralRule::OneOther),
    ("fi", PluralRule::OneOther),
    ("fo", PluralRule::OneOther),
    ("fr", PluralRule::UpToOneOther),
    ("ga", PluralRule::OneTwoOther),
    ("gl", PluralRule::OneOther),
    ("he", PluralRule::OneOther),
    ("hr", PluralRule::OneFewMany),
    ("hu", PluralRule::Universal),
    ("id", PluralRule::Universal),
    ("it", PluralRule::OneOther),
    ("ja", PluralRule::Universal),
    ("ko", PluralRule::Universal),
    ("ms", PluralRule::Universal),
    ("nb", PluralRule::OneOther),
    ("nl", PluralRule::OneOther),
    ("nn", PluralRule::OneOther),
    ("no", PluralRule::OneOther),
    ("pl", PluralRule::PolishOneFewMany),
    ("pt", PluralRule::OneOther),
    ("ru", PluralRule::OneFewMany),
    ("sk", PluralRule::OneFewOther),
    ("sl", PluralRule::OneTwoFewOther),
    ("sq", PluralRule::OneOther),
    ("sr", PluralRule::OneFewMany),
    ("sv", PluralRule::OneOther),
    ("th", PluralRule::Universal),
    ("tr", PluralRule::Universal),
    ("uk", PluralRule::OneFewMany),
    ("vi", PluralRule::Universal),
    ("zh", PluralRule::Universal),
];

/// The primary language subtag of a tag like `hu_HU` or `ru-RU`, lowercased.
pub fn primary_subtag(tag: &str) -> String {
    tag.split(['_', '-'])
        .next()
        .unwrap_or(tag)
        .to_ascii_lowercase()
}

impl PluralRule {
    /// Look up the rule for a language tag. `None` for unknown languages.
    pub fn for_language(tag: &str) -> Option<Self> {
        let primary = primary_subtag(tag);
        LANGUAGE_RULES
            .iter()
            .find(|(lang, _)| *lang == primary)
            .map(|(_, rule)| *rule)
    }

    /// Like [`Self::for_language`], falling back to the single-category
    /// universal rule for unknown tags.
    pub fn for_language_or_universal(tag: &str) -> Self {
        Self::for_language(tag).unwrap_or(PluralRule::Universal)
    }

    /// Number of plural categories this rule defines.
    pub fn count(self) -> usize {
        self.category_names().len()
    }

    /// Display names for the categories, in category order.
    pub fn category_names(self) -> &'static [&'static str] {
        match self {
            PluralRule::Universal => &["Universal Form"],
            PluralRule::OneOther | PluralRule::UpToOneOther => &["Singular", "Plural"],
            PluralRule::OneTwoOther => &["Singular", "Dual", "Plural"],
            PluralRule::OneFewMany | PluralRule::PolishOneFewMany | PluralRule::OneFewOther => {
                &["Singular", "Paucal", "Plural"]
            }
            PluralRule::OneTwoFewOther => &["Singular", "Dual", "Paucal", "Plural"],
            PluralRule::ArabicSixForms => {
                &["Zero", "Singular", "Dual", "Paucal", "Plural", "Other"]
            }
        }
    }

    /// Select the category index for a cardinal. Pure and total.
    pub fn select(self, n: u64) -> usize {
        match self {
            PluralRule::Universal => 0,
            PluralRule::OneOther => {
                if n == 1 {
                    0
                } else {
                    1
                }
            }
            PluralRule::UpToOneOther => {
                if n <= 1 {
                    0
                } else {
                    1
                }
            }
            PluralRule::OneTwoOther => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            PluralRule::OneFewMany => {
                if n % 10 == 1 && n % 100 != 11 {
                    0
                } else if (2..=4).contains(&(n % 10)) && !(12..=14).contains(&(n % 100)) {
                    1
                } else {
                    2
                }
            }
            PluralRule::PolishOneFewMany => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&(n % 10)) && !(12..=14).contains(&(n % 100)) {
                    1
                } else {
                    2
                }
            }
            PluralRule::OneFewOther => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n) {
                    1
                } else {
                    2
                }
            }
            PluralRule::OneTwoFewOther => match n % 100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            PluralRule::ArabicSixForms => {
                if n == 0 {
                    0
                } else if n == 1 {
                    1
                } else if n == 2 {
                    2
                } else if (3..=10).contains(&(n % 100)) {
                    3
                } else if n % 100 >= 11 {
                    4
                } else {
                    5
                }
            }
        }
    }
}

/// Number of plural categories the target language requires.
pub fn category_count(language: &str) -> usize {
    PluralRule::for_language_or_universal(language).count()
}

/// Category index for a cardinal in the target language.
pub fn select_category(language: &str, n: u64) -> usize {
    PluralRule::for_language_or_universal(language).select(n)
}
