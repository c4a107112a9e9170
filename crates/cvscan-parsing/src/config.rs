use regex::Regex;

use cvscan_core::config_file::ConfigFile;

use crate::address::AddressPattern;
use crate::skills::SkillKeyword;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

impl<T> ListOverride<T> {
    /// Add one value: appended to an existing override, otherwise the
    /// defaults are extended.
    pub fn push(&mut self, value: T) {
        match self {
            ListOverride::Replace(v) | ListOverride::Extend(v) => v.push(value),
            ListOverride::Default => *self = ListOverride::Extend(vec![value]),
        }
    }

    /// Convert every value, failing on the first error.
    pub fn try_map<U, E>(
        self,
        f: impl Fn(T) -> Result<U, E>,
    ) -> Result<ListOverride<U>, E> {
        Ok(match self {
            ListOverride::Default => ListOverride::Default,
            ListOverride::Replace(v) => {
                ListOverride::Replace(v.into_iter().map(f).collect::<Result<_, _>>()?)
            }
            ListOverride::Extend(v) => {
                ListOverride::Extend(v.into_iter().map(f).collect::<Result<_, _>>()?)
            }
        })
    }
}

/// Configuration for the heuristic field extractors.
///
/// Regex fields are `Option<Regex>`: `None` means "use the built-in
/// default". Use [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── name.rs ──
    /// How many leading lines are considered for the name (default: 15).
    pub(crate) name_max_lines: usize,

    // ── contact.rs ──
    pub(crate) email_re: Option<Regex>,
    pub(crate) phone_re: Option<Regex>,

    // ── address.rs ──
    pub(crate) address_patterns: ListOverride<AddressPattern>,

    // ── university.rs ──
    pub(crate) university_patterns: ListOverride<Regex>,

    // ── education.rs ──
    pub(crate) education_keywords: ListOverride<String>,
    /// Lines per snippet, keyword line included (default: 3, at least 1).
    pub(crate) education_window: usize,
    pub(crate) education_min_chars: usize,
    pub(crate) education_max_chars: usize,

    // ── experience.rs ──
    pub(crate) experience_keywords: ListOverride<String>,
    /// Lines per segment, keyword line included (default: 4, at least 1).
    pub(crate) experience_window: usize,
    /// Shortest segment worth keeping (default: 30).
    pub(crate) experience_min_chars: usize,
    /// Length of the joined summary (default: 300).
    pub(crate) experience_max_chars: usize,

    // ── skills.rs ──
    pub(crate) skill_keywords: ListOverride<SkillKeyword>,
    pub(crate) skill_capitalization: ListOverride<(String, String)>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            name_max_lines: 15,
            email_re: None,
            phone_re: None,
            address_patterns: ListOverride::Default,
            university_patterns: ListOverride::Default,
            education_keywords: ListOverride::Default,
            education_window: 3,
            education_min_chars: 20,
            education_max_chars: 300,
            experience_keywords: ListOverride::Default,
            experience_window: 4,
            experience_min_chars: 30,
            experience_max_chars: 300,
            skill_keywords: ListOverride::Default,
            skill_capitalization: ListOverride::Default,
        }
    }
}

impl ParsingConfig {
    pub fn name_max_lines(&self) -> usize {
        self.name_max_lines
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    name_max_lines: Option<usize>,
    email_re: Option<String>,
    phone_re: Option<String>,
    address_patterns: ListOverride<(String, Option<String>)>,
    university_patterns: ListOverride<String>,
    education_keywords: ListOverride<String>,
    education_window: Option<usize>,
    education_bounds: Option<(usize, usize)>,
    experience_keywords: ListOverride<String>,
    experience_window: Option<usize>,
    experience_min_chars: Option<usize>,
    experience_max_chars: Option<usize>,
    skill_keywords: ListOverride<String>,
    skill_capitalization: ListOverride<(String, String)>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Name ──

    pub fn name_max_lines(mut self, n: usize) -> Self {
        self.name_max_lines = Some(n);
        self
    }

    // ── Contact ──

    pub fn email_regex(mut self, pattern: &str) -> Self {
        self.email_re = Some(pattern.to_string());
        self
    }

    pub fn phone_regex(mut self, pattern: &str) -> Self {
        self.phone_re = Some(pattern.to_string());
        self
    }

    // ── Address ──

    pub fn set_address_patterns(mut self, patterns: Vec<(String, Option<String>)>) -> Self {
        self.address_patterns = ListOverride::Replace(patterns);
        self
    }

    /// Add a city pattern, tried after the built-in ones.
    pub fn add_address_pattern(mut self, pattern: &str, canonical: Option<&str>) -> Self {
        self.address_patterns
            .push((pattern.to_string(), canonical.map(str::to_string)));
        self
    }

    // ── University ──

    pub fn set_university_patterns(mut self, patterns: Vec<String>) -> Self {
        self.university_patterns = ListOverride::Replace(patterns);
        self
    }

    pub fn add_university_pattern(mut self, pattern: String) -> Self {
        self.university_patterns.push(pattern);
        self
    }

    // ── Education ──

    pub fn set_education_keywords(mut self, keywords: Vec<String>) -> Self {
        self.education_keywords = ListOverride::Replace(keywords);
        self
    }

    pub fn add_education_keyword(mut self, keyword: String) -> Self {
        self.education_keywords.push(keyword);
        self
    }

    pub fn education_window(mut self, lines: usize) -> Self {
        self.education_window = Some(lines);
        self
    }

    /// Accepted snippet length in characters, inclusive on both ends.
    pub fn education_bounds(mut self, min_chars: usize, max_chars: usize) -> Self {
        self.education_bounds = Some((min_chars, max_chars));
        self
    }

    // ── Experience ──

    pub fn set_experience_keywords(mut self, keywords: Vec<String>) -> Self {
        self.experience_keywords = ListOverride::Replace(keywords);
        self
    }

    pub fn add_experience_keyword(mut self, keyword: String) -> Self {
        self.experience_keywords.push(keyword);
        self
    }

    pub fn experience_window(mut self, lines: usize) -> Self {
        self.experience_window = Some(lines);
        self
    }

    pub fn experience_min_chars(mut self, n: usize) -> Self {
        self.experience_min_chars = Some(n);
        self
    }

    pub fn experience_max_chars(mut self, n: usize) -> Self {
        self.experience_max_chars = Some(n);
        self
    }

    // ── Skills ──

    pub fn set_skill_keywords(mut self, keywords: Vec<String>) -> Self {
        self.skill_keywords = ListOverride::Replace(keywords);
        self
    }

    pub fn add_skill_keyword(mut self, keyword: String) -> Self {
        self.skill_keywords.push(keyword);
        self
    }

    /// Display form for a skill keyword, e.g. `("nuxt", "Nuxt.js")`.
    pub fn add_skill_capitalization(mut self, keyword: String, display: String) -> Self {
        self.skill_capitalization.push((keyword, display));
        self
    }

    // ── On-disk config ──

    /// Apply the tables and limits found in a TOML [`ConfigFile`].
    ///
    /// A `keywords` list replaces the built-in table; `extra_keywords` are
    /// appended after it.
    pub fn apply_config_file(mut self, file: &ConfigFile) -> Self {
        if let Some(n) = file.name.as_ref().and_then(|n| n.max_scan_lines) {
            self = self.name_max_lines(n);
        }

        if let Some(cities) = file.address.as_ref().and_then(|a| a.extra_cities.as_ref()) {
            for city in cities {
                self = self.add_address_pattern(&city.pattern, city.canonical.as_deref());
            }
        }

        if let Some(skills) = &file.skills {
            if let Some(keywords) = &skills.keywords {
                self = self.set_skill_keywords(keywords.clone());
            }
            for keyword in skills.extra_keywords.iter().flatten() {
                self = self.add_skill_keyword(keyword.clone());
            }
            for (keyword, display) in skills.capitalization.iter().flatten() {
                self = self.add_skill_capitalization(keyword.clone(), display.clone());
            }
        }

        if let Some(education) = &file.education {
            if let Some(keywords) = &education.keywords {
                self = self.set_education_keywords(keywords.clone());
            }
            for keyword in education.extra_keywords.iter().flatten() {
                self = self.add_education_keyword(keyword.clone());
            }
        }

        if let Some(experience) = &file.experience {
            if let Some(keywords) = &experience.keywords {
                self = self.set_experience_keywords(keywords.clone());
            }
            for keyword in experience.extra_keywords.iter().flatten() {
                self = self.add_experience_keyword(keyword.clone());
            }
        }

        self
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let compile = |opt: Option<String>| -> Result<Option<Regex>, regex::Error> {
            opt.map(|p| Regex::new(&p)).transpose()
        };
        let defaults = ParsingConfig::default();
        let (education_min_chars, education_max_chars) = self.education_bounds.unwrap_or((
            defaults.education_min_chars,
            defaults.education_max_chars,
        ));

        Ok(ParsingConfig {
            name_max_lines: self.name_max_lines.unwrap_or(defaults.name_max_lines),
            email_re: compile(self.email_re)?,
            phone_re: compile(self.phone_re)?,
            address_patterns: self
                .address_patterns
                .try_map(|(p, c)| AddressPattern::new(&p, c.as_deref()))?,
            university_patterns: self.university_patterns.try_map(|p| Regex::new(&p))?,
            education_keywords: self.education_keywords,
            education_window: self.education_window.unwrap_or(defaults.education_window),
            education_min_chars,
            education_max_chars,
            experience_keywords: self.experience_keywords,
            experience_window: self.experience_window.unwrap_or(defaults.experience_window),
            experience_min_chars: self
                .experience_min_chars
                .unwrap_or(defaults.experience_min_chars),
            experience_max_chars: self
                .experience_max_chars
                .unwrap_or(defaults.experience_max_chars),
            skill_keywords: self.skill_keywords.try_map(|k| SkillKeyword::new(&k))?,
            skill_capitalization: self.skill_capitalization,
        })
    }
}
