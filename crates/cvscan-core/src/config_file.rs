use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub limits: Option<LimitsConfig>,
    pub name: Option<NameConfig>,
    pub address: Option<AddressConfig>,
    pub skills: Option<SkillsConfig>,
    pub education: Option<KeywordsConfig>,
    pub experience: Option<KeywordsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_file_size_bytes: Option<u64>,
    pub max_archive_size_mb: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameConfig {
    pub max_scan_lines: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressConfig {
    /// Extra city patterns, tried after the built-in ones.
    pub extra_cities: Option<Vec<CityPatternConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityPatternConfig {
    /// Regex matched against the full text.
    pub pattern: String,
    /// Label stored instead of the matched text, if set.
    pub canonical: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// Replaces the built-in keyword table.
    pub keywords: Option<Vec<String>>,
    /// Appended to the keyword table.
    pub extra_keywords: Option<Vec<String>>,
    /// Extra lower-case keyword → display form entries.
    pub capitalization: Option<BTreeMap<String, String>>,
}

/// Keyword table override shared by the education and experience sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordsConfig {
    pub keywords: Option<Vec<String>>,
    pub extra_keywords: Option<Vec<String>>,
}

/// Platform config directory path: `<config_dir>/cvscan/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cvscan").join("config.toml"))
}

/// Load config by cascading CWD `.cvscan.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".cvscan.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

fn pick<S, T: Clone>(overlay: Option<&S>, base: Option<&S>, field: impl Fn(&S) -> Option<&T>) -> Option<T> {
    overlay
        .and_then(&field)
        .or_else(|| base.and_then(&field))
        .cloned()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let keywords = |o: Option<&KeywordsConfig>, b: Option<&KeywordsConfig>| KeywordsConfig {
        keywords: pick(o, b, |k| k.keywords.as_ref()),
        extra_keywords: pick(o, b, |k| k.extra_keywords.as_ref()),
    };

    ConfigFile {
        limits: Some(LimitsConfig {
            max_file_size_bytes: pick(
                overlay.limits.as_ref(),
                base.limits.as_ref(),
                |l| l.max_file_size_bytes.as_ref(),
            ),
            max_archive_size_mb: pick(
                overlay.limits.as_ref(),
                base.limits.as_ref(),
                |l| l.max_archive_size_mb.as_ref(),
            ),
        }),
        name: Some(NameConfig {
            max_scan_lines: pick(overlay.name.as_ref(), base.name.as_ref(), |n| {
                n.max_scan_lines.as_ref()
            }),
        }),
        address: Some(AddressConfig {
            extra_cities: pick(overlay.address.as_ref(), base.address.as_ref(), |a| {
                a.extra_cities.as_ref()
            }),
        }),
        skills: Some(SkillsConfig {
            keywords: pick(overlay.skills.as_ref(), base.skills.as_ref(), |s| {
                s.keywords.as_ref()
            }),
            extra_keywords: pick(overlay.skills.as_ref(), base.skills.as_ref(), |s| {
                s.extra_keywords.as_ref()
            }),
            capitalization: pick(overlay.skills.as_ref(), base.skills.as_ref(), |s| {
                s.capitalization.as_ref()
            }),
        }),
        education: Some(keywords(overlay.education.as_ref(), base.education.as_ref())),
        experience: Some(keywords(
            overlay.experience.as_ref(),
            base.experience.as_ref(),
        )),
    }
}

impl ConfigFile {
    pub fn max_file_size_bytes(&self) -> Option<u64> {
        self.limits.as_ref().and_then(|l| l.max_file_size_bytes)
    }

    pub fn max_archive_size_mb(&self) -> Option<u32> {
        self.limits.as_ref().and_then(|l| l.max_archive_size_mb)
    }
}
