//! Named boolean workarounds/features and user overrides for them.
//!
//! Overrides come from two places, applied in order: the explicit [`FeatureOverrides`] lists,
//! then the `:`-separated environment variables [`FEATURE_OVERRIDES_ENABLED_ENV`] and
//! [`FEATURE_OVERRIDES_DISABLED_ENV`]. A later source wins.

use std::collections::BTreeMap;

use tracing::info;

pub const FEATURE_OVERRIDES_ENABLED_ENV: &str = "PRISM_FEATURE_OVERRIDES_ENABLED";
pub const FEATURE_OVERRIDES_DISABLED_ENV: &str = "PRISM_FEATURE_OVERRIDES_DISABLED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInfo {
    pub name: &'static str,
    pub enabled: bool,
    /// Set once an override touched the feature.
    pub has_override: bool,
}

impl FeatureInfo {
    pub const fn new(name: &'static str, enabled: bool) -> Self {
        Self {
            name,
            enabled,
            has_override: false,
        }
    }

    pub fn apply_override(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.has_override = true;
    }
}

/// Features keyed and iterated by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    members: BTreeMap<&'static str, FeatureInfo>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, feature: FeatureInfo) {
        self.members.insert(feature.name, feature);
    }

    pub fn get(&self, name: &str) -> Option<&FeatureInfo> {
        self.members.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureInfo> {
        self.members.values()
    }

    /// Disables every feature and forgets all overrides.
    pub fn reset(&mut self) {
        for feature in self.members.values_mut() {
            feature.enabled = false;
            feature.has_override = false;
        }
    }

    /// Sets every feature matching one of `names` to `enabled`; returns a summary of what changed,
    /// empty when nothing matched.
    ///
    /// A name without a trailing `*` applies to the first matching feature only.
    pub fn override_features<S: AsRef<str>>(&mut self, names: &[S], enabled: bool) -> String {
        let mut summary = String::new();
        for name in names {
            let name = name.as_ref();
            let wildcard = name.ends_with('*');
            for feature in self.members.values_mut() {
                if !feature_name_match(feature.name, name) {
                    continue;
                }
                feature.apply_override(enabled);
                if summary.is_empty() {
                    summary.push_str("Feature overrides: ");
                }
                summary.push_str(feature.name);
                summary.push_str(if enabled { " enabled, " } else { " disabled, " });
                if !wildcard {
                    break;
                }
            }
        }
        summary
    }
}

/// Compares a feature name against a user-supplied name, ignoring underscores and ASCII case.
/// A trailing `*` on `pattern` matches one or more further characters.
pub fn feature_name_match(feature: &str, pattern: &str) -> bool {
    fn normalized(s: &str) -> impl Iterator<Item = char> + '_ {
        s.chars().filter(|&c| c != '_').map(|c| c.to_ascii_lowercase())
    }

    match pattern.strip_suffix('*') {
        Some(prefix) => {
            let mut feature = normalized(feature);
            normalized(prefix).all(|c| feature.next() == Some(c)) && feature.next().is_some()
        }
        None => normalized(feature).eq(normalized(pattern)),
    }
}

/// Explicit override lists, typically from display attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureOverrides {
    pub enabled: Vec<String>,
    pub disabled: Vec<String>,
}

/// Applies `overrides`, then the environment override lists.
pub fn apply_feature_overrides(features: &mut FeatureSet, overrides: &FeatureOverrides) {
    let env = FeatureOverrides {
        enabled: env_var_list(FEATURE_OVERRIDES_ENABLED_ENV),
        disabled: env_var_list(FEATURE_OVERRIDES_DISABLED_ENV),
    };
    apply_feature_overrides_with_env(features, overrides, &env);
}

/// [`apply_feature_overrides`] with the environment lists supplied by the caller.
pub fn apply_feature_overrides_with_env(
    features: &mut FeatureSet,
    overrides: &FeatureOverrides,
    env: &FeatureOverrides,
) {
    let mut summary = String::new();
    for source in [overrides, env] {
        summary += &features.override_features(&source.enabled, true);
        summary += &features.override_features(&source.disabled, false);
    }
    if !summary.is_empty() {
        info!("{}", summary.trim_end_matches(", "));
    }
}

fn env_var_list(name: &str) -> Vec<String> {
    let Ok(raw) = std::env::var(name) else {
        return Vec::new();
    };
    raw.split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
