//! Cargo dependency declarations carried by symbols

use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyLocation {
    CratesIo { version: String },
    Local { path: String },
}

/// A crate that generated code needs in order to use a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CargoDependency {
    pub name: String,
    pub location: DependencyLocation,
    pub features: BTreeSet<String>,
}

impl CargoDependency {
    pub fn new(name: impl Into<String>, location: DependencyLocation) -> Self {
        Self {
            name: name.into(),
            location,
            features: BTreeSet::new(),
        }
    }

    pub fn crates_io(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(
            name,
            DependencyLocation::CratesIo {
                version: version.into(),
            },
        )
    }

    /// A copy of this dependency with `feature` enabled.
    pub fn with_feature(&self, feature: impl Into<String>) -> Self {
        let mut dep = self.clone();
        dep.features.insert(feature.into());
        dep
    }

    /// The name generated code uses to refer to the crate.
    pub fn rust_name(&self) -> String {
        self.name.replace('-', "_")
    }

    /// Whether `other` names the same crate from the same place, ignoring features.
    pub fn same_crate(&self, other: &CargoDependency) -> bool {
        self.name == other.name && self.location == other.location
    }

    /// Render as a line of a `Cargo.toml` dependency table.
    pub fn to_toml_line(&self) -> String {
        let mut parts = vec![match &self.location {
            DependencyLocation::CratesIo { version } => format!("version = \"{}\"", version),
            DependencyLocation::Local { path } => format!("path = \"{}\"", path),
        }];
        if !self.features.is_empty() {
            let features: Vec<String> = self.features.iter().map(|f| format!("\"{}\"", f)).collect();
            parts.push(format!("features = [{}]", features.join(", ")));
        }
        format!("{} = {{ {} }}", self.name, parts.join(", "))
    }
}

/// Collapse declarations of the same crate into one, unioning their features.
///
/// First-seen order is preserved.
pub fn merge_dependencies<'a>(deps: impl IntoIterator<Item = &'a CargoDependency>) -> Vec<CargoDependency> {
    let mut merged: Vec<CargoDependency> = Vec::new();
    for dep in deps {
        match merged.iter_mut().find(|m| m.same_crate(dep)) {
            Some(existing) => existing.features.extend(dep.features.iter().cloned()),
            None => merged.push(dep.clone()),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_feature_leaves_original_untouched() {
        let base = CargoDependency::crates_io("shapegen-runtime", "0.1");
        let gated = base.with_feature("event-stream");

        assert!(base.features.is_empty());
        assert!(gated.features.contains("event-stream"));
        assert!(base.same_crate(&gated));
        assert_eq!(gated.rust_name(), "shapegen_runtime");
    }

    #[test]
    fn test_to_toml_line() {
        let dep = CargoDependency::crates_io("shapegen-runtime", "0.1").with_feature("event-stream");
        assert_eq!(
            dep.to_toml_line(),
            r#"shapegen-runtime = { version = "0.1", features = ["event-stream"] }"#
        );

        let local = CargoDependency::new(
            "shapegen-runtime",
            DependencyLocation::Local {
                path: "../rust/shapegen-runtime".to_string(),
            },
        );
        assert_eq!(
            local.to_toml_line(),
            r#"shapegen-runtime = { path = "../rust/shapegen-runtime" }"#
        );
    }

    #[test]
    fn test_merge_unions_features() {
        let plain = CargoDependency::crates_io("shapegen-runtime", "0.1");
        let gated = plain.with_feature("event-stream");
        let json = CargoDependency::crates_io("serde_json", "1");

        let merged = merge_dependencies([&plain, &json, &gated]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "shapegen-runtime");
        assert!(merged[0].features.contains("event-stream"));
        assert_eq!(merged[1].name, "serde_json");
    }
}
