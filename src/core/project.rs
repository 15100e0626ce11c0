//! The `zazu.yaml` project file.
//!
//! The project file lists components, each with named goals, each with one
//! build per architecture:
//!
//! ```yaml
//! components:
//!   - name: widget
//!     goals:
//!       - name: package
//!         buildType: release
//!         buildVars: {WITH_DOCS: 1}
//!         artifacts: [build/*.tar.gz]
//!         builds:
//!           - arch: x86_64-linux-gcc
//!           - arch: arm32-linux-gnueabihf
//!             buildVars: {WITH_DOCS: 0}
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::component::ComponentConfiguration;
use crate::core::errors::ConfigError;

/// Canonical project file name.
pub const PROJECT_FILE_NAME: &str = "zazu.yaml";

/// Accepted alternative spelling.
pub const PROJECT_FILE_ALIAS: &str = "zazu.yml";

/// Top level of the project file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectDocument {
    #[serde(default)]
    pub components: Vec<ComponentDocument>,

    #[serde(default)]
    pub ci: Option<CiDocument>,
}

/// One component as written in the project file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentDocument {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub goals: Vec<GoalDocument>,
}

/// One goal as written in the project file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDocument {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub build_type: Option<String>,

    #[serde(default, deserialize_with = "string_map")]
    pub build_vars: Option<BTreeMap<String, String>>,

    /// Native build target; defaults to the goal name
    #[serde(default)]
    pub build_goal: Option<String>,

    #[serde(default)]
    pub artifacts: Option<Vec<String>>,

    #[serde(default)]
    pub builds: Vec<BuildDocument>,
}

/// A per-architecture build entry; every field but `arch` overrides the goal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDocument {
    pub arch: String,

    #[serde(default)]
    pub build_type: Option<String>,

    #[serde(default, deserialize_with = "string_map")]
    pub build_vars: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub build_goal: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub script: Option<Vec<String>>,

    #[serde(default)]
    pub artifacts: Option<Vec<String>>,
}

/// Build server settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiDocument {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub url: Option<String>,
}

/// Scalar values accepted for build variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum VarValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Text(s) => f.write_str(s),
            VarValue::Integer(i) => write!(f, "{}", i),
            VarValue::Float(x) => write!(f, "{}", x),
            VarValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

fn string_map<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, VarValue>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|map| map.into_iter().map(|(k, v)| (k, v.to_string())).collect()))
}

/// The loaded project: its components plus build server settings.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    path: PathBuf,
    components: Vec<ComponentConfiguration>,
    ci: Option<CiDocument>,
}

impl ProjectConfig {
    /// Load and validate a project file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse project file contents; `path` is used for error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let document: ProjectDocument =
            serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if document.components.is_empty() {
            return Err(ConfigError::NoComponents {
                path: path.to_path_buf(),
            });
        }

        let components = document
            .components
            .iter()
            .map(ComponentConfiguration::from_document)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "loaded {} component(s) from {}",
            components.len(),
            path.display()
        );

        Ok(ProjectConfig {
            path: path.to_path_buf(),
            components,
            ci: document.ci,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn components(&self) -> &[ComponentConfiguration] {
        &self.components
    }

    pub fn ci(&self) -> Option<&CiDocument> {
        self.ci.as_ref()
    }

    /// Select a component by name, or the first one when no name is given.
    pub fn component(&self, name: Option<&str>) -> Result<&ComponentConfiguration, ConfigError> {
        match name {
            None => self.components.first().ok_or_else(|| ConfigError::NoComponents {
                path: self.path.clone(),
            }),
            Some(name) => self
                .components
                .iter()
                .find(|c| c.name() == name)
                .ok_or_else(|| ConfigError::ComponentNotFound {
                    name: name.to_string(),
                    available: self.components.iter().map(|c| c.name().to_string()).collect(),
                }),
        }
    }
}

/// Locate the project file in `dir`.
///
/// Errors if neither spelling exists, or if both do.
pub fn find_project_file(dir: &Path) -> Result<PathBuf, ConfigError> {
    let primary = dir.join(PROJECT_FILE_NAME);
    let alias = dir.join(PROJECT_FILE_ALIAS);

    match (primary.exists(), alias.exists()) {
        (true, true) => Err(ConfigError::Ambiguous { primary, alias }),
        (true, false) => Ok(primary),
        (false, true) => Ok(alias),
        (false, false) => Err(ConfigError::NotFound {
            dir: dir.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::test_support::fixtures::TWO_ARCH_PROJECT;

    #[test]
    fn test_parse_project() {
        let project = ProjectConfig::parse(TWO_ARCH_PROJECT, Path::new("zazu.yaml")).unwrap();
        assert_eq!(project.components().len(), 1);

        let component = project.component(None).unwrap();
        assert_eq!(component.name(), "widget");
        assert!(component.goals().contains_key("build"));

        let ci = project.ci().unwrap();
        assert_eq!(ci.kind, "teamcity");
    }

    #[test]
    fn test_scalar_vars_become_strings() {
        let yaml = r#"
components:
  - name: c
    goals:
      - name: g
        buildVars: {COUNT: 3, RATIO: 0.5, ENABLED: true, NAME: text}
        builds:
          - arch: host
"#;
        let project = ProjectConfig::parse(yaml, Path::new("zazu.yaml")).unwrap();
        let spec = project.component(None).unwrap().resolve("g", None, None).unwrap();
        assert_eq!(spec.vars()["COUNT"], "3");
        assert_eq!(spec.vars()["RATIO"], "0.5");
        assert_eq!(spec.vars()["ENABLED"], "true");
        assert_eq!(spec.vars()["NAME"], "text");
    }

    #[test]
    fn test_no_components_is_error() {
        let err = ProjectConfig::parse("components: []\n", Path::new("zazu.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NoComponents { .. }));
    }

    #[test]
    fn test_unparsable_document() {
        let err = ProjectConfig::parse("components: [", Path::new("zazu.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("unable to parse config file"));
    }

    #[test]
    fn test_component_lookup() {
        let project = ProjectConfig::parse(TWO_ARCH_PROJECT, Path::new("zazu.yaml")).unwrap();
        assert!(project.component(Some("widget")).is_ok());
        let err = project.component(Some("gadget")).unwrap_err();
        assert!(matches!(err, ConfigError::ComponentNotFound { .. }));
    }

    #[test]
    fn test_find_project_file() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            find_project_file(tmp.path()),
            Err(ConfigError::NotFound { .. })
        ));

        std::fs::write(tmp.path().join(PROJECT_FILE_ALIAS), "components: []\n").unwrap();
        assert_eq!(
            find_project_file(tmp.path()).unwrap(),
            tmp.path().join(PROJECT_FILE_ALIAS)
        );

        std::fs::write(tmp.path().join(PROJECT_FILE_NAME), "components: []\n").unwrap();
        assert!(matches!(
            find_project_file(tmp.path()),
            Err(ConfigError::Ambiguous { .. })
        ));
    }
}
