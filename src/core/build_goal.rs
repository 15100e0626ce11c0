//! A named goal with one build per architecture.

use std::collections::BTreeMap;

use crate::core::build_spec::{BuildSpec, DEFAULT_BUILD_TYPE};
use crate::core::errors::{ConfigError, ResolveError};
use crate::core::merge::{
    merge_artifacts, merge_build_type, merge_description, merge_target, merge_vars,
};
use crate::core::project::GoalDocument;

/// A build goal: goal-level defaults plus the per-arch specs derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildGoal {
    name: String,
    description: String,
    default_type: String,
    default_vars: BTreeMap<String, String>,
    default_target: String,
    default_artifacts: Vec<String>,
    builds: BTreeMap<String, BuildSpec>,
}

impl BuildGoal {
    /// Build a goal from its project file entry, merging every build onto
    /// the goal defaults.
    pub fn from_document(doc: &GoalDocument) -> Result<Self, ConfigError> {
        let description = doc.description.clone().unwrap_or_default();
        let default_type = doc
            .build_type
            .clone()
            .unwrap_or_else(|| DEFAULT_BUILD_TYPE.to_string());
        let default_vars = doc.build_vars.clone().unwrap_or_default();
        let default_target = doc.build_goal.clone().unwrap_or_else(|| doc.name.clone());
        let default_artifacts = doc.artifacts.clone().unwrap_or_default();

        if doc.builds.is_empty() {
            return Err(ConfigError::EmptyGoal {
                goal: doc.name.clone(),
            });
        }

        let mut builds = BTreeMap::new();
        for b in &doc.builds {
            let spec = BuildSpec::new(merge_target(b.build_goal.as_ref(), &default_target))
                .with_build_type(merge_build_type(b.build_type.as_ref(), &default_type))
                .with_vars(merge_vars(b.build_vars.as_ref(), &default_vars))
                .with_description(merge_description(b.description.as_ref(), &description))
                .with_arch(b.arch.clone())
                .with_script(b.script.clone())
                .with_artifacts(merge_artifacts(b.artifacts.as_ref(), &default_artifacts));

            if builds.insert(b.arch.clone(), spec).is_some() {
                return Err(ConfigError::DuplicateArch {
                    goal: doc.name.clone(),
                    arch: b.arch.clone(),
                });
            }
        }

        Ok(BuildGoal {
            name: doc.name.clone(),
            description,
            default_type,
            default_vars,
            default_target,
            default_artifacts,
            builds,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    pub fn default_vars(&self) -> &BTreeMap<String, String> {
        &self.default_vars
    }

    /// The goal-level native build target.
    pub fn target(&self) -> &str {
        &self.default_target
    }

    pub fn default_artifacts(&self) -> &[String] {
        &self.default_artifacts
    }

    /// Builds keyed by architecture.
    pub fn builds(&self) -> &BTreeMap<String, BuildSpec> {
        &self.builds
    }

    /// Architectures in sorted order.
    pub fn arches(&self) -> Vec<String> {
        self.builds.keys().cloned().collect()
    }

    /// Look up the build for `arch`.
    ///
    /// With no arch, a goal that has exactly one build returns it; otherwise
    /// the request is ambiguous.
    pub fn get_build(&self, arch: Option<&str>) -> Result<&BuildSpec, ResolveError> {
        match arch {
            Some(arch) => self.builds.get(arch).ok_or_else(|| ResolveError::ArchNotFound {
                goal: self.name.clone(),
                arch: arch.to_string(),
                available: self.arches(),
            }),
            None => {
                let mut specs = self.builds.values();
                match (specs.next(), specs.next()) {
                    (Some(only), None) => Ok(only),
                    _ => Err(ResolveError::AmbiguousArch {
                        goal: self.name.clone(),
                        arches: self.arches(),
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::BuildDocument;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn build(arch: &str) -> BuildDocument {
        BuildDocument {
            arch: arch.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let doc = GoalDocument {
            name: "package".to_string(),
            builds: vec![build("host")],
            ..Default::default()
        };
        let goal = BuildGoal::from_document(&doc).unwrap();
        let spec = &goal.builds()["host"];

        assert_eq!(spec.goal(), "package");
        assert_eq!(spec.build_type(), "minSizeRel");
        assert!(spec.vars().is_empty());
        assert_eq!(spec.arch(), "host");
        assert!(spec.script().is_none());
    }

    #[test]
    fn test_goal_level_values_inherited() {
        let doc = GoalDocument {
            name: "package".to_string(),
            description: Some("ship it".to_string()),
            build_type: Some("release".to_string()),
            build_vars: Some(vars(&[("X", "1")])),
            build_goal: Some("dist".to_string()),
            artifacts: Some(vec!["build/*.zip".to_string()]),
            builds: vec![build("host")],
        };
        let goal = BuildGoal::from_document(&doc).unwrap();
        let spec = &goal.builds()["host"];

        assert_eq!(goal.target(), "dist");
        assert_eq!(spec.goal(), "dist");
        assert_eq!(spec.build_type(), "release");
        assert_eq!(spec.vars(), &vars(&[("X", "1")]));
        assert_eq!(spec.description(), "ship it");
        assert_eq!(spec.artifacts(), ["build/*.zip".to_string()]);
    }

    #[test]
    fn test_build_vars_replace_goal_vars() {
        let mut arm = build("arm32-linux-gnueabihf");
        arm.build_vars = Some(vars(&[("Y", "2")]));

        let doc = GoalDocument {
            name: "build".to_string(),
            build_vars: Some(vars(&[("X", "1")])),
            builds: vec![arm, build("x86_64-linux-gcc")],
            ..Default::default()
        };
        let goal = BuildGoal::from_document(&doc).unwrap();

        assert_eq!(goal.builds()["arm32-linux-gnueabihf"].vars(), &vars(&[("Y", "2")]));
        assert_eq!(goal.builds()["x86_64-linux-gcc"].vars(), &vars(&[("X", "1")]));
    }

    #[test]
    fn test_per_field_overrides_are_independent() {
        let mut host = build("host");
        host.build_type = Some("debug".to_string());
        host.script = Some(vec!["./build.sh".to_string()]);

        let doc = GoalDocument {
            name: "build".to_string(),
            build_type: Some("release".to_string()),
            artifacts: Some(vec!["a".to_string()]),
            builds: vec![host],
            ..Default::default()
        };
        let goal = BuildGoal::from_document(&doc).unwrap();
        let spec = &goal.builds()["host"];

        assert_eq!(spec.build_type(), "debug");
        assert_eq!(spec.artifacts(), ["a".to_string()]);
        assert_eq!(spec.script(), Some(&["./build.sh".to_string()][..]));
    }

    #[test]
    fn test_duplicate_arch_rejected() {
        let doc = GoalDocument {
            name: "build".to_string(),
            builds: vec![build("host"), build("host")],
            ..Default::default()
        };
        assert!(matches!(
            BuildGoal::from_document(&doc),
            Err(ConfigError::DuplicateArch { .. })
        ));
    }

    #[test]
    fn test_empty_goal_rejected() {
        let doc = GoalDocument {
            name: "build".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            BuildGoal::from_document(&doc),
            Err(ConfigError::EmptyGoal { .. })
        ));
    }

    #[test]
    fn test_get_build() {
        let doc = GoalDocument {
            name: "build".to_string(),
            builds: vec![build("b-arch"), build("a-arch")],
            ..Default::default()
        };
        let goal = BuildGoal::from_document(&doc).unwrap();

        assert_eq!(goal.get_build(Some("a-arch")).unwrap().arch(), "a-arch");
        assert!(matches!(
            goal.get_build(Some("c-arch")),
            Err(ResolveError::ArchNotFound { .. })
        ));
        match goal.get_build(None) {
            Err(ResolveError::AmbiguousArch { arches, .. }) => {
                assert_eq!(arches, vec!["a-arch".to_string(), "b-arch".to_string()]);
            }
            other => panic!("expected ambiguous arch, got {:?}", other),
        }
    }
}
