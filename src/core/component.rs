//! A component and the resolution of build requests against it.

use std::collections::BTreeMap;

use crate::core::build_goal::BuildGoal;
use crate::core::build_spec::BuildSpec;
use crate::core::errors::{ConfigError, ResolveError};
use crate::core::project::ComponentDocument;

/// One component of the project and its goals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentConfiguration {
    name: String,
    description: String,
    goals: BTreeMap<String, BuildGoal>,
}

impl ComponentConfiguration {
    pub fn from_document(doc: &ComponentDocument) -> Result<Self, ConfigError> {
        let mut goals = BTreeMap::new();
        for g in &doc.goals {
            let goal = BuildGoal::from_document(g)?;
            if goals.insert(g.name.clone(), goal).is_some() {
                return Err(ConfigError::DuplicateGoal {
                    component: doc.name.clone(),
                    goal: g.name.clone(),
                });
            }
        }

        Ok(ComponentConfiguration {
            name: doc.name.clone(),
            description: doc.description.clone().unwrap_or_default(),
            goals,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn goals(&self) -> &BTreeMap<String, BuildGoal> {
        &self.goals
    }

    /// Resolve a goal, optional arch and optional type into one build spec.
    ///
    /// A supplied `build_type` replaces whatever type the build configured.
    pub fn resolve(
        &self,
        goal: &str,
        arch: Option<&str>,
        build_type: Option<&str>,
    ) -> Result<BuildSpec, ResolveError> {
        let build_goal = self.goals.get(goal).ok_or_else(|| ResolveError::GoalNotFound {
            goal: goal.to_string(),
            available: self.goals.keys().cloned().collect(),
        })?;

        let spec = build_goal.get_build(arch)?.clone();

        Ok(match build_type {
            Some(t) => spec.with_build_type(t),
            None => spec,
        })
    }
}
