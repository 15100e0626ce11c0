//! Build servers that receive published artifacts.

pub mod teamcity;

pub use teamcity::{running_under_teamcity, TeamCityBuildServer};

use anyhow::Result;

use crate::core::{CiDocument, ConfigError};
use crate::util::config::CiConfig;

/// A CI server that artifacts can be published to.
pub trait BuildServer {
    /// Display name of the server type.
    fn name(&self) -> &str;

    /// Publish artifact paths (or patterns) for the current build.
    fn publish_artifacts(&self, paths: &[String]) -> Result<()>;
}

/// A build server that ignores publish requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBuildServer;

impl BuildServer for NullBuildServer {
    fn name(&self) -> &str {
        "none"
    }

    fn publish_artifacts(&self, paths: &[String]) -> Result<()> {
        tracing::debug!("no build server configured, not publishing {} artifact(s)", paths.len());
        Ok(())
    }
}

/// Pick the build server for this invocation.
///
/// The project file's `ci` section wins, then the user config, then
/// detection of a TeamCity agent.
pub fn select_build_server(
    project: Option<&CiDocument>,
    config: &CiConfig,
    under_teamcity: bool,
) -> Result<Box<dyn BuildServer>, ConfigError> {
    if let Some(doc) = project {
        return match doc.kind.to_lowercase().as_str() {
            "teamcity" => Ok(Box::new(
                TeamCityBuildServer::from_config(doc)?.with_active(under_teamcity),
            )),
            other => Err(ConfigError::InvalidCi {
                message: format!("unknown build server type `{}`", other),
            }),
        };
    }

    match config.server.as_deref().map(str::to_lowercase).as_deref() {
        Some("teamcity") => Ok(Box::new(TeamCityBuildServer::agent().with_active(under_teamcity))),
        Some("none") => Ok(Box::new(NullBuildServer)),
        Some(other) => Err(ConfigError::InvalidCi {
            message: format!("unknown build server type `{}`", other),
        }),
        None if under_teamcity => Ok(Box::new(TeamCityBuildServer::agent().with_active(true))),
        None => Ok(Box::new(NullBuildServer)),
    }
}
