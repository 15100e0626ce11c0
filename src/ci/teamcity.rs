//! TeamCity integration.
//!
//! Artifacts are published through service messages written to stdout,
//! which the TeamCity agent picks up from the build log.

use std::io::{self, Write};

use anyhow::{Context, Result};
use url::Url;

use crate::ci::BuildServer;
use crate::core::{CiDocument, ConfigError};

/// Environment variable TeamCity sets on every agent build.
pub const TEAMCITY_VERSION_VAR: &str = "TEAMCITY_VERSION";

/// Whether this process runs as part of a TeamCity build.
pub fn running_under_teamcity() -> bool {
    std::env::var_os(TEAMCITY_VERSION_VAR).is_some()
}

/// Port assumed when the URL names none.
const DEFAULT_PORT: u16 = 80;

/// Where the TeamCity server lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

/// TeamCity build server.
#[derive(Debug, Clone)]
pub struct TeamCityBuildServer {
    address: Option<ServerAddress>,
    active: bool,
}

impl TeamCityBuildServer {
    /// A server known only through the agent environment.
    pub fn agent() -> Self {
        TeamCityBuildServer {
            address: None,
            active: running_under_teamcity(),
        }
    }

    /// Build from the project file `ci` section; a `url` is required.
    ///
    /// Publishing goes through the agent's build log, so the address only
    /// validates the section and is reported when publishing. A port written
    /// in the URL is kept even when it is the scheme default.
    pub fn from_config(doc: &CiDocument) -> Result<Self, ConfigError> {
        let url = doc.url.as_deref().ok_or_else(|| ConfigError::InvalidCi {
            message: "TeamCity config requires a \"url\" field".to_string(),
        })?;

        let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidCi {
            message: format!("unable to parse TeamCity URL \"{}\": {}", url, e),
        })?;
        let host = parsed.host_str().ok_or_else(|| ConfigError::InvalidCi {
            message: format!("unable to parse TeamCity URL \"{}\"", url),
        })?;

        Ok(TeamCityBuildServer {
            address: Some(ServerAddress {
                protocol: parsed.scheme().to_string(),
                host: host.to_string(),
                port: parsed
                    .port()
                    .or_else(|| explicit_port(url))
                    .unwrap_or(DEFAULT_PORT),
            }),
            active: running_under_teamcity(),
        })
    }

    /// Force publishing on or off regardless of the environment.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn address(&self) -> Option<&ServerAddress> {
        self.address.as_ref()
    }

    /// Write one publish message per artifact.
    pub fn publish_to<W: Write>(&self, out: &mut W, paths: &[String]) -> io::Result<()> {
        if !self.active {
            tracing::debug!("not running under TeamCity, skipping artifact publishing");
            return Ok(());
        }
        for path in paths {
            writeln!(out, "##teamcity[publishArtifacts '{}']", escape_value(path))?;
        }
        out.flush()
    }
}

impl BuildServer for TeamCityBuildServer {
    fn name(&self) -> &str {
        "TeamCity"
    }

    fn publish_artifacts(&self, paths: &[String]) -> Result<()> {
        if let Some(addr) = &self.address {
            tracing::debug!(
                "publishing {} artifact(s) to {}://{}:{}",
                paths.len(),
                addr.protocol,
                addr.host,
                addr.port
            );
        }
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.publish_to(&mut out, paths)
            .context("failed to write TeamCity service message")
    }
}

/// The port spelled in the authority of `url`, if any.
///
/// `Url::port` drops a port equal to the scheme default, so it is read from
/// the text instead.
fn explicit_port(url: &str) -> Option<u16> {
    let rest = url.split_once("://")?.1;
    let authority = rest.split(['/', '?', '#']).next()?;
    let (_, port) = authority.rsplit_once(':')?;
    port.parse().ok()
}

/// Escape a value for a service message attribute.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '|' => out.push_str("||"),
            '\'' => out.push_str("|'"),
            '\n' => out.push_str("|n"),
            '\r' => out.push_str("|r"),
            '[' => out.push_str("|["),
            ']' => out.push_str("|]"),
            c => out.push(c),
        }
    }
    out
}
