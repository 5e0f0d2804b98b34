use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use super::errors::ConfError;

/// Member is how to reach one instance of a quorum.
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Member {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// InstanceConf is the configuration of one skinny daemon.
///
/// ```yaml
/// name: london
/// increment: 1
/// timeout: 500ms
/// listen: 0.0.0.0:9000
/// peers:
///   - name: oregon
///     address: oregon.skinny.example:9000
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InstanceConf {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub increment: u64,
    #[serde(default, deserialize_with = "de_duration")]
    pub timeout: Duration,
    #[serde(default)]
    pub listen: String,
    #[serde(default)]
    pub peers: Vec<Member>,
}

/// QuorumConf describes a whole quorum for the control tool.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuorumConf {
    #[serde(default, deserialize_with = "de_duration")]
    pub timeout: Duration,
    #[serde(default)]
    pub instances: Vec<Member>,
}

impl InstanceConf {
    /// from_file reads an instance conf yaml from a local file and checks it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<InstanceConf, ConfError> {
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    /// check verifies the increment, the timeout, and that this instance and its peers are
    /// all distinct.
    pub fn check(&self) -> Result<(), ConfError> {
        if self.increment < 1 {
            return Err(ConfError::InvalidIncrement);
        }
        check_timeout(self.timeout)?;

        let mut members = self.peers.clone();
        members.push(Member {
            name: self.name.clone(),
            address: self.listen.clone(),
        });
        check_members(&members)
    }
}

impl FromStr for InstanceConf {
    type Err = ConfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let conf: InstanceConf = serde_yaml::from_str(s)?;
        conf.check()?;
        Ok(conf)
    }
}

impl QuorumConf {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<QuorumConf, ConfError> {
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    pub fn check(&self) -> Result<(), ConfError> {
        check_timeout(self.timeout)?;
        check_members(&self.instances)
    }

    /// default_instance is the first instance listed.
    pub fn default_instance(&self) -> Option<&Member> {
        self.instances.first()
    }

    pub fn get(&self, name: &str) -> Option<&Member> {
        self.instances.iter().find(|m| m.name == name)
    }
}

impl FromStr for QuorumConf {
    type Err = ConfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let conf: QuorumConf = serde_yaml::from_str(s)?;
        conf.check()?;
        Ok(conf)
    }
}

fn check_timeout(timeout: Duration) -> Result<(), ConfError> {
    if timeout == Duration::from_secs(0) {
        return Err(ConfError::InvalidTimeout);
    }
    Ok(())
}

/// check_members requires at least one member, and a non-empty, unique name and address for
/// each of them.
fn check_members(members: &[Member]) -> Result<(), ConfError> {
    if members.is_empty() {
        return Err(ConfError::NoInstance);
    }

    let mut names = HashSet::new();
    let mut addrs = HashSet::new();

    for m in members.iter() {
        if m.name.is_empty() || m.address.is_empty() {
            return Err(ConfError::InvalidInstanceDefinition);
        }
        if !names.insert(m.name.as_str()) {
            return Err(ConfError::DuplicateInstance(m.name.clone()));
        }
        if !addrs.insert(m.address.as_str()) {
            return Err(ConfError::DuplicateInstance(m.address.clone()));
        }
    }
    Ok(())
}

/// parse_duration parses a non-negative integer with a unit suffix: `ms`, `s`, `m` or `h`,
/// e.g. `500ms` or `2s`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let pos = s
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("missing unit in duration: {:?}", s))?;
    let (num, unit) = s.split_at(pos);

    let n: u64 = num
        .parse()
        .map_err(|e| format!("bad number in duration {:?}: {}", s, e))?;

    match unit {
        "ms" => Ok(Duration::from_millis(n)),
        "s" => Ok(Duration::from_secs(n)),
        "m" => Ok(Duration::from_secs(n * 60)),
        "h" => Ok(Duration::from_secs(n * 3600)),
        _ => Err(format!("unknown unit in duration: {:?}", s)),
    }
}

fn de_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}
