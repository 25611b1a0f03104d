//! Git credential query input.
//!
//! Git streams the remote repository information to a credential helper as
//! `key=value` lines on standard input, terminated by a blank line:
//!
//! ```text
//! protocol=https
//! host=example.com:8080
//! path=org/repo.git
//! wwwauth[]=Basic realm="example"
//! ```
//!
//! Keys ending in `[]` are multi-valued; every other key keeps its last value.

use std::io::{BufRead, Write};

use indexmap::IndexMap;
use url::Url;

use crate::error::{GcmError, Result};

/// Immutable set of arguments from a Git credential query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputArguments {
    args: IndexMap<String, Vec<String>>,
}

impl InputArguments {
    /// Create input from single-valued pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let args = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), vec![v.into()]))
            .collect();
        Self { args }
    }

    /// Create input from multi-valued pairs.
    pub fn from_multi<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<String>,
    {
        let args = pairs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self { args }
    }

    /// Build the input Git would send for a remote URL.
    pub fn from_url(url: &Url) -> Self {
        let mut args: IndexMap<String, Vec<String>> = IndexMap::new();
        args.insert("protocol".to_string(), vec![url.scheme().to_string()]);

        if let Some(host) = url.host_str() {
            let host = match url.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            };
            args.insert("host".to_string(), vec![host]);
        }

        let path = url.path().trim_start_matches('/');
        if !path.is_empty() {
            args.insert("path".to_string(), vec![path.to_string()]);
        }

        if !url.username().is_empty() {
            args.insert("username".to_string(), vec![url.username().to_string()]);
        }

        Self { args }
    }

    /// Read a credential query in the Git credential-helper wire format.
    ///
    /// Reading stops at the first blank line or at end of input.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut args: IndexMap<String, Vec<String>> = IndexMap::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                break;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| GcmError::InvalidInput(format!("missing '=' in line '{}'", line)))?;

            if let Some(key) = key.strip_suffix("[]") {
                let values = args.entry(key.to_string()).or_default();
                // An empty array value resets the list
                if value.is_empty() {
                    values.clear();
                } else {
                    values.push(value.to_string());
                }
            } else {
                args.insert(key.to_string(), vec![value.to_string()]);
            }
        }

        Ok(Self { args })
    }

    /// Write the arguments in the Git credential-helper wire format.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        for (key, values) in &self.args {
            if values.len() == 1 && !is_multi_valued(key) {
                writeln!(writer, "{}={}", key, values[0])?;
            } else {
                for value in values {
                    writeln!(writer, "{}[]={}", key, value)?;
                }
            }
        }
        Ok(())
    }

    pub fn protocol(&self) -> Option<&str> {
        self.get("protocol")
    }

    pub fn host(&self) -> Option<&str> {
        self.get("host")
    }

    pub fn path(&self) -> Option<&str> {
        self.get("path")
    }

    pub fn username(&self) -> Option<&str> {
        self.get("username")
    }

    pub fn password(&self) -> Option<&str> {
        self.get("password")
    }

    pub fn wwwauth(&self) -> &[String] {
        self.get_all("wwwauth")
    }

    /// First value of an argument.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of an argument; empty when absent.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.args.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Split the `host` argument into hostname and optional port.
    ///
    /// Returns `None` when there is no host or the port is not a number.
    pub fn host_and_port(&self) -> Option<(&str, Option<u16>)> {
        let host = self.host()?;

        // Bracketed IPv6 literal, e.g. [::1]:8080
        let (name, rest) = if host.starts_with('[') {
            match host.find(']') {
                Some(end) => (&host[..=end], &host[end + 1..]),
                None => return None,
            }
        } else {
            match host.find(':') {
                Some(idx) => (&host[..idx], &host[idx..]),
                None => (host, ""),
            }
        };

        match rest.strip_prefix(':') {
            Some(port) => port.parse().ok().map(|port| (name, Some(port))),
            None if rest.is_empty() => Some((name, None)),
            None => None,
        }
    }

    /// Hostname without the port, if any.
    pub fn hostname(&self) -> Option<&str> {
        self.host_and_port().map(|(name, _)| name)
    }

    /// Reconstruct the remote URL from `protocol`, `host` and `path`.
    ///
    /// A query or fragment embedded in `path` is split off. The user name is
    /// only included when `include_user` is set. Returns `None` if protocol or
    /// host is missing or the result is not a valid URL.
    pub fn remote_uri(&self, include_user: bool) -> Option<Url> {
        let protocol = self.protocol()?;
        let host = self.host()?;

        let (name, port) = match self.host_and_port() {
            Some(parts) => parts,
            None => (host.split(':').next().unwrap_or(host), None),
        };

        let mut url = Url::parse(&format!("{}://{}", protocol, name)).ok()?;
        if port.is_some() {
            url.set_port(port).ok()?;
        }

        if include_user {
            if let Some(user) = self.username().filter(|u| !u.is_empty()) {
                url.set_username(user).ok()?;
            }
        }

        if let Some(path) = self.path() {
            let (rest, fragment) = match path.split_once('#') {
                Some((rest, fragment)) => (rest, Some(fragment)),
                None => (path, None),
            };
            let (path, query) = match rest.split_once('?') {
                Some((path, query)) => (path, Some(query)),
                None => (rest, None),
            };

            if path.starts_with('/') {
                url.set_path(path);
            } else {
                url.set_path(&format!("/{}", path));
            }
            url.set_query(query);
            url.set_fragment(fragment);
        }

        Some(url)
    }
}

fn is_multi_valued(key: &str) -> bool {
    key == "wwwauth"
}
