//! Configuration scopes for a remote URL.
//!
//! A scope is a URL (or URL prefix) used as the subsection of a Git
//! configuration key, e.g. `credential.https://example.com/org.provider`.
//! Scopes are listed from the most specific to the least specific:
//!
//! ```text
//! http://buzz.foo.example.com/bar/baz
//! http://buzz.foo.example.com/bar
//! http://buzz.foo.example.com
//! http://foo.example.com
//! http://example.com
//! ```

use url::{Host, Url};

/// Enumerate the Git configuration scopes of `url`, most specific first.
///
/// Query and fragment are ignored and a single trailing `/` is dropped. Path
/// segments are removed right-to-left down to the bare `scheme://host[:port]`,
/// then sub-domains are removed left-to-right until two labels remain. The
/// port only appears on the path-carrying and bare-authority forms.
pub fn git_configuration_scopes(url: &Url) -> Vec<String> {
    let mut scopes = Vec::new();

    let scheme = url.scheme();
    let host = url.host_str().unwrap_or_default();
    let authority = match url.port() {
        Some(port) => format!("{}://{}:{}", scheme, host, port),
        None => format!("{}://{}", scheme, host),
    };

    let path = url.path();
    let path = path.strip_prefix('/').unwrap_or(path);
    let mut current = path.strip_suffix('/').unwrap_or(path);

    while !current.is_empty() {
        scopes.push(format!("{}/{}", authority, current));
        current = match current.rfind('/') {
            Some(idx) => &current[..idx],
            None => "",
        };
    }

    scopes.push(authority);

    // Only DNS names are narrowed; an IP address has no parent domain.
    if let Some(Host::Domain(domain)) = url.host() {
        let mut labels: Vec<&str> = domain.split('.').collect();
        while labels.len() > 2 {
            labels.remove(0);
            scopes.push(format!("{}://{}", scheme, labels.join(".")));
        }
    }

    scopes
}
