//! HTTP probing used to detect which hosting software serves a remote.
//!
//! Detection only needs the response headers, so the probe issues a single
//! `HEAD` request with a caller-supplied timeout and never retries.

mod probe;

pub use probe::{HttpProbe, ProbeClientConfig, ProbeError, ProbeResponse, ReqwestProbe};
