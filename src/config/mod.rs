//! Configuration management for rqc-step
//!
//! Settings are layered with figment: embedded defaults, user and repository
//! config files (TOML, JSON or YAML), an optional `--config` file, then the
//! environment. The pipeline's `SDK_CALLBACK_URL` and `KB_AUTH_TOKEN` are
//! honored alongside `RQC_STEP_<SECTION>__<KEY>` overrides.

pub mod core;
pub mod formats;

#[cfg(test)]
mod tests;

pub use core::{FilterSettings, ServiceSettings, Settings, StepConfig};
pub use formats::{ConfigFormat, FileProvider};
