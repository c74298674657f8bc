use std::ops::RangeInclusive;

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;

pub const DEFAULT_PORT: u16 = 3000;

/// Ids the guarded variant refuses to delete.
pub const PROTECTED_IDS: RangeInclusive<i32> = 1..=7;

/// Which flavour of the API to serve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ApiVariant {
    /// Plain CRUD.
    Basic,
    /// CRUD plus delete protection for [`PROTECTED_IDS`] and the `GET /` description.
    #[default]
    Guarded,
}

impl ApiVariant {
    pub fn is_protected(self, id: i32) -> bool {
        self == ApiVariant::Guarded && PROTECTED_IDS.contains(&id)
    }

    pub fn serves_docs(self) -> bool {
        self == ApiVariant::Guarded
    }

    fn parse(raw: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(raw.trim(), true)
            .map_err(|_| anyhow!("invalid API_VARIANT {raw:?} (use basic|guarded)"))
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub variant: ApiVariant,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let variant = match std::env::var("API_VARIANT") {
            Ok(raw) if !raw.trim().is_empty() => ApiVariant::parse(&raw)?,
            _ => ApiVariant::default(),
        };
        Ok(Self { port, variant })
    }
}

/// Unset or blank falls back to [`DEFAULT_PORT`].
fn parse_port(raw: Option<&str>) -> Result<u16> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse::<u16>()
            .with_context(|| format!("invalid PORT {value:?}")),
    }
}
