//! Application stack presets.

use clap::ValueEnum;
use std::fmt;

/// Technology preset controlling which starter files are scaffolded and
/// which containers get built and smoke-tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stack {
    /// Python API service (FastAPI)
    Fastapi,
    /// Node.js backend service
    Nodejs,
    /// React frontend
    React,
    /// FastAPI backend plus React frontend
    Fullstack,
}

impl Stack {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stack::Fastapi => "fastapi",
            Stack::Nodejs => "nodejs",
            Stack::React => "react",
            Stack::Fullstack => "fullstack",
        }
    }

    pub fn has_backend(&self) -> bool {
        matches!(self, Stack::Fastapi | Stack::Nodejs | Stack::Fullstack)
    }

    pub fn has_frontend(&self) -> bool {
        matches!(self, Stack::React | Stack::Fullstack)
    }

    /// Compose service the smoke test runs against.
    pub fn test_service(&self) -> &'static str {
        match self {
            Stack::React => "frontend",
            _ => "backend",
        }
    }

    /// One-shot test command for `docker compose run --rm <service> ...`.
    pub fn test_command(&self) -> &'static [&'static str] {
        match self {
            Stack::Fastapi | Stack::Fullstack => &["pytest"],
            Stack::Nodejs | Stack::React => &["npm", "test"],
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
