use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Process architecture as it appears in release asset file names.
///
/// Serialized as its lowercase token and read back through [`FromStr`], so
/// aliases such as `amd64` or `AArch64` are accepted everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Architecture {
    X64,
    Arm64,
    X86,
    Arm,
    Other(String),
}

impl Architecture {
    /// Architecture of the running process.
    pub fn current() -> Self {
        Self::from_target(std::env::consts::ARCH)
    }

    /// Map a Rust target architecture name (`x86_64`, `aarch64`, ...).
    pub fn from_target(arch: &str) -> Self {
        match arch {
            "x86_64" => Self::X64,
            "aarch64" => Self::Arm64,
            "x86" => Self::X86,
            "arm" => Self::Arm,
            other => Self::Other(other.to_string()),
        }
    }

    /// Token searched for (case-insensitively) in asset file names.
    pub fn token(&self) -> &str {
        match self {
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
            Self::X86 => "x86",
            Self::Arm => "arm",
            Self::Other(name) => name,
        }
    }

    /// The other architecture a single-artifact release may be built for.
    ///
    /// Only x64 and arm64 are paired; everything else has no opposite.
    pub fn opposite(&self) -> Option<Self> {
        match self {
            Self::X64 => Some(Self::Arm64),
            Self::Arm64 => Some(Self::X64),
            _ => None,
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Architecture {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Ok(match lower.as_str() {
            "x64" | "amd64" | "x86_64" => Self::X64,
            "arm64" | "aarch64" => Self::Arm64,
            "x86" | "i686" => Self::X86,
            "arm" => Self::Arm,
            _ => Self::Other(lower),
        })
    }
}

impl From<String> for Architecture {
    fn from(name: String) -> Self {
        let Ok(arch) = name.parse::<Self>();
        arch
    }
}

impl From<Architecture> for String {
    fn from(arch: Architecture) -> Self {
        arch.token().to_string()
    }
}

/// Coarse platform classification of an asset, derived from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Arm64,
    X64,
    Universal,
}

impl Bucket {
    /// Arm64 wins over X64 when a name carries both tokens.
    pub fn of(file_name: &str) -> Self {
        let lower = file_name.to_lowercase();
        if lower.contains("arm64") {
            Self::Arm64
        } else if lower.contains("x64") {
            Self::X64
        } else {
            Self::Universal
        }
    }
}
