//! Automation engines that actually execute workflows.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An external workflow-automation platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Low-code automation platform.
    N8n,
    /// Visual agent-flow builder.
    Langflow,
    /// LLM-ops platform.
    Langsmith,
}

impl Engine {
    /// Every engine, in the order the composer lists them.
    pub const ALL: [Engine; 3] = [Engine::N8n, Engine::Langflow, Engine::Langsmith];

    /// Returns the wire name of the engine.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::N8n => "n8n",
            Self::Langflow => "langflow",
            Self::Langsmith => "langsmith",
        }
    }

    /// Returns the CSS classes of the engine's badge.
    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::N8n => "bg-blue-100 text-blue-800",
            Self::Langflow => "bg-green-100 text-green-800",
            Self::Langsmith => "bg-purple-100 text-purple-800",
        }
    }

    /// Returns the display profile of the engine.
    #[must_use]
    pub const fn profile(&self) -> EngineProfile {
        match self {
            Self::N8n => EngineProfile {
                engine: Self::N8n,
                name: "n8n",
                description: "Low-code automation platform with visual workflow builder",
                url: "http://localhost:5678/workflow",
            },
            Self::Langflow => EngineProfile {
                engine: Self::Langflow,
                name: "Langflow",
                description: "Visual framework for building multi-agent and RAG applications",
                url: "http://localhost:7860/flow-builder",
            },
            Self::Langsmith => EngineProfile {
                engine: Self::Langsmith,
                name: "LangSmith",
                description: "Platform for building production-grade LLM applications",
                url: "https://smith.langchain.com/",
            },
        }
    }

    /// Whether the console configures triggers for this engine itself
    /// rather than linking out to the engine's own editor.
    #[must_use]
    pub const fn supports_triggers(&self) -> bool {
        matches!(self, Self::Langflow)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n8n" => Ok(Self::N8n),
            "langflow" => Ok(Self::Langflow),
            "langsmith" => Ok(Self::Langsmith),
            other => Err(CatalogError::UnknownEngine {
                value: other.to_string(),
            }),
        }
    }
}

/// How an engine is presented in the trigger composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineProfile {
    pub engine: Engine,
    pub name: &'static str,
    pub description: &'static str,
    /// Where the engine's own editor lives.
    pub url: &'static str,
}

impl EngineProfile {
    /// Returns the CSS classes of the engine's badge.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        self.engine.badge_class()
    }
}
