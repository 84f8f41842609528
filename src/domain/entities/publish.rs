//! Publish state machine
//!
//! A create-path publish walks these stages in order. Progress is recorded
//! after every stage so that a failed publish can later resume from the last
//! completed stage instead of starting over.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ComputeArn, GatewayId, HttpMethod, NodeId};

/// Completed stage of a publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStage {
    ComputeCreated,
    GatewayEnsured,
    NodeEnsured,
    BindingEnsured,
    WiringSet,
}

impl PublishStage {
    pub fn next(self) -> Option<Self> {
        match self {
            PublishStage::ComputeCreated => Some(PublishStage::GatewayEnsured),
            PublishStage::GatewayEnsured => Some(PublishStage::NodeEnsured),
            PublishStage::NodeEnsured => Some(PublishStage::BindingEnsured),
            PublishStage::BindingEnsured => Some(PublishStage::WiringSet),
            PublishStage::WiringSet => None,
        }
    }

    pub fn is_complete(self) -> bool {
        self == PublishStage::WiringSet
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStage::ComputeCreated => "compute_created",
            PublishStage::GatewayEnsured => "gateway_ensured",
            PublishStage::NodeEnsured => "node_ensured",
            PublishStage::BindingEnsured => "binding_ensured",
            PublishStage::WiringSet => "wiring_set",
        }
    }
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of one function's publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishProgress {
    pub function: String,
    pub method: HttpMethod,
    pub arn: ComputeArn,
    pub stage: PublishStage,
    #[serde(default)]
    pub gateway: Option<GatewayId>,
    #[serde(default)]
    pub node: Option<NodeId>,
    pub updated_at: DateTime<Utc>,
}

impl PublishProgress {
    /// Progress right after the compute unit was created
    pub fn compute_created(function: impl Into<String>, method: HttpMethod, arn: ComputeArn) -> Self {
        Self {
            function: function.into(),
            method,
            arn,
            stage: PublishStage::ComputeCreated,
            gateway: None,
            node: None,
            updated_at: Utc::now(),
        }
    }

    pub fn advance(&mut self, stage: PublishStage) {
        self.stage = stage;
        self.updated_at = Utc::now();
    }

    pub fn is_complete(&self) -> bool {
        self.stage.is_complete()
    }
}

/// Which branch the orchestrator took for a function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishPath {
    /// Compute unit existed: replace code only
    Update,
    /// Compute unit existed and an unfinished publish was journaled
    Resume { from: PublishStage },
    /// Compute unit absent: create it and its routing
    Create,
}

impl fmt::Display for PublishPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishPath::Update => f.write_str("update"),
            PublishPath::Resume { from } => write!(f, "resume from {}", from),
            PublishPath::Create => f.write_str("create"),
        }
    }
}

/// Terminal success of a function publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Code payload replaced; routing untouched
    Updated { arn: ComputeArn },
    /// Compute unit and routing created
    Created { arn: ComputeArn, url: Option<String> },
    /// Code replaced and an interrupted routing publish completed
    Resumed {
        arn: ComputeArn,
        url: Option<String>,
        from: PublishStage,
    },
}

impl PublishOutcome {
    pub fn arn(&self) -> &ComputeArn {
        match self {
            PublishOutcome::Updated { arn }
            | PublishOutcome::Created { arn, .. }
            | PublishOutcome::Resumed { arn, .. } => arn,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            PublishOutcome::Updated { .. } => None,
            PublishOutcome::Created { url, .. } | PublishOutcome::Resumed { url, .. } => {
                url.as_deref()
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PublishOutcome::Updated { .. } => "updated",
            PublishOutcome::Created { .. } => "created",
            PublishOutcome::Resumed { .. } => "resumed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_in_order() {
        let mut stage = PublishStage::ComputeCreated;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            seen.push(next);
            stage = next;
        }
        assert_eq!(seen.len(), 5);
        assert!(stage.is_complete());
    }

    #[test]
    fn advance_updates_stage() {
        let mut progress =
            PublishProgress::compute_created("orders", HttpMethod::Get, ComputeArn::new("arn:1"));
        assert_eq!(progress.stage, PublishStage::ComputeCreated);
        progress.advance(PublishStage::GatewayEnsured);
        assert_eq!(progress.stage, PublishStage::GatewayEnsured);
        assert!(!progress.is_complete());
    }

    #[test]
    fn outcome_accessors() {
        let outcome = PublishOutcome::Created {
            arn: ComputeArn::new("arn:1"),
            url: Some("https://x".to_string()),
        };
        assert_eq!(outcome.label(), "created");
        assert_eq!(outcome.url(), Some("https://x"));
        assert_eq!(outcome.arn().as_str(), "arn:1");

        let updated = PublishOutcome::Updated {
            arn: ComputeArn::new("arn:1"),
        };
        assert_eq!(updated.url(), None);
    }
}
