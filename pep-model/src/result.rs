use thiserror::Error;

use crate::obligation::Obligation;
use crate::status::Status;

/// The outcome of evaluating policy against one resource.
///
/// Numeric wire encoding: Deny=0, Permit=1, Indeterminate=2,
/// NotApplicable=3 (`…xacml.ctx.Result`'s `decision` key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Decision {
    Deny = 0,
    Permit = 1,
    Indeterminate = 2,
    NotApplicable = 3,
}

/// Wire value did not correspond to any [`Decision`] (or [`crate::obligation::FulfillOn`])
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not a valid Decision")]
pub struct InvalidDecision(pub i32);

impl TryFrom<i32> for Decision {
    type Error = InvalidDecision;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Decision::Deny),
            1 => Ok(Decision::Permit),
            2 => Ok(Decision::Indeterminate),
            3 => Ok(Decision::NotApplicable),
            other => Err(InvalidDecision(other)),
        }
    }
}

impl From<Decision> for i32 {
    fn from(value: Decision) -> Self {
        value as i32
    }
}

/// One per-resource evaluation outcome inside a [`crate::response::Response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyResult {
    decision: Decision,
    resource_id: String,
    status: Option<Status>,
    obligations: Vec<Obligation>,
}

impl PolicyResult {
    pub fn new(decision: Decision, resource_id: impl Into<String>) -> Self {
        PolicyResult {
            decision,
            resource_id: resource_id.into(),
            status: None,
            obligations: Vec::new(),
        }
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: Option<Status>) {
        self.status = status;
    }

    pub fn obligations(&self) -> &[Obligation] {
        &self.obligations
    }

    pub fn add_obligation(&mut self, obligation: Obligation) {
        self.obligations.push(obligation);
    }
}
