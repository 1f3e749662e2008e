use crate::attribute_assignment::AttributeAssignment;
use crate::result::InvalidDecision;

/// The decision value an [`Obligation`] must be carried out on.
///
/// Shares the numeric space of `Decision` (spec §3): only `Deny` (0)
/// and `Permit` (1) are valid here, mirroring the original client's
/// `pep_fulfillon_t` switch over exactly those two cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FulfillOn {
    Deny = 0,
    Permit = 1,
}

impl TryFrom<i32> for FulfillOn {
    type Error = InvalidDecision;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FulfillOn::Deny),
            1 => Ok(FulfillOn::Permit),
            other => Err(InvalidDecision(other)),
        }
    }
}

impl From<FulfillOn> for i32 {
    fn from(value: FulfillOn) -> Self {
        value as i32
    }
}

/// A directive the PEP must carry out when a result's decision matches
/// `fulfill_on`, e.g. mapping a grid identity to a local POSIX account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obligation {
    id: String,
    fulfill_on: FulfillOn,
    attribute_assignments: Vec<AttributeAssignment>,
}

impl Obligation {
    pub fn new(id: impl Into<String>, fulfill_on: FulfillOn) -> Self {
        Obligation {
            id: id.into(),
            fulfill_on,
            attribute_assignments: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fulfill_on(&self) -> FulfillOn {
        self.fulfill_on
    }

    pub fn attribute_assignments(&self) -> &[AttributeAssignment] {
        &self.attribute_assignments
    }

    pub fn add_attribute_assignment(&mut self, assignment: AttributeAssignment) {
        self.attribute_assignments.push(assignment);
    }
}
