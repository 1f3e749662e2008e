//! Class tags and map key names for the wire format.
//!
//! These strings are opaque: they must match the remote PDP
//! byte-for-byte and are not meant to be read as Rust paths. The
//! namespace prefixes are adopted verbatim from the original EGEE/glite
//! PEP client this protocol mirrors, which splits context entities
//! (`xacml.ctx`) from policy entities (`xacml.policy`) — see spec §4.3's
//! class-tag table.

const NAMESPACE_CTX: &str = "org.glite.authz.xacml.ctx";
const NAMESPACE_POLICY: &str = "org.glite.authz.xacml.policy";

macro_rules! class_tag {
    ($name:ident, ctx, $entity:literal) => {
        pub const $name: &str = concat!("org.glite.authz.xacml.ctx.", $entity);
    };
    ($name:ident, policy, $entity:literal) => {
        pub const $name: &str = concat!("org.glite.authz.xacml.policy.", $entity);
    };
}

class_tag!(REQUEST, ctx, "Request");
class_tag!(SUBJECT, ctx, "Subject");
class_tag!(RESOURCE, ctx, "Resource");
class_tag!(ACTION, ctx, "Action");
class_tag!(ENVIRONMENT, ctx, "Environment");
class_tag!(ATTRIBUTE, ctx, "Attribute");
class_tag!(RESPONSE, ctx, "Response");
class_tag!(RESULT, ctx, "Result");
class_tag!(STATUS, ctx, "Status");
class_tag!(STATUS_CODE, ctx, "StatusCode");
class_tag!(OBLIGATION, policy, "Obligation");
class_tag!(ATTRIBUTE_ASSIGNMENT, policy, "AttributeAssignment");

/// The opaque namespace prefix for context entities (everything except
/// `Obligation`/`AttributeAssignment`), exposed for diagnostics.
pub const fn namespace_ctx() -> &'static str {
    NAMESPACE_CTX
}

/// The opaque namespace prefix for policy entities (`Obligation`,
/// `AttributeAssignment`), exposed for diagnostics.
pub const fn namespace_policy() -> &'static str {
    NAMESPACE_POLICY
}

pub mod keys {
    pub const SUBJECTS: &str = "subjects";
    pub const RESOURCES: &str = "resources";
    pub const ACTION: &str = "action";
    pub const ENVIRONMENT: &str = "environment";
    pub const CATEGORY: &str = "category";
    pub const ATTRIBUTES: &str = "attributes";
    pub const CONTENT: &str = "content";
    pub const ID: &str = "id";
    pub const DATA_TYPE: &str = "dataType";
    pub const ISSUER: &str = "issuer";
    pub const VALUES: &str = "values";
    pub const REQUEST: &str = "request";
    pub const RESULTS: &str = "results";
    pub const DECISION: &str = "decision";
    pub const RESOURCE_ID: &str = "resourceId";
    pub const STATUS: &str = "status";
    pub const OBLIGATIONS: &str = "obligations";
    pub const MESSAGE: &str = "message";
    pub const CODE: &str = "code";
    pub const SUBCODE: &str = "subcode";
    pub const FULFILL_ON: &str = "fulfillOn";
    pub const ATTRIBUTE_ASSIGNMENTS: &str = "attributeAssignments";
}
