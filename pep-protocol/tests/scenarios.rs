use pep_model::{
    Action, Attribute, Decision, FulfillOn, Obligation, PolicyResult, Request, Resource, Response,
    Status, StatusCode, Subject,
};
use pep_protocol::testing::{assert_model_roundtrips, assert_tolerates_unknown_key, assert_wire_roundtrips};
use pep_protocol::{FromValue, ProtocolError, ToValue};

fn alice_subject(dn: &str) -> Subject {
    let mut attribute = Attribute::new("urn:oasis:names:tc:xacml:1.0:subject:subject-id");
    attribute.set_datatype(Some(
        "urn:oasis:names:tc:xacml:1.0:data-type:x500Name".to_string(),
    ));
    attribute.add_value(dn);

    let mut subject = Subject::new();
    subject.add_attribute(attribute);
    subject
}

fn minimal_request(dn: &str) -> Request {
    let mut resource = Resource::new();
    let mut resource_attr = Attribute::new("urn:oasis:names:tc:xacml:1.0:resource:resource-id");
    resource_attr.add_value("res1");
    resource.add_attribute(resource_attr);

    let mut action = Action::new();
    let mut action_attr = Attribute::new("urn:oasis:names:tc:xacml:1.0:action:action-id");
    action_attr.add_value("read");
    action.add_attribute(action_attr);

    let mut request = Request::new();
    request.add_subject(alice_subject(dn));
    request.add_resource(resource);
    request.set_action(Some(action));
    request
}

/// S1 Minimal permit.
#[test]
fn s1_minimal_permit_roundtrips() {
    let request = minimal_request("CN=Alice,O=Example,C=CH");
    assert_wire_roundtrips(&request);

    let mut status = Status::new("request granted");
    status.set_code(Some(StatusCode::new(
        "urn:oasis:names:tc:xacml:1.0:status:ok",
    )));

    let mut result = PolicyResult::new(Decision::Permit, "res1");
    result.set_status(Some(status));

    let mut response = Response::new();
    response.add_result(result);

    assert_wire_roundtrips(&response);
    assert_eq!(response.results()[0].decision(), Decision::Permit);
    assert!(response.results()[0].obligations().is_empty());
    assert_eq!(
        response.results()[0].status().unwrap().code().unwrap().code(),
        "urn:oasis:names:tc:xacml:1.0:status:ok"
    );
}

/// S2 Deny with obligation.
#[test]
fn s2_deny_roundtrips() {
    let request = minimal_request("CN=Eve,O=Bad,C=XX");
    assert_wire_roundtrips(&request);

    let result = PolicyResult::new(Decision::Deny, "res1");
    let mut response = Response::new();
    response.add_result(result);

    assert_wire_roundtrips(&response);
    assert_eq!(response.results()[0].decision(), Decision::Deny);
}

/// S3 UID/GID obligation: an obligation with two ordered attribute
/// assignments must preserve both values and their order.
#[test]
fn s3_uid_gid_obligation_preserves_order() {
    use pep_model::AttributeAssignment;

    let mut uid = AttributeAssignment::new("posix-uid");
    uid.add_value("1001");
    let mut gid = AttributeAssignment::new("posix-gid");
    gid.add_value("2001");

    let mut obligation = Obligation::new(
        "urn:oasis:names:tc:xacml:2.0:obligation:local-environment-map/posix",
        FulfillOn::Permit,
    );
    obligation.add_attribute_assignment(uid);
    obligation.add_attribute_assignment(gid);

    let mut result = PolicyResult::new(Decision::Permit, "res1");
    result.add_obligation(obligation);

    let mut response = Response::new();
    response.add_result(result);

    assert_wire_roundtrips(&response);

    let decoded_obligations = response.results()[0].obligations();
    assert_eq!(decoded_obligations.len(), 1);
    let assignments = decoded_obligations[0].attribute_assignments();
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[0].id(), "posix-uid");
    assert_eq!(assignments[0].values(), ["1001"]);
    assert_eq!(assignments[1].id(), "posix-gid");
    assert_eq!(assignments[1].values(), ["2001"]);
}

#[test]
fn unknown_keys_are_tolerated() {
    assert_tolerates_unknown_key(&alice_subject("CN=Alice,O=Example,C=CH"));
    assert_tolerates_unknown_key(&minimal_request("CN=Alice,O=Example,C=CH"));
}

#[test]
fn null_for_absent_optional_scalars() {
    let attribute = Attribute::new("bare-id");
    assert_model_roundtrips(&attribute);
    assert!(attribute.datatype().is_none());
    assert!(attribute.issuer().is_none());

    let decoded = Attribute::from_value(&attribute.to_value()).unwrap();
    assert!(decoded.datatype().is_none());
    assert!(decoded.issuer().is_none());
}

#[test]
fn decision_rejects_unknown_integers() {
    let mut result = PolicyResult::new(Decision::Permit, "res1");
    result.set_status(None);
    let mut value = result.to_value();
    if let tagfmt::Value::Map { entries, .. } = &mut value {
        for (k, v) in entries.iter_mut() {
            if matches!(k, tagfmt::Value::String(s) if s.as_str() == "decision") {
                *v = tagfmt::Value::Integer(99);
            }
        }
    }
    assert_eq!(
        PolicyResult::from_value(&value),
        Err(ProtocolError::InvalidDecision(99))
    );
}

#[test]
fn nested_status_code_round_trips_at_depth_sixteen() {
    let mut code = StatusCode::new("urn:oasis:names:tc:xacml:1.0:status:ok");
    for depth in 0..16 {
        let mut next = StatusCode::new(format!("urn:example:subcode:{depth}"));
        next.set_subcode(Some(code));
        code = next;
    }
    assert_wire_roundtrips(&code);

    let mut depth = 0;
    let mut cursor = Some(&code);
    while let Some(c) = cursor {
        depth += 1;
        cursor = c.subcode();
    }
    assert_eq!(depth, 17);
}

#[test]
fn wrong_class_tag_is_a_protocol_error() {
    let subject_value = Subject::new().to_value();
    let err = Resource::from_value(&subject_value).unwrap_err();
    assert!(matches!(err, ProtocolError::WrongClassTag { .. }));
}
