use crate::action::Action;
use crate::environment::Environment;
use crate::resource::Resource;
use crate::subject::Subject;

/// A complete authorization request: the thing a [`crate::response::Response`]
/// is computed for.
///
/// A request with no subjects, resources, action, or environment is
/// valid for transmission; empty collections encode as empty TagFmt
/// lists, never as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    subjects: Vec<Subject>,
    resources: Vec<Resource>,
    action: Option<Action>,
    environment: Option<Environment>,
}

impl Request {
    pub fn new() -> Self {
        Request::default()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn add_subject(&mut self, subject: Subject) {
        self.subjects.push(subject);
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    pub fn set_action(&mut self, action: Option<Action>) {
        self.action = action;
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    pub fn set_environment(&mut self, environment: Option<Environment>) {
        self.environment = environment;
    }
}
