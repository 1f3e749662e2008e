use crate::request::Request;
use crate::result::PolicyResult;

/// The PDP's reply to a [`Request`]: an optional echo of the request
/// it answers, plus one [`PolicyResult`] per evaluated resource.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    request: Option<Request>,
    results: Vec<PolicyResult>,
}

impl Response {
    pub fn new() -> Self {
        Response::default()
    }

    pub fn request(&self) -> Option<&Request> {
        self.request.as_ref()
    }

    pub fn set_request(&mut self, request: Option<Request>) {
        self.request = request;
    }

    pub fn results(&self) -> &[PolicyResult] {
        &self.results
    }

    pub fn add_result(&mut self, result: PolicyResult) {
        self.results.push(result);
    }
}
