use http::Method;

/// Metadata collected for one operation while `paths` is walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationState {
  pub method: Method,
  pub request_uri: String,
  pub parameters: Vec<String>,
  pub request_body: Option<String>,
  pub responses: Vec<String>,
  pub deprecated: bool,
  pub summary: Option<String>,
}

impl OperationState {
  #[must_use]
  pub fn new(method: Method, request_uri: impl Into<String>) -> Self {
    Self {
      method,
      request_uri: request_uri.into(),
      parameters: vec![],
      request_body: None,
      responses: vec![],
      deprecated: false,
      summary: None,
    }
  }

  /// Overwrites every field the patch sets and leaves the rest untouched.
  pub fn apply(&mut self, patch: OperationStatePatch) {
    let OperationStatePatch {
      parameters,
      request_body,
      responses,
      deprecated,
      summary,
    } = patch;

    if let Some(parameters) = parameters {
      self.parameters = parameters;
    }
    if let Some(request_body) = request_body {
      self.request_body = Some(request_body);
    }
    if let Some(responses) = responses {
      self.responses = responses;
    }
    if let Some(deprecated) = deprecated {
      self.deprecated = deprecated;
    }
    if let Some(summary) = summary {
      self.summary = Some(summary);
    }
  }
}

/// Partial [`OperationState`]; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
pub struct OperationStatePatch {
  pub parameters: Option<Vec<String>>,
  #[builder(into)]
  pub request_body: Option<String>,
  pub responses: Option<Vec<String>>,
  pub deprecated: Option<bool>,
  #[builder(into)]
  pub summary: Option<String>,
}
