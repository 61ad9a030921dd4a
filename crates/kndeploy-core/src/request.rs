/// A single deploy request as entered by the operator.
///
/// Both names are checked for presence only. No format validation is done:
/// slashes, tags and upper-case letters pass through as typed, and whatever
/// the registry or cluster makes of them surfaces as a tool failure later.
///
/// # Examples
///
/// ```
/// use kndeploy_core::DeploymentRequest;
///
/// let req = DeploymentRequest::new("ghcr.io/acme", "sentiment").unwrap();
/// assert_eq!(req.image_reference(), "ghcr.io/acme/sentiment");
/// assert_eq!(req.service_name(), "sentiment-service");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    registry_name: String,
    image_name: String,
}

impl DeploymentRequest {
    /// Build a request, trimming both inputs.
    ///
    /// Returns [`crate::Error::InputMissing`] if either is empty or
    /// whitespace-only.
    pub fn new(registry_name: &str, image_name: &str) -> crate::Result<Self> {
        let registry_name = require_input("registry name", registry_name)?;
        let image_name = require_input("image name", image_name)?;
        Ok(Self {
            registry_name,
            image_name,
        })
    }

    pub fn registry_name(&self) -> &str {
        &self.registry_name
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    /// `<registry>/<image>`
    pub fn image_reference(&self) -> String {
        format!("{}/{}", self.registry_name, self.image_name)
    }

    /// `<image>-service`
    pub fn service_name(&self) -> String {
        service_name_for(&self.image_name)
    }
}

/// Derive the Knative service name for an image name.
pub fn service_name_for(image_name: &str) -> String {
    format!("{image_name}-service")
}

/// Trim `value` and reject it if nothing is left.
pub fn require_input(field: &'static str, value: &str) -> crate::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(crate::Error::InputMissing { field });
    }
    Ok(trimmed.to_owned())
}
