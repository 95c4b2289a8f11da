const MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn parse(s: String) -> Result<ServiceName, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Service name is required".to_string());
        }
        if trimmed.chars().count() > MAX_LENGTH {
            return Err(format!(
                "Service name must be at most {MAX_LENGTH} characters"
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ServiceName> for String {
    fn from(name: ServiceName) -> Self {
        name.0
    }
}
