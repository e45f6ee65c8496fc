use tauri::http::{
    header::{HeaderName, USER_AGENT},
    HeaderMap, HeaderValue,
};

/// Forces one request header to a fixed value on every outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderOverride {
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderOverride {
    pub(crate) fn user_agent(value: &str) -> Result<Self, String> {
        let value = HeaderValue::from_str(value)
            .map_err(|error| format!("Invalid User-Agent header value '{value}': {error}"))?;
        Ok(Self {
            name: USER_AGENT,
            value,
        })
    }

    pub(crate) fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(self.name.clone(), self.value.clone());
    }
}
