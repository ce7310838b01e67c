use serde::{Deserialize, Serialize};

use crate::validation::{self, messages, FieldError, Validate};

/// Category payload exchanged with clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl CategoryDto {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { code: Some(code.into()), name: Some(name.into()) }
    }
}

impl Validate for CategoryDto {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validation::required_text(
            &mut errors,
            "code",
            self.code.as_deref(),
            validation::CATEGORY_CODE_MAX,
            messages::CATEGORY_CODE_EMPTY,
            messages::CATEGORY_CODE_TOO_LONG,
        );
        validation::required_text(
            &mut errors,
            "name",
            self.name.as_deref(),
            validation::CATEGORY_NAME_MAX,
            messages::CATEGORY_NAME_EMPTY,
            messages::CATEGORY_NAME_TOO_LONG,
        );
        errors
    }
}
