use std::hash::{Hash, Hasher};

/// A product category, identified by its business `code`.
#[derive(Debug, Clone, Default)]
pub struct Category {
    pub code: String,
    pub name: String,
}

impl Category {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { code: code.into(), name: name.into() }
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool { self.code == other.code }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) { self.code.hash(state); }
}

impl From<models::category::Model> for Category {
    fn from(m: models::category::Model) -> Self { Self { code: m.code, name: m.name } }
}
