use serde::{Deserialize, Serialize};

/// The conference an archive collects materials for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub year: u16,
}

impl Default for Event {
    fn default() -> Self {
        Self { name: "CppCon".to_string(), year: 2018 }
    }
}

impl Event {
    /// Tag appended to normalized filenames, e.g. `cppcon_2018`
    pub fn tag(&self) -> String {
        format!("{}_{}", self.name.to_lowercase(), self.year)
    }

    /// Name as it appears in original upload filenames, e.g. `CppCon 2018`
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.year)
    }
}
