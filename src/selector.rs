/// Represents ways to locate an interactive element in the host UI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Select by role and optional accessible name
    Role { role: String, name: Option<String> },
    /// Select by element ID
    Id(String),
    /// Select by name/label
    Name(String),
    /// Select by class name
    ClassName(String),
    /// Select by text content
    Text(String),
    /// Select by a single attribute key/value pair
    Attr { key: String, value: String },
    /// Chain multiple selectors; each link matches within the previous match
    Chain(Vec<Selector>),
    /// Select the n-th element from the matches (negative counts from the end)
    Nth(i32),
    /// Represents an invalid selector string, with a reason.
    Invalid(String),
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        // Handle chained selectors first
        let parts: Vec<&str> = s.split(">>").map(|p| p.trim()).collect();
        if parts.len() > 1 {
            return Selector::Chain(parts.into_iter().map(Selector::from).collect());
        }

        // role|name pipe form (preferred precise format)
        if s.contains('|') {
            let parts: Vec<&str> = s.split('|').collect();
            if parts.len() >= 2 {
                let role_part = parts[0].trim();
                let name_part = parts[1].trim();

                let role = role_part
                    .strip_prefix("role:")
                    .unwrap_or(role_part)
                    .to_string();
                let name = name_part
                    .strip_prefix("name:")
                    .unwrap_or(name_part)
                    .to_string();

                return Selector::Role {
                    role,
                    name: Some(name),
                };
            }
        }

        match s {
            _ if s.starts_with("role:") => Selector::Role {
                role: s[5..].to_string(),
                name: None,
            },
            _ if s.to_lowercase().starts_with("name:") => {
                let parts: Vec<&str> = s.splitn(2, ':').collect();
                Selector::Name(parts[1].to_string())
            }
            _ if s.to_lowercase().starts_with("classname:") => {
                let parts: Vec<&str> = s.splitn(2, ':').collect();
                Selector::ClassName(parts[1].to_string())
            }
            _ if s.to_lowercase().starts_with("attr:") => {
                let body = &s["attr:".len()..];
                match body.split_once('=') {
                    Some((key, value)) => Selector::Attr {
                        key: key.trim().to_string(),
                        value: value.trim().to_string(),
                    },
                    None => Selector::Invalid(format!(
                        "attr selector requires key=value, got: '{body}'"
                    )),
                }
            }
            _ if s.to_lowercase().starts_with("nth=") || s.to_lowercase().starts_with("nth:") => {
                let index_str = &s["nth:".len()..];
                if let Ok(index) = index_str.parse::<i32>() {
                    Selector::Nth(index)
                } else {
                    Selector::Invalid(format!("Invalid index for nth selector: '{index_str}'"))
                }
            }
            _ if s.starts_with("id:") => Selector::Id(s[3..].to_string()),
            _ if s.starts_with("text:") => Selector::Text(s[5..].to_string()),
            _ if s.starts_with('#') => Selector::Id(s[1..].to_string()),
            _ => Selector::Invalid(format!(
                "Unknown selector format: \"{s}\". Use prefixes like 'role:', 'name:', 'id:', 'text:', 'classname:', 'attr:key=value' or 'nth:' to specify the selector type."
            )),
        }
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Selector::from(s.as_str())
    }
}

impl From<&String> for Selector {
    fn from(s: &String) -> Self {
        Selector::from(s.as_str())
    }
}
