use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use std::fmt;

/// A model name, normalized into its word parts.
///
/// `BlogPost`, `blog_post` and `blogPost` all name the same model.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let parts = src
            .to_snake_case()
            .split('_')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect();
        Self { parts }
    }

    pub fn camel_case(&self) -> String {
        self.snake_case().to_lower_camel_case()
    }

    pub fn upper_camel_case(&self) -> String {
        self.snake_case().to_upper_camel_case()
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.upper_camel_case())
    }
}

impl From<&str> for Name {
    fn from(src: &str) -> Self {
        Self::new(src)
    }
}
