use crate::field::FieldArgs;

/// A computed property. The getter always exists; without a setter the
/// property is read-only.
#[derive(Debug, Clone, Default)]
pub struct Computed {
    pub setter: bool,

    /// Annotation bag
    pub info: FieldArgs,
}

impl Computed {
    pub fn read_only() -> Self {
        Self::default()
    }

    pub fn read_write() -> Self {
        Self {
            setter: true,
            ..Self::default()
        }
    }

    pub fn info(mut self, info: FieldArgs) -> Self {
        self.info = info;
        self
    }
}
