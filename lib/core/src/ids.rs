//! Fresh node ids for placeholder and fallback nodes

/// Source of ids that must not collide with any structural id.
pub trait IdGenerator {
    fn fresh(&mut self) -> String;
}

/// Random v4 UUIDs; the default for interactive use
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn fresh(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Monotonic `<prefix><n>` ids, reproducible across runs
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("node-")
    }
}

impl IdGenerator for SequentialIds {
    fn fresh(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
