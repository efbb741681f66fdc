use serde::Serialize;

/// Body of the liveness probe.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub const fn ok() -> Self {
        Self { status: "ok" }
    }
}
