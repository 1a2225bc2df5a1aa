//! Submission strategies, selected once from [`SubmitMode`].

use core::fmt::Debug;

use crate::backend::DepthTest;

use super::config::SubmitMode;

/// Decides when batched geometry reaches the GPU and how depth is compared.
pub trait SubmitStrategy: Debug {
    fn name(&self) -> &'static str;

    fn depth_test(&self) -> DepthTest;

    /// Whether every finished primitive is drawn right away.
    fn flush_after_primitive(&self) -> bool;
}

/// Flushes on capacity, texture, shader and (deferred) transform boundaries only.
#[derive(Debug, Copy, Clone, Default)]
pub struct Batched;

impl SubmitStrategy for Batched {
    fn name(&self) -> &'static str {
        "batched"
    }

    fn depth_test(&self) -> DepthTest {
        DepthTest::Less
    }

    fn flush_after_primitive(&self) -> bool {
        false
    }
}

/// One draw per primitive.
#[derive(Debug, Copy, Clone, Default)]
pub struct Immediate;

impl SubmitStrategy for Immediate {
    fn name(&self) -> &'static str {
        "immediate"
    }

    fn depth_test(&self) -> DepthTest {
        DepthTest::LessEqual
    }

    fn flush_after_primitive(&self) -> bool {
        true
    }
}

impl SubmitMode {
    pub fn strategy(self) -> Box<dyn SubmitStrategy> {
        match self {
            SubmitMode::Batched => Box::new(Batched),
            SubmitMode::Immediate => Box::new(Immediate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_map_to_strategies() {
        let batched = SubmitMode::Batched.strategy();
        assert_eq!(batched.name(), "batched");
        assert_eq!(batched.depth_test(), DepthTest::Less);
        assert!(!batched.flush_after_primitive());

        let immediate = SubmitMode::Immediate.strategy();
        assert_eq!(immediate.depth_test(), DepthTest::LessEqual);
        assert!(immediate.flush_after_primitive());
    }
}
