//! Drawing surface boundary
//!
//! The composer appends canvas-space primitives one at a time. A surface is
//! exclusively borrowed for a whole pass and never asked to remove anything.

use serde::Serialize;

use crate::error::RenderError;
use crate::primitive::{DrawablePrimitive, PrimitiveRole};

pub trait DrawingSurface {
    /// Append one primitive. Fails only on geometry no renderer should emit.
    fn append(&mut self, primitive: &DrawablePrimitive) -> Result<(), RenderError>;

    fn append_all(&mut self, primitives: &[DrawablePrimitive]) -> Result<usize, RenderError> {
        for primitive in primitives {
            self.append(primitive)?;
        }
        Ok(primitives.len())
    }
}

/// In-memory surface; backs `--format json` and the tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrimitiveList {
    pub primitives: Vec<DrawablePrimitive>,
}

impl PrimitiveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn count_role(&self, role: PrimitiveRole) -> usize {
        self.primitives.iter().filter(|p| p.role() == role).count()
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(&self.primitives)?)
    }
}

impl DrawingSurface for PrimitiveList {
    fn append(&mut self, primitive: &DrawablePrimitive) -> Result<(), RenderError> {
        primitive.validate()?;
        self.primitives.push(primitive.clone());
        Ok(())
    }
}
