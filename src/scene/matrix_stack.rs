use crate::error::MatrixStackError;
use crate::math::Mat4;

/// LIFO of saved transforms used to isolate sibling subtrees during traversal.
#[derive(Clone, Debug, Default)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, matrix: Mat4) {
        self.stack.push(matrix);
    }

    /// Underflow means pushes and pops went out of balance.
    pub fn pop(&mut self) -> Result<Mat4, MatrixStackError> {
        self.stack.pop().ok_or(MatrixStackError::Underflow)
    }

    pub fn peek(&self) -> Option<&Mat4> {
        self.stack.last()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}
