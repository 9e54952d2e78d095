use async_trait::async_trait;

use crate::errors::Result;

/// A reversible unit of work over the stores.
///
/// `execute` returns the command's result as a JSON document (for order
/// placement, the created order) so the result survives the command moving
/// into the invoker's history. `undo` reverses the observable effects of a
/// prior successful `execute` and is a no-op otherwise.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    async fn execute(&mut self) -> Result<serde_json::Value>;

    async fn undo(&mut self) -> Result<()>;
}
