//! Operations and their typed results.
//!
//! An operation is a pure unit of work: it builds its wire payload from
//! domain objects and parses its portion of the response into a typed
//! value. All I/O belongs to [`crate::Client::execute`]. Because one batch
//! may mix operations with different output types, the executor works
//! against the type-erased [`BatchOperation`] view and hands back results
//! whose values are `Box<dyn Any>`; [`crate::Client::execute_one`] offers
//! a fully typed path for the common single-operation case.

use std::any::Any;

use meridian_wire::{Element, Result as WireResult};

use crate::envelope::ResultBlock;
use crate::error::RemoteError;

/// A typed unit of work bound to one remote function.
pub trait Operation: Send + Sync {
    /// The parsed result type.
    type Output: Send + 'static;

    /// The remote function name this operation invokes.
    fn function_name(&self) -> &'static str;

    /// The field name the service uses as the primary result key.
    fn result_key(&self) -> &'static str {
        "key"
    }

    /// Builds the function payload in wire order. Pure; encoding problems
    /// surface before any I/O happens.
    fn build_payload(&self) -> WireResult<Vec<Element>>;

    /// Parses the data element of a successful result block. `data` is
    /// `None` when the service returned a key-only result; operations
    /// that need a payload should report a missing-field error.
    fn parse_value(&self, data: Option<&Element>) -> WireResult<Self::Output>;
}

/// The outcome of one operation within a batch.
///
/// `success()` is true exactly when a value was parsed and the error list
/// is empty. A result can carry warnings either way.
#[derive(Debug)]
pub struct OperationResult<T> {
    /// The parsed value; absent when the service rejected the operation.
    pub value: Option<T>,
    /// The primary result key reported by the service.
    pub key: Option<String>,
    /// Remote business errors. These never abort the batch; rejection of
    /// one operation is ordinary data on its own result.
    pub errors: Vec<RemoteError>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl<T> OperationResult<T> {
    pub(crate) fn succeeded(value: T, key: Option<String>, warnings: Vec<String>) -> Self {
        OperationResult {
            value: Some(value),
            key,
            errors: Vec::new(),
            warnings,
        }
    }

    pub(crate) fn failed(errors: Vec<RemoteError>, warnings: Vec<String>) -> Self {
        OperationResult {
            value: None,
            key: None,
            errors,
            warnings,
        }
    }

    /// Whether the operation was accepted and produced a value.
    pub fn success(&self) -> bool {
        self.value.is_some() && self.errors.is_empty()
    }
}

/// An operation result whose value type has been erased for heterogeneous
/// batching.
pub type ErasedResult = OperationResult<Box<dyn Any + Send>>;

impl OperationResult<Box<dyn Any + Send>> {
    /// Recovers the typed result. Fails with the original result when the
    /// value is of a different type.
    pub fn downcast<T: 'static>(self) -> Result<OperationResult<T>, ErasedResult> {
        match self.value {
            None => Ok(OperationResult {
                value: None,
                key: self.key,
                errors: self.errors,
                warnings: self.warnings,
            }),
            Some(boxed) => match boxed.downcast::<T>() {
                Ok(value) => Ok(OperationResult {
                    value: Some(*value),
                    key: self.key,
                    errors: self.errors,
                    warnings: self.warnings,
                }),
                Err(boxed) => Err(OperationResult {
                    value: Some(boxed),
                    key: self.key,
                    errors: self.errors,
                    warnings: self.warnings,
                }),
            },
        }
    }

    /// Borrows the value as `T` without consuming the result.
    pub fn value_ref<T: 'static>(&self) -> Option<&T> {
        self.value.as_ref()?.downcast_ref()
    }
}

/// The type-erased view of an [`Operation`] that [`crate::Client::execute`]
/// batches over. Implemented for every `Operation` automatically.
pub trait BatchOperation: Send + Sync {
    fn function_name(&self) -> &str;
    fn build_payload(&self) -> WireResult<Vec<Element>>;

    /// Turns one result block into an erased operation result. A rejected
    /// block becomes a failed result carrying the remote errors; a
    /// structural problem in a *successful* block is a wire error that
    /// aborts the whole call.
    fn parse_block(&self, block: &ResultBlock) -> WireResult<ErasedResult>;
}

impl<O: Operation> BatchOperation for O {
    fn function_name(&self) -> &str {
        Operation::function_name(self)
    }

    fn build_payload(&self) -> WireResult<Vec<Element>> {
        Operation::build_payload(self)
    }

    fn parse_block(&self, block: &ResultBlock) -> WireResult<ErasedResult> {
        if !block.success() {
            return Ok(OperationResult::failed(
                block.errors().to_vec(),
                block.warnings().to_vec(),
            ));
        }
        let value = self.parse_value(block.data())?;
        let key = block.field_text(self.result_key()).map(str::to_owned);
        Ok(OperationResult::succeeded(
            Box::new(value) as Box<dyn Any + Send>,
            key,
            block.warnings().to_vec(),
        ))
    }
}
