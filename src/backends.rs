//! Concrete generation backends.

#[cfg(feature = "openai")]
pub mod openai;
