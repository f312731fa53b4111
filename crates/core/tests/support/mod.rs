//! Shared test helpers for `crier-core` integration tests.
//!
//! These helpers provide lightweight in-memory mocks of the calendar and
//! messaging ports so that tracking tests can focus on behaviour instead of
//! boilerplate.

pub mod calendar;
pub mod messenger;
