//! Shared test utilities for lb-db unit tests.
