//! Input stream tests.

mod stream_test;
