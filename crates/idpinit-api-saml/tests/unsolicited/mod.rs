pub mod common;

pub mod dispatch_tests;
pub mod resolution_tests;
pub mod validation_tests;
