//! Unit tests for the logging helpers in the `dlt645-rs` crate.

use dlt645_rs::logging::{log_debug, log_error, log_info, log_warn, try_init_logger};
use dlt645_rs::StationInterpreter;

/// Tests that the logging helpers do not panic after init.
#[test]
fn test_logging() {
    try_init_logger();
    log_error("This is an error message");
    log_warn("This is a warning message");
    log_info("This is an info message");
    log_debug("This is a debug message");
}

/// Tests that a second initialization is tolerated.
#[test]
fn test_try_init_twice() {
    try_init_logger();
    assert!(!try_init_logger());
}

/// Tests that a rejection is logged without disturbing the caller.
#[test]
fn test_rejection_logging() {
    try_init_logger();
    assert!(StationInterpreter::new().interpret(0xFF, &[0x01, 0x02]).is_err());
}
