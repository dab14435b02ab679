//! Tests for the tracing setup.

use std::sync::Mutex;

use standards_core::tracing::init_tracing;

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_init_tracing_with_filter_env() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("STANDARDS_LOG", "standards_analysis=debug,standards_cli=warn");
    init_tracing(false);
    std::env::remove_var("STANDARDS_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing(true);
    init_tracing(false);
    init_tracing(true);
    tracing::info!("still alive after repeated init");
}
