// Tests for the toggle debounce guard

use super::*;

#[test]
fn test_first_toggle_is_accepted() {
    let guard = ToggleGuard::new(Duration::from_millis(300));
    assert!(guard.accept());
}

#[test]
fn test_rapid_second_toggle_is_debounced() {
    let guard = ToggleGuard::new(Duration::from_millis(300));
    assert!(guard.accept());
    assert!(!guard.accept());
}

#[test]
fn test_toggle_accepted_after_window_elapses() {
    let guard = ToggleGuard::new(Duration::from_millis(10));
    assert!(guard.accept());
    std::thread::sleep(Duration::from_millis(20));
    assert!(guard.accept());
}

#[test]
fn test_zero_debounce_accepts_everything() {
    let guard = ToggleGuard::new(Duration::ZERO);
    assert!(guard.accept());
    assert!(guard.accept());
    assert!(guard.accept());
}
