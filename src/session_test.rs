// Tests for the recognition session state machine

use super::*;

#[test]
fn test_new_manager_is_idle() {
    let manager = SessionManager::new();
    assert_eq!(manager.status(), SessionStatus::Idle);
    assert_eq!(manager.session_id(), None);
    assert_eq!(manager.interim_text(), "");
    assert_eq!(manager.final_text(), None);
}

#[test]
fn test_start_transitions_to_listening() {
    let mut manager = SessionManager::new();
    let id = manager.start().unwrap();
    assert_eq!(manager.status(), SessionStatus::Listening);
    assert_eq!(manager.session_id(), Some(id));
}

#[test]
fn test_start_while_listening_is_rejected() {
    let mut manager = SessionManager::new();
    let first = manager.start().unwrap();

    let result = manager.start();
    assert_eq!(
        result,
        Err(SessionError::InvalidTransition {
            from: SessionStatus::Listening,
            to: SessionStatus::Listening,
        })
    );
    // No second concurrent session was created
    assert_eq!(manager.session_id(), Some(first));
}

#[test]
fn test_start_while_processing_is_rejected() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();
    manager.apply_final("abrir reportes").unwrap();

    assert!(manager.start().is_err());
    assert_eq!(manager.status(), SessionStatus::Processing);
}

#[test]
fn test_start_replaces_finished_session() {
    let mut manager = SessionManager::new();
    let first = manager.start().unwrap();
    manager.apply_final("abrir reportes").unwrap();
    manager.complete().unwrap();

    let second = manager.start().unwrap();
    assert_ne!(first, second);
    assert_eq!(manager.status(), SessionStatus::Listening);
    assert_eq!(manager.final_text(), None);
}

#[test]
fn test_interim_updates_replace_previous_text() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();

    manager.apply_interim("abrir").unwrap();
    assert_eq!(manager.interim_text(), "abrir");

    manager.apply_interim("abrir repor").unwrap();
    assert_eq!(manager.interim_text(), "abrir repor");

    // Interim events never leave Listening
    assert_eq!(manager.status(), SessionStatus::Listening);
}

#[test]
fn test_interim_without_session_fails() {
    let mut manager = SessionManager::new();
    assert_eq!(
        manager.apply_interim("hola"),
        Err(SessionError::NoActiveSession)
    );
}

#[test]
fn test_final_transitions_to_processing() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();

    let text = manager.apply_final("abrir reportes").unwrap();
    assert_eq!(text, "abrir reportes");
    assert_eq!(manager.status(), SessionStatus::Processing);
    assert_eq!(manager.final_text(), Some("abrir reportes"));
}

#[test]
fn test_final_is_set_exactly_once() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();
    manager.apply_final("abrir reportes").unwrap();

    let result = manager.apply_final("otra cosa");
    assert_eq!(result, Err(SessionError::FinalAlreadySet));
    assert_eq!(manager.final_text(), Some("abrir reportes"));
}

#[test]
fn test_error_clears_interim_and_fails_session() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();
    manager.apply_interim("abr").unwrap();

    manager.apply_error(RecognitionErrorKind::PermissionDenied);
    assert_eq!(manager.status(), SessionStatus::Failed);
    assert_eq!(manager.interim_text(), "");
    assert_eq!(
        manager.error_kind(),
        Some(RecognitionErrorKind::PermissionDenied)
    );
}

#[test]
fn test_error_without_session_is_noop() {
    let mut manager = SessionManager::new();
    manager.apply_error(RecognitionErrorKind::Other);
    assert_eq!(manager.status(), SessionStatus::Idle);
}

#[test]
fn test_end_with_no_result_returns_to_idle() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();
    manager.apply_end();
    assert_eq!(manager.status(), SessionStatus::Idle);
}

#[test]
fn test_end_after_final_keeps_processing() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();
    manager.apply_final("abrir reportes").unwrap();
    manager.apply_end();
    assert_eq!(manager.status(), SessionStatus::Processing);
}

#[test]
fn test_end_after_error_keeps_failed() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();
    manager.apply_error(RecognitionErrorKind::NoSpeechDetected);
    manager.apply_end();
    assert_eq!(manager.status(), SessionStatus::Failed);
}

#[test]
fn test_stop_is_safe_without_session() {
    let mut manager = SessionManager::new();
    manager.stop();
    assert_eq!(manager.status(), SessionStatus::Idle);
}

#[test]
fn test_stop_ends_listening_without_final() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();
    manager.apply_interim("abr").unwrap();

    manager.stop();
    assert_eq!(manager.status(), SessionStatus::Idle);
    assert_eq!(manager.final_text(), None);
    assert_eq!(manager.interim_text(), "");
}

#[test]
fn test_stop_preserves_terminal_state() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();
    manager.apply_error(RecognitionErrorKind::Other);

    manager.stop();
    assert_eq!(manager.status(), SessionStatus::Failed);
}

#[test]
fn test_complete_requires_processing() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();
    assert!(manager.complete().is_err());

    manager.apply_final("abrir reportes").unwrap();
    manager.complete().unwrap();
    assert_eq!(manager.status(), SessionStatus::Succeeded);
}

#[test]
fn test_fail_dispatch_requires_processing() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();
    assert!(manager.fail_dispatch().is_err());

    manager.apply_final("exportar excel").unwrap();
    manager.fail_dispatch().unwrap();
    assert_eq!(manager.status(), SessionStatus::Failed);
    // Dispatch failures do not fabricate a recognition error kind
    assert_eq!(manager.error_kind(), None);
}

#[test]
fn test_reset_drops_session() {
    let mut manager = SessionManager::new();
    manager.start().unwrap();
    manager.reset();
    assert_eq!(manager.status(), SessionStatus::Idle);
    assert_eq!(manager.session_id(), None);
}

#[test]
fn test_error_kind_from_platform_codes() {
    assert_eq!(
        RecognitionErrorKind::from_code("no-speech"),
        RecognitionErrorKind::NoSpeechDetected
    );
    assert_eq!(
        RecognitionErrorKind::from_code("audio-capture"),
        RecognitionErrorKind::MicrophoneUnavailable
    );
    assert_eq!(
        RecognitionErrorKind::from_code("not-allowed"),
        RecognitionErrorKind::PermissionDenied
    );
    assert_eq!(
        RecognitionErrorKind::from_code("service-not-allowed"),
        RecognitionErrorKind::PermissionDenied
    );
    assert_eq!(
        RecognitionErrorKind::from_code("network"),
        RecognitionErrorKind::Other
    );
}

#[test]
fn test_error_messages_are_spanish() {
    assert_eq!(
        RecognitionErrorKind::NoSpeechDetected.message(),
        "No se detectó voz. Intenta de nuevo."
    );
    assert!(RecognitionErrorKind::MicrophoneUnavailable
        .message()
        .contains("micrófono"));
    assert!(RecognitionErrorKind::PermissionDenied
        .message()
        .contains("denegado"));
}
