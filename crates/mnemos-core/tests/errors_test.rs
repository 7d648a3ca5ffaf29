use mnemos_core::errors::*;

#[test]
fn invalid_duration_carries_value() {
    let err = ConfigError::InvalidDuration { value: "9x".into() };
    assert!(err.to_string().contains("9x"));
}

#[test]
fn summary_timeout_carries_group_and_timeout() {
    let err = CompactionError::SummaryTimeout {
        group: "2026-W41".into(),
        timeout_ms: 60_000,
    };
    let msg = err.to_string();
    assert!(msg.contains("2026-W41"));
    assert!(msg.contains("60000"));
}

// --- From impls ---

#[test]
fn storage_error_converts_to_mnemos_error() {
    let storage_err = StorageError::Sqlite {
        message: "disk full".into(),
    };
    let err: MnemosError = storage_err.into();
    assert!(matches!(err, MnemosError::StorageError(_)));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn config_error_converts_to_mnemos_error() {
    let err: MnemosError = ConfigError::InvalidWeight {
        name: "w".into(),
        value: 2.0,
    }
    .into();
    assert!(matches!(err, MnemosError::ConfigError(_)));
}

#[test]
fn transient_classification() {
    let io = MnemosError::Io {
        path: "memory/a.md".into(),
        reason: "permission denied".into(),
    };
    assert!(io.is_transient());

    let timeout: MnemosError = CompactionError::SummaryTimeout {
        group: "g".into(),
        timeout_ms: 1,
    }
    .into();
    assert!(timeout.is_transient());

    let integrity: MnemosError = StorageError::CorruptBlob {
        column: "compressed_from".into(),
        reason: "not json".into(),
    }
    .into();
    assert!(!integrity.is_transient());
}
