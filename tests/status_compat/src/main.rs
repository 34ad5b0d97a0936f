fn main() {
    println!("Run `cargo test -p status-compat` to execute status token compatibility tests.");
}

/// The frontend switches on the literal serialized tokens, so these tests
/// pin the exact strings crossing the boundary. A failure here means a
/// breaking change for every presentation-layer consumer.
#[cfg(test)]
mod tests {
    use filedock_protocol::{RetentionMode, StoredItem, TransferStatus};
    use filedock_uploader::{FileCategory, UploadOutcome};

    fn token(value: impl serde::Serialize) -> String {
        match serde_json::to_value(value).expect("serializable") {
            serde_json::Value::String(s) => s,
            other => panic!("expected a string token, got {other}"),
        }
    }

    #[test]
    fn transfer_status_tokens() {
        assert_eq!(token(TransferStatus::Queueing), "queueing");
        assert_eq!(token(TransferStatus::Transferring), "carregando");
        assert_eq!(token(TransferStatus::Finalizing), "finalizando");
        assert_eq!(token(TransferStatus::Success), "success");
        assert_eq!(token(TransferStatus::Error), "error");
    }

    #[test]
    fn transfer_status_parses_legacy_tokens() {
        let status: TransferStatus = serde_json::from_str("\"carregando\"").unwrap();
        assert_eq!(status, TransferStatus::Transferring);
        let status: TransferStatus = serde_json::from_str("\"finalizando\"").unwrap();
        assert_eq!(status, TransferStatus::Finalizing);
    }

    #[test]
    fn unknown_status_token_is_rejected() {
        assert!(serde_json::from_str::<TransferStatus>("\"uploading\"").is_err());
    }

    #[test]
    fn retention_mode_tokens() {
        assert_eq!(token(RetentionMode::Staged), "staged");
        assert_eq!(token(RetentionMode::Permanent), "permanent");
    }

    #[test]
    fn outcome_field_names_are_camel_case() {
        let outcome = UploadOutcome {
            file_id: "upload_1".into(),
            file_name: "budget.xlsx".into(),
            category: FileCategory::Spreadsheet,
            status: TransferStatus::Success,
            item: Some(StoredItem {
                item_id: "item-1".into(),
                download_url: Some("https://drive.example/item-1".into()),
            }),
            error: None,
        };

        let json = serde_json::to_value(&outcome).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("fileId"));
        assert!(obj.contains_key("fileName"));
        assert!(obj.contains_key("category"));
        assert!(obj.contains_key("status"));
        assert_eq!(json["item"]["itemId"], "item-1");
        assert_eq!(json["item"]["downloadUrl"], "https://drive.example/item-1");
    }

    #[test]
    fn outcome_roundtrip() {
        let outcome = UploadOutcome {
            file_id: "upload_2".into(),
            file_name: "quote.pdf".into(),
            category: FileCategory::Document,
            status: TransferStatus::Error,
            item: None,
            error: Some("connectivity error: offline".into()),
        };

        let json = serde_json::to_string(&outcome).unwrap();
        let parsed: UploadOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.file_id, "upload_2");
        assert_eq!(parsed.status, TransferStatus::Error);
        assert_eq!(parsed.error.as_deref(), Some("connectivity error: offline"));
        assert!(parsed.item.is_none());
    }
}
