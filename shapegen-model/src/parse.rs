//! Loading shape graphs from their JSON form

use crate::error::ModelError;
use crate::model::Model;
use std::fs;
use std::path::Path;

pub fn parse_model_file<P: AsRef<Path>>(path: P) -> Result<Model, ModelError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ModelError::ParseError {
        path: path.display().to_string(),
        source: e.to_string(),
    })?;

    parse_model_content(&content).map_err(|e| match e {
        ModelError::ParseError { source, .. } => ModelError::ParseError {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })
}

pub fn parse_model_content(content: &str) -> Result<Model, ModelError> {
    serde_json::from_str(content).map_err(|e| ModelError::ParseError {
        path: "<inline>".to_string(),
        source: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OperationLinkage;
    use crate::shape_id::ShapeId;

    #[test]
    fn test_parse_minimal_graph() {
        let json = r#"{
            "shapes": [
                {
                    "id": "example.chat#Chat",
                    "type": "operation",
                    "input": "example.chat#ChatInput"
                },
                {
                    "id": "example.chat#ChatInput",
                    "type": "structure",
                    "members": ["messages"],
                    "traits": [
                        { "kind": "syntheticInput", "operation": "example.chat#Chat" }
                    ]
                },
                {
                    "id": "example.chat#ChatInput$messages",
                    "type": "member",
                    "target": "example.chat#ChatMessage",
                    "traits": [{ "kind": "streaming" }]
                },
                {
                    "id": "example.chat#ChatMessage",
                    "type": "union"
                }
            ]
        }"#;
        let model = parse_model_content(json).expect("graph should parse");
        assert_eq!(model.len(), 4);

        let input = model
            .expect_shape(&ShapeId::new("example.chat", "ChatInput"))
            .unwrap();
        assert_eq!(
            model.operation_linkage(input),
            OperationLinkage::Input(ShapeId::new("example.chat", "Chat"))
        );
        let member = model.members(input).next().unwrap();
        assert!(model.is_event_stream(member));
    }

    #[test]
    fn test_parse_rejects_bad_ids() {
        let json = r#"{ "shapes": [{ "id": "NoHash", "type": "structure" }] }"#;
        let err = parse_model_content(json).unwrap_err();
        assert!(matches!(err, ModelError::ParseError { .. }));
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let json = r#"{ "shapes": [
            { "id": "a#B", "type": "structure" },
            { "id": "a#B", "type": "union" }
        ] }"#;
        let err = parse_model_content(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate shape: a#B"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = parse_model_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
