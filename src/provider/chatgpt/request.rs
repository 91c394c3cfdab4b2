use crate::config::ProviderKind;
use crate::error::AgentError;
use crate::provider::wrong_payload;
use crate::types::{Request, Role, TextRequest};

use super::types::{
    DEFAULT_MODEL, FileInputContent, FileInputRequest, ImageInputContent, ImageInputRequest,
    TextInputRequest,
};

/// Extracts a ChatGPT payload from the envelope, fills defaults and checks required fields.
pub(crate) fn prepare_request(request: Request) -> Result<TextRequest, AgentError> {
    match request.into_payload()? {
        TextRequest::ChatGpt(text) => prepare_text(text).map(TextRequest::ChatGpt),
        TextRequest::ChatGptImage(image) => prepare_image(image).map(TextRequest::ChatGptImage),
        TextRequest::ChatGptFile(file) => prepare_file(file).map(TextRequest::ChatGptFile),
        other => Err(wrong_payload(ProviderKind::ChatGpt, other.provider())),
    }
}

fn default_model(model: &mut String) {
    if model.is_empty() {
        *model = DEFAULT_MODEL.to_string();
    }
}

fn default_role(role: &mut Role) {
    if role.is_empty() {
        *role = Role::user();
    }
}

fn prepare_text(mut request: TextInputRequest) -> Result<TextInputRequest, AgentError> {
    if request.input.is_empty() {
        return Err(AgentError::invalid_input("message is required"));
    }
    default_model(&mut request.model);
    Ok(request)
}

fn prepare_image(mut request: ImageInputRequest) -> Result<ImageInputRequest, AgentError> {
    default_model(&mut request.model);
    if request.input.is_empty() {
        return Err(AgentError::invalid_input("input is required"));
    }
    for (index, message) in request.input.iter_mut().enumerate() {
        default_role(&mut message.role);
        if message.content.is_empty() {
            return Err(AgentError::invalid_input(format!(
                "content in input[{index}] is required"
            )));
        }
        for part in &message.content {
            check_image_part(index, part)?;
        }
    }
    Ok(request)
}

fn check_image_part(index: usize, part: &ImageInputContent) -> Result<(), AgentError> {
    match part.kind.as_str() {
        "" => Err(AgentError::invalid_input(format!(
            "content type in input[{index}] is required"
        ))),
        "input_text" => require(part.text.as_deref(), index, "text"),
        "input_image" => require(part.image_url.as_deref(), index, "image_url"),
        // Unknown part types are forwarded for the API to judge.
        _ => Ok(()),
    }
}

fn prepare_file(mut request: FileInputRequest) -> Result<FileInputRequest, AgentError> {
    default_model(&mut request.model);
    if request.input.is_empty() {
        return Err(AgentError::invalid_input("input is required"));
    }
    for (index, message) in request.input.iter_mut().enumerate() {
        default_role(&mut message.role);
        if message.content.is_empty() {
            return Err(AgentError::invalid_input(format!(
                "content in input[{index}] is required"
            )));
        }
        for part in &message.content {
            check_file_part(index, part)?;
        }
    }
    Ok(request)
}

fn check_file_part(index: usize, part: &FileInputContent) -> Result<(), AgentError> {
    match part.kind.as_str() {
        "" => Err(AgentError::invalid_input(format!(
            "content type in input[{index}] is required"
        ))),
        "input_text" => require(part.text.as_deref(), index, "text"),
        "input_file" => require(part.file_url.as_deref(), index, "file_url"),
        _ => Ok(()),
    }
}

fn require(value: Option<&str>, index: usize, field: &str) -> Result<(), AgentError> {
    match value {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err(AgentError::invalid_input(format!(
            "{field} in input[{index}] is required"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::chatgpt::types::{FileInputMessage, ImageInputMessage, MODEL_GPT_4O};
    use crate::provider::deepseek;

    fn text(request: TextRequest) -> TextInputRequest {
        match request {
            TextRequest::ChatGpt(text) => text,
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn empty_model_defaults_to_gpt_4_1() {
        let prepared = prepare_request(Request::new(TextInputRequest {
            input: "hello".to_string(),
            ..Default::default()
        }))
        .expect("prepare");
        assert_eq!(text(prepared).model, "gpt-4.1");
    }

    #[test]
    fn explicit_model_is_kept() {
        let prepared = prepare_request(Request::new(TextInputRequest {
            model: MODEL_GPT_4O.to_string(),
            input: "hello".to_string(),
            ..Default::default()
        }))
        .expect("prepare");
        assert_eq!(text(prepared).model, "gpt-4o");
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = prepare_request(Request::new(TextInputRequest::default())).expect_err("input");
        assert!(matches!(err, AgentError::InvalidInput { .. }));
    }

    #[test]
    fn foreign_payload_is_rejected() {
        let err = prepare_request(Request::new(deepseek::TextInputRequest::default()))
            .expect_err("wrong provider");
        match err {
            AgentError::InvalidInput { message } => {
                assert!(message.contains("chatgpt agent"), "got: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn image_input_gets_role_and_model_defaults() {
        let prepared = prepare_request(Request::new(ImageInputRequest {
            model: String::new(),
            input: vec![ImageInputMessage {
                role: Role::default(),
                content: vec![ImageInputContent {
                    kind: "input_image".to_string(),
                    text: None,
                    image_url: Some("https://example.com/a.png".to_string()),
                }],
            }],
        }))
        .expect("prepare");

        match prepared {
            TextRequest::ChatGptImage(image) => {
                assert_eq!(image.model, "gpt-4.1");
                assert_eq!(image.input[0].role, Role::user());
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn image_part_without_url_is_rejected() {
        let err = prepare_request(Request::new(ImageInputRequest {
            model: String::new(),
            input: vec![ImageInputMessage {
                role: Role::user(),
                content: vec![ImageInputContent {
                    kind: "input_image".to_string(),
                    ..Default::default()
                }],
            }],
        }))
        .expect_err("missing url");
        match err {
            AgentError::InvalidInput { message } => assert!(message.contains("image_url")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn file_input_requires_messages_and_content() {
        let err = prepare_request(Request::new(FileInputRequest::default())).expect_err("empty");
        assert!(matches!(err, AgentError::InvalidInput { .. }));

        let err = prepare_request(Request::new(FileInputRequest {
            model: String::new(),
            input: vec![FileInputMessage {
                role: Role::user(),
                content: Vec::new(),
            }],
        }))
        .expect_err("no content");
        assert!(matches!(err, AgentError::InvalidInput { .. }));
    }
}
