use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Outcome of a service operation. Business-rule rejections are carried in
/// `Failure` rather than returned as errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Envelope<T> {
    Success(T),
    Failure {
        result: Option<T>,
        errors: Vec<String>,
    },
}

impl<T> Envelope<T> {
    pub fn success(value: T) -> Self {
        Self::Success(value)
    }

    pub fn error<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Failure {
            result: None,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn error_with_value(value: T) -> Self {
        Self::Failure {
            result: Some(value),
            errors: Vec::new(),
        }
    }

    pub fn error_with<I, S>(value: T, errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Failure {
            result: Some(value),
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure { result, .. } => result.as_ref(),
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Self::Success(_) => &[],
            Self::Failure { errors, .. } => errors,
        }
    }

    pub fn into_result(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure { result, .. } => result,
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 3)?;
        state.serialize_field("isSuccess", &self.is_success())?;
        state.serialize_field("result", &self.result())?;
        state.serialize_field("errors", self.errors())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_has_value_and_no_errors() {
        let envelope = Envelope::success(7);
        assert!(envelope.is_success());
        assert_eq!(envelope.result(), Some(&7));
        assert!(envelope.errors().is_empty());
    }

    #[test]
    fn error_with_messages_has_no_value() {
        let envelope: Envelope<i32> = Envelope::error(["first", "second"]);
        assert!(!envelope.is_success());
        assert_eq!(envelope.result(), None);
        assert_eq!(envelope.errors(), ["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn error_can_echo_rejected_value() {
        let envelope = Envelope::error_with_value("draft");
        assert!(!envelope.is_success());
        assert_eq!(envelope.result(), Some(&"draft"));
        assert!(envelope.errors().is_empty());

        let envelope = Envelope::error_with("draft", ["rejected"]);
        assert!(!envelope.is_success());
        assert_eq!(envelope.into_result(), Some("draft"));
    }

    #[test]
    fn serializes_to_wire_shape() {
        let ok = serde_json::to_value(Envelope::success(true)).expect("serialize");
        assert_eq!(ok, json!({"isSuccess": true, "result": true, "errors": []}));

        let failed: Envelope<bool> = Envelope::error(["Todo not found"]);
        let failed = serde_json::to_value(failed).expect("serialize");
        assert_eq!(
            failed,
            json!({"isSuccess": false, "result": null, "errors": ["Todo not found"]})
        );
    }

    #[test]
    fn absent_optional_success_serializes_null_result() {
        let envelope: Envelope<Option<i32>> = Envelope::success(None);
        let value = serde_json::to_value(envelope).expect("serialize");
        assert_eq!(value["isSuccess"], true);
        assert!(value["result"].is_null());
    }
}
