//! GitHub repository and kudo resources, and the validation that turns a raw
//! JSON payload into them.
//!
//! Validation never fails fast: every field is checked and all messages are
//! collected into a [`ValidationErrors`] map keyed by field name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;
use validator::ValidateEmail;

const MISSING: &str = "Missing data for required field.";
const NULL: &str = "Field may not be null.";
const INVALID_INTEGER: &str = "Not a valid integer.";
const INVALID_STRING: &str = "Not a valid string.";
const INVALID_URL: &str = "Not a valid URL.";
const INVALID_EMAIL: &str = "Not a valid email address.";
const INVALID_INPUT: &str = "Invalid input type.";

/// Key used for errors that concern the payload as a whole.
pub const SCHEMA_KEY: &str = "_schema";

const URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubRepo {
    pub repo_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

/// A [`GithubRepo`] owned by a user, identified by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kudo {
    pub user_id: String,
    #[serde(flatten)]
    pub repo: GithubRepo,
}

/// Field name to messages. Serializes as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl GithubRepo {
    pub fn load(input: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(object) = as_object(input, &mut errors) else {
            return Err(errors);
        };

        match load_repo_fields(object, &mut errors) {
            Some(repo) if errors.is_empty() => Ok(repo),
            _ => Err(errors),
        }
    }
}

impl Kudo {
    pub fn load(input: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(object) = as_object(input, &mut errors) else {
            return Err(errors);
        };

        let repo = load_repo_fields(object, &mut errors);
        let user_id = required_email(object, "user_id", &mut errors);

        match (repo, user_id) {
            (Some(repo), Some(user_id)) if errors.is_empty() => Ok(Kudo { user_id, repo }),
            _ => Err(errors),
        }
    }
}

fn as_object<'a>(input: &'a Value, errors: &mut ValidationErrors) -> Option<&'a Map<String, Value>> {
    let object = input.as_object();
    if object.is_none() {
        errors.add(SCHEMA_KEY, INVALID_INPUT);
    }
    object
}

/// Shared by both resources. Returns `None` only when `repo_id` is unusable;
/// errors on optional fields are recorded but do not block the result.
fn load_repo_fields(object: &Map<String, Value>, errors: &mut ValidationErrors) -> Option<GithubRepo> {
    let repo_id = required_integer(object, "repo_id", errors);
    let repo_name = optional_string(object, "repo_name", errors);
    let language = optional_string(object, "language", errors);
    let description = optional_string(object, "description", errors);
    let repo_url = optional_url(object, "repo_url", errors);

    Some(GithubRepo {
        repo_id: repo_id?,
        repo_name,
        language,
        description,
        repo_url,
    })
}

fn required_integer(object: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<i64> {
    let value = match object.get(field) {
        None => {
            errors.add(field, MISSING);
            return None;
        }
        Some(Value::Null) => {
            errors.add(field, NULL);
            return None;
        }
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    if parsed.is_none() {
        errors.add(field, INVALID_INTEGER);
    }
    parsed
}

fn optional_string(object: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    match object.get(field)? {
        Value::String(text) => Some(text.clone()),
        Value::Null => {
            errors.add(field, NULL);
            None
        }
        _ => {
            errors.add(field, INVALID_STRING);
            None
        }
    }
}

fn optional_url(object: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    let text = optional_string(object, field, errors)?;
    if is_valid_url(&text) {
        Some(text)
    } else {
        errors.add(field, INVALID_URL);
        None
    }
}

fn required_email(object: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    if !object.contains_key(field) {
        errors.add(field, MISSING);
        return None;
    }
    let text = optional_string(object, field, errors)?;
    if is_valid_email(&text) {
        Some(text)
    } else {
        errors.add(field, INVALID_EMAIL);
        None
    }
}

/// Absolute http(s)/ftp(s) URL with a host.
pub fn is_valid_url(text: &str) -> bool {
    if text.trim() != text {
        return false;
    }
    match Url::parse(text) {
        Ok(url) => URL_SCHEMES.contains(&url.scheme()) && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Syntax check from `validator`, plus a dotted domain ending in an
/// alphabetic TLD of two or more letters.
pub fn is_valid_email(text: &str) -> bool {
    if !text.validate_email() {
        return false;
    }
    let Some((_, domain)) = text.rsplit_once('@') else {
        return false;
    };
    match domain.rsplit_once('.') {
        Some((rest, tld)) => !rest.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_repo_is_valid() {
        let repo = GithubRepo::load(&json!({ "repo_id": 42 })).unwrap();
        assert_eq!(repo.repo_id, 42);
        assert_eq!(repo.repo_name, None);
        assert_eq!(repo.repo_url, None);
    }

    #[test]
    fn full_repo_is_valid() {
        let repo = GithubRepo::load(&json!({
            "repo_id": 10270250,
            "repo_name": "react",
            "language": "JavaScript",
            "description": "A declarative UI library",
            "repo_url": "https://github.com/facebook/react",
        }))
        .unwrap();

        assert_eq!(repo.repo_name.as_deref(), Some("react"));
        assert_eq!(repo.repo_url.as_deref(), Some("https://github.com/facebook/react"));
    }

    #[test]
    fn valid_repo_ids_produce_no_errors() {
        for id in [i64::MIN, -1, 0, 1, 7, 123_456_789, i64::MAX] {
            assert!(GithubRepo::load(&json!({ "repo_id": id })).is_ok(), "repo_id {id}");
        }
    }

    #[test]
    fn integral_forms_are_accepted() {
        assert_eq!(GithubRepo::load(&json!({ "repo_id": "17" })).unwrap().repo_id, 17);
        assert_eq!(GithubRepo::load(&json!({ "repo_id": 17.0 })).unwrap().repo_id, 17);
    }

    #[test]
    fn missing_repo_id_is_keyed() {
        let payloads = [
            json!({}),
            json!({ "repo_name": "tokio" }),
            json!({ "repo_url": "https://github.com/tokio-rs/tokio", "language": "Rust" }),
        ];
        for payload in payloads {
            let errors = GithubRepo::load(&payload).unwrap_err();
            assert_eq!(errors.get("repo_id"), Some(&[MISSING.to_string()][..]));
        }
    }

    #[test]
    fn non_integer_repo_id_is_rejected() {
        for bad in [json!("abc"), json!(4.5), json!(true), json!([1]), json!({})] {
            let errors = GithubRepo::load(&json!({ "repo_id": bad })).unwrap_err();
            assert_eq!(errors.get("repo_id"), Some(&[INVALID_INTEGER.to_string()][..]));
        }
    }

    #[test]
    fn null_fields_are_rejected() {
        let errors = GithubRepo::load(&json!({ "repo_id": null, "language": null })).unwrap_err();
        assert_eq!(errors.get("repo_id"), Some(&[NULL.to_string()][..]));
        assert_eq!(errors.get("language"), Some(&[NULL.to_string()][..]));
    }

    #[test]
    fn malformed_urls_are_keyed() {
        for bad in ["not-a-url", "github.com/rust-lang/rust", "mailto:a@b.co", "http://", " https://x.io"] {
            let errors = GithubRepo::load(&json!({ "repo_id": 1, "repo_url": bad })).unwrap_err();
            assert!(errors.contains("repo_url"), "{bad} should be rejected");
            assert!(!errors.contains("repo_id"));
        }
    }

    #[test]
    fn non_string_fields_are_rejected() {
        let errors = GithubRepo::load(&json!({ "repo_id": 1, "repo_name": 5, "description": [] })).unwrap_err();
        assert_eq!(errors.get("repo_name"), Some(&[INVALID_STRING.to_string()][..]));
        assert_eq!(errors.get("description"), Some(&[INVALID_STRING.to_string()][..]));
    }

    #[test]
    fn all_field_errors_are_collected() {
        let errors = GithubRepo::load(&json!({ "repo_url": "nope", "language": 3 })).unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, ["language", "repo_id", "repo_url"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        assert!(GithubRepo::load(&json!({ "repo_id": 3, "stars": 100 })).is_ok());
    }

    #[test]
    fn non_object_input_is_rejected() {
        for bad in [json!([]), json!(42), json!("repo"), Value::Null] {
            let errors = GithubRepo::load(&bad).unwrap_err();
            assert_eq!(errors.get(SCHEMA_KEY), Some(&[INVALID_INPUT.to_string()][..]));
        }
    }

    #[test]
    fn errors_serialize_as_field_map() {
        let errors = GithubRepo::load(&json!({ "repo_id": 42, "repo_url": "not-a-url" })).unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "repo_url": ["Not a valid URL."] })
        );
    }

    #[test]
    fn kudo_requires_email() {
        let errors = Kudo::load(&json!({ "repo_id": 1 })).unwrap_err();
        assert_eq!(errors.get("user_id"), Some(&[MISSING.to_string()][..]));

        let errors = Kudo::load(&json!({ "repo_id": 1, "user_id": "not-an-email" })).unwrap_err();
        assert_eq!(errors.get("user_id"), Some(&[INVALID_EMAIL.to_string()][..]));

        let errors = Kudo::load(&json!({ "repo_id": 1, "user_id": null })).unwrap_err();
        assert_eq!(errors.get("user_id"), Some(&[NULL.to_string()][..]));
    }

    #[test]
    fn kudo_keeps_repo_rules() {
        let errors = Kudo::load(&json!({ "user_id": "dev@example.com", "repo_url": "x" })).unwrap_err();
        assert!(errors.contains("repo_id"));
        assert!(errors.contains("repo_url"));
        assert!(!errors.contains("user_id"));
    }

    #[test]
    fn kudo_serializes_flat() {
        let kudo = Kudo::load(&json!({
            "repo_id": 5,
            "repo_name": "serde",
            "user_id": "dev@example.com",
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&kudo).unwrap(),
            json!({ "user_id": "dev@example.com", "repo_id": 5, "repo_name": "serde" })
        );
    }

    #[test]
    fn email_rules() {
        for good in ["a@b.co", "first.last@example.com", "x+tag@mail.example.org", "o'neil@sub-domain.io"] {
            assert!(is_valid_email(good), "{good}");
        }
        for bad in [
            "",
            "plain",
            "@example.com",
            "user@",
            "user@localhost",
            "a@@b.com",
            "a@b@c.com",
            "user@-bad.com",
            "user@example.c",
            "user@example.123",
            "user@[127.0.0.1]",
            "us er@example.com",
        ] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }
}
