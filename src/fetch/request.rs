use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

use crate::error::{AppError, Context};

use super::FetchResult;

#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub url: String,
    pub headers: HeaderMap,
}

/// Render `template` with `replacements` and attach `headers`.
pub fn prepare_request(
    template: &str,
    replacements: &[(&str, &str)],
    headers: &HeaderMap,
) -> FetchResult<PreparedRequest> {
    let replacements: HashMap<&str, &str> = replacements.iter().copied().collect();
    let url = render_template(template, &replacements)?;

    Url::parse(&url).with_context(|| format!("Invalid request URL: {}", url))?;

    Ok(PreparedRequest {
        url,
        headers: headers.clone(),
    })
}

pub fn expand_env_vars(value: &str) -> FetchResult<String> {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == '}' {
                    closed = true;
                    break;
                }
                name.push(next);
            }

            if name.is_empty() {
                return Err(AppError::message(
                    "Encountered empty environment placeholder in header",
                ));
            }

            if !closed {
                return Err(AppError::message(
                    "Unterminated environment placeholder in header",
                ));
            }

            let value = std::env::var(&name).with_context(|| {
                format!(
                    "Environment variable {} required by request header is not set",
                    name
                )
            })?;
            result.push_str(&value);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

fn render_template(template: &str, replacements: &HashMap<&str, &str>) -> FetchResult<String> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '{' {
            let mut key = String::new();
            let mut closed = false;
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == '}' {
                    closed = true;
                    break;
                }
                key.push(next);
            }

            if !closed {
                return Err(AppError::message(format!(
                    "Unterminated placeholder in template: {{{key}"
                )));
            }

            if key.is_empty() {
                return Err(AppError::message(
                    "Encountered empty placeholder `{}` in template",
                ));
            }

            let value = replacements.get(key.as_str()).ok_or_else(|| {
                AppError::message(format!(
                    "No replacement provided for placeholder `{}` in template",
                    key
                ))
            })?;
            result.push_str(value);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Build the shared header map once per batch; `${VAR}` values are expanded from the environment.
pub fn build_headers(headers: &HashMap<String, String>) -> FetchResult<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .with_context(|| format!("Invalid header name: {}", key))?;
        let expanded = expand_env_vars(value)?;
        let header_value = HeaderValue::from_str(&expanded)
            .with_context(|| format!("Invalid header value for {}", key))?;
        map.insert(name, header_value);
    }
    Ok(map)
}
