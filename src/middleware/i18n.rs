// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

const DEFAULT_LANG: &str = "en";

/// Idioma preferido do cliente (só a subtag primária, minúscula: "pt-BR" -> "pt").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    fn from_header(value: Option<&str>) -> Self {
        let lang = value
            .and_then(|header_str| accept_language::parse(header_str).into_iter().next())
            .and_then(|tag| tag.split('-').next().map(str::to_ascii_lowercase))
            .filter(|lang| !lang.is_empty() && lang != "*")
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        Ok(Locale::from_header(header_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_primary_subtag_of_the_preferred_language() {
        assert_eq!(Locale::from_header(Some("pt-BR,pt;q=0.9,en;q=0.8")).0, "pt");
    }

    #[test]
    fn honours_quality_ordering() {
        assert_eq!(Locale::from_header(Some("en;q=0.5, pt-BR")).0, "pt");
    }

    #[test]
    fn missing_or_wildcard_header_defaults_to_english() {
        assert_eq!(Locale::from_header(None).0, "en");
        assert_eq!(Locale::from_header(Some("*")).0, "en");
    }
}
