// src/common/i18n.rs

use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_LANG: &str = "en";

// (chave, inglês, português)
const MESSAGES: &[(&str, &str, &str)] = &[
    (
        "validation_error",
        "One or more fields are invalid.",
        "Um ou mais campos são inválidos.",
    ),
    ("invalid_input", "Invalid input.", "Dados de entrada inválidos."),
    ("user_not_found", "User not found.", "Usuário não encontrado."),
    ("sale_not_found", "Sale not found.", "Venda não encontrada."),
    ("visit_not_found", "Visit not found.", "Visita não encontrada."),
    (
        "notification_not_found",
        "Notification not found.",
        "Notificação não encontrada.",
    ),
    (
        "empty_sale_update",
        "Provide a new stage or a new value.",
        "Informe uma nova etapa ou um novo valor.",
    ),
    (
        "scheduling_exhausted",
        "No slot found in the next {days} days.",
        "Nenhum horário livre nos próximos {days} dias.",
    ),
    (
        "visit_already_scheduled",
        "A visit is already scheduled for this sale.",
        "Já existe uma visita agendada para esta venda.",
    ),
    (
        "internal_error",
        "An unexpected error occurred.",
        "Ocorreu um erro inesperado.",
    ),
];

/// Tabelas de mensagens por idioma. Clonar é barato (Arc).
#[derive(Clone)]
pub struct I18nStore {
    messages: Arc<HashMap<&'static str, HashMap<&'static str, &'static str>>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut en = HashMap::new();
        let mut pt = HashMap::new();
        for (key, en_msg, pt_msg) in MESSAGES {
            en.insert(*key, *en_msg);
            pt.insert(*key, *pt_msg);
        }

        let mut messages = HashMap::new();
        messages.insert("en", en);
        messages.insert("pt", pt);

        Self { messages: Arc::new(messages) }
    }

    /// Idioma desconhecido cai no inglês; chave desconhecida volta como está.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|table| table.get(key)))
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    pub fn translate_with(&self, lang: &str, key: &str, params: &[(&str, String)]) -> String {
        params
            .iter()
            .fold(self.translate(lang, key), |msg, (name, value)| {
                msg.replace(&format!("{{{name}}}"), value)
            })
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_languages() {
        let store = I18nStore::new();
        assert_eq!(store.translate("pt", "sale_not_found"), "Venda não encontrada.");
        assert_eq!(store.translate("en", "sale_not_found"), "Sale not found.");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let store = I18nStore::new();
        assert_eq!(store.translate("de", "visit_not_found"), "Visit not found.");
    }

    #[test]
    fn unknown_key_is_returned_verbatim() {
        assert_eq!(I18nStore::new().translate("pt", "nope"), "nope");
    }

    #[test]
    fn interpolates_parameters() {
        let msg = I18nStore::new().translate_with(
            "pt",
            "scheduling_exhausted",
            &[("days", "30".to_string())],
        );
        assert_eq!(msg, "Nenhum horário livre nos próximos 30 dias.");
    }
}
