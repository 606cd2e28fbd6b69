//! Response classification.
//!
//! The portal answers validation calls with free-form HTML fragments, not
//! data. This module is the only place that inspects that text: it decides
//! validity, extracts the service label and holder name, and pulls out the
//! rejection message when there is one. It performs no network or session
//! work and is a pure function of the body, so a format change upstream
//! requires changing exactly this module.
//!
//! The validity rule is closed-world: a response is a rejection if and only
//! if it contains the portal's rejection marker. Anything else, including an
//! unexpected page (maintenance, login redirect HTML), classifies as an
//! acceptance. That mirrors the portal's observed behavior; callers that
//! need more caution should inspect `raw_body`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Literal substring the portal uses to flag a rejected voucher.
/// Matched case-insensitively anywhere in the body.
static REJECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)no es posible validar").expect("rejection regex"));

/// Markup tags, stripped from the service line.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

/// Holder label followed by text up to the next tag or line break.
static CUSTOMER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Titular del BonoVIP:\s*([^<\r\n]+)").expect("customer regex"));

/// Rejection text: from the marker through the next sentence terminator,
/// plus any trailing text up to the next tag.
static REJECTION_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)no es posible validar.*?\.[^<]*").expect("rejection text regex"));

/// Shown when a rejection carries no extractable explanation.
const GENERIC_REJECTION: &str = "No es posible validar este BonoVip.";

/// Structured result of classifying one raw portal response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// `true` unless the body contains the rejection marker.
    pub valid: bool,

    /// Best-effort label for the validated service (may be empty).
    pub service: String,

    /// Best-effort holder name (may be empty).
    pub customer: String,

    /// Human-readable rejection text; present only when `valid` is `false`.
    pub error_message: Option<String>,

    /// The untouched response body, retained for auditing.
    #[serde(rename = "raw_response")]
    pub raw_body: String,
}

/// Classify a raw response body into a [`ValidationOutcome`].
///
/// Deterministic and idempotent: the same body always yields the same
/// outcome.
pub fn classify(raw: &str) -> ValidationOutcome {
    let valid = !REJECTION_RE.is_match(raw);

    // Service: first non-empty trimmed line, with markup stripped.
    let service = raw
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| TAG_RE.replace_all(line, "").trim().to_owned())
        .unwrap_or_default();

    let customer = CUSTOMER_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .unwrap_or_default();

    let error_message = (!valid).then(|| {
        REJECTION_TEXT_RE
            .find(raw)
            .map_or_else(|| GENERIC_REJECTION.to_owned(), |m| m.as_str().trim().to_owned())
    });

    ValidationOutcome {
        valid,
        service,
        customer,
        error_message,
        raw_body: raw.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rejection_marker_means_invalid_with_full_sentence() {
        let body = "No es posible validar el bono. Motivo: vencido.";
        let outcome = classify(body);

        assert!(!outcome.valid);
        assert_eq!(
            outcome.error_message.as_deref(),
            Some("No es posible validar el bono. Motivo: vencido.")
        );
        assert_eq!(outcome.raw_body, body);
    }

    #[test]
    fn acceptance_body_extracts_service_and_customer() {
        let body = "Servicio: Cena Show\nTitular del BonoVIP: Juan Perez";
        let outcome = classify(body);

        assert!(outcome.valid);
        assert_eq!(outcome.service, "Servicio: Cena Show");
        assert_eq!(outcome.customer, "Juan Perez");
        assert_eq!(outcome.error_message, None);
    }

    #[test]
    fn marker_match_is_case_insensitive() {
        let outcome = classify("NO ES POSIBLE VALIDAR este bono.");
        assert!(!outcome.valid);
    }

    #[test]
    fn marker_match_is_position_insensitive() {
        let outcome = classify("<div>Resultado</div>\nLo sentimos: no es posible validar.");
        assert!(!outcome.valid);
    }

    #[test]
    fn rejection_without_sentence_terminator_falls_back_to_generic_message() {
        let outcome = classify("No es posible validar");
        assert!(!outcome.valid);
        assert_eq!(
            outcome.error_message.as_deref(),
            Some("No es posible validar este BonoVip.")
        );
    }

    #[test]
    fn rejection_text_stops_at_markup() {
        let body = "<p>No es posible validar el bono. Ya fue canjeado</p><a href=\"/\">volver</a>";
        let outcome = classify(body);
        assert_eq!(
            outcome.error_message.as_deref(),
            Some("No es posible validar el bono. Ya fue canjeado")
        );
    }

    #[test]
    fn service_line_strips_markup() {
        let body = "  <div class=\"res\">Cena Show para dos</div>  \nTitular del BonoVIP: Ana";
        let outcome = classify(body);
        assert_eq!(outcome.service, "Cena Show para dos");
        assert_eq!(outcome.customer, "Ana");
    }

    #[test]
    fn customer_capture_stops_at_tag_or_line_break() {
        let body = "Bono\nTitular del BonoVIP: Juan Perez<br>Fecha: hoy";
        assert_eq!(classify(body).customer, "Juan Perez");

        let body = "Bono\nTitular del BonoVIP: Maria Lopez\nFecha: hoy";
        assert_eq!(classify(body).customer, "Maria Lopez");
    }

    #[test]
    fn empty_body_is_accepted_with_empty_fields() {
        // Closed-world heuristic: no marker, no rejection.
        let outcome = classify("");
        assert!(outcome.valid);
        assert_eq!(outcome.service, "");
        assert_eq!(outcome.customer, "");
        assert_eq!(outcome.error_message, None);
    }

    #[test]
    fn classification_is_idempotent() {
        let body = "Servicio: Cena Show\nTitular del BonoVIP: Juan Perez";
        assert_eq!(classify(body), classify(body));
    }

    #[test]
    fn missing_customer_label_leaves_customer_empty() {
        let outcome = classify("Servicio: Cena Show");
        assert!(outcome.valid);
        assert_eq!(outcome.customer, "");
    }
}
