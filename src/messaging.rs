//! WhatsApp deep links for contacting members.
//!
//! Links are built client-side only (`https://wa.me/...`); nothing is sent
//! from the server.

use chrono::NaiveDate;

/// Colombian country code; local numbers are 10 digits.
const COUNTRY_CODE: &str = "57";

/// Normalize a raw phone number into a WhatsApp target.
///
/// 10-digit local numbers get the country code prefixed; 12-digit numbers
/// already carrying it pass through. Anything else yields no target rather
/// than a knowingly broken link.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        Some(format!("{COUNTRY_CODE}{digits}"))
    } else if digits.len() == 12 && digits.starts_with(COUNTRY_CODE) {
        Some(digits)
    } else {
        None
    }
}

/// Deep link opening a WhatsApp conversation with `message` prefilled.
pub fn whatsapp_link(phone: &str, message: &str) -> Option<String> {
    let number = normalize_phone(phone)?;
    if message.is_empty() {
        Some(format!("https://wa.me/{number}"))
    } else {
        Some(format!(
            "https://wa.me/{number}?text={}",
            urlencoding::encode(message)
        ))
    }
}

/// `d/m/yyyy`, the format members see in the messages.
fn format_date(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

pub fn greeting_message(gym_name: &str, first_name: &str) -> String {
    format!("Hola {}, te contacto desde {}.", first_name.trim(), gym_name)
}

pub fn expiring_message(gym_name: &str, first_name: &str, ends_on: NaiveDate) -> String {
    format!(
        "Hola {}, tu membresía de {} vence el {}. Te esperamos para renovar.",
        first_name.trim(),
        gym_name,
        format_date(ends_on)
    )
}

pub fn expired_message(gym_name: &str, first_name: &str, ended_on: NaiveDate) -> String {
    format!(
        "Hola {}, tu membresía de {} venció el {}. Pásate a renovar cuando puedas.",
        first_name.trim(),
        gym_name,
        format_date(ended_on)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_numbers_get_country_code() {
        assert_eq!(normalize_phone("3001112222").as_deref(), Some("573001112222"));
        assert_eq!(normalize_phone("300 111 2222").as_deref(), Some("573001112222"));
    }

    #[test]
    fn prefixed_numbers_pass_through() {
        assert_eq!(normalize_phone("573001112222").as_deref(), Some("573001112222"));
        assert_eq!(normalize_phone("+57 300 111 2222").as_deref(), Some("573001112222"));
    }

    #[test]
    fn unusable_numbers_yield_no_link() {
        assert_eq!(normalize_phone("123"), None);
        assert_eq!(normalize_phone(""), None);
        assert_eq!(whatsapp_link("123", "hola"), None);
    }

    #[test]
    fn link_encodes_the_message() {
        let link = whatsapp_link("3001112222", "Hola Ana, te contacto desde Fuerza Delta.").unwrap();
        assert!(link.starts_with("https://wa.me/573001112222?text="));
        assert!(link.contains("Hola%20Ana"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn link_without_message_has_no_query() {
        assert_eq!(
            whatsapp_link("3001112222", "").as_deref(),
            Some("https://wa.me/573001112222")
        );
    }

    #[test]
    fn messages_carry_the_gym_and_date() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        assert_eq!(
            expiring_message("Fuerza Delta", " Ana ", d),
            "Hola Ana, tu membresía de Fuerza Delta vence el 20/1/2026. Te esperamos para renovar."
        );
        assert_eq!(
            expired_message("Fuerza Delta", "Ana", d),
            "Hola Ana, tu membresía de Fuerza Delta venció el 20/1/2026. Pásate a renovar cuando puedas."
        );
        assert_eq!(
            greeting_message("Fuerza Delta", "Ana"),
            "Hola Ana, te contacto desde Fuerza Delta."
        );
    }
}
