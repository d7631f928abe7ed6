//! WhatsApp hand-off for orders and product enquiries
//!
//! Builds the plain-text order summary and the `wa.me` deep links. The
//! message is newline-delimited and percent-encoded as a whole before it is
//! placed in the link.

use super::order_builder::CatalogState;
use crate::app::models::{CustomerDetails, StoreProduct};
use crate::constants::{CURRENCY, WHATSAPP_BASE_URL};
use crate::{Error, Result};

/// Order message settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessageSettings {
    /// Shop name in the message header
    pub shop_name: String,

    /// Weight of one order unit in grams
    pub grams_per_unit: u32,

    /// Recipient number; non-digits are dropped when building the link
    pub whatsapp_number: String,
}

/// A composed order ready to hand off
#[derive(Debug, Clone, PartialEq)]
pub struct OrderHandoff {
    pub message: String,
    pub url: String,
    pub total: f64,
    pub item_count: usize,
}

/// Compose the order message and WhatsApp link
///
/// Fails when the customer name is blank or nothing is selected; in both
/// cases no message is built.
pub fn build_order_handoff(
    state: &CatalogState,
    customer: &CustomerDetails,
    settings: &OrderMessageSettings,
) -> Result<OrderHandoff> {
    let summary = state.summary();
    if summary.is_empty() {
        return Err(Error::validation(
            "order",
            "Please select at least one product before sending your order.",
        ));
    }
    customer.validate()?;

    let mut lines = vec![format!("Name: {}", customer.name)];
    if let Some(district) = &customer.district {
        lines.push(format!("District: {}", district));
    }
    if let Some(thana) = &customer.thana {
        lines.push(format!("Thana: {}", thana));
    }
    if let Some(address) = &customer.address {
        lines.push(format!("Address: {}", address));
    }

    lines.push(String::new());
    lines.push(format!("*Order from {}*", settings.shop_name));
    lines.push(String::new());
    for line in &summary.lines {
        lines.push(format!(
            "• {}: {} × {}gm = {} gm",
            line.name,
            line.quantity,
            settings.grams_per_unit,
            line.grams(settings.grams_per_unit)
        ));
    }
    lines.push(String::new());
    lines.push(format!("*Total: {:.2} {}*", summary.total, CURRENCY));
    lines.push(String::new());
    lines.push(format!("_Order generated via {}_", customer.name));
    let message = lines.join("\n");

    let url = whatsapp_link(&settings.whatsapp_number, &message);

    Ok(OrderHandoff {
        message,
        url,
        total: summary.total,
        item_count: summary.lines.len(),
    })
}

/// Enquiry text for a single showcase product
pub fn enquiry_message(product: &StoreProduct) -> String {
    format!(
        "Hi, I'm interested in {} (Product ID: {})",
        product.name, product.id
    )
}

/// WhatsApp link asking about a single showcase product
pub fn enquiry_link(number: &str, product: &StoreProduct) -> String {
    whatsapp_link(number, &enquiry_message(product))
}

/// `https://wa.me/<digits>?text=<encoded>`
pub fn whatsapp_link(number: &str, text: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!(
        "{}/{}?text={}",
        WHATSAPP_BASE_URL,
        digits,
        urlencoding::encode(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{CatalogItem, SelectionMap};

    fn settings() -> OrderMessageSettings {
        OrderMessageSettings {
            shop_name: "Nuts&SpicesBunker".to_string(),
            grams_per_unit: 50,
            whatsapp_number: "+8801673064324".to_string(),
        }
    }

    fn state_with(quantities: &[(&str, u32)]) -> CatalogState {
        let items = vec![
            CatalogItem::new(1, "Almonds", 120.0).unwrap(),
            CatalogItem::new(2, "Cashew", 95.5).unwrap(),
            CatalogItem::new(3, "Raisins", 40.0).unwrap(),
        ];
        let selections: SelectionMap = quantities
            .iter()
            .map(|(name, qty)| (name.to_string(), *qty))
            .collect();
        CatalogState::from_items(items, &selections)
    }

    #[test]
    fn test_full_message_format() {
        let state = state_with(&[("Almonds", 2), ("Raisins", 1)]);
        let customer = CustomerDetails::new("Nadia", Some("Dhaka"), None, Some("Road 5, Mirpur"));

        let handoff = build_order_handoff(&state, &customer, &settings()).unwrap();

        let expected = "Name: Nadia\n\
                        District: Dhaka\n\
                        Address: Road 5, Mirpur\n\
                        \n\
                        *Order from Nuts&SpicesBunker*\n\
                        \n\
                        • Almonds: 2 × 50gm = 100 gm\n\
                        • Raisins: 1 × 50gm = 50 gm\n\
                        \n\
                        *Total: 280.00 BDT*\n\
                        \n\
                        _Order generated via Nadia_";
        assert_eq!(handoff.message, expected);
        assert_eq!(handoff.total, 280.0);
        assert_eq!(handoff.item_count, 2);
    }

    #[test]
    fn test_optional_lines_keep_their_order() {
        let state = state_with(&[("Cashew", 1)]);
        let customer = CustomerDetails::new("Rafi", None, Some("Mirpur"), Some("House 12"));

        let handoff = build_order_handoff(&state, &customer, &settings()).unwrap();

        assert!(
            handoff
                .message
                .starts_with("Name: Rafi\nThana: Mirpur\nAddress: House 12\n\n*Order from")
        );
        assert!(handoff.message.ends_with("\n\n_Order generated via Rafi_"));
        assert!(!handoff.message.ends_with('\n'));
    }

    #[test]
    fn test_url_is_encoded() {
        let state = state_with(&[("Cashew", 1)]);
        let customer = CustomerDetails::new("Rafi", None, None, None);

        let handoff = build_order_handoff(&state, &customer, &settings()).unwrap();

        assert!(handoff.url.starts_with("https://wa.me/8801673064324?text="));
        let encoded = handoff.url.split("text=").nth(1).unwrap();
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('\n'));
        assert!(!encoded.contains('&'));
        assert_eq!(urlencoding::decode(encoded).unwrap(), handoff.message);
    }

    #[test]
    fn test_empty_order_is_rejected() {
        let state = state_with(&[]);
        let customer = CustomerDetails::new("Nadia", None, None, None);
        let err = build_order_handoff(&state, &customer, &settings()).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "order"));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let state = state_with(&[("Almonds", 1)]);
        let customer = CustomerDetails::new("  ", Some("Dhaka"), None, None);
        let err = build_order_handoff(&state, &customer, &settings()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid name: Please enter your name.");
    }

    #[test]
    fn test_enquiry_link() {
        let product = StoreProduct::new(7, "Dates & Figs", 900, "0% off", 0, "", "x").unwrap();
        assert_eq!(
            enquiry_message(&product),
            "Hi, I'm interested in Dates & Figs (Product ID: 7)"
        );
        let link = enquiry_link("8801673064324", &product);
        assert!(link.starts_with("https://wa.me/8801673064324?text=Hi%2C%20I"));
        assert!(link.contains("Dates%20%26%20Figs"));
    }
}
