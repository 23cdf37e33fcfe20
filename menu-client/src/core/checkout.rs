//! Order hand-off: plain-text order message and WhatsApp deep link
//!
//! There is no order backend; checkout renders the cart into a message the
//! customer sends to the establishment over WhatsApp.

use shared::models::{CartLine, ServiceTag};
use shared::{AppError, AppResult, ErrorCode};
use rust_decimal::Decimal;
use std::fmt::Write;

/// What the customer filled in before handing off the order
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub establishment_name: String,
    pub service: ServiceTag,
    pub customer_name: Option<String>,
    pub note: Option<String>,
}

/// Two-decimal euro rendering used everywhere an amount is shown
pub fn format_price(amount: Decimal) -> String {
    format!("{:.2}€", amount)
}

fn service_label(service: ServiceTag) -> &'static str {
    match service {
        ServiceTag::DineIn => "Dine-in",
        ServiceTag::Takeout => "Takeout",
        ServiceTag::Delivery => "Delivery",
        ServiceTag::Reservation => "Reservation",
    }
}

/// Render the plain-text order message for a cart.
///
/// An empty cart is an error; checkout must not hand off nothing.
pub fn order_message(request: &OrderRequest, lines: &[CartLine]) -> AppResult<String> {
    if lines.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::CartEmpty,
            "cannot place an order with an empty cart",
        ));
    }

    let mut out = String::new();
    let _ = writeln!(out, "*New order — {}*", request.establishment_name);
    let _ = writeln!(
        out,
        "{} · {}",
        chrono::Local::now().format("%d/%m/%Y %H:%M"),
        service_label(request.service)
    );
    if let Some(name) = request.customer_name.as_deref().filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "Customer: {name}");
    }
    out.push('\n');

    let mut total = Decimal::ZERO;
    for line in lines {
        total += line.line_total();
        let _ = writeln!(
            out,
            "{}x {} — {}",
            line.quantity,
            line.name,
            format_price(line.line_total())
        );
        for additional in &line.additionals {
            let _ = writeln!(
                out,
                "  + {} ({})",
                additional.name,
                format_price(additional.price)
            );
        }
        if let Some(note) = line.note.as_deref().filter(|n| !n.is_empty()) {
            let _ = writeln!(out, "  note: {note}");
        }
    }

    out.push('\n');
    if let Some(note) = request.note.as_deref().filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "Order note: {note}");
    }
    let _ = writeln!(out, "*Total: {}*", format_price(total));
    Ok(out)
}

/// Build the `wa.me` link carrying the order message.
///
/// The phone number is reduced to its digits; formatting characters the
/// owner typed (spaces, dashes, a leading `+`) are dropped.
pub fn whatsapp_link(phone: &str, message: &str) -> AppResult<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(AppError::validation("establishment has no contact phone"));
    }
    Ok(format!(
        "https://wa.me/{}?text={}",
        digits,
        urlencoding::encode(message)
    ))
}
