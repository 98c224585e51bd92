//! Email templates.
//!
//! Two shapes: the emergency alert (specialized subject and customer
//! details) and the generic notification (title + message). Both produce
//! an HTML body with a plain-text alternative.

use crate::message::EmailMessage;

/// Details rendered into an emergency alert email.
#[derive(Debug, Clone)]
pub struct EmergencyAlert<'a> {
    /// Recipient display name.
    pub recipient_name: &'a str,
    /// Submitting customer's display name.
    pub customer_name: &'a str,
    /// Submitting customer's phone, if known.
    pub customer_phone: Option<&'a str>,
    /// Care address.
    pub address: &'a str,
    /// Free-text notes from the request.
    pub notes: Option<&'a str>,
    /// Base URL of the web client.
    pub dashboard_url: &'a str,
}

/// Render an emergency alert email for one recipient.
pub fn emergency_alert(to: &str, alert: &EmergencyAlert<'_>) -> EmailMessage {
    let subject = format!(
        "URGENT: Emergency Care Request from {}",
        alert.customer_name
    );

    let phone_html = alert
        .customer_phone
        .map(|p| format!("<p><strong>Phone:</strong> {p}</p>"))
        .unwrap_or_default();
    let notes_html = alert
        .notes
        .map(|n| format!("<p><strong>Notes:</strong> {n}</p>"))
        .unwrap_or_default();

    let html = format!(
        "<html><body>\
         <h1>Emergency Care Request</h1>\
         <p>Dear {recipient},</p>\
         <p><strong>An emergency care request has been submitted and requires \
         immediate attention.</strong></p>\
         <h3>Customer Details:</h3>\
         <p><strong>Name:</strong> {customer}</p>\
         {phone}\
         <p><strong>Address:</strong> {address}</p>\
         {notes}\
         <p>Please respond to this emergency request as soon as possible.</p>\
         <p><a href=\"{url}/dashboard\">View Dashboard</a></p>\
         </body></html>",
        recipient = alert.recipient_name,
        customer = alert.customer_name,
        phone = phone_html,
        address = alert.address,
        notes = notes_html,
        url = alert.dashboard_url,
    );

    let phone_text = alert
        .customer_phone
        .map(|p| format!("- Phone: {p}\n"))
        .unwrap_or_default();
    let notes_text = alert
        .notes
        .map(|n| format!("- Notes: {n}\n"))
        .unwrap_or_default();

    let text = format!(
        "URGENT: Emergency Care Request\n\n\
         Dear {recipient},\n\n\
         An emergency care request has been submitted and requires immediate attention.\n\n\
         Customer Details:\n\
         - Name: {customer}\n\
         {phone}\
         - Address: {address}\n\
         {notes}\n\
         Please respond to this emergency request as soon as possible.\n\n\
         Visit your dashboard: {url}/dashboard\n",
        recipient = alert.recipient_name,
        customer = alert.customer_name,
        phone = phone_text,
        address = alert.address,
        notes = notes_text,
        url = alert.dashboard_url,
    );

    EmailMessage::to_one(to, subject, html, Some(text))
}

/// Render a generic notification email for one recipient.
pub fn generic_notification(
    to: &str,
    title: &str,
    message: &str,
    dashboard_url: &str,
) -> EmailMessage {
    let html = format!(
        "<h2>{title}</h2>\
         <p>{message}</p>\
         <p><a href=\"{dashboard_url}/dashboard\">View Dashboard</a></p>"
    );
    let text =
        format!("{title}\n\n{message}\n\nView Dashboard: {dashboard_url}/dashboard");

    EmailMessage::to_one(to, title, html, Some(text))
}
