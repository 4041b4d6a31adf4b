//! Confirmation sent to the visitor.

use super::escape_html;
use crate::company::{CompanyConfig, Host};
use crate::domain::VisitorFormData;
use crate::models::EmailMessage;

pub const VISITOR_CONFIRMATION_SUBJECT: &str = "Visit Confirmation";

/// Build the visitor's confirmation email.
pub fn visitor_confirmation(
    form: &VisitorFormData,
    host: &Host,
    company: &CompanyConfig,
) -> EmailMessage {
    let text = format!(
        "Hi {}, your visit to see {} has been confirmed. Please bring a valid ID for verification.",
        form.visitor_name, host.name
    );

    EmailMessage::new(
        form.visitor_email.clone(),
        VISITOR_CONFIRMATION_SUBJECT,
        text,
        render_html(form, host, company),
    )
}

fn render_html(form: &VisitorFormData, host: &Host, company: &CompanyConfig) -> String {
    let primary = escape_html(&company.colors.primary);
    let secondary = escape_html(&company.colors.secondary);
    let company_name = escape_html(&company.name);
    let logo = escape_html(&company.logo);
    let visitor_name = escape_html(&form.visitor_name);
    let host_name = escape_html(&host.name);
    let host_title = escape_html(&host.title);
    let purpose = escape_html(&form.purpose_of_visit);
    let contact = escape_html(&form.full_phone_number());

    format!(
        r#"<div style="font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; max-width: 600px; margin: 0 auto; background-color: #ffffff;">
  <div style="background: linear-gradient(135deg, {primary}, {secondary}); padding: 20px; text-align: center; border-radius: 12px 12px 0 0;">
    <img src="{logo}" alt="{company_name}" style="max-height: 48px; margin-bottom: 10px;">
    <h1 style="color: #ffffff; margin: 0; font-size: 24px; font-weight: 600;">Visit Confirmation</h1>
    <p style="color: rgba(255,255,255,0.9); margin: 10px 0 0 0; font-size: 14px;">Your visit has been successfully registered</p>
  </div>
  <div style="padding: 20px;">
    <p style="color: #374151; font-size: 16px; margin-bottom: 15px;">Hi <strong style="color: {primary};">{visitor_name}</strong>,</p>
    <p style="color: #374151; font-size: 14px; margin-bottom: 20px;">Thank you for registering your visit to <strong>{company_name}</strong>. Your host has been notified.</p>
    <div style="background: #f8fafc; border: 1px solid #e5e7eb; border-radius: 8px; padding: 15px; margin: 15px 0;">
      <h3 style="color: {primary}; margin: 0 0 10px 0; font-size: 16px;">Visit Details</h3>
      <p style="margin: 5px 0; font-size: 14px;"><strong>Host:</strong> {host_name}, {host_title}</p>
      <p style="margin: 5px 0; font-size: 14px;"><strong>Purpose:</strong> {purpose}</p>
      <p style="margin: 5px 0; font-size: 14px;"><strong>Contact:</strong> {contact}</p>
    </div>
    <div style="background-color: #fef3c7; border: 1px solid #fbbf24; border-radius: 6px; padding: 10px; margin: 15px 0;">
      <p style="color: #92400e; margin: 0; font-size: 12px;"><strong>Important:</strong> Please bring a valid ID for verification.</p>
    </div>
  </div>
  <div style="background-color: #f9fafb; padding: 15px; text-align: center; border-radius: 0 0 12px 12px;">
    <p style="color: #6b7280; margin: 0; font-size: 12px;">Best regards, <strong style="color: {primary};">{company_name} Team</strong></p>
  </div>
</div>
"#
    )
}
